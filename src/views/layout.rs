use maud::{DOCTYPE, Markup, html};

/// Wraps a view in the HTML document shell.
pub fn page(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
            }
            body {
                div { (body) }
            }
        }
    }
}
