use maud::{Markup, html};

/// Placeholder shown once the session gate passes.
pub fn dashboard() -> Markup {
    html! {
        div class="flex items-center justify-center h-screen" {
            div id="dashboard" class="border border-black bg-white shadow-md p-8 flex flex-col" {
                h1 class="text-xl" { "Dashboard" }
                p { "You currently are logged in." }
            }
        }
    }
}
