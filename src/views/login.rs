use maud::{Markup, html};

/// Endpoint the credential form posts to. Served by an external collaborator.
pub const LOGIN_ACTION: &str = "/api/login";

const LOGIN_POSITIONING: &str = "flex items-center justify-center h-screen";
const LOGIN_FORM_STYLE: &str = "border border-black bg-white shadow-md p-8 flex flex-col w-64";
const INPUT_FIELD_STYLE: &str = "w-full border border-black bg-white px-2 py-1 mt-2";
const LOGIN_BUTTON_STYLE: &str = "border border-black bg-white text-black hover:bg-black \
    hover:text-white px-4 py-2 mt-4 transition-colors duration-200";

/// login_form
///
/// Credential Submission Surface: a status line and a `username`/`password` form posted to
/// `LOGIN_ACTION`. No client-side validation.
pub fn login_form(is_allowed: bool) -> Markup {
    let status = if is_allowed { "are" } else { "are not" };

    html! {
        div class=(LOGIN_POSITIONING) {
            div class=(LOGIN_FORM_STYLE) {
                p { "You currently " (status) " logged in." }
                form method="post" action=(LOGIN_ACTION) {
                    input class=(INPUT_FIELD_STYLE) type="text" name="username";
                    input class=(INPUT_FIELD_STYLE) type="password" name="password";
                    (login_button())
                }
            }
        }
    }
}

fn login_button() -> Markup {
    html! {
        button class=(LOGIN_BUTTON_STYLE) type="submit" { "Submit" }
    }
}
