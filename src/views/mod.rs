//! Server-rendered pages.
//!
//! Every view is a pure function returning `maud::Markup`, which axum serves as `text/html`.

pub mod dashboard;
pub mod layout;
pub mod login;

use maud::Markup;

/// home
///
/// The View Selector: login form when `is_allowed` is false, dashboard when true.
pub fn home(is_allowed: bool) -> Markup {
    let body = if is_allowed {
        dashboard::dashboard()
    } else {
        login::login_form(is_allowed)
    };
    layout::page("HPCC", body)
}
