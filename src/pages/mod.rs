//! Page-level views. Each page owns its form state and loading flags for as
//! long as it is shown and talks to the identity provider or backend on submit.

mod dashboard;
mod edit_profile;
mod forgot_password;
mod login;
mod signup;

pub use dashboard::Dashboard;
pub use edit_profile::EditProfile;
pub use forgot_password::ForgotPassword;
pub use login::Login;
pub use signup::Signup;

use std::fmt::Write;

use crate::components::{Button, InputField};
use crate::notice::Notice;

/// Plain-text layout shared by the form pages
pub(crate) fn render_form(
    title: &str,
    fields: &[&InputField],
    submit: &Button,
    notices: &[&Notice],
    links: &[&str],
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", title);
    for notice in notices {
        let _ = writeln!(out, "{}", notice);
    }
    for field in fields {
        let _ = writeln!(out, "  {}", field);
    }
    let _ = writeln!(out, "  {}", submit);
    for link in links {
        let _ = writeln!(out, "  {}", link);
    }
    out
}
