//! Page and form handlers for the login flow.

mod dashboard;
mod login;
mod logout;

pub use dashboard::{dashboard_handler, root_handler};
pub use login::{login_handler, login_submit_handler};
pub use logout::logout_handler;
