//! Pages module for the application.
//!
//! One page per [`quizdesk_business::Route`] value:
//! - `admin_page`: profile and user directory for the signed-in admin
//! - `home_page`: public homepage, target of the return control

mod admin_page;
mod home_page;

pub use admin_page::admin_page;
pub use home_page::home_page;
