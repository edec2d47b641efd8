//! Request middleware.
//!
//! Purpose: request lifecycle concerns that sit in front of every handler.
//! [`Trace`] scopes a correlation id; [`LocaleRedirect`] sends visitors to
//! the localised variant of the page they asked for.

pub mod locale;
pub mod trace;

pub use locale::{LocaleRedirect, active_locale, preference_cookie};
pub use trace::Trace;
