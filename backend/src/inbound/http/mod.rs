//! HTTP inbound adapter exposing the site's REST and crawler endpoints.

pub mod cache_control;
pub mod error;
pub mod gallery;
pub mod health;
pub mod locale;
pub mod pages;
pub mod routes;
pub mod seo;
pub mod state;
pub(crate) mod validation;

pub use error::ApiResult;
