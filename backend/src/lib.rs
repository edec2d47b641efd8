//! Fracturism site backend.
//!
//! The library holds the domain rules (locale resolution, page catalogue,
//! gallery and carousel), the request middleware and the HTTP adapters. The
//! binary wires them into an Actix server.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::{LocaleRedirect, Trace};
