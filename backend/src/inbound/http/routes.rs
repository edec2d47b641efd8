//! Route registration for the HTTP adapter.
//!
//! Page routes capture `/{locale}/...` and must be registered after every
//! other service, including Swagger UI, so the binary composes the two halves
//! around its debug-only extras.

use actix_web::web;

use super::gallery::{get_gallery_work, list_gallery};
use super::health::{live, ready};
use super::locale::{list_countries, switch_locale};
use super::pages::{home_page, page};
use super::seo::{robots, sitemap};

/// Prefixes served by this adapter outside the localised page tree.
///
/// The locale redirect must treat these as reserved in addition to its
/// defaults.
pub const OPERATIONAL_PREFIXES: [&str; 5] =
    ["/health", "/docs", "/api-docs", "/sitemap.xml", "/robots.txt"];

/// Register the API scope, crawler documents and health probes.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(list_gallery)
            .service(get_gallery_work)
            .service(list_countries)
            .service(switch_locale),
    )
    .service(sitemap)
    .service(robots)
    .service(ready)
    .service(live);
}

/// Register the localised page metadata routes.
pub fn configure_pages(cfg: &mut web::ServiceConfig) {
    cfg.service(home_page).service(page);
}
