//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every HTTP endpoint of the inbound layer (gallery,
//! locale switcher, pages, crawler documents and health probes) plus the
//! domain payload schemas. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` prints it for external tooling.

use utoipa::OpenApi;

use crate::domain::{
    Country, CountryGroup, Error, ErrorCode, I18nAlternates, Locale, OpenGraph, PageMetadata,
};
use crate::inbound::http::gallery::{GalleryResponse, GalleryWorkResponse};
use crate::inbound::http::locale::{
    CountriesResponse, LocaleSwitchRequest, LocaleSwitchResponse,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Fracturism site API",
        description = "Locale-aware content endpoints for the Fracturism site."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::gallery::list_gallery,
        crate::inbound::http::gallery::get_gallery_work,
        crate::inbound::http::locale::list_countries,
        crate::inbound::http::locale::switch_locale,
        crate::inbound::http::pages::home_page,
        crate::inbound::http::pages::page,
        crate::inbound::http::seo::sitemap,
        crate::inbound::http::seo::robots,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Locale,
        Country,
        CountryGroup,
        CountriesResponse,
        LocaleSwitchRequest,
        LocaleSwitchResponse,
        GalleryResponse,
        GalleryWorkResponse,
        PageMetadata,
        I18nAlternates,
        OpenGraph,
    )),
    tags(
        (name = "gallery", description = "Published works"),
        (name = "locale", description = "Language picker"),
        (name = "pages", description = "Localised page metadata"),
        (name = "seo", description = "Crawler documents"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
