//! Localised page metadata.
//!
//! ```text
//! GET /{locale}
//! GET /{locale}/{page...}
//! ```
//!
//! The response carries what a renderer needs for the document head:
//! canonical URL, hreflang alternates and Open Graph basics.

use actix_web::{HttpRequest, HttpResponse, get, web};
use serde_json::json;

use crate::domain::{Error, Locale, PageMetadata, PageRoute};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::public_cache_header;
use crate::inbound::http::state::HttpState;
use crate::middleware::active_locale;

fn request_locale(req: &HttpRequest, raw: &str) -> Result<Locale, Error> {
    active_locale(req)
        .or_else(|| Locale::from_tag(raw))
        .ok_or_else(|| Error::not_found(format!("no page at '{}'", req.path())))
}

async fn page_response(
    state: &HttpState,
    locale: Locale,
    pathname: &str,
) -> ApiResult<HttpResponse> {
    let route = PageRoute::classify(pathname).ok_or_else(|| {
        Error::not_found(format!("no page at '{pathname}'"))
            .with_details(json!({ "pathname": pathname }))
    })?;
    if let PageRoute::GalleryWork { slug } = &route {
        if state.gallery.by_slug(locale, slug).await?.is_none() {
            return Err(Error::not_found(format!("no gallery work '{slug}'"))
                .with_details(json!({ "slug": slug })));
        }
    }
    let metadata: PageMetadata = state.site.page_metadata(&route, locale);
    Ok(HttpResponse::Ok()
        .insert_header(public_cache_header())
        .json(metadata))
}

/// Metadata for the localised home page.
#[utoipa::path(
    get,
    path = "/{locale}",
    params(("locale" = Locale, Path, description = "Site locale")),
    responses(
        (status = 200, description = "Page metadata", body = PageMetadata),
        (status = 404, description = "Unknown locale", body = Error)
    ),
    tags = ["pages"],
    operation_id = "getHomePage"
)]
#[get("/{locale}")]
pub async fn home_page(
    req: HttpRequest,
    state: web::Data<HttpState>,
    locale: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let locale = request_locale(&req, &locale)?;
    page_response(&state, locale, "/").await
}

/// Metadata for a localised page below the locale root.
#[utoipa::path(
    get,
    path = "/{locale}/{page}",
    params(
        ("locale" = Locale, Path, description = "Site locale"),
        ("page" = String, Path, description = "Page path without the locale", example = "galerie/separator")
    ),
    responses(
        (status = 200, description = "Page metadata", body = PageMetadata),
        (status = 404, description = "Unknown page", body = Error)
    ),
    tags = ["pages"],
    operation_id = "getPage"
)]
#[get("/{locale}/{page:.*}")]
pub async fn page(
    req: HttpRequest,
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (raw_locale, page) = path.into_inner();
    let locale = request_locale(&req, &raw_locale)?;
    page_response(&state, locale, &format!("/{page}")).await
}
