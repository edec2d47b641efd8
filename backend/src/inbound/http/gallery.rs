//! Gallery read endpoints.
//!
//! ```text
//! GET /api/v1/gallery?locale=ro
//! GET /api/v1/gallery/{slug}?locale=ro
//! ```

use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, GalleryItem, Locale};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::public_cache_header;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_locale};

const LOCALE_PARAM: FieldName = FieldName::new("locale");

/// Optional locale selector; the site default applies when absent.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LocaleQuery {
    /// One of `ro`, `en`, `it`.
    #[param(example = "it")]
    pub locale: Option<String>,
}

/// A gallery work with its localised detail link.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GalleryWorkResponse {
    #[schema(example = "/images/1.jpg")]
    pub src: String,
    pub title: String,
    pub caption: String,
    #[schema(example = "moneda-fracturista")]
    pub slug: String,
    /// Detail page path in the requested locale.
    #[schema(example = "/it/galerie/moneda-fracturista")]
    pub href: String,
}

impl GalleryWorkResponse {
    fn from_item(item: &GalleryItem, locale: Locale) -> Self {
        Self {
            src: item.src().to_owned(),
            title: item.title().to_owned(),
            caption: item.caption().to_owned(),
            slug: item.slug().to_owned(),
            href: item.href(locale),
        }
    }
}

/// Gallery listing payload.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GalleryResponse {
    pub locale: Locale,
    pub items: Vec<GalleryWorkResponse>,
}

/// List the gallery works in display order.
#[utoipa::path(
    get,
    path = "/api/v1/gallery",
    params(LocaleQuery),
    responses(
        (status = 200, description = "Gallery works", body = GalleryResponse),
        (status = 400, description = "Unsupported locale", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["gallery"],
    operation_id = "listGallery"
)]
#[get("/gallery")]
pub async fn list_gallery(
    state: web::Data<HttpState>,
    query: web::Query<LocaleQuery>,
) -> ApiResult<HttpResponse> {
    let locale = parse_locale(LOCALE_PARAM, query.locale.as_deref())?;
    let items = state.gallery.items(locale).await?;
    let response = GalleryResponse {
        locale,
        items: items
            .iter()
            .map(|item| GalleryWorkResponse::from_item(item, locale))
            .collect(),
    };
    Ok(HttpResponse::Ok()
        .insert_header(public_cache_header())
        .json(response))
}

/// Fetch one gallery work by slug.
#[utoipa::path(
    get,
    path = "/api/v1/gallery/{slug}",
    params(
        ("slug" = String, Path, description = "Work identifier", example = "separator"),
        LocaleQuery
    ),
    responses(
        (status = 200, description = "Gallery work", body = GalleryWorkResponse),
        (status = 400, description = "Unsupported locale", body = Error),
        (status = 404, description = "Unknown work", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["gallery"],
    operation_id = "getGalleryWork"
)]
#[get("/gallery/{slug}")]
pub async fn get_gallery_work(
    state: web::Data<HttpState>,
    slug: web::Path<String>,
    query: web::Query<LocaleQuery>,
) -> ApiResult<HttpResponse> {
    let locale = parse_locale(LOCALE_PARAM, query.locale.as_deref())?;
    let slug = slug.into_inner();
    let item = state
        .gallery
        .by_slug(locale, &slug)
        .await?
        .ok_or_else(|| {
            Error::not_found(format!("no gallery work '{slug}'")).with_details(json!({
                "slug": slug,
            }))
        })?;
    Ok(HttpResponse::Ok()
        .insert_header(public_cache_header())
        .json(GalleryWorkResponse::from_item(&item, locale)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::App;
    use actix_web::test as actix_test;
    use rstest::{fixture, rstest};
    use serde_json::Value;

    use crate::domain::ports::{GalleryCatalogueError, MockGalleryCatalogue};
    use crate::domain::{CountryLocaleMap, ErrorCode, SiteBase};

    #[fixture]
    fn state() -> HttpState {
        HttpState::with_fixtures(SiteBase::new("https://fracturism.test"))
    }

    async fn get_json(state: HttpState, uri: &str) -> (StatusCode, Value) {
        let app = actix_test::init_service(
            App::new().app_data(web::Data::new(state)).service(
                web::scope("/api/v1")
                    .service(list_gallery)
                    .service(get_gallery_work),
            ),
        )
        .await;
        let req = actix_test::TestRequest::get().uri(uri).to_request();
        let res = actix_test::call_service(&app, req).await;
        let status = res.status();
        (status, actix_test::read_body_json(res).await)
    }

    #[rstest]
    #[actix_web::test]
    async fn lists_works_with_localised_links(state: HttpState) {
        let (status, body) = get_json(state, "/api/v1/gallery?locale=it").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["locale"], "it");
        let items = body["items"].as_array().expect("items array");
        assert_eq!(items.len(), 4);
        assert_eq!(items[1]["href"], "/it/galerie/moneda-fracturista");
    }

    #[rstest]
    #[actix_web::test]
    async fn missing_locale_uses_default(state: HttpState) {
        let (_, body) = get_json(state, "/api/v1/gallery").await;
        assert_eq!(body["locale"], "ro");
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_locale_is_rejected(state: HttpState) {
        let (status, body) = get_json(state, "/api/v1/gallery?locale=de").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_request");
        assert_eq!(body["details"]["field"], "locale");
    }

    #[rstest]
    #[case("/api/v1/gallery/separator?locale=en", StatusCode::OK)]
    #[case("/api/v1/gallery/nope", StatusCode::NOT_FOUND)]
    #[actix_web::test]
    async fn detail_lookup_by_slug(
        state: HttpState,
        #[case] uri: &'static str,
        #[case] expected: StatusCode,
    ) {
        let (status, _) = get_json(state, uri).await;
        assert_eq!(status, expected);
    }

    #[rstest]
    #[actix_web::test]
    async fn adapter_failures_are_redacted() {
        let mut catalogue = MockGalleryCatalogue::new();
        catalogue
            .expect_items()
            .returning(|_| Err(GalleryCatalogueError::unavailable("bucket offline")));
        let state = HttpState::new(
            Arc::new(catalogue),
            CountryLocaleMap::default(),
            SiteBase::new("https://fracturism.test"),
            false,
        );
        let (status, body) = get_json(state, "/api/v1/gallery").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let error: Error = serde_json::from_value(body).expect("error payload");
        assert_eq!(error.code(), ErrorCode::InternalError);
        assert_eq!(error.message(), "Internal server error");
    }
}
