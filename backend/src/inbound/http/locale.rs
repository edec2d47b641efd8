//! Locale switcher endpoints.
//!
//! ```text
//! GET  /api/v1/countries
//! POST /api/v1/locale {"countryCode":"IT","path":"/en/galerie"}
//! ```
//!
//! The picker lists countries grouped by language. Choosing one writes the
//! sticky preference cookie and tells the client where the current page
//! lives in the new locale.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{CountryGroup, Error, Locale, replace_locale_in_path};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::{no_store_header, public_cache_header};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require_text};
use crate::middleware::preference_cookie;

/// Country picker payload.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CountriesResponse {
    /// Romanian group first, then Italian, then English.
    pub groups: Vec<CountryGroup>,
    /// Locale served to countries missing from the table.
    pub unknown_locale: Locale,
}

/// Request body for switching locale by country.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocaleSwitchRequest {
    /// ISO 3166-1 alpha-2 code, any case.
    #[schema(example = "IT")]
    pub country_code: String,
    /// Path the visitor is on; defaults to the locale root.
    #[schema(example = "/en/galerie")]
    #[serde(default)]
    pub path: Option<String>,
}

/// Result of a locale switch.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocaleSwitchResponse {
    /// Locale now stored in the preference cookie.
    pub locale: Locale,
    /// Where the client should navigate.
    #[schema(example = "/it/galerie")]
    pub location: String,
}

/// List the countries offered by the language picker.
#[utoipa::path(
    get,
    path = "/api/v1/countries",
    responses((status = 200, description = "Grouped countries", body = CountriesResponse)),
    tags = ["locale"],
    operation_id = "listCountries"
)]
#[get("/countries")]
pub async fn list_countries(state: web::Data<HttpState>) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(public_cache_header())
        .json(CountriesResponse {
            groups: state.countries.grouped(),
            unknown_locale: state.countries.unknown_locale(),
        })
}

/// Persist a locale chosen through the country picker.
#[utoipa::path(
    post,
    path = "/api/v1/locale",
    request_body = LocaleSwitchRequest,
    responses(
        (
            status = 200,
            description = "Locale stored",
            headers(("Set-Cookie" = String, description = "NEXT_LOCALE preference")),
            body = LocaleSwitchResponse
        ),
        (status = 400, description = "Blank country code", body = Error)
    ),
    tags = ["locale"],
    operation_id = "switchLocale"
)]
#[post("/locale")]
pub async fn switch_locale(
    state: web::Data<HttpState>,
    payload: web::Json<LocaleSwitchRequest>,
) -> ApiResult<HttpResponse> {
    let request = payload.into_inner();
    let code = require_text(FieldName::new("countryCode"), &request.country_code)?;
    let locale = state.countries.locale_for(code);
    let location = replace_locale_in_path(request.path.as_deref().unwrap_or("/"), locale);
    info!(country = %code, %locale, "locale switched through picker");
    Ok(HttpResponse::Ok()
        .insert_header(no_store_header())
        .cookie(preference_cookie(locale, state.cookie_secure))
        .json(LocaleSwitchResponse { locale, location }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::App;
    use actix_web::test as actix_test;
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};

    use crate::domain::{LOCALE_COOKIE, SiteBase};

    #[fixture]
    fn state() -> HttpState {
        HttpState::with_fixtures(SiteBase::new("https://fracturism.test"))
    }

    macro_rules! app {
        ($state:expr) => {
            actix_test::init_service(
                App::new().app_data(web::Data::new($state)).service(
                    web::scope("/api/v1")
                        .service(list_countries)
                        .service(switch_locale),
                ),
            )
            .await
        };
    }

    #[rstest]
    #[actix_web::test]
    async fn countries_are_grouped_by_locale(state: HttpState) {
        let app = app!(state);
        let req = actix_test::TestRequest::get().uri("/api/v1/countries").to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, req).await;
        let locales: Vec<&str> = body["groups"]
            .as_array()
            .expect("groups")
            .iter()
            .filter_map(|group| group["locale"].as_str())
            .collect();
        assert_eq!(locales, ["ro", "it", "en"]);
        assert_eq!(body["unknownLocale"], "en");
    }

    #[rstest]
    #[case("IT", "/en/galerie", "it", "/it/galerie")]
    #[case("gb", "/ro/manifest", "en", "/en/manifest")]
    #[case("FR", "/it", "en", "/en")]
    #[case("RO", "", "ro", "/ro")]
    #[actix_web::test]
    async fn switching_sets_cookie_and_location(
        state: HttpState,
        #[case] country: &'static str,
        #[case] path: &'static str,
        #[case] locale: &'static str,
        #[case] location: &'static str,
    ) {
        let app = app!(state);
        let req = actix_test::TestRequest::post()
            .uri("/api/v1/locale")
            .set_json(json!({ "countryCode": country, "path": path }))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let cookie = res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == LOCALE_COOKIE)
            .map(|cookie| cookie.value().to_owned());
        assert_eq!(cookie.as_deref(), Some(locale));
        let body: LocaleSwitchResponse = actix_test::read_body_json(res).await;
        assert_eq!(body.locale.as_str(), locale);
        assert_eq!(body.location, location);
    }

    #[rstest]
    #[actix_web::test]
    async fn missing_path_targets_locale_root(state: HttpState) {
        let app = app!(state);
        let req = actix_test::TestRequest::post()
            .uri("/api/v1/locale")
            .set_json(json!({ "countryCode": "IT" }))
            .to_request();
        let body: LocaleSwitchResponse = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.location, "/it");
    }

    #[rstest]
    #[actix_web::test]
    async fn blank_country_is_rejected(state: HttpState) {
        let app = app!(state);
        let req = actix_test::TestRequest::post()
            .uri("/api/v1/locale")
            .set_json(json!({ "countryCode": "  ", "path": "/ro" }))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(res.response().cookies().next().is_none());
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], "countryCode");
    }
}
