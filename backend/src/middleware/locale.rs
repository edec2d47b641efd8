//! Locale redirect middleware.
//!
//! Every request whose path is neither reserved nor already localised is
//! answered with a `307` to `/{locale}{path}`. The locale comes from
//! [`resolve`]; this module only gathers the request signals and writes the
//! response. Detected locales are persisted in the `NEXT_LOCALE` cookie so
//! the next visit short-circuits on the cookie.
//!
//! Requests that pass through with a locale-prefixed path carry the
//! [`LocaleDecision`] in their extensions; read it with [`active_locale`].

use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{self, HeaderMap};
use actix_web::{Error, HttpMessage, HttpRequest, HttpResponse};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

use crate::domain::{
    CountryLocaleMap, LOCALE_COOKIE, LOCALE_COOKIE_MAX_AGE_DAYS, Locale, LocaleDecision,
    LocaleRedirect as Redirect, LocaleSignals, Resolution, RoutingPolicy, resolve,
};

/// Edge and proxy headers carrying the visitor's ISO country, in probe order.
pub const GEO_COUNTRY_HEADERS: [&str; 5] = [
    "x-vercel-ip-country",
    "cf-ipcountry",
    "cloudfront-viewer-country",
    "x-country",
    "x-geo-country",
];

/// Build the sticky locale preference cookie.
///
/// # Examples
/// ```
/// use fracturism::domain::Locale;
/// use fracturism::middleware::preference_cookie;
///
/// let cookie = preference_cookie(Locale::It, false);
/// assert_eq!(cookie.name(), "NEXT_LOCALE");
/// assert_eq!(cookie.value(), "it");
/// assert_eq!(cookie.path(), Some("/"));
/// ```
#[must_use]
pub fn preference_cookie(locale: Locale, secure: bool) -> Cookie<'static> {
    Cookie::build(LOCALE_COOKIE, locale.as_str())
        .path("/")
        .max_age(CookieDuration::days(LOCALE_COOKIE_MAX_AGE_DAYS))
        .same_site(SameSite::Lax)
        .secure(secure)
        .finish()
}

/// Locale of a request that passed through with a localised path.
pub fn active_locale(req: &HttpRequest) -> Option<Locale> {
    req.extensions()
        .get::<LocaleDecision>()
        .map(|decision| decision.locale)
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// First non-blank geo country header, if any.
fn geo_country(headers: &HeaderMap) -> Option<&str> {
    GEO_COUNTRY_HEADERS
        .iter()
        .find_map(|name| header_str(headers, name).filter(|value| !value.trim().is_empty()))
}

/// Locale redirect middleware.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use fracturism::domain::{CountryLocaleMap, RoutingPolicy};
/// use fracturism::middleware::LocaleRedirect;
///
/// let policy = RoutingPolicy::default().with_reserved(["/health"]);
/// let app = App::new().wrap(LocaleRedirect::new(CountryLocaleMap::default(), policy));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LocaleRedirect {
    countries: Arc<CountryLocaleMap>,
    policy: Arc<RoutingPolicy>,
    cookie_secure: bool,
}

impl LocaleRedirect {
    /// Build the middleware from a country table and routing policy.
    ///
    /// The locale cookie is issued without `Secure` until
    /// [`LocaleRedirect::cookie_secure`] says otherwise.
    #[must_use]
    pub fn new(countries: CountryLocaleMap, policy: RoutingPolicy) -> Self {
        Self {
            countries: Arc::new(countries),
            policy: Arc::new(policy),
            cookie_secure: false,
        }
    }

    /// Set the `Secure` attribute on preference cookies.
    #[must_use]
    pub fn cookie_secure(mut self, secure: bool) -> Self {
        self.cookie_secure = secure;
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for LocaleRedirect
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = LocaleRedirectMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(LocaleRedirectMiddleware {
            service,
            settings: self.clone(),
        }))
    }
}

/// Service wrapper produced by [`LocaleRedirect`].
pub struct LocaleRedirectMiddleware<S> {
    service: S,
    settings: LocaleRedirect,
}

impl<S> LocaleRedirectMiddleware<S> {
    fn resolve(&self, req: &ServiceRequest) -> Resolution {
        let cookie = req.cookie(LOCALE_COOKIE);
        let headers = req.headers();
        let signals = LocaleSignals {
            path: req.path(),
            cookie: cookie.as_ref().map(Cookie::value),
            accept_language: header_str(headers, header::ACCEPT_LANGUAGE.as_str()),
            geo_country: geo_country(headers),
        };
        resolve(&signals, &self.settings.countries, &self.settings.policy)
    }

    fn redirect_response(&self, redirect: &Redirect) -> HttpResponse {
        let mut builder = HttpResponse::TemporaryRedirect();
        builder.insert_header((header::LOCATION, redirect.location.as_str()));
        if redirect.persists_preference() {
            builder.cookie(preference_cookie(
                redirect.decision.locale,
                self.settings.cookie_secure,
            ));
        }
        builder.finish()
    }
}

impl<S, B> Service<ServiceRequest> for LocaleRedirectMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match self.resolve(&req) {
            Resolution::PassThrough(decision) => {
                if let Some(decision) = decision {
                    req.extensions_mut().insert(decision);
                }
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Resolution::Redirect(redirect) => {
                debug!(
                    path = %req.path(),
                    locale = %redirect.decision.locale,
                    source = ?redirect.decision.source,
                    "redirecting to localised path"
                );
                let response = self.redirect_response(&redirect);
                Box::pin(ready(Ok(req.into_response(response).map_into_right_body())))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use actix_web::{App, web};
    use rstest::rstest;

    use crate::domain::LocaleSource;

    struct Captured {
        status: StatusCode,
        location: Option<String>,
        cookie: Option<Cookie<'static>>,
        body: String,
    }

    async fn echo_locale(req: HttpRequest) -> HttpResponse {
        let locale = active_locale(&req).map(|locale| locale.to_string());
        HttpResponse::Ok().body(locale.unwrap_or_default())
    }

    async fn send(req: actix_test::TestRequest) -> Captured {
        let middleware = LocaleRedirect::new(CountryLocaleMap::default(), RoutingPolicy::default());
        let app = actix_test::init_service(
            App::new()
                .wrap(middleware)
                .default_service(web::to(echo_locale)),
        )
        .await;
        let res = actix_test::call_service(&app, req.to_request()).await;
        let status = res.status();
        let location = res
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let cookie = res
            .response()
            .cookies()
            .next()
            .map(|cookie| cookie.into_owned());
        let body = actix_test::read_body(res).await;
        Captured {
            status,
            location,
            cookie,
            body: String::from_utf8_lossy(&body).into_owned(),
        }
    }

    #[actix_web::test]
    async fn accept_language_redirect_sets_preference_cookie() {
        let captured = send(
            actix_test::TestRequest::get()
                .uri("/manifest")
                .insert_header((header::ACCEPT_LANGUAGE, "it-IT,it;q=0.9")),
        )
        .await;
        assert_eq!(captured.status, StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(captured.location.as_deref(), Some("/it/manifest"));
        let cookie = captured.cookie.expect("preference cookie");
        assert_eq!(cookie.name(), LOCALE_COOKIE);
        assert_eq!(cookie.value(), "it");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(
            cookie.max_age(),
            Some(CookieDuration::days(LOCALE_COOKIE_MAX_AGE_DAYS))
        );
    }

    #[actix_web::test]
    async fn cookie_redirect_does_not_rewrite_cookie() {
        let captured = send(
            actix_test::TestRequest::get()
                .uri("/galerie")
                .cookie(Cookie::new(LOCALE_COOKIE, "en"))
                .insert_header((header::ACCEPT_LANGUAGE, "ro-RO")),
        )
        .await;
        assert_eq!(captured.status, StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(captured.location.as_deref(), Some("/en/galerie"));
        assert!(captured.cookie.is_none());
    }

    #[actix_web::test]
    async fn localised_path_passes_through_with_decision() {
        let captured = send(
            actix_test::TestRequest::get()
                .uri("/en/galerie")
                .cookie(Cookie::new(LOCALE_COOKIE, "ro")),
        )
        .await;
        assert_eq!(captured.status, StatusCode::OK);
        assert_eq!(captured.body, "en");
        assert!(captured.cookie.is_none());
    }

    #[rstest]
    #[case("/_next/static/chunk.js")]
    #[case("/api/v1/gallery")]
    #[case("/assets/logo.svg")]
    #[actix_web::test]
    async fn reserved_paths_are_untouched(#[case] path: &'static str) {
        let captured = send(
            actix_test::TestRequest::get()
                .uri(path)
                .insert_header((header::ACCEPT_LANGUAGE, "it")),
        )
        .await;
        assert_eq!(captured.status, StatusCode::OK);
        assert!(captured.body.is_empty());
        assert!(captured.cookie.is_none());
    }

    #[rstest]
    #[case(&[("cf-ipcountry", "IT")], "/it/contact")]
    #[case(&[("x-vercel-ip-country", "ro"), ("cf-ipcountry", "IT")], "/ro/contact")]
    #[case(&[("x-vercel-ip-country", "  "), ("x-geo-country", "GB")], "/en/contact")]
    #[case(&[("x-country", "FR")], "/en/contact")]
    #[case(&[], "/ro/contact")]
    #[actix_web::test]
    async fn geo_headers_are_probed_in_order(
        #[case] headers: &[(&'static str, &'static str)],
        #[case] expected: &'static str,
    ) {
        let mut req = actix_test::TestRequest::get().uri("/contact");
        for header in headers {
            req = req.insert_header(*header);
        }
        let captured = send(req).await;
        assert_eq!(captured.location.as_deref(), Some(expected));
        assert!(captured.cookie.is_some());
    }

    #[rstest]
    fn geo_lookup_skips_blank_values() {
        let req = actix_test::TestRequest::default()
            .insert_header(("cf-ipcountry", ""))
            .insert_header(("cloudfront-viewer-country", "US"))
            .to_http_request();
        assert_eq!(geo_country(req.headers()), Some("US"));
    }

    #[rstest]
    fn secure_flag_follows_configuration() {
        assert_eq!(preference_cookie(Locale::Ro, true).secure(), Some(true));
        assert_eq!(preference_cookie(Locale::Ro, false).secure(), Some(false));
    }

    #[rstest]
    fn active_locale_reads_extension() {
        let req = actix_test::TestRequest::default().to_http_request();
        assert_eq!(active_locale(&req), None);
        req.extensions_mut().insert(LocaleDecision {
            locale: Locale::It,
            source: LocaleSource::Path,
        });
        assert_eq!(active_locale(&req), Some(Locale::It));
    }
}
