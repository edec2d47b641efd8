//! Server construction and middleware wiring.

mod config;

pub use config::{ServerConfig, ServerSettings};

use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use fracturism::domain::RoutingPolicy;
use fracturism::inbound::http::health::HealthState;
use fracturism::inbound::http::routes::{OPERATIONAL_PREFIXES, configure_api, configure_pages};
use fracturism::inbound::http::state::HttpState;
use fracturism::{LocaleRedirect, Trace};
#[cfg(debug_assertions)]
use fracturism::doc::ApiDoc;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    locale_redirect: LocaleRedirect,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        locale_redirect,
    } = deps;

    // Trace wraps last so redirects carry a trace id too.
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(locale_redirect)
        .wrap(Trace)
        .configure(configure_api);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.configure(configure_pages)
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        site_base,
        cookie_secure,
    } = config;

    let mut http_state = HttpState::with_fixtures(site_base);
    http_state.cookie_secure = cookie_secure;
    let locale_redirect = LocaleRedirect::new(
        (*http_state.countries).clone(),
        RoutingPolicy::default().with_reserved(OPERATIONAL_PREFIXES),
    )
    .cookie_secure(cookie_secure);
    let http_state = web::Data::new(http_state);

    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            locale_redirect: locale_redirect.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
