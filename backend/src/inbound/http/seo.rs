//! Crawler-facing documents.
//!
//! ```text
//! GET /sitemap.xml
//! GET /robots.txt
//! ```

use std::io;

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, get, web};
use chrono::SecondsFormat;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use tracing::error;

use crate::domain::{Error, SitemapEntry};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::public_cache_header;
use crate::inbound::http::state::HttpState;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

fn write_text_element<W: io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn write_entry<W: io::Write>(writer: &mut Writer<W>, entry: &SitemapEntry) -> io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new("url")))?;
    write_text_element(writer, "loc", &entry.url)?;
    for (language, href) in &entry.alternates {
        let mut link = BytesStart::new("xhtml:link");
        link.push_attribute(("rel", "alternate"));
        link.push_attribute(("hreflang", language.as_str()));
        link.push_attribute(("href", href.as_str()));
        writer.write_event(Event::Empty(link))?;
    }
    let lastmod = entry
        .last_modified
        .to_rfc3339_opts(SecondsFormat::Secs, true);
    write_text_element(writer, "lastmod", &lastmod)?;
    write_text_element(writer, "changefreq", entry.change_frequency.as_str())?;
    write_text_element(writer, "priority", &format!("{:.1}", entry.priority))?;
    writer.write_event(Event::End(BytesEnd::new("url")))?;
    Ok(())
}

/// Render sitemap entries as a `urlset` document with hreflang links.
///
/// # Errors
/// Returns an error if the XML writer fails.
pub fn render_sitemap(entries: &[SitemapEntry]) -> io::Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut urlset = BytesStart::new("urlset");
    urlset.push_attribute(("xmlns", SITEMAP_NS));
    urlset.push_attribute(("xmlns:xhtml", XHTML_NS));
    writer.write_event(Event::Start(urlset))?;
    for entry in entries {
        write_entry(&mut writer, entry)?;
    }
    writer.write_event(Event::End(BytesEnd::new("urlset")))?;

    String::from_utf8(writer.into_inner()).map_err(io::Error::other)
}

/// Sitemap covering every page in every locale.
#[utoipa::path(
    get,
    path = "/sitemap.xml",
    responses(
        (status = 200, description = "XML sitemap", content_type = "application/xml", body = String),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["seo"],
    operation_id = "getSitemap"
)]
#[get("/sitemap.xml")]
pub async fn sitemap(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let entries = state.site.sitemap(state.clock.utc());
    let xml = render_sitemap(&entries).map_err(|err| {
        error!(error = %err, "sitemap rendering failed");
        Error::internal("Internal server error")
    })?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::xml())
        .insert_header(public_cache_header())
        .body(xml))
}

/// Crawler policy allowing everything and advertising the sitemap.
#[utoipa::path(
    get,
    path = "/robots.txt",
    responses((status = 200, description = "Robots policy", content_type = "text/plain", body = String)),
    tags = ["seo"],
    operation_id = "getRobots"
)]
#[get("/robots.txt")]
pub async fn robots(state: web::Data<HttpState>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .insert_header(public_cache_header())
        .body(state.site.robots_txt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use actix_web::App;
    use actix_web::test as actix_test;
    use chrono::{TimeZone, Utc};
    use mockable::MockClock;
    use rstest::{fixture, rstest};

    use crate::domain::{ChangeFrequency, SiteBase};

    #[fixture]
    fn state() -> HttpState {
        let mut clock = MockClock::new();
        let now = Utc
            .with_ymd_and_hms(2026, 5, 4, 12, 0, 0)
            .single()
            .expect("valid timestamp");
        clock.expect_utc().return_const(now);
        HttpState::with_fixtures(SiteBase::new("https://fracturism.test"))
            .with_clock(Arc::new(clock))
    }

    async fn body_of(state: HttpState, uri: &str) -> String {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(sitemap)
                .service(robots),
        )
        .await;
        let req = actix_test::TestRequest::get().uri(uri).to_request();
        let body = actix_test::call_and_read_body(&app, req).await;
        String::from_utf8(body.to_vec()).expect("utf8 body")
    }

    #[rstest]
    #[actix_web::test]
    async fn sitemap_lists_every_locale_and_page(state: HttpState) {
        let xml = body_of(state, "/sitemap.xml").await;
        assert_eq!(xml.matches("<url>").count(), 30);
        assert!(xml.contains("<loc>https://fracturism.test/ro/</loc>"));
        assert!(xml.contains("<loc>https://fracturism.test/it/legal/termeni</loc>"));
        assert!(xml.contains(
            "<xhtml:link rel=\"alternate\" hreflang=\"en\" href=\"https://fracturism.test/en/manifest\"/>"
        ));
        assert!(xml.contains("<lastmod>2026-05-04T12:00:00Z</lastmod>"));
        assert_eq!(xml.matches("<priority>1.0</priority>").count(), 3);
        assert_eq!(xml.matches("<priority>0.6</priority>").count(), 27);
        assert_eq!(xml.matches("<changefreq>weekly</changefreq>").count(), 30);
    }

    #[rstest]
    #[actix_web::test]
    async fn robots_is_plain_text(state: HttpState) {
        let expected = state.site.robots_txt();
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(robots),
        )
        .await;
        let req = actix_test::TestRequest::get().uri("/robots.txt").to_request();
        let res = actix_test::call_service(&app, req).await;
        let content_type = res
            .headers()
            .get(actix_web::http::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        assert_eq!(content_type.as_deref(), Some("text/plain; charset=utf-8"));
        let body = actix_test::read_body(res).await;
        assert_eq!(body, expected.as_bytes());
    }

    #[rstest]
    fn urls_and_alternates_are_escaped() {
        let last_modified = Utc
            .with_ymd_and_hms(2026, 1, 2, 3, 4, 5)
            .single()
            .expect("valid timestamp");
        let entry = SitemapEntry {
            url: "https://fracturism.test/ro/?a=1&b=<2>".to_owned(),
            last_modified,
            change_frequency: ChangeFrequency::Weekly,
            priority: 0.6,
            alternates: BTreeMap::from([(
                "en".to_owned(),
                "https://fracturism.test/en/?q=\"x\"&y".to_owned(),
            )]),
        };
        let xml = render_sitemap(&[entry]).expect("sitemap renders");
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<loc>https://fracturism.test/ro/?a=1&amp;b=&lt;2&gt;</loc>"));
        assert!(xml.contains("href=\"https://fracturism.test/en/?q=&quot;x&quot;&amp;y\""));
        assert!(xml.contains("<lastmod>2026-01-02T03:04:05Z</lastmod>"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[rstest]
    fn empty_sitemap_is_a_bare_urlset() {
        let xml = render_sitemap(&[]).expect("sitemap renders");
        assert!(xml.contains("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\""));
        assert!(!xml.contains("<url>"));
    }
}
