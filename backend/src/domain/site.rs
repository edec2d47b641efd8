//! Site page catalogue and the SEO metadata derived from it.
//!
//! Every page exists once per locale under `/{locale}{pathname}`. Metadata
//! links each variant to its siblings so search engines can pair them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::locale::{LOCALES, Locale};
use super::slug::is_valid_slug;

/// Brand name used for Open Graph `siteName`.
pub const SITE_NAME: &str = "Fracturism";

/// Locale advertised as `x-default` in hreflang alternates.
pub const X_DEFAULT_LOCALE: Locale = Locale::En;

/// Locale-independent pathnames of the static pages.
pub const PAGES: [&str; 10] = [
    "/",
    "/manifest",
    "/galerie",
    "/moda-design",
    "/artistul",
    "/noutati",
    "/contact",
    "/legal/termeni",
    "/legal/cookies",
    "/legal/confidentialitate",
];

const GALLERY_PREFIX: &str = "/galerie/";
const HOME_PRIORITY: f32 = 1.0;
const PAGE_PRIORITY: f32 = 0.6;

/// A page the site can serve below a locale prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRoute {
    /// One of [`PAGES`].
    Static(&'static str),
    /// Detail page for a gallery work.
    GalleryWork { slug: String },
}

impl PageRoute {
    /// Classify a locale-independent pathname.
    ///
    /// Trailing slashes are ignored and an empty pathname is the home page.
    ///
    /// # Examples
    /// ```
    /// use fracturism::domain::PageRoute;
    ///
    /// assert_eq!(PageRoute::classify("/manifest/"), Some(PageRoute::Static("/manifest")));
    /// assert!(matches!(
    ///     PageRoute::classify("/galerie/separator"),
    ///     Some(PageRoute::GalleryWork { .. })
    /// ));
    /// assert_eq!(PageRoute::classify("/missing"), None);
    /// ```
    #[must_use]
    pub fn classify(pathname: &str) -> Option<Self> {
        let normalised = normalise_pathname(pathname);
        if let Some(page) = PAGES.into_iter().find(|page| *page == normalised) {
            return Some(Self::Static(page));
        }
        normalised
            .strip_prefix(GALLERY_PREFIX)
            .filter(|slug| is_valid_slug(slug))
            .map(|slug| Self::GalleryWork {
                slug: slug.to_owned(),
            })
    }

    /// Canonical pathname of the route.
    #[must_use]
    pub fn pathname(&self) -> String {
        match self {
            Self::Static(page) => (*page).to_owned(),
            Self::GalleryWork { slug } => format!("{GALLERY_PREFIX}{slug}"),
        }
    }
}

fn normalise_pathname(pathname: &str) -> String {
    let trimmed = pathname.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_owned()
    } else if trimmed.starts_with('/') {
        trimmed.to_owned()
    } else {
        format!("/{trimmed}")
    }
}

/// Absolute origin the site is published under, without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteBase(String);

impl SiteBase {
    /// Wrap an origin such as `https://fracturism.example.com`.
    pub fn new(origin: impl Into<String>) -> Self {
        let origin = origin.into();
        Self(origin.trim_end_matches('/').to_owned())
    }

    /// Origin without a trailing slash.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Absolute URL of `pathname` in `locale`.
    #[must_use]
    pub fn page_url(&self, locale: Locale, pathname: &str) -> String {
        format!("{}/{locale}{pathname}", self.0)
    }

    /// Per-locale URLs of `pathname`, keyed by language tag.
    fn language_urls(&self, pathname: &str) -> BTreeMap<String, String> {
        LOCALES
            .into_iter()
            .map(|locale| (locale.as_str().to_owned(), self.page_url(locale, pathname)))
            .collect()
    }

    /// Canonical URL and hreflang alternates for one page variant.
    #[must_use]
    pub fn alternates(&self, pathname: &str, current: Locale) -> I18nAlternates {
        let mut languages = self.language_urls(pathname);
        languages.insert(
            "x-default".to_owned(),
            self.page_url(X_DEFAULT_LOCALE, pathname),
        );
        I18nAlternates {
            canonical: self.page_url(current, pathname),
            languages,
        }
    }

    /// Metadata for `route` rendered in `locale`.
    #[must_use]
    pub fn page_metadata(&self, route: &PageRoute, locale: Locale) -> PageMetadata {
        let pathname = route.pathname();
        let alternates = self.alternates(&pathname, locale);
        PageMetadata {
            locale,
            open_graph: OpenGraph {
                locale,
                url: alternates.canonical.clone(),
                site_name: SITE_NAME,
                kind: "website",
            },
            pathname,
            alternates,
        }
    }

    /// Every locale variant of every static page.
    #[must_use]
    pub fn sitemap(&self, last_modified: DateTime<Utc>) -> Vec<SitemapEntry> {
        LOCALES
            .into_iter()
            .flat_map(|locale| {
                PAGES.into_iter().map(move |page| SitemapEntry {
                    url: self.page_url(locale, page),
                    last_modified,
                    change_frequency: ChangeFrequency::Weekly,
                    priority: if page == "/" {
                        HOME_PRIORITY
                    } else {
                        PAGE_PRIORITY
                    },
                    alternates: self.language_urls(page),
                })
            })
            .collect()
    }

    /// `robots.txt` body allowing every crawler and pointing at the sitemap.
    #[must_use]
    pub fn robots_txt(&self) -> String {
        format!("User-agent: *\nAllow: /\n\nSitemap: {}/sitemap.xml\n", self.0)
    }
}

/// Canonical URL plus hreflang alternates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct I18nAlternates {
    /// URL of the current variant.
    pub canonical: String,
    /// Language tag (plus `x-default`) to URL.
    pub languages: BTreeMap<String, String>,
}

/// Open Graph basics for a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpenGraph {
    /// Locale of the page variant.
    pub locale: Locale,
    /// Canonical absolute URL.
    pub url: String,
    /// Name of the site as a whole.
    #[schema(value_type = String, example = "Fracturism")]
    pub site_name: &'static str,
    /// Open Graph object type.
    #[serde(rename = "type")]
    #[schema(value_type = String, example = "website")]
    pub kind: &'static str,
}

/// SEO metadata for one page variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    /// Locale of this variant.
    pub locale: Locale,
    /// Locale-neutral page path.
    #[schema(example = "/manifest")]
    pub pathname: String,
    /// Canonical URL and hreflang alternates.
    pub alternates: I18nAlternates,
    /// Open Graph tags.
    pub open_graph: OpenGraph,
}

/// Sitemap change frequency hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    /// Content changes roughly once a week.
    Weekly,
}

impl ChangeFrequency {
    /// Value of the `<changefreq>` element.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
        }
    }
}

/// One `<url>` element of the sitemap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitemapEntry {
    /// Absolute URL of the page.
    pub url: String,
    /// Generation time of the sitemap.
    pub last_modified: DateTime<Utc>,
    /// Expected update cadence.
    pub change_frequency: ChangeFrequency,
    /// Relative priority between 0.0 and 1.0.
    pub priority: f32,
    /// Language tag to URL for every locale variant.
    pub alternates: BTreeMap<String, String>,
}
