//! Domain primitives for the Fracturism site.
//!
//! Purpose: hold the transport-agnostic rules of the site. Locale resolution
//! decides where a visitor lands, the site catalogue describes which pages
//! exist in which language, and the carousel models gallery navigation.
//! Nothing here knows about HTTP.
//!
//! Public surface:
//! - [`Locale`] and the [`CountryLocaleMap`] used for geo hints.
//! - [`resolve`] with its [`LocaleSignals`], [`RoutingPolicy`] and
//!   [`Resolution`].
//! - [`SiteBase`] and [`PageRoute`] for metadata, sitemap and robots.
//! - [`GalleryItem`] and the [`carousel`] state machine.
//! - [`Error`] and [`ErrorCode`] for API failures.

pub mod carousel;
mod country;
pub mod error;
mod gallery;
mod locale;
mod locale_resolution;
pub mod ports;
mod site;
mod slug;
mod trace_id;

pub use self::country::{Country, CountryGroup, CountryLocaleMap, UNKNOWN_COUNTRY_LOCALE};
pub use self::error::{Error, ErrorCode};
pub use self::gallery::{GalleryItem, GalleryItemValidationError};
pub use self::locale::{DEFAULT_LOCALE, LOCALES, Locale, UnknownLocale, is_locale};
pub use self::locale_resolution::{
    DEFAULT_RESERVED_PREFIXES, LOCALE_COOKIE, LOCALE_COOKIE_MAX_AGE_DAYS, LocaleDecision,
    LocaleRedirect, LocaleSignals, LocaleSource, Resolution, RoutingPolicy, detect_locale,
    path_locale, replace_locale_in_path, resolve,
};
pub use self::site::{
    ChangeFrequency, I18nAlternates, OpenGraph, PAGES, PageMetadata, PageRoute, SITE_NAME,
    SiteBase, SitemapEntry, X_DEFAULT_LOCALE,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use fracturism::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<&'static str> {
///     Err(Error::not_found("no such work"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
