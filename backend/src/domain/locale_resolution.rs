//! Per-request locale resolution.
//!
//! Resolution is a pure function of the request path and the detection
//! signals extracted from the request. Applying the outcome (writing the
//! redirect and the preference cookie) is the job of the HTTP middleware.
//!
//! Signals are consulted in a fixed priority order and the first decisive one
//! wins:
//!
//! 1. reserved or already-localised paths pass through untouched;
//! 2. a valid preference cookie redirects immediately and is never rewritten;
//! 3. `Accept-Language`, probed for `ro`, `it`, `en` as substrings in that
//!    order (client weights are ignored);
//! 4. the geo-IP country hint mapped through [`CountryLocaleMap`];
//! 5. the global default locale.

use serde::Serialize;

use super::country::CountryLocaleMap;
use super::locale::{DEFAULT_LOCALE, LOCALES, Locale};

/// Name of the locale preference cookie.
pub const LOCALE_COOKIE: &str = "NEXT_LOCALE";

/// Preference cookie lifetime in days.
pub const LOCALE_COOKIE_MAX_AGE_DAYS: i64 = 365;

/// Probe order for `Accept-Language` substring matching.
const ACCEPT_LANGUAGE_ORDER: [Locale; 3] = [Locale::Ro, Locale::It, Locale::En];

/// Path prefixes that are never localised by default.
pub const DEFAULT_RESERVED_PREFIXES: [&str; 3] = ["/_next", "/api", "/assets"];

/// Which signal decided the locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LocaleSource {
    /// The request path already carries a locale segment.
    Path,
    /// The preference cookie holds a supported locale.
    Cookie,
    /// The `Accept-Language` header mentions a supported locale.
    Header,
    /// The geo-IP country hint.
    Geo,
    /// No signal was present.
    Default,
}

/// Outcome of locale detection for a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LocaleDecision {
    /// Chosen locale.
    pub locale: Locale,
    /// Signal that produced it.
    pub source: LocaleSource,
}

impl LocaleDecision {
    const fn new(locale: Locale, source: LocaleSource) -> Self {
        Self { locale, source }
    }
}

/// Detection inputs extracted from one request.
///
/// Absent and unusable values are both `None`; the resolver never fails on
/// malformed input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleSignals<'a> {
    /// Request path, always starting with `/`.
    pub path: &'a str,
    /// Raw value of the preference cookie.
    pub cookie: Option<&'a str>,
    /// Raw `Accept-Language` header value.
    pub accept_language: Option<&'a str>,
    /// Country code from the first populated geo header.
    pub geo_country: Option<&'a str>,
}

/// Redirect instruction produced when the path lacks a locale prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleRedirect {
    /// How the locale was chosen.
    pub decision: LocaleDecision,
    /// Target path: `/{locale}` prepended to the original path.
    pub location: String,
}

impl LocaleRedirect {
    /// Whether the preference cookie must be written with the redirect.
    ///
    /// A cookie hit is already persisted, so only other sources write.
    #[must_use]
    pub fn persists_preference(&self) -> bool {
        self.decision.source != LocaleSource::Cookie
    }
}

/// What the middleware should do with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Forward unchanged. Carries the path locale when the path is localised.
    PassThrough(Option<LocaleDecision>),
    /// Redirect to the localised path.
    Redirect(LocaleRedirect),
}

/// Paths the resolver must leave alone.
///
/// Prefixes are matched with a plain `starts_with`, so `/api` also covers
/// `/apiary`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingPolicy {
    reserved_prefixes: Vec<String>,
}

impl Default for RoutingPolicy {
    fn default() -> Self {
        Self {
            reserved_prefixes: DEFAULT_RESERVED_PREFIXES
                .iter()
                .map(|prefix| (*prefix).to_owned())
                .collect(),
        }
    }
}

impl RoutingPolicy {
    /// Add further reserved prefixes to the policy.
    #[must_use]
    pub fn with_reserved<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved_prefixes
            .extend(prefixes.into_iter().map(Into::into));
        self
    }

    /// Return `true` when `path` starts with a reserved prefix.
    #[must_use]
    pub fn is_reserved(&self, path: &str) -> bool {
        self.reserved_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }

    /// Reserved prefixes in declaration order.
    #[must_use]
    pub fn reserved_prefixes(&self) -> &[String] {
        &self.reserved_prefixes
    }
}

/// Return the locale carried by the first path segment, if any.
///
/// The segment must be followed by `/` or end the path, so `/english` is not
/// localised.
///
/// # Examples
/// ```
/// use fracturism::domain::{Locale, path_locale};
///
/// assert_eq!(path_locale("/en/galerie"), Some(Locale::En));
/// assert_eq!(path_locale("/it"), Some(Locale::It));
/// assert_eq!(path_locale("/english"), None);
/// ```
#[must_use]
pub fn path_locale(path: &str) -> Option<Locale> {
    let rest = path.strip_prefix('/')?;
    LOCALES.into_iter().find(|locale| {
        rest.strip_prefix(locale.as_str())
            .is_some_and(|tail| tail.is_empty() || tail.starts_with('/'))
    })
}

/// Swap the locale segment of `path` for `locale`.
///
/// The first segment is replaced whatever it holds; an empty path becomes
/// the locale root.
///
/// # Examples
/// ```
/// use fracturism::domain::{Locale, replace_locale_in_path};
///
/// assert_eq!(replace_locale_in_path("/en/galerie", Locale::It), "/it/galerie");
/// assert_eq!(replace_locale_in_path("", Locale::Ro), "/ro");
/// ```
#[must_use]
pub fn replace_locale_in_path(path: &str, locale: Locale) -> String {
    let Some(rest) = path.strip_prefix('/') else {
        return format!("/{locale}");
    };
    match rest.split_once('/') {
        Some((_, tail)) => format!("/{locale}/{tail}"),
        None => format!("/{locale}"),
    }
}

fn locale_from_cookie(cookie: Option<&str>) -> Option<Locale> {
    cookie.and_then(Locale::from_tag)
}

fn locale_from_accept_language(header: Option<&str>) -> Option<Locale> {
    let header = header?.to_lowercase();
    ACCEPT_LANGUAGE_ORDER
        .into_iter()
        .find(|locale| header.contains(locale.as_str()))
}

fn locale_from_country(country: Option<&str>, countries: &CountryLocaleMap) -> Option<Locale> {
    let code = country.map(str::trim).filter(|code| !code.is_empty())?;
    Some(countries.locale_for(&code.to_ascii_uppercase()))
}

/// Decide the locale for a request that is not already localised.
///
/// The cookie is consulted first; `Accept-Language`, then the geo hint, then
/// the global default follow.
#[must_use]
pub fn detect_locale(signals: &LocaleSignals<'_>, countries: &CountryLocaleMap) -> LocaleDecision {
    if let Some(locale) = locale_from_cookie(signals.cookie) {
        return LocaleDecision::new(locale, LocaleSource::Cookie);
    }
    if let Some(locale) = locale_from_accept_language(signals.accept_language) {
        return LocaleDecision::new(locale, LocaleSource::Header);
    }
    if let Some(locale) = locale_from_country(signals.geo_country, countries) {
        return LocaleDecision::new(locale, LocaleSource::Geo);
    }
    LocaleDecision::new(DEFAULT_LOCALE, LocaleSource::Default)
}

/// Resolve a request into a pass-through or a localised redirect.
///
/// # Examples
/// ```
/// use fracturism::domain::{
///     CountryLocaleMap, LocaleSignals, Resolution, RoutingPolicy, resolve,
/// };
///
/// let signals = LocaleSignals {
///     path: "/manifest",
///     accept_language: Some("it-IT,it;q=0.9"),
///     ..LocaleSignals::default()
/// };
/// let Resolution::Redirect(redirect) =
///     resolve(&signals, &CountryLocaleMap::default(), &RoutingPolicy::default())
/// else {
///     panic!("expected a redirect");
/// };
/// assert_eq!(redirect.location, "/it/manifest");
/// assert!(redirect.persists_preference());
/// ```
#[must_use]
pub fn resolve(
    signals: &LocaleSignals<'_>,
    countries: &CountryLocaleMap,
    policy: &RoutingPolicy,
) -> Resolution {
    if policy.is_reserved(signals.path) {
        return Resolution::PassThrough(None);
    }
    if let Some(locale) = path_locale(signals.path) {
        return Resolution::PassThrough(Some(LocaleDecision::new(locale, LocaleSource::Path)));
    }

    let decision = detect_locale(signals, countries);
    Resolution::Redirect(LocaleRedirect {
        decision,
        location: format!("/{}{}", decision.locale, signals.path),
    })
}
