//! Supported site locales.
//!
//! The site is published in a closed set of languages. Every URL below the
//! root carries one of them as its first path segment, and the locale
//! preference cookie stores one of their tags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A supported UI language.
///
/// # Examples
/// ```
/// use fracturism::domain::Locale;
///
/// let locale: Locale = "it".parse().expect("supported locale");
/// assert_eq!(locale, Locale::It);
/// assert_eq!(locale.as_str(), "it");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Romanian, the site's home language.
    Ro,
    /// English.
    En,
    /// Italian.
    It,
}

/// The fallback locale used when no other signal decides.
pub const DEFAULT_LOCALE: Locale = Locale::Ro;

/// Every supported locale in routing order.
pub const LOCALES: [Locale; 3] = [Locale::Ro, Locale::En, Locale::It];

impl Locale {
    /// Return the lowercase language tag used in URLs and cookies.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ro => "ro",
            Self::En => "en",
            Self::It => "it",
        }
    }

    /// Look up a locale by its exact tag.
    ///
    /// Matching is case-sensitive: `"RO"` is not a locale tag.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        LOCALES.into_iter().find(|locale| locale.as_str() == tag)
    }
}

/// Return `true` when `value` is exactly one of the supported locale tags.
///
/// Total over all strings.
#[must_use]
pub fn is_locale(value: &str) -> bool {
    Locale::from_tag(value).is_some()
}

impl Default for Locale {
    fn default() -> Self {
        DEFAULT_LOCALE
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a string is not a supported locale tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale '{tag}'")]
pub struct UnknownLocale {
    /// The rejected input.
    pub tag: String,
}

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| UnknownLocale { tag: s.to_owned() })
    }
}
