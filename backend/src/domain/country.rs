//! Country to locale mapping used for geo-IP hints and the country picker.
//!
//! Romania maps to Romanian and Italy to Italian; every other country the
//! site knows about, and every country it does not, lands on English.

use serde::Serialize;
use utoipa::ToSchema;

use super::locale::{DEFAULT_LOCALE, Locale};

/// A country the site offers in its language picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    /// ISO 3166-1 alpha-2 code, uppercase.
    #[schema(value_type = String, example = "RO")]
    pub code: &'static str,
    /// Display name in the country's own language.
    #[schema(value_type = String, example = "România")]
    pub name: &'static str,
    /// Locale served to visitors from this country.
    pub locale: Locale,
    /// Flag emoji shown next to the name.
    #[schema(value_type = String)]
    pub flag: &'static str,
}

const COUNTRIES: &[Country] = &[
    Country {
        code: "RO",
        name: "România",
        locale: Locale::Ro,
        flag: "🇷🇴",
    },
    Country {
        code: "IT",
        name: "Italia",
        locale: Locale::It,
        flag: "🇮🇹",
    },
    Country {
        code: "US",
        name: "United States",
        locale: Locale::En,
        flag: "🇺🇸",
    },
    Country {
        code: "GB",
        name: "United Kingdom",
        locale: Locale::En,
        flag: "🇬🇧",
    },
];

/// Locale assigned to a country code that is present but unmapped.
pub const UNKNOWN_COUNTRY_LOCALE: Locale = Locale::En;

/// Order in which the picker groups countries.
const PICKER_GROUP_ORDER: [Locale; 3] = [Locale::Ro, Locale::It, Locale::En];

/// Countries sharing one locale, as presented by the picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CountryGroup {
    /// Locale shared by the group.
    pub locale: Locale,
    /// Member countries in table order.
    pub countries: Vec<Country>,
}

/// Ordered, case-insensitive mapping from country code to locale.
///
/// # Examples
/// ```
/// use fracturism::domain::{CountryLocaleMap, Locale};
///
/// let map = CountryLocaleMap::default();
/// assert_eq!(map.locale_for("it"), Locale::It);
/// assert_eq!(map.locale_for("FR"), Locale::En);
/// assert_eq!(map.locale_for(""), Locale::Ro);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryLocaleMap {
    countries: Vec<Country>,
    unknown: Locale,
}

impl Default for CountryLocaleMap {
    fn default() -> Self {
        Self::new(COUNTRIES.to_vec(), UNKNOWN_COUNTRY_LOCALE)
    }
}

impl CountryLocaleMap {
    /// Build a map from an explicit table and unknown-country locale.
    #[must_use]
    pub fn new(countries: Vec<Country>, unknown: Locale) -> Self {
        Self { countries, unknown }
    }

    /// Find the table entry for `code`, ignoring ASCII case.
    #[must_use]
    pub fn find(&self, code: &str) -> Option<&Country> {
        self.countries
            .iter()
            .find(|country| country.code.eq_ignore_ascii_case(code))
    }

    /// Map a country code to a locale.
    ///
    /// An empty code means "no hint" and yields the global default; a code
    /// missing from the table yields the unknown-country locale.
    #[must_use]
    pub fn locale_for(&self, code: &str) -> Locale {
        if code.is_empty() {
            return DEFAULT_LOCALE;
        }
        self.find(code)
            .map_or(self.unknown, |country| country.locale)
    }

    /// Locale used for codes absent from the table.
    #[must_use]
    pub const fn unknown_locale(&self) -> Locale {
        self.unknown
    }

    /// All countries in table order.
    #[must_use]
    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    /// Countries grouped by locale: Romanian first, then Italian, then English.
    ///
    /// Groups without members are omitted.
    #[must_use]
    pub fn grouped(&self) -> Vec<CountryGroup> {
        PICKER_GROUP_ORDER
            .into_iter()
            .map(|locale| CountryGroup {
                locale,
                countries: self
                    .countries
                    .iter()
                    .filter(|country| country.locale == locale)
                    .copied()
                    .collect(),
            })
            .filter(|group| !group.countries.is_empty())
            .collect()
    }
}
