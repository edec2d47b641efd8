//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use crate::domain::ports::{FixtureGalleryCatalogue, GalleryCatalogue};
use crate::domain::{CountryLocaleMap, SiteBase};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub gallery: Arc<dyn GalleryCatalogue>,
    pub countries: Arc<CountryLocaleMap>,
    pub site: Arc<SiteBase>,
    /// Source of `lastmod` timestamps.
    pub clock: Arc<dyn Clock>,
    /// Whether cookies written by handlers carry `Secure`.
    pub cookie_secure: bool,
}

impl HttpState {
    /// Construct state from explicit ports.
    pub fn new(
        gallery: Arc<dyn GalleryCatalogue>,
        countries: CountryLocaleMap,
        site: SiteBase,
        cookie_secure: bool,
    ) -> Self {
        Self {
            gallery,
            countries: Arc::new(countries),
            site: Arc::new(site),
            clock: Arc::new(DefaultClock),
            cookie_secure,
        }
    }

    /// Replace the clock, for deterministic sitemaps in tests.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// State backed by the built-in gallery and country table.
    pub fn with_fixtures(site: SiteBase) -> Self {
        Self::new(
            Arc::new(FixtureGalleryCatalogue),
            CountryLocaleMap::default(),
            site,
            false,
        )
    }
}
