//! Shared cache-control policies for HTTP handlers.

/// Public content that crawlers and CDNs may keep for an hour.
pub const PUBLIC_ONE_HOUR: &str = "public, max-age=3600";

/// Responses tied to a single visitor's preference.
pub const NO_STORE: &str = "no-store";

/// Cache-control header tuple for public content.
pub const fn public_cache_header() -> (&'static str, &'static str) {
    ("Cache-Control", PUBLIC_ONE_HOUR)
}

/// Cache-control header tuple for per-visitor responses.
pub const fn no_store_header() -> (&'static str, &'static str) {
    ("Cache-Control", NO_STORE)
}
