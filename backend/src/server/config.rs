//! Server configuration loaded via OrthoConfig and validated before bind.

use std::net::{IpAddr, SocketAddr};

use fracturism::domain::SiteBase;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SITE_BASE: &str = "http://localhost:8080";

/// Raw settings layered from CLI flags, `FRACTURISM_*` variables and files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FRACTURISM")]
pub struct ServerSettings {
    /// IP address to bind.
    pub host: Option<String>,
    /// TCP port to bind.
    pub port: Option<u16>,
    /// Public origin used in canonical URLs, the sitemap and robots.txt.
    pub site_base: Option<String>,
    /// Mark the locale preference cookie `Secure`.
    #[ortho_config(default = false)]
    pub cookie_secure: bool,
}

impl ServerSettings {
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn site_base(&self) -> &str {
        self.site_base.as_deref().unwrap_or(DEFAULT_SITE_BASE)
    }
}

/// Reasons settings are rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("host '{host}' is not an IP address")]
    InvalidHost { host: String },
    #[error("site base '{value}' is not a valid URL: {reason}")]
    InvalidSiteBase { value: String, reason: String },
    #[error("site base '{value}' must be a bare http(s) origin")]
    SiteBaseNotOrigin { value: String },
}

/// Validated server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) site_base: SiteBase,
    pub(crate) cookie_secure: bool,
}

fn parse_site_base(raw: &str) -> Result<SiteBase, ConfigError> {
    let url = Url::parse(raw).map_err(|err| ConfigError::InvalidSiteBase {
        value: raw.to_owned(),
        reason: err.to_string(),
    })?;
    let is_origin = matches!(url.scheme(), "http" | "https")
        && url.host_str().is_some()
        && url.query().is_none()
        && url.fragment().is_none()
        && url.path() == "/";
    if !is_origin {
        return Err(ConfigError::SiteBaseNotOrigin {
            value: raw.to_owned(),
        });
    }
    Ok(SiteBase::new(url.origin().ascii_serialization()))
}

impl ServerConfig {
    /// Validate raw settings.
    pub fn from_settings(settings: &ServerSettings) -> Result<Self, ConfigError> {
        let host = settings.host();
        let ip: IpAddr = host.parse().map_err(|_| ConfigError::InvalidHost {
            host: host.to_owned(),
        })?;
        Ok(Self {
            bind_addr: SocketAddr::new(ip, settings.port()),
            site_base: parse_site_base(settings.site_base())?,
            cookie_secure: settings.cookie_secure,
        })
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("fracturism")])
            .expect("config should load")
    }

    fn settings(host: &str, site_base: &str) -> ServerSettings {
        ServerSettings {
            host: Some(host.to_owned()),
            port: Some(9000),
            site_base: Some(site_base.to_owned()),
            cookie_secure: true,
        }
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("FRACTURISM_HOST", None::<String>),
            ("FRACTURISM_PORT", None::<String>),
            ("FRACTURISM_SITE_BASE", None::<String>),
            ("FRACTURISM_COOKIE_SECURE", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.host(), DEFAULT_HOST);
        assert_eq!(settings.port(), DEFAULT_PORT);
        assert_eq!(settings.site_base(), DEFAULT_SITE_BASE);
        assert!(!settings.cookie_secure);

        let config = ServerConfig::from_settings(&settings).expect("defaults are valid");
        assert_eq!(config.bind_addr().port(), DEFAULT_PORT);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("FRACTURISM_HOST", Some("127.0.0.1".to_owned())),
            ("FRACTURISM_PORT", Some("3000".to_owned())),
            (
                "FRACTURISM_SITE_BASE",
                Some("https://fracturism.example".to_owned()),
            ),
            ("FRACTURISM_COOKIE_SECURE", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        let config = ServerConfig::from_settings(&settings).expect("valid overrides");
        assert_eq!(config.bind_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.site_base.as_str(), "https://fracturism.example");
        assert!(config.cookie_secure);
    }

    #[rstest]
    #[case("https://fracturism.example/", "https://fracturism.example")]
    #[case("http://localhost:8080", "http://localhost:8080")]
    fn site_base_is_normalised_to_origin(#[case] raw: &str, #[case] expected: &str) {
        let config =
            ServerConfig::from_settings(&settings("::1", raw)).expect("valid site base");
        assert_eq!(config.site_base.as_str(), expected);
    }

    #[rstest]
    #[case("not a url")]
    #[case("ftp://fracturism.example")]
    #[case("https://fracturism.example/ro")]
    #[case("https://fracturism.example/?ref=x")]
    fn rejects_non_origin_site_base(#[case] raw: &str) {
        let err = ServerConfig::from_settings(&settings("127.0.0.1", raw))
            .expect_err("site base rejected");
        assert!(matches!(
            err,
            ConfigError::InvalidSiteBase { .. } | ConfigError::SiteBaseNotOrigin { .. }
        ));
    }

    #[rstest]
    fn rejects_host_names() {
        let err = ServerConfig::from_settings(&settings("localhost", DEFAULT_SITE_BASE))
            .expect_err("host rejected");
        assert_eq!(
            err,
            ConfigError::InvalidHost {
                host: "localhost".to_owned()
            }
        );
    }
}
