//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{DEFAULT_LOCALE, Error, Locale};

/// Validation error codes reported in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    UnsupportedLocale,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::UnsupportedLocale => "unsupported_locale",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    Error::invalid_request(format!("{} must not be blank", field.as_str())).with_details(json!({
        "field": field.as_str(),
        "code": ErrorCode::MissingField.as_str(),
    }))
}

/// Trimmed value of a required text field.
pub(crate) fn require_text(field: FieldName, value: &str) -> Result<&str, Error> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(missing_field_error(field));
    }
    Ok(trimmed)
}

/// Parse an optional locale parameter; absent means the site default.
pub(crate) fn parse_locale(field: FieldName, value: Option<&str>) -> Result<Locale, Error> {
    let Some(raw) = value else {
        return Ok(DEFAULT_LOCALE);
    };
    raw.parse::<Locale>().map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": field.as_str(),
            "value": raw,
            "code": ErrorCode::UnsupportedLocale.as_str(),
        }))
    })
}
