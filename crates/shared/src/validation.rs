//! Common validation utilities for profile and link fields.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Profile names: 3-50 chars, lowercase letters, digits, hyphens.
    static ref PROFILE_NAME_RE: Regex = Regex::new(r"^[a-z0-9][a-z0-9-]{2,49}$").unwrap();

    /// Phone numbers: optional leading +, 7-15 digits.
    static ref PHONE_RE: Regex = Regex::new(r"^\+?\d{7,15}$").unwrap();

    /// Hex color: #RRGGBB.
    static ref HEX_COLOR_RE: Regex = Regex::new(r"^#[0-9a-fA-F]{6}$").unwrap();
}

/// Validates a public profile name (used in vanity URLs).
pub fn validate_profile_name(name: &str) -> Result<(), ValidationError> {
    if PROFILE_NAME_RE.is_match(name) {
        Ok(())
    } else {
        let mut err = ValidationError::new("profile_name");
        err.message =
            Some("Profile name must be 3-50 lowercase letters, digits or hyphens".into());
        Err(err)
    }
}

/// Validates a contact phone number.
pub fn validate_phone_number(number: &str) -> Result<(), ValidationError> {
    if PHONE_RE.is_match(number) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone");
        err.message = Some("Phone number must be 7-15 digits, optionally prefixed with +".into());
        Err(err)
    }
}

/// Validates a theme color (hex #RRGGBB).
pub fn validate_theme_color(color: &str) -> Result<(), ValidationError> {
    if HEX_COLOR_RE.is_match(color) {
        Ok(())
    } else {
        let mut err = ValidationError::new("theme_color");
        err.message = Some("Theme color must be a #RRGGBB hex value".into());
        Err(err)
    }
}

/// Validates a link URL: http(s) scheme and a non-empty host.
pub fn validate_link_url(url: &str) -> Result<(), ValidationError> {
    let valid = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .map(|rest| {
            let host = rest.split('/').next().unwrap_or("");
            !host.is_empty() && host.contains('.')
        })
        .unwrap_or(false);

    if valid {
        Ok(())
    } else {
        let mut err = ValidationError::new("url");
        err.message = Some("URL must be an absolute http(s) URL".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_name_accepts_kebab_case() {
        validate_profile_name("jane-doe").unwrap();
        validate_profile_name("acme42").unwrap();
    }

    #[test]
    fn test_profile_name_rejects_bad_inputs() {
        assert!(validate_profile_name("ab").is_err());
        assert!(validate_profile_name("Jane Doe").is_err());
        assert!(validate_profile_name("-leading").is_err());
        assert!(validate_profile_name(&"x".repeat(60)).is_err());
    }

    #[test]
    fn test_phone_number() {
        validate_phone_number("+14155552671").unwrap();
        validate_phone_number("4155552671").unwrap();
        assert!(validate_phone_number("12345").is_err());
        assert!(validate_phone_number("call-me").is_err());
    }

    #[test]
    fn test_theme_color() {
        validate_theme_color("#023458").unwrap();
        assert!(validate_theme_color("023458").is_err());
        assert!(validate_theme_color("#23458").is_err());
        assert!(validate_theme_color("#02345g").is_err());
    }

    #[test]
    fn test_link_url() {
        validate_link_url("https://example.com/page").unwrap();
        validate_link_url("http://example.co").unwrap();
        assert!(validate_link_url("ftp://example.com").is_err());
        assert!(validate_link_url("https://").is_err());
        assert!(validate_link_url("example.com").is_err());
    }
}
