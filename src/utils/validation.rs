use crate::utils::error::{FanoutError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 純語法檢查：需為帶有 scheme 與 host 的絕對 URL，不做任何網路存取
pub fn is_valid_url(candidate: &str) -> bool {
    if candidate.trim().is_empty() {
        return false;
    }

    match Url::parse(candidate) {
        Ok(url) => url.host_str().map(|host| !host.is_empty()).unwrap_or(false),
        Err(_) => false,
    }
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(FanoutError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(FanoutError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(FanoutError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_url() {
        assert!(is_valid_url("https://example.com"));
        assert!(is_valid_url("http://localhost:8080/data.json?x=1"));
        assert!(is_valid_url("ftp://files.example.com/a.txt"));
        assert!(is_valid_url("http://127.0.0.1:1/"));

        assert!(!is_valid_url(""));
        assert!(!is_valid_url("   "));
        assert!(!is_valid_url("invalid-url"));
        assert!(!is_valid_url("example.com/path"));
        assert!(!is_valid_url("/relative/path"));
        assert!(!is_valid_url("http://"));
        assert!(!is_valid_url("mailto:someone@example.com"));
        assert!(!is_valid_url("https://exa mple.com"));
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("transport.timeout_seconds", 5, 1).is_ok());
        assert!(validate_positive_number("transport.timeout_seconds", 0, 1).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("transport.user_agent", "url-fanout").is_ok());
        assert!(validate_non_empty_string("transport.user_agent", "  ").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("error_codes.overrides", 404u16, 400, 599).is_ok());
        assert!(validate_range("error_codes.overrides", 200u16, 400, 599).is_err());
    }
}
