use crate::utils::error::{Result, ZapError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ZapError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ZapError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ZapError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ZapError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ZapError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(ZapError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ZapError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Rejects `${VAR}` placeholders left behind when the variable was not set.
pub fn validate_no_placeholder(field_name: &str, value: &str) -> Result<()> {
    if let (Some(start), Some(end)) = (value.find("${"), value.rfind('}')) {
        if start < end {
            return Err(ZapError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: value.to_string(),
                reason: format!(
                    "Environment variable {} is not set",
                    &value[start + 2..end]
                ),
            });
        }
    }
    Ok(())
}

/// Parses a TCP port given as text, the way proxy ports arrive from test data.
pub fn parse_port(field_name: &str, value: &str) -> Result<u16> {
    let trimmed = value.trim();
    match trimmed.parse::<u16>() {
        Ok(0) | Err(_) => Err(ZapError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Port must be an integer between 1 and 65535".to_string(),
        }),
        Ok(port) => Ok(port),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("proxy", "http://127.0.0.1:8080").is_ok());
        assert!(validate_url("proxy", "https://zap.internal").is_ok());
        assert!(validate_url("proxy", "").is_err());
        assert!(validate_url("proxy", "localhost-8080").is_err());
        assert!(validate_url("proxy", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("scan.poll_interval_seconds", 5, 1).is_ok());
        assert!(validate_positive_number("scan.poll_interval_seconds", 0, 1).is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("zap.install_path", "/opt/zaproxy").is_ok());
        assert!(validate_path("zap.install_path", "").is_err());
        assert!(validate_path("zap.install_path", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_no_placeholder() {
        assert!(validate_no_placeholder("zap.api_key", "s3cr3t").is_ok());
        assert!(validate_no_placeholder("zap.api_key", "{braces}").is_ok());
        let err = validate_no_placeholder("zap.api_key", "${ZAP_API_KEY}").unwrap_err();
        assert!(err.to_string().contains("ZAP_API_KEY is not set"));
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port("port", "8080").unwrap(), 8080);
        assert_eq!(parse_port("port", " 8090 ").unwrap(), 8090);
        assert!(parse_port("port", "0").is_err());
        assert!(parse_port("port", "70000").is_err());
        assert!(parse_port("port", "http").is_err());
    }
}
