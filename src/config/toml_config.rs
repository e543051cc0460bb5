use crate::utils::error::{Result, ZapError};
use crate::utils::validation::{
    validate_no_placeholder, validate_path, validate_positive_number, validate_url, Validate,
};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub zap: ZapSection,
    pub scan: ScanSection,
    pub report: ReportSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ZapSection {
    pub api_key: Option<String>,
    pub proxy: Option<String>,
    pub install_path: Option<String>,
    pub command: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScanSection {
    pub poll_interval_seconds: Option<u64>,
    pub request_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReportSection {
    pub output_path: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ZapError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ZapError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ZapError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        let text_fields = [
            ("zap.api_key", &self.zap.api_key),
            ("zap.proxy", &self.zap.proxy),
            ("zap.install_path", &self.zap.install_path),
            ("zap.command", &self.zap.command),
            ("report.output_path", &self.report.output_path),
        ];
        for (field, value) in text_fields {
            if let Some(value) = value {
                validate_no_placeholder(field, value)?;
            }
        }

        if let Some(proxy) = &self.zap.proxy {
            validate_url("zap.proxy", proxy)?;
        }
        if let Some(path) = &self.zap.install_path {
            validate_path("zap.install_path", path)?;
        }
        if let Some(interval) = self.scan.poll_interval_seconds {
            validate_positive_number("scan.poll_interval_seconds", interval, 1)?;
        }
        if let Some(timeout) = self.scan.request_timeout_seconds {
            validate_positive_number("scan.request_timeout_seconds", timeout, 1)?;
        }
        if let Some(path) = &self.report.output_path {
            validate_path("report.output_path", path)?;
        }
        Ok(())
    }
}
