#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::library::DEFAULT_POLL_INTERVAL;
use crate::core::launcher::DEFAULT_ZAP_COMMAND;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_positive_number, validate_url, Validate};
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_PROXY: &str = "http://127.0.0.1:8080";

/// Values given on the command line; each one overrides the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub proxy: Option<String>,
    pub poll_interval_seconds: Option<u64>,
}

/// Effective settings after merging flags, the TOML file and defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_key: String,
    pub proxy: String,
    pub poll_interval: Duration,
    pub request_timeout: Option<Duration>,
    pub install_path: Option<String>,
    pub zap_command: String,
    pub report_output: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            proxy: DEFAULT_PROXY.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: None,
            install_path: None,
            zap_command: DEFAULT_ZAP_COMMAND.to_string(),
            report_output: None,
        }
    }
}

impl Settings {
    pub fn resolve(overrides: Overrides, file: Option<TomlConfig>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Settings::default();

        Self {
            api_key: overrides
                .api_key
                .or(file.zap.api_key)
                .unwrap_or(defaults.api_key),
            proxy: overrides
                .proxy
                .or(file.zap.proxy)
                .unwrap_or(defaults.proxy),
            poll_interval: overrides
                .poll_interval_seconds
                .or(file.scan.poll_interval_seconds)
                .map(Duration::from_secs)
                .unwrap_or(defaults.poll_interval),
            request_timeout: file.scan.request_timeout_seconds.map(Duration::from_secs),
            install_path: file.zap.install_path,
            zap_command: file.zap.command.unwrap_or(defaults.zap_command),
            report_output: file.report.output_path,
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("proxy", &self.proxy)?;
        validate_positive_number("poll_interval", self.poll_interval.as_secs(), 1)?;
        if let Some(path) = &self.install_path {
            validate_path("install_path", path)?;
        }
        if let Some(path) = &self.report_output {
            validate_path("report_output", path)?;
        }
        Ok(())
    }
}
