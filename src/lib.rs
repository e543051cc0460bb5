pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::adapters::zap_client::ZapClient;
pub use crate::config::{toml_config::TomlConfig, Settings};
pub use crate::core::browser::{set_chrome_proxy, set_firefox_proxy, ChromeOptions, FirefoxProfile};
pub use crate::core::launcher::{start_headless_zap, ZapLauncher};
pub use crate::core::library::ZapLibrary;
pub use crate::domain::model::{Alert, RiskLevel, ScanId};
pub use crate::domain::ports::ScannerApi;
pub use crate::utils::error::{Result, ZapError};
