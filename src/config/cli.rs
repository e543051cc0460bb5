use crate::config::Overrides;
use crate::domain::model::RiskLevel;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "zap-keywords")]
#[command(version, about = "Drive an OWASP ZAP scanner from test pipelines")]
pub struct CliConfig {
    /// ZAP API key (Tools > Options > API)
    #[arg(long, env = "ZAP_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Address ZAP listens on, http://<host>:<port> [default: http://127.0.0.1:8080]
    #[arg(long, env = "ZAP_PROXY", global = true)]
    pub proxy: Option<String>,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Seconds between active scan status checks [default: 5]
    #[arg(long, global = true)]
    pub poll_interval: Option<u64>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Start ZAP in daemon mode from its install directory
    Start {
        /// ZAP install directory (falls back to zap.install_path)
        path: Option<PathBuf>,
    },
    /// Create a new ZAP session
    NewSession,
    /// Run the active scanner against a URL and wait for it to finish
    ActiveScan { url: String },
    /// Print alerts as JSON
    Alerts {
        /// Only alerts for sites under this URL
        #[arg(long)]
        url: Option<String>,

        /// Exit with status 4 when an alert at or above this risk exists
        #[arg(long)]
        fail_on: Option<RiskLevel>,
    },
    /// Print the number of alerts for a URL
    AlertTotal { url: String },
    /// Print the sites ZAP has seen as JSON
    Sites,
    /// Fetch the HTML report
    Report {
        /// Write the report here instead of stdout (falls back to report.output_path)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Shut ZAP down
    Shutdown,
    /// Print Firefox proxy settings pointing at ZAP
    FirefoxProxy {
        host: String,
        port: String,

        #[arg(long, value_enum, default_value = "user-js")]
        format: ProfileFormat,
    },
    /// Print Chrome proxy options pointing at ZAP as WebDriver capabilities
    ChromeProxy { host: String, port: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProfileFormat {
    UserJs,
    Capabilities,
}

impl CliConfig {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            api_key: self.api_key.clone(),
            proxy: self.proxy.clone(),
            poll_interval_seconds: self.poll_interval,
        }
    }
}
