use clap::Parser;
use std::path::PathBuf;
use zap_keywords::config::cli::{Command, ProfileFormat};
use zap_keywords::core::report::{alerts_exit_code, write_report};
use zap_keywords::utils::error::ErrorSeverity;
use zap_keywords::utils::logger;
use zap_keywords::utils::validation::Validate;
use zap_keywords::{
    set_chrome_proxy, set_firefox_proxy, CliConfig, Settings, TomlConfig, ZapClient, ZapError,
    ZapLauncher, ZapLibrary,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            tracing::error!(
                "❌ {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }
}

async fn run(cli: CliConfig) -> Result<i32, ZapError> {
    let file = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            let file = TomlConfig::from_file(path)?;
            file.validate()?;
            Some(file)
        }
        None => None,
    };

    let settings = Settings::resolve(cli.overrides(), file);
    settings.validate()?;
    tracing::debug!("Using ZAP at {}", settings.proxy);

    match cli.command {
        Command::Start { path } => {
            let path = path
                .or_else(|| settings.install_path.as_ref().map(PathBuf::from))
                .ok_or_else(|| ZapError::MissingConfigError {
                    field: "zap.install_path".to_string(),
                })?;
            ZapLauncher::new(path)
                .with_command(settings.zap_command.clone())
                .launch()?;
        }
        Command::FirefoxProxy { host, port, format } => {
            let profile = set_firefox_proxy(&host, &port)?;
            match format {
                ProfileFormat::UserJs => print!("{}", profile.user_js()),
                ProfileFormat::Capabilities => {
                    println!("{}", serde_json::to_string_pretty(&profile.to_capabilities())?)
                }
            }
        }
        Command::ChromeProxy { host, port } => {
            let options = set_chrome_proxy(&host, &port)?;
            println!("{}", serde_json::to_string_pretty(&options.to_capabilities())?);
        }
        Command::NewSession => library(&settings)?.create_new_session().await?,
        Command::ActiveScan { url } => {
            let scan_id = library(&settings)?.perform_url_active_scan(&url).await?;
            println!("{}", scan_id);
        }
        Command::Alerts { url, fail_on } => {
            let library = library(&settings)?;
            let alerts = match url.as_deref() {
                Some(url) => library.get_zap_alerts(url).await?,
                None => library.get_all_zap_alerts().await?,
            };
            println!("{}", serde_json::to_string_pretty(&alerts)?);
            return Ok(alerts_exit_code(&alerts, fail_on));
        }
        Command::AlertTotal { url } => {
            println!("{}", library(&settings)?.get_zap_alert_total(&url).await?);
        }
        Command::Sites => {
            let sites = library(&settings)?.get_zap_sites().await?;
            println!("{}", serde_json::to_string_pretty(&sites)?);
        }
        Command::Report { output } => {
            let report = library(&settings)?.get_zap_html_report().await?;
            match output.or_else(|| settings.report_output.as_ref().map(PathBuf::from)) {
                Some(path) => {
                    write_report(&path, &report)?;
                }
                None => print!("{}", report),
            }
        }
        Command::Shutdown => library(&settings)?.shutdown_zap().await?,
    }

    Ok(0)
}

fn library(settings: &Settings) -> Result<ZapLibrary<ZapClient>, ZapError> {
    let client = ZapClient::with_timeout(
        settings.api_key.clone(),
        settings.proxy.clone(),
        settings.request_timeout,
    )?;
    Ok(ZapLibrary::with_api(client).with_poll_interval(settings.poll_interval))
}
