use crate::adapters::zap_client::ZapClient;
use crate::core::{Alert, Result, ScanId, ScannerApi};
use crate::utils::error::ZapError;
use std::time::Duration;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Keywords for driving OWASP ZAP from test automation.
///
/// A typical security test:
/// 1. start ZAP headless ([`crate::start_headless_zap`]),
/// 2. open a browser proxied through ZAP ([`crate::set_firefox_proxy`] or
///    [`crate::set_chrome_proxy`]) and navigate to the step under test,
/// 3. [`create_new_session`](Self::create_new_session), run the functional test,
/// 4. [`perform_url_active_scan`](Self::perform_url_active_scan),
/// 5. collect [`get_zap_alerts`](Self::get_zap_alerts) and the HTML report,
/// 6. [`shutdown_zap`](Self::shutdown_zap).
///
/// Errors from the API client are returned as-is.
pub struct ZapLibrary<A: ScannerApi> {
    api: A,
    poll_interval: Duration,
}

impl ZapLibrary<ZapClient> {
    /// `api_key` is the key from *Tools > Options > API* in ZAP; `proxy` is
    /// where ZAP listens, `http://<host>:<port>`.
    pub fn new(api_key: impl Into<String>, proxy: impl Into<String>) -> Result<Self> {
        Ok(Self::with_api(ZapClient::new(api_key, proxy)?))
    }
}

impl<A: ScannerApi> ZapLibrary<A> {
    pub fn with_api(api: A) -> Self {
        Self {
            api,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn create_new_session(&self) -> Result<()> {
        tracing::info!("Create a new Session");
        self.api.new_session().await
    }

    /// Runs the active scanner against `url` and blocks until ZAP reports 100%.
    ///
    /// There is no timeout: a scan that never completes keeps this polling.
    pub async fn perform_url_active_scan(&self, url: &str) -> Result<ScanId> {
        tracing::info!("Begin Active scan {}", url);
        let scan_id = self.api.start_active_scan(url).await?;
        tracing::info!("Scan id: {}", scan_id);

        loop {
            let progress = self.scan_progress(&scan_id).await?;
            if progress >= 100 {
                break;
            }
            tracing::info!("Scan progress %: {}", progress);
            tokio::time::sleep(self.poll_interval).await;
        }

        tracing::info!("Active scan is complete");
        Ok(scan_id)
    }

    async fn scan_progress(&self, scan_id: &ScanId) -> Result<i64> {
        let status = self.api.active_scan_status(scan_id).await?;
        status
            .trim()
            .parse()
            .map_err(|_| ZapError::UnexpectedResponse {
                endpoint: "ascan/view/status".to_string(),
                message: format!("scan status '{}' is not a number", status),
            })
    }

    /// All alerts ZAP raised for sites under `url`.
    pub async fn get_zap_alerts(&self, url: &str) -> Result<Vec<Alert>> {
        tracing::info!("Retrieve all alerts");
        self.api.alerts(Some(url)).await
    }

    pub async fn get_all_zap_alerts(&self) -> Result<Vec<Alert>> {
        tracing::info!("Retrieve all alerts");
        self.api.alerts(None).await
    }

    pub async fn get_zap_alert_total(&self, url: &str) -> Result<u64> {
        let raw = self.api.number_of_alerts(Some(url)).await?;
        let total = raw
            .trim()
            .parse()
            .map_err(|_| ZapError::UnexpectedResponse {
                endpoint: "core/view/numberOfAlerts".to_string(),
                message: format!("alert count '{}' is not a number", raw),
            })?;
        tracing::info!("Retrieve alerts {}", total);
        Ok(total)
    }

    /// Sites ZAP has seen traffic for during the test.
    pub async fn get_zap_sites(&self) -> Result<Vec<String>> {
        tracing::info!("Retrieved sites");
        self.api.sites().await
    }

    pub async fn get_zap_html_report(&self) -> Result<String> {
        tracing::info!("Generated html report");
        self.api.html_report().await
    }

    pub async fn shutdown_zap(&self) -> Result<()> {
        tracing::info!("Shutting Down ZAP");
        self.api.shutdown().await
    }
}
