use crate::domain::model::{Alert, ScanId};
use crate::utils::error::Result;
use async_trait::async_trait;

/// The ZAP API calls the keywords are built on. One method per endpoint.
#[async_trait]
pub trait ScannerApi: Send + Sync {
    async fn new_session(&self) -> Result<()>;
    async fn start_active_scan(&self, url: &str) -> Result<ScanId>;
    /// Raw percentage as ZAP reports it, e.g. `"45"`.
    async fn active_scan_status(&self, scan_id: &ScanId) -> Result<String>;
    async fn alerts(&self, base_url: Option<&str>) -> Result<Vec<Alert>>;
    async fn number_of_alerts(&self, base_url: Option<&str>) -> Result<String>;
    async fn sites(&self) -> Result<Vec<String>>;
    async fn html_report(&self) -> Result<String>;
    async fn shutdown(&self) -> Result<()>;
}
