use crate::domain::model::{Alert, ScanId};
use crate::domain::ports::ScannerApi;
use crate::utils::error::{Result, ZapError};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

const API_KEY_HEADER: &str = "X-ZAP-API-Key";

/// HTTP client for the ZAP REST API.
///
/// ZAP serves its API on the same address it proxies on, so `proxy`
/// (`http://<host>:<port>`) doubles as the API base URL.
#[derive(Debug, Clone)]
pub struct ZapClient {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: String,
    message: String,
}

impl ZapClient {
    pub fn new(api_key: impl Into<String>, proxy: impl Into<String>) -> Result<Self> {
        Self::with_timeout(api_key, proxy, None)
    }

    pub fn with_timeout(
        api_key: impl Into<String>,
        proxy: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: proxy.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Response> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!("ZAP request: GET {} {:?}", url, params);

        let mut request = self.client.get(&url).query(params);
        if !self.api_key.is_empty() {
            request = request
                .header(API_KEY_HEADER, &self.api_key)
                .query(&[("apikey", self.api_key.as_str())]);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("ZAP response status: {}", status);

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ApiErrorBody>(&body) {
            Ok(err) => Err(ZapError::ApiFailure {
                code: err.code,
                message: err.message,
            }),
            Err(_) => Err(ZapError::UnexpectedResponse {
                endpoint: endpoint.to_string(),
                message: format!("HTTP {}", status),
            }),
        }
    }

    async fn get_json(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<serde_json::Value> {
        let body = self.get(endpoint, params).await?.text().await?;
        serde_json::from_str(&body).map_err(|e| ZapError::UnexpectedResponse {
            endpoint: endpoint.to_string(),
            message: format!("response is not JSON: {}", e),
        })
    }

    /// Calls a `JSON/...` endpoint and pulls `key` out of the response object.
    async fn get_json_field<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
        key: &str,
    ) -> Result<T> {
        let mut body = self.get_json(endpoint, params).await?;
        let field = body
            .get_mut(key)
            .map(serde_json::Value::take)
            .ok_or_else(|| ZapError::UnexpectedResponse {
                endpoint: endpoint.to_string(),
                message: format!("missing '{}' in response", key),
            })?;
        serde_json::from_value(field).map_err(|e| ZapError::UnexpectedResponse {
            endpoint: endpoint.to_string(),
            message: format!("unexpected '{}' value: {}", key, e),
        })
    }

    async fn action(&self, endpoint: &str) -> Result<()> {
        let body = self.get_json(endpoint, &[]).await?;
        tracing::debug!("ZAP action {} returned {}", endpoint, body);
        Ok(())
    }
}

fn base_url_param(base_url: Option<&str>) -> Vec<(&str, &str)> {
    base_url.map(|u| vec![("baseurl", u)]).unwrap_or_default()
}

#[async_trait]
impl ScannerApi for ZapClient {
    async fn new_session(&self) -> Result<()> {
        self.action("JSON/core/action/newSession/").await
    }

    async fn start_active_scan(&self, url: &str) -> Result<ScanId> {
        let id: String = self
            .get_json_field("JSON/ascan/action/scan/", &[("url", url)], "scan")
            .await?;
        Ok(ScanId(id))
    }

    async fn active_scan_status(&self, scan_id: &ScanId) -> Result<String> {
        self.get_json_field(
            "JSON/ascan/view/status/",
            &[("scanId", scan_id.as_str())],
            "status",
        )
        .await
    }

    async fn alerts(&self, base_url: Option<&str>) -> Result<Vec<Alert>> {
        self.get_json_field("JSON/core/view/alerts/", &base_url_param(base_url), "alerts")
            .await
    }

    async fn number_of_alerts(&self, base_url: Option<&str>) -> Result<String> {
        self.get_json_field(
            "JSON/core/view/numberOfAlerts/",
            &base_url_param(base_url),
            "numberOfAlerts",
        )
        .await
    }

    async fn sites(&self) -> Result<Vec<String>> {
        self.get_json_field("JSON/core/view/sites/", &[], "sites").await
    }

    async fn html_report(&self) -> Result<String> {
        Ok(self.get("OTHER/core/other/htmlreport/", &[]).await?.text().await?)
    }

    async fn shutdown(&self) -> Result<()> {
        self.action("JSON/core/action/shutdown/").await
    }
}
