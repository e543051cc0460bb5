use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;
use zap_keywords::utils::error::{ErrorCategory, ErrorSeverity};
use zap_keywords::{RiskLevel, ScanId, ScannerApi, ZapClient, ZapError, ZapLibrary};

const API_KEY: &str = "test-api-key";

fn library_for(server: &MockServer) -> ZapLibrary<ZapClient> {
    ZapLibrary::new(API_KEY, server.base_url())
        .unwrap()
        .with_poll_interval(Duration::from_millis(10))
}

#[tokio::test]
async fn test_new_session_sends_api_key() {
    let server = MockServer::start();
    let session_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/JSON/core/action/newSession/")
            .header("x-zap-api-key", API_KEY)
            .query_param("apikey", API_KEY);
        then.status(200).json_body(json!({"Result": "OK"}));
    });

    library_for(&server).create_new_session().await.unwrap();

    session_mock.assert();
}

#[tokio::test]
async fn test_active_scan_end_to_end() {
    let server = MockServer::start();
    let scan_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/JSON/ascan/action/scan/")
            .query_param("url", "http://target.local/login");
        then.status(200).json_body(json!({"scan": "3"}));
    });
    let status_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/JSON/ascan/view/status/")
            .query_param("scanId", "3");
        then.status(200).json_body(json!({"status": "100"}));
    });

    let scan_id = library_for(&server)
        .perform_url_active_scan("http://target.local/login")
        .await
        .unwrap();

    assert_eq!(scan_id, ScanId("3".to_string()));
    scan_mock.assert_hits(1);
    status_mock.assert_hits(1);
}

#[tokio::test]
async fn test_get_alerts_filtered_by_url() {
    let server = MockServer::start();
    let alerts_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/JSON/core/view/alerts/")
            .query_param("baseurl", "http://target.local");
        then.status(200).json_body(json!({
            "alerts": [
                {
                    "id": "0",
                    "alert": "Cross Site Scripting (Reflected)",
                    "risk": "High",
                    "confidence": "Medium",
                    "url": "http://target.local/search?q=x",
                    "param": "q",
                    "pluginId": "40012",
                    "cweid": "79",
                    "sourceid": "1"
                },
                {
                    "id": "1",
                    "alert": "Cookie Without Secure Flag",
                    "risk": "Low",
                    "url": "http://target.local/"
                }
            ]
        }));
    });

    let alerts = library_for(&server)
        .get_zap_alerts("http://target.local")
        .await
        .unwrap();

    alerts_mock.assert();
    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0].risk_level(), Some(RiskLevel::High));
    assert_eq!(alerts[0].param.as_deref(), Some("q"));
    assert_eq!(alerts[0].extra.get("sourceid").unwrap(), "1");
    assert_eq!(
        zap_keywords::domain::model::highest_risk(&alerts),
        Some(RiskLevel::High)
    );
}

#[tokio::test]
async fn test_alert_total_and_sites() {
    let server = MockServer::start();
    let count_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/JSON/core/view/numberOfAlerts/")
            .query_param("baseurl", "http://target.local");
        then.status(200).json_body(json!({"numberOfAlerts": "17"}));
    });
    let sites_mock = server.mock(|when, then| {
        when.method(GET).path("/JSON/core/view/sites/");
        then.status(200)
            .json_body(json!({"sites": ["http://target.local", "https://cdn.example"]}));
    });

    let library = library_for(&server);
    let total = library.get_zap_alert_total("http://target.local").await.unwrap();
    let sites = library.get_zap_sites().await.unwrap();

    count_mock.assert();
    sites_mock.assert();
    assert_eq!(total, 17);
    assert_eq!(sites, vec!["http://target.local", "https://cdn.example"]);
}

#[tokio::test]
async fn test_html_report_is_returned_verbatim() {
    let server = MockServer::start();
    let html = "<html><body><h1>ZAP Scanning Report</h1></body></html>";
    let report_mock = server.mock(|when, then| {
        when.method(GET).path("/OTHER/core/other/htmlreport/");
        then.status(200)
            .header("Content-Type", "text/html; charset=UTF-8")
            .body(html);
    });

    let report = library_for(&server).get_zap_html_report().await.unwrap();

    report_mock.assert();
    assert_eq!(report, html);
}

#[tokio::test]
async fn test_shutdown() {
    let server = MockServer::start();
    let shutdown_mock = server.mock(|when, then| {
        when.method(GET).path("/JSON/core/action/shutdown/");
        then.status(200).json_body(json!({"Result": "OK"}));
    });

    library_for(&server).shutdown_zap().await.unwrap();

    shutdown_mock.assert();
}

#[tokio::test]
async fn test_zap_error_body_becomes_api_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/JSON/core/view/sites/");
        then.status(400).json_body(json!({
            "code": "bad_api_key",
            "message": "Provided parameter has illegal or unrecognized value"
        }));
    });

    let err = library_for(&server).get_zap_sites().await.unwrap_err();

    match err {
        ZapError::ApiFailure { code, .. } => assert_eq!(code, "bad_api_key"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_non_zap_error_is_unexpected_response() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/JSON/core/view/alerts/");
        then.status(502).body("Bad Gateway");
    });

    let err = library_for(&server)
        .get_zap_alerts("http://target.local")
        .await
        .unwrap_err();

    assert!(matches!(err, ZapError::UnexpectedResponse { .. }));
    assert!(err.to_string().contains("502"));
}

#[tokio::test]
async fn test_missing_response_key_is_unexpected_response() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/JSON/ascan/action/scan/");
        then.status(200).json_body(json!({"Result": "OK"}));
    });

    let err = library_for(&server)
        .perform_url_active_scan("http://target.local")
        .await
        .unwrap_err();

    match err {
        ZapError::UnexpectedResponse { message, .. } => assert!(message.contains("'scan'")),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_html_success_body_is_unexpected_response() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/JSON/core/view/sites/");
        then.status(200)
            .header("Content-Type", "text/html")
            .body("<html>not zap</html>");
    });
    server.mock(|when, then| {
        when.method(GET).path("/JSON/core/action/newSession/");
        then.status(200)
            .header("Content-Type", "text/html")
            .body("<html>not zap</html>");
    });

    let client = ZapClient::new(API_KEY, server.base_url()).unwrap();
    let sites_err = client.sites().await.unwrap_err();
    let session_err = client.new_session().await.unwrap_err();

    for err in [sites_err, session_err] {
        assert!(matches!(err, ZapError::UnexpectedResponse { .. }), "got {err:?}");
        assert_eq!(err.category(), ErrorCategory::Scanner);
    }
}

#[tokio::test]
async fn test_wrongly_shaped_field_is_unexpected_response() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/JSON/core/view/alerts/");
        then.status(200).json_body(json!({"alerts": "none"}));
    });

    let err = library_for(&server).get_all_zap_alerts().await.unwrap_err();

    match err {
        ZapError::UnexpectedResponse { message, .. } => assert!(message.contains("'alerts'")),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_client_without_api_key() {
    let server = MockServer::start();
    let sites_mock = server.mock(|when, then| {
        when.method(GET).path("/JSON/core/view/sites/");
        then.status(200).json_body(json!({"sites": []}));
    });

    let client = ZapClient::new("", server.base_url()).unwrap();
    let sites = client.sites().await.unwrap();

    sites_mock.assert();
    assert!(sites.is_empty());
}

#[tokio::test]
async fn test_unreachable_zap_is_retryable() {
    // nothing listens on port 1
    let library = ZapLibrary::new(API_KEY, "http://127.0.0.1:1").unwrap();

    let err = library.create_new_session().await.unwrap_err();

    assert!(matches!(err, ZapError::ApiError(_)));
    assert_eq!(err.severity(), ErrorSeverity::Medium);
}
