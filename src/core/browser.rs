//! Browser proxy settings that route all browser traffic through ZAP.
//!
//! The builders produce plain values that can be handed to any WebDriver
//! client as capabilities, or written into a Firefox profile directory.

use crate::utils::error::Result;
use crate::utils::validation::{parse_port, validate_non_empty_string};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// `network.proxy.type` value for a manually configured proxy.
const MANUAL_PROXY: i64 = 1;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Preference {
    Bool(bool),
    Int(i64),
    String(String),
}

impl From<i64> for Preference {
    fn from(value: i64) -> Self {
        Preference::Int(value)
    }
}

impl From<u16> for Preference {
    fn from(value: u16) -> Self {
        Preference::Int(i64::from(value))
    }
}

impl From<&str> for Preference {
    fn from(value: &str) -> Self {
        Preference::String(value.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FirefoxProfile {
    preferences: BTreeMap<String, Preference>,
}

impl FirefoxProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_preference(&mut self, key: impl Into<String>, value: impl Into<Preference>) {
        self.preferences.insert(key.into(), value.into());
    }

    pub fn preference(&self, key: &str) -> Option<&Preference> {
        self.preferences.get(key)
    }

    pub fn preferences(&self) -> &BTreeMap<String, Preference> {
        &self.preferences
    }

    /// Renders the preferences in `user.js` syntax.
    pub fn user_js(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.preferences {
            let rendered = match value {
                Preference::Bool(b) => b.to_string(),
                Preference::Int(i) => i.to_string(),
                // JSON string escaping matches the JS string literal rules user.js needs
                Preference::String(s) => Value::String(s.clone()).to_string(),
            };
            let _ = writeln!(out, "user_pref(\"{}\", {});", key, rendered);
        }
        out
    }

    pub fn to_capabilities(&self) -> Value {
        json!({
            "browserName": "firefox",
            "moz:firefoxOptions": { "prefs": self.preferences }
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChromeOptions {
    arguments: Vec<String>,
}

impl ChromeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_argument(&mut self, argument: impl Into<String>) {
        self.arguments.push(argument.into());
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    pub fn to_capabilities(&self) -> Value {
        json!({
            "browserName": "chrome",
            "goog:chromeOptions": { "args": self.arguments }
        })
    }
}

/// Firefox profile that sends HTTP and HTTPS traffic through ZAP at `host:port`.
pub fn set_firefox_proxy(host: &str, port: &str) -> Result<FirefoxProfile> {
    validate_non_empty_string("host", host)?;
    let port = parse_port("port", port)?;

    let mut profile = FirefoxProfile::new();
    profile.set_preference("network.proxy.http", host);
    profile.set_preference("network.proxy.http_port", port);
    profile.set_preference("network.proxy.ssl", host);
    profile.set_preference("network.proxy.ssl_port", port);
    profile.set_preference("network.proxy.type", MANUAL_PROXY);
    tracing::debug!("Firefox profile proxied through {}:{}", host, port);
    Ok(profile)
}

/// Chrome options that send all traffic through ZAP at `host:port`.
pub fn set_chrome_proxy(host: &str, port: &str) -> Result<ChromeOptions> {
    validate_non_empty_string("host", host)?;
    let port = parse_port("port", port)?;

    let mut options = ChromeOptions::new();
    options.add_argument(format!("--proxy-server={}:{}", host, port));
    tracing::debug!("Chrome options proxied through {}:{}", host, port);
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_firefox_proxy_preferences() {
        let profile = set_firefox_proxy("127.0.0.1", "8090").unwrap();

        assert_eq!(
            profile.preference("network.proxy.http"),
            Some(&Preference::String("127.0.0.1".to_string()))
        );
        assert_eq!(
            profile.preference("network.proxy.ssl_port"),
            Some(&Preference::Int(8090))
        );
        assert_eq!(
            profile.preference("network.proxy.type"),
            Some(&Preference::Int(1))
        );
        assert_eq!(profile.preferences().len(), 5);
    }

    #[test]
    fn test_firefox_user_js() {
        let profile = set_firefox_proxy("localhost", "8080").unwrap();

        let user_js = profile.user_js();

        assert!(user_js.contains("user_pref(\"network.proxy.http\", \"localhost\");\n"));
        assert!(user_js.contains("user_pref(\"network.proxy.http_port\", 8080);\n"));
        assert!(user_js.contains("user_pref(\"network.proxy.type\", 1);\n"));
        assert_eq!(user_js.lines().count(), 5);
    }

    #[test]
    fn test_firefox_capabilities() {
        let caps = set_firefox_proxy("localhost", "8080")
            .unwrap()
            .to_capabilities();

        assert_eq!(caps["browserName"], "firefox");
        assert_eq!(caps["moz:firefoxOptions"]["prefs"]["network.proxy.ssl"], "localhost");
        assert_eq!(caps["moz:firefoxOptions"]["prefs"]["network.proxy.http_port"], 8080);
    }

    #[test]
    fn test_chrome_proxy_argument() {
        let options = set_chrome_proxy("zap.local", "8080").unwrap();

        assert_eq!(options.arguments(), &["--proxy-server=zap.local:8080".to_string()]);
        assert_eq!(
            options.to_capabilities()["goog:chromeOptions"]["args"][0],
            "--proxy-server=zap.local:8080"
        );
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(set_firefox_proxy("localhost", "eighty").is_err());
        assert!(set_chrome_proxy("localhost", "").is_err());
        assert!(set_chrome_proxy("", "8080").is_err());
    }
}
