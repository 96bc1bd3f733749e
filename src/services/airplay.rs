//! AirPlay HTTP client.
//!
//! Speaks the three plain-HTTP AirPlay requests opencast needs:
//! - `PUT /photo` with a JPEG body
//! - `POST /play` with a `text/parameters` body naming the video URL
//! - `GET /server-info`, whose plist answers the browse query

use crate::services::cast::{CastClient, CastTarget};
use crate::{Error, Result};
use async_trait::async_trait;
use std::path::Path;

/// Port AirPlay receivers listen on when the address does not name one.
pub const DEFAULT_AIRPLAY_PORT: u16 = 7000;
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = "MediaControl/1.0";

/// AirPlay client configuration.
#[derive(Debug, Clone)]
pub struct AirPlayConfig {
    pub timeout_secs: u64,
}

impl Default for AirPlayConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// AirPlay client shared by every display.
#[derive(Debug, Clone)]
pub struct AirPlayClient {
    client: reqwest::Client,
}

impl AirPlayClient {
    /// Create a new client with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(AirPlayConfig::default())
    }

    /// Create a new client with custom configuration.
    pub fn with_config(config: AirPlayConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client })
    }

    /// Check that a response succeeded, turning other statuses into
    /// [`Error::CastCommandFailed`].
    fn check(command: &str, address: &str, resp: &reqwest::Response) -> Result<()> {
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(Error::CastCommandFailed(format!(
                "{} on {} returned {}",
                command,
                address,
                resp.status()
            )))
        }
    }
}

#[async_trait]
impl CastClient for AirPlayClient {
    async fn send_image(&self, address: &str, image: &Path) -> Result<()> {
        let body = tokio::fs::read(image).await?;
        let url = endpoint(address, "photo");

        tracing::debug!("PUT {} ({} bytes)", url, body.len());
        let resp = self
            .client
            .put(&url)
            .header("X-Apple-Transition", "Dissolve")
            .body(body)
            .send()
            .await?;

        Self::check("photo", address, &resp)
    }

    async fn send_video(&self, address: &str, url: &str) -> Result<()> {
        let endpoint = endpoint(address, "play");
        let body = format!("Content-Location: {}\nStart-Position: 0\n", url);

        tracing::debug!("POST {} -> {}", endpoint, url);
        let resp = self
            .client
            .post(&endpoint)
            .header("Content-Type", "text/parameters")
            .body(body)
            .send()
            .await?;

        Self::check("play", address, &resp)
    }

    async fn browse(&self, address: &str) -> Result<Vec<CastTarget>> {
        let url = endpoint(address, "server-info");
        let resp = self.client.get(&url).send().await?;
        Self::check("server-info", address, &resp)?;

        let body = resp.text().await?;
        Ok(parse_server_info(&body).into_iter().collect())
    }
}

/// Build `http://<address>/<path>`, adding the AirPlay port when missing.
pub fn endpoint(address: &str, path: &str) -> String {
    let address = address
        .trim_start_matches("http://")
        .trim_end_matches('/');
    if address.contains(':') {
        format!("http://{}/{}", address, path)
    } else {
        format!("http://{}:{}/{}", address, DEFAULT_AIRPLAY_PORT, path)
    }
}

/// Pull the receiver name out of a `/server-info` plist.
///
/// Prefers `name`, falls back to `model`.
fn parse_server_info(content: &str) -> Option<CastTarget> {
    // Simple plist parsing using regex, the document is flat key/string pairs
    let get_key = |key: &str| -> Option<String> {
        let pattern = format!(r"<key>{}</key>\s*<string>(.*?)</string>", key);
        regex::Regex::new(&pattern)
            .ok()?
            .captures(content)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty())
    };

    get_key("name")
        .or_else(|| get_key("model"))
        .map(|name| CastTarget { name })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_adds_default_port() {
        assert_eq!(
            endpoint("192.168.1.102", "photo"),
            "http://192.168.1.102:7000/photo"
        );
    }

    #[test]
    fn test_endpoint_keeps_explicit_port() {
        assert_eq!(endpoint("127.0.0.1:7100", "play"), "http://127.0.0.1:7100/play");
        assert_eq!(
            endpoint("http://127.0.0.1:7100/", "play"),
            "http://127.0.0.1:7100/play"
        );
    }

    #[test]
    fn test_parse_server_info() {
        let plist = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<dict>
    <key>deviceid</key>
    <string>58:55:CA:1A:E2:88</string>
    <key>model</key>
    <string>AppleTV2,1</string>
    <key>name</key>
    <string>Living Room</string>
</dict>
</plist>"#;
        assert_eq!(
            parse_server_info(plist),
            Some(CastTarget {
                name: "Living Room".to_string()
            })
        );
    }

    #[test]
    fn test_parse_server_info_falls_back_to_model() {
        let plist = "<dict><key>model</key><string>AppleTV3,2</string></dict>";
        assert_eq!(parse_server_info(plist).unwrap().name, "AppleTV3,2");
        assert!(parse_server_info("<dict></dict>").is_none());
    }
}
