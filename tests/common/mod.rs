//! Shared test helpers.

#![allow(dead_code)]

use async_trait::async_trait;
use opencast::core::display::{CastSettings, DisplayRegistry};
use opencast::services::cast::{CastClient, CastTarget};
use opencast::{Error, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A command received by [`RecordingClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Image { address: String, image: PathBuf },
    Video { address: String, url: String },
    Browse { address: String },
}

/// Cast client that records every call instead of talking to a device.
#[derive(Debug, Default)]
pub struct RecordingClient {
    calls: Mutex<Vec<Call>>,
    failing: Mutex<HashSet<String>>,
    hanging: Mutex<HashSet<String>>,
}

impl RecordingClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Make every call to `address` fail.
    pub fn fail_for(&self, address: &str) {
        self.failing.lock().unwrap().insert(address.to_string());
    }

    /// Make every call to `address` never return.
    pub fn hang_for(&self, address: &str) {
        self.hanging.lock().unwrap().insert(address.to_string());
    }

    async fn handle(&self, address: &str, call: Call) -> Result<()> {
        self.calls.lock().unwrap().push(call);

        let hangs = self.hanging.lock().unwrap().contains(address);
        if hangs {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }

        if self.failing.lock().unwrap().contains(address) {
            return Err(Error::CastCommandFailed(format!("{} unreachable", address)));
        }
        Ok(())
    }
}

#[async_trait]
impl CastClient for RecordingClient {
    async fn send_image(&self, address: &str, image: &Path) -> Result<()> {
        let call = Call::Image {
            address: address.to_string(),
            image: image.to_path_buf(),
        };
        self.handle(address, call).await
    }

    async fn send_video(&self, address: &str, url: &str) -> Result<()> {
        let call = Call::Video {
            address: address.to_string(),
            url: url.to_string(),
        };
        self.handle(address, call).await
    }

    async fn browse(&self, address: &str) -> Result<Vec<CastTarget>> {
        let call = Call::Browse {
            address: address.to_string(),
        };
        self.handle(address, call).await?;
        Ok(vec![CastTarget {
            name: format!("receiver@{}", address),
        }])
    }
}

pub fn settings() -> CastSettings {
    CastSettings {
        media_base_url: "http://192.168.1.127:8080".to_string(),
        idle_image: PathBuf::from("assets/offair.jpg"),
        command_timeout: Duration::from_millis(200),
    }
}

pub fn registry(client: &Arc<RecordingClient>) -> DisplayRegistry {
    let client: Arc<dyn CastClient> = client.clone();
    DisplayRegistry::new(client, settings())
}
