//! Casting capability.
//!
//! The display state machine only needs three things from a casting device:
//! show an image, play a video URL, and report what it is showing. Anything
//! that can do those implements [`CastClient`].

use crate::Result;
use async_trait::async_trait;
use std::path::Path;

/// A receiver reported by [`CastClient::browse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastTarget {
    pub name: String,
}

/// Commands a casting device accepts. One client is shared by all displays,
/// so every call names the device address it is for.
#[async_trait]
pub trait CastClient: Send + Sync {
    /// Display a local image file.
    async fn send_image(&self, address: &str, image: &Path) -> Result<()>;

    /// Start playing the video at `url`.
    async fn send_video(&self, address: &str, url: &str) -> Result<()>;

    /// Query the device for what it is currently serving.
    async fn browse(&self, address: &str) -> Result<Vec<CastTarget>>;
}
