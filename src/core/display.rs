//! Display state machine and registry.
//!
//! Each display tracks two independent flags: power (`On`/`Off`) and playback
//! (`Idle`/`Playing`). Power gates outbound commands. Switching a display off
//! keeps its playback state, so switching it back on resumes whatever the
//! reconciliation loop was doing for it. A video sent while off is dropped and
//! leaves the display idle.
//!
//! All operations on one display run under its own async lock, which is held
//! across the casting call. A tick can therefore never interleave with a
//! `send_video` on the same display.

use crate::models::config::Config;
use crate::services::cast::{CastClient, CastTarget};
use crate::{Error, Result};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::Mutex;

/// Power flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Power {
    #[default]
    On,
    Off,
}

/// Playback intent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Playback {
    #[default]
    Idle,
    Playing,
}

/// Snapshot of a display's flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayState {
    pub power: Power,
    pub playback: Playback,
}

impl std::fmt::Display for DisplayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let power = match self.power {
            Power::On => "on",
            Power::Off => "off",
        };
        let playback = match self.playback {
            Playback::Idle => "idle",
            Playback::Playing => "playing",
        };
        write!(f, "{}, {}", power, playback)
    }
}

/// What one reconciliation step did for a display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileAction {
    /// Idle display was sent the idle image.
    ShowedIdle,
    /// Playing display was polled.
    KeptAlive,
    /// Display is off; nothing was sent.
    Suppressed,
}

/// Settings shared by every display.
#[derive(Debug, Clone)]
pub struct CastSettings {
    /// `http://<host>:<port>` of the media server.
    pub media_base_url: String,
    /// Image sent to idle displays.
    pub idle_image: PathBuf,
    /// Upper bound for a single casting command.
    pub command_timeout: Duration,
}

impl CastSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            media_base_url: config.server.base_url(),
            idle_image: config.playback.idle_image.clone(),
            command_timeout: config.playback.command_timeout(),
        }
    }
}

impl Default for CastSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Build the URL a display fetches `path` from: `<base>/<basename>`.
pub fn video_url(base_url: &str, path: &Path) -> Result<String> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::other(format!("not a playable file: {}", path.display())))?;
    Ok(format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(name)
    ))
}

/// A casting display.
pub struct Display {
    name: String,
    address: String,
    state: Mutex<DisplayState>,
    client: Arc<dyn CastClient>,
    settings: Arc<CastSettings>,
}

impl std::fmt::Debug for Display {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Display")
            .field("name", &self.name)
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

impl Display {
    /// New display, powered on and idle.
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        client: Arc<dyn CastClient>,
        settings: Arc<CastSettings>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            state: Mutex::new(DisplayState::default()),
            client,
            settings,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub async fn state(&self) -> DisplayState {
        *self.state.lock().await
    }

    pub async fn is_playing(&self) -> bool {
        self.state().await.playback == Playback::Playing
    }

    pub async fn is_off(&self) -> bool {
        self.state().await.power == Power::Off
    }

    /// Switch off. Later commands become no-ops; playback is left alone.
    pub async fn off(&self) {
        self.state.lock().await.power = Power::Off;
        tracing::debug!("{}: powered off", self.name);
    }

    pub async fn on(&self) {
        self.state.lock().await.power = Power::On;
        tracing::debug!("{}: powered on", self.name);
    }

    /// Drop back to idle so the next tick shows the idle image.
    pub async fn stop(&self) {
        self.state.lock().await.playback = Playback::Idle;
        tracing::info!("{}: playback stopped", self.name);
    }

    /// Show an image. No-op while off.
    pub async fn send_image(&self, image: &Path) -> Result<()> {
        let state = self.state.lock().await;
        if state.power == Power::Off {
            return Ok(());
        }
        self.image_locked(image).await
    }

    /// Show the idle image.
    pub async fn show_idle(&self) -> Result<()> {
        let image = self.settings.idle_image.clone();
        self.send_image(&image).await
    }

    /// Play a local file through the media server.
    ///
    /// While off, nothing is sent and playback drops to `Idle`; the request is
    /// not queued. Playback only becomes `Playing` once the device accepted
    /// the command.
    pub async fn send_video(&self, path: &Path) -> Result<()> {
        let mut state = self.state.lock().await;
        if state.power == Power::Off {
            state.playback = Playback::Idle;
            tracing::debug!("{}: off, not playing {}", self.name, path.display());
            return Ok(());
        }

        let url = video_url(&self.settings.media_base_url, path)?;
        self.bounded("send_video", self.client.send_video(&self.address, &url))
            .await?;
        state.playback = Playback::Playing;
        tracing::info!("{}: playing {}", self.name, url);
        Ok(())
    }

    /// Poll the device while a video plays. No-op while off.
    pub async fn keep_playing(&self) -> Result<()> {
        let state = self.state.lock().await;
        if state.power == Power::Off {
            return Ok(());
        }
        self.browse_locked().await
    }

    /// Ask the device what it serves, regardless of power. Used by preflight.
    pub async fn probe(&self) -> Result<Vec<CastTarget>> {
        let _state = self.state.lock().await;
        self.bounded("browse", self.client.browse(&self.address))
            .await
    }

    /// One reconciliation step: idle displays get the idle image, playing
    /// displays get polled, switched-off displays get nothing.
    pub async fn reconcile(&self) -> Result<ReconcileAction> {
        let state = self.state.lock().await;
        if state.power == Power::Off {
            return Ok(ReconcileAction::Suppressed);
        }
        match state.playback {
            Playback::Idle => {
                let image = self.settings.idle_image.clone();
                self.image_locked(&image).await?;
                Ok(ReconcileAction::ShowedIdle)
            }
            Playback::Playing => {
                self.browse_locked().await?;
                Ok(ReconcileAction::KeptAlive)
            }
        }
    }

    // Callers hold the state lock.
    async fn image_locked(&self, image: &Path) -> Result<()> {
        self.bounded("send_image", self.client.send_image(&self.address, image))
            .await
    }

    // Result is only logged for now; nothing reacts to what the device reports.
    async fn browse_locked(&self) -> Result<()> {
        let targets = self
            .bounded("browse", self.client.browse(&self.address))
            .await?;
        if let Some(target) = targets.first() {
            tracing::trace!("{}: device reports {}", self.name, target.name);
        }
        Ok(())
    }

    async fn bounded<T>(&self, command: &str, call: impl Future<Output = Result<T>>) -> Result<T> {
        let limit = self.settings.command_timeout;
        match tokio::time::timeout(limit, call).await {
            Ok(result) => result,
            Err(_) => Err(Error::CastTimeout {
                command: format!("{} on {}", command, self.name),
                secs: limit.as_secs(),
            }),
        }
    }
}

/// Named displays in insertion order.
///
/// Safe to mutate while the reconciliation loop reads it: iteration works on
/// a snapshot taken under the lock.
pub struct DisplayRegistry {
    displays: RwLock<Vec<Arc<Display>>>,
    client: Arc<dyn CastClient>,
    settings: Arc<CastSettings>,
}

impl std::fmt::Debug for DisplayRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisplayRegistry")
            .field("displays", &self.names())
            .finish_non_exhaustive()
    }
}

impl DisplayRegistry {
    pub fn new(client: Arc<dyn CastClient>, settings: CastSettings) -> Self {
        Self {
            displays: RwLock::new(Vec::new()),
            client,
            settings: Arc::new(settings),
        }
    }

    /// Register a display. A display with the same name is replaced in place.
    pub fn add(&self, name: impl Into<String>, address: impl Into<String>) -> Arc<Display> {
        let entry = Arc::new(Display::new(
            name,
            address,
            Arc::clone(&self.client),
            Arc::clone(&self.settings),
        ));

        let mut displays = self.displays.write().unwrap_or_else(|e| e.into_inner());
        match displays.iter().position(|d| d.name() == entry.name()) {
            Some(idx) => displays[idx] = Arc::clone(&entry),
            None => displays.push(Arc::clone(&entry)),
        }
        let (name, address) = (entry.name(), entry.address());
        tracing::debug!("Registered display {} at {}", name, address);
        entry
    }

    pub fn get(&self, name: &str) -> Option<Arc<Display>> {
        self.snapshot().into_iter().find(|d| d.name() == name)
    }

    /// First registered display.
    pub fn first(&self) -> Option<Arc<Display>> {
        self.snapshot().into_iter().next()
    }

    /// Look up by name, or take the first display when no name is given.
    pub fn resolve(&self, name: Option<&str>) -> Result<Arc<Display>> {
        match name {
            Some(name) => self
                .get(name)
                .ok_or_else(|| Error::UnknownDisplay(name.to_string())),
            None => self.first().ok_or(Error::NoDisplays),
        }
    }

    /// All displays in insertion order.
    pub fn snapshot(&self) -> Vec<Arc<Display>> {
        self.displays
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn names(&self) -> Vec<String> {
        self.snapshot().iter().map(|d| d.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.displays.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run `f` on every display, one after another.
    pub async fn with_all<F, Fut>(&self, mut f: F)
    where
        F: FnMut(Arc<Display>) -> Fut,
        Fut: Future<Output = ()>,
    {
        for display in self.snapshot() {
            f(display).await;
        }
    }
}
