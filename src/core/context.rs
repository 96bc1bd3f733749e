//! Application context.
//!
//! Owns the catalog and display registries built from the configuration.
//! Everything that needs them gets them from here instead of from globals.

use crate::core::catalog::CatalogRegistry;
use crate::core::display::{CastSettings, DisplayRegistry};
use crate::core::reconciler::{Reconciler, ReconcilerHandle};
use crate::models::config::Config;
use crate::services::cast::CastClient;
use crate::Result;
use std::sync::Arc;

/// Registries plus the configuration they were built from.
#[derive(Debug)]
pub struct Context {
    pub config: Config,
    pub catalogs: CatalogRegistry,
    pub displays: Arc<DisplayRegistry>,
}

impl Context {
    /// Register every configured display and catalog.
    ///
    /// Fails on the first unknown catalog type or missing source, before any
    /// background work starts.
    pub fn from_config(config: Config, client: Arc<dyn CastClient>) -> Result<Self> {
        let displays = Arc::new(DisplayRegistry::new(client, CastSettings::from_config(&config)));
        for display in &config.displays {
            displays.add(display.name.clone(), display.address.clone());
        }

        let mut catalogs = CatalogRegistry::new();
        for catalog in &config.catalogs {
            catalogs.add(&catalog.kind, &catalog.source)?;
        }

        tracing::debug!(
            "Context ready: {} displays, {} catalogs",
            displays.len(),
            catalogs.len()
        );

        Ok(Self {
            config,
            catalogs,
            displays,
        })
    }

    /// Start the reconciliation loop over this context's displays.
    pub fn start_reconciler(&self) -> ReconcilerHandle {
        Reconciler::new(
            Arc::clone(&self.displays),
            self.config.playback.tick_interval(),
        )
        .spawn()
    }

    /// Switch every display off.
    pub async fn power_off_all(&self) {
        self.displays.with_all(|display| async move { display.off().await }).await;
    }
}
