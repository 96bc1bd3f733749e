//! Integration tests for building the application context from config.

mod common;

use common::RecordingClient;
use opencast::core::context::Context;
use opencast::models::config::parse_config;
use opencast::services::cast::CastClient;
use opencast::Error;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn client() -> Arc<dyn CastClient> {
    RecordingClient::new()
}

#[tokio::test]
async fn test_context_registers_displays_and_catalogs() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("Show.Name.S01E01.mp4"), "fake").unwrap();

    let config = parse_config(&format!(
        r#"
[[displays]]
name = "livingroom"
address = "192.168.1.102"

[[displays]]
name = "bedroom"
address = "192.168.1.103"

[[catalogs]]
kind = "local"
source = "{}"
"#,
        temp_dir.path().display()
    ))
    .unwrap();

    let ctx = Context::from_config(config, client()).unwrap();
    assert_eq!(ctx.displays.names(), vec!["livingroom", "bedroom"]);
    assert_eq!(ctx.catalogs.shows().unwrap().len(), 1);

    ctx.power_off_all().await;
    for display in ctx.displays.snapshot() {
        assert!(display.is_off().await);
    }
}

#[test]
fn test_context_rejects_unknown_catalog_type() {
    let config = parse_config(
        r#"
[[catalogs]]
kind = "nfs"
source = "/mnt/media"
"#,
    )
    .unwrap();

    let err = Context::from_config(config, client()).unwrap_err();
    assert!(matches!(err, Error::UnknownCatalogType(_)));
}

#[test]
fn test_context_rejects_missing_source() {
    let config = parse_config(
        r#"
[[catalogs]]
kind = "local"
source = "/nonexistent/opencast/media"
"#,
    )
    .unwrap();

    let err = Context::from_config(config, client()).unwrap_err();
    assert!(matches!(err, Error::PathNotFound(_)));
}

#[tokio::test]
async fn test_preflight_reports_unreachable_display() {
    use opencast::preflight::{all_passed, run_preflight_checks};

    let recording = RecordingClient::new();
    recording.fail_for("192.168.1.103");

    let config = parse_config(
        r#"
[[displays]]
name = "livingroom"
address = "192.168.1.102"

[[displays]]
name = "bedroom"
address = "192.168.1.103"
"#,
    )
    .unwrap();
    let ctx = Context::from_config(config, recording.clone()).unwrap();

    let results = run_preflight_checks(&ctx).await;
    assert!(!all_passed(&results));

    let failed: Vec<_> = results.iter().filter(|r| !r.success).collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].name, "Display bedroom");
}

#[tokio::test]
async fn test_preflight_requires_a_display() {
    use opencast::preflight::{all_passed, run_preflight_checks};

    let ctx = Context::from_config(parse_config("").unwrap(), client()).unwrap();
    let results = run_preflight_checks(&ctx).await;
    assert!(!all_passed(&results));
}

#[tokio::test]
async fn test_listing_never_casts() {
    use opencast::cli::commands::list;
    use opencast::models::media::MediaType;
    use std::time::{Duration, Instant};

    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("Movie.2020.mp4"), "fake").unwrap();

    let recording = RecordingClient::new();
    recording.hang_for("192.168.1.102");

    let config = parse_config(&format!(
        r#"
[playback]
command_timeout_secs = 2
tick_interval_ms = 10

[[displays]]
name = "livingroom"
address = "192.168.1.102"

[[catalogs]]
kind = "local"
source = "{}"
"#,
        temp_dir.path().display()
    ))
    .unwrap();
    let ctx = Context::from_config(config, recording.clone()).unwrap();

    let started = Instant::now();
    list::list(&ctx, MediaType::Movies).await.unwrap();
    tokio::time::sleep(Duration::from_millis(30)).await;

    assert!(started.elapsed() < Duration::from_secs(1));
    assert!(recording.calls().is_empty());
    assert!(ctx.displays.snapshot()[0].is_off().await);
}
