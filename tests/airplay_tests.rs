//! Integration tests for the AirPlay client against a mock receiver.

use mockito::{Matcher, Server};
use opencast::services::airplay::AirPlayClient;
use opencast::services::cast::CastClient;
use opencast::Error;
use std::fs;
use tempfile::TempDir;

#[tokio::test]
async fn test_send_image_puts_photo() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/photo")
        .match_body("jpeg bytes")
        .with_status(200)
        .create_async()
        .await;

    let temp_dir = TempDir::new().unwrap();
    let image = temp_dir.path().join("offair.jpg");
    fs::write(&image, "jpeg bytes").unwrap();

    let client = AirPlayClient::new().unwrap();
    client
        .send_image(&server.host_with_port(), &image)
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_send_video_posts_play() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/play")
        .match_header("content-type", "text/parameters")
        .match_body(Matcher::Regex(
            r"Content-Location: http://192\.168\.1\.127:8080/Movie\.2020\.mp4".to_string(),
        ))
        .with_status(200)
        .create_async()
        .await;

    let client = AirPlayClient::new().unwrap();
    client
        .send_video(
            &server.host_with_port(),
            "http://192.168.1.127:8080/Movie.2020.mp4",
        )
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_browse_reads_server_info() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/server-info")
        .with_status(200)
        .with_header("content-type", "text/x-apple-plist+xml")
        .with_body(
            r#"<plist version="1.0"><dict>
<key>model</key><string>AppleTV2,1</string>
<key>name</key><string>Living Room</string>
</dict></plist>"#,
        )
        .create_async()
        .await;

    let client = AirPlayClient::new().unwrap();
    let targets = client.browse(&server.host_with_port()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].name, "Living Room");
}

#[tokio::test]
async fn test_error_status_is_command_failure() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/play")
        .with_status(500)
        .create_async()
        .await;

    let client = AirPlayClient::new().unwrap();
    let err = client
        .send_video(&server.host_with_port(), "http://media/x.mp4")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::CastCommandFailed(_)));
}

#[tokio::test]
async fn test_missing_image_is_io_error() {
    let client = AirPlayClient::new().unwrap();
    let err = client
        .send_image("127.0.0.1:9", std::path::Path::new("/nonexistent/offair.jpg"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Io(_)));
}
