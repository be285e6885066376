//! Fetching over HTTP and from disk, end to end through `collect`.

use std::io::Write;
use std::time::Duration;

use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mediazip::{
    ArchiveEncoder, ArchivePolicy, AutoSource, CollectOptions, DosDateTime, HttpSource, MediaItem,
    MediaSource, collect,
};

fn fast_http() -> HttpSource {
    HttpSource::new()
        .unwrap()
        .with_backoff(Duration::from_millis(1))
}

async fn serve(server: &MockServer, route: &str, status: u16, body: &[u8]) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_bytes(body.to_vec()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn fetches_body_and_counts_bytes() {
    let server = MockServer::start().await;
    serve(&server, "/media/photo.jpg", 200, b"\xFF\xD8\xFF\xE0").await;

    let http = fast_http();
    let data = http
        .fetch(&format!("{}/media/photo.jpg", server.uri()))
        .await
        .unwrap();
    assert_eq!(data, b"\xFF\xD8\xFF\xE0");
    assert_eq!(http.transferred_bytes(), 4);
}

#[tokio::test]
async fn server_errors_are_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/flaky.png"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    serve(&server, "/flaky.png", 200, b"png").await;

    let http = fast_http().with_max_retry(3);
    let data = http
        .fetch(&format!("{}/flaky.png", server.uri()))
        .await
        .unwrap();
    assert_eq!(data, b"png");
}

#[tokio::test]
async fn retries_run_out() {
    let server = MockServer::start().await;
    serve(&server, "/down.gif", 500, b"").await;

    let http = fast_http().with_max_retry(2);
    let err = http
        .fetch(&format!("{}/down.gif", server.uri()))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Max retries exceeded"));
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn client_errors_fail_immediately() {
    let server = MockServer::start().await;
    serve(&server, "/gone.mp4", 404, b"").await;

    let err = fast_http()
        .fetch(&format!("{}/gone.mp4", server.uri()))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("404"));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn mixed_sources_become_one_archive() {
    let server = MockServer::start().await;
    serve(&server, "/a/clip.mp4", 200, b"ftypisom").await;
    serve(&server, "/b/clip.mp4", 200, b"ftypmp42").await;

    let mut local = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
    local.write_all(b"\x89PNG").unwrap();
    let local_path = local.path().to_str().unwrap().to_string();
    let local_name = local
        .path()
        .file_name()
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();

    let items = [
        MediaItem::new(format!("{}/a/clip.mp4?sig=1", server.uri())),
        MediaItem::new(local_path),
        MediaItem::new(format!("{}/b/clip.mp4", server.uri())),
        MediaItem::new(format!("{}/missing.jpg", server.uri())),
    ];

    let source = AutoSource::new(fast_http());
    let collection = collect(
        &source,
        &items,
        &ArchivePolicy::default(),
        &CollectOptions::default(),
    )
    .await
    .unwrap();

    let names: Vec<_> = collection.files.names().collect();
    assert_eq!(names, ["clip.mp4", local_name.as_str(), "clip-1.mp4"]);
    assert_eq!(collection.failures.len(), 1);
    assert_eq!(source.http().transferred_bytes(), 16);

    let bytes = ArchiveEncoder::new(DosDateTime::from_calendar(2025, 1, 1, 0, 0, 0))
        .encode(&collection.files)
        .unwrap();
    let archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
    assert_eq!(archive.len(), 3);
}
