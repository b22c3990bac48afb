mod common;

use std::time::Duration;

use common::{Route, StubServer};
use folio_scraper::{
    AssetDownloader, ClientOptions, DownloadError, DownloadOutcome, FetchError, HttpClient,
    PageFetcher,
};
use tempfile::TempDir;

fn client_for(server: &StubServer) -> HttpClient {
    HttpClient::new(&ClientOptions {
        origin: server.origin(),
        user_agent: "folio-test/1.0".to_string(),
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

#[tokio::test]
async fn fetch_sends_user_agent_and_returns_body() {
    let server = StubServer::start(vec![("/wic-tvc", Route::ok("<h1>WIC</h1>"))]).await;
    let client = client_for(&server);

    let html = client.fetch("/wic-tvc").await.unwrap();
    assert_eq!(html, "<h1>WIC</h1>");

    let hits = server.hits();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].user_agent.as_deref(), Some("folio-test/1.0"));
}

#[tokio::test]
async fn fetch_non_success_carries_status() {
    let server = StubServer::start(vec![]).await;
    let client = client_for(&server);

    let err = client.fetch("/missing").await.unwrap_err();
    match err {
        FetchError::Status { status, url } => {
            assert_eq!(status, 404);
            assert!(url.ends_with("/missing"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn download_follows_redirect_to_final_content() {
    let server = StubServer::start(vec![
        ("/img/start.png", Route::redirect(302, "/img/moved.png")),
        ("/img/moved.png", Route::redirect(301, "/cdn/final.png")),
        ("/cdn/final.png", Route::ok(b"PNGDATA".to_vec())),
    ])
    .await;
    let client = client_for(&server);
    let tmp = TempDir::new().unwrap();
    let dest = tmp.path().join("thumbnails").join("commercial").join("x.png");

    let outcome = client
        .download(&server.url("/img/start.png"), &dest)
        .await
        .unwrap();

    assert_eq!(outcome, DownloadOutcome::Downloaded { bytes: 7 });
    assert_eq!(std::fs::read(&dest).unwrap(), b"PNGDATA");
    let leftovers: Vec<_> = std::fs::read_dir(dest.parent().unwrap())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(leftovers, vec![std::ffi::OsString::from("x.png")]);
}

#[tokio::test]
async fn second_download_is_skipped_without_request() {
    let server = StubServer::start(vec![("/a.jpg", Route::ok(b"JPEG".to_vec()))]).await;
    let client = client_for(&server);
    let tmp = TempDir::new().unwrap();
    let dest = tmp.path().join("a.jpg");

    let first = client.download(&server.url("/a.jpg"), &dest).await.unwrap();
    let second = client.download(&server.url("/a.jpg"), &dest).await.unwrap();

    assert!(matches!(first, DownloadOutcome::Downloaded { .. }));
    assert_eq!(second, DownloadOutcome::Skipped);
    assert_eq!(server.hit_count("/a.jpg"), 1);
}

#[tokio::test]
async fn server_error_leaves_no_file() {
    let server = StubServer::start(vec![("/broken.jpg", Route::status(500))]).await;
    let client = client_for(&server);
    let tmp = TempDir::new().unwrap();
    let dest = tmp.path().join("broken.jpg");

    let err = client
        .download(&server.url("/broken.jpg"), &dest)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert!(!dest.exists());
}

#[tokio::test]
async fn truncated_body_removes_partial_file() {
    let server = StubServer::start(vec![("/cut.jpg", Route::truncated(b"HALF".to_vec()))]).await;
    let client = client_for(&server);
    let tmp = TempDir::new().unwrap();
    let dest = tmp.path().join("cut.jpg");

    let result = client.download(&server.url("/cut.jpg"), &dest).await;

    assert!(result.is_err());
    assert!(!dest.exists());
    assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn redirect_loop_gives_up() {
    let server = StubServer::start(vec![("/loop.jpg", Route::redirect(302, "/loop.jpg"))]).await;
    let client = client_for(&server);
    let tmp = TempDir::new().unwrap();
    let dest = tmp.path().join("loop.jpg");

    let err = client
        .download(&server.url("/loop.jpg"), &dest)
        .await
        .unwrap_err();

    assert!(matches!(err, DownloadError::TooManyRedirects { hops: 10, .. }));
    assert!(!dest.exists());
}

#[tokio::test]
async fn redirect_without_location_is_an_error() {
    let server = StubServer::start(vec![("/nowhere.jpg", Route::status(302))]).await;
    let client = client_for(&server);
    let tmp = TempDir::new().unwrap();

    let err = client
        .download(&server.url("/nowhere.jpg"), &tmp.path().join("n.jpg"))
        .await
        .unwrap_err();

    assert!(matches!(err, DownloadError::MissingLocation(_)));
}
