use dataset_fetch::{DownloadConfig, Downloader, Error};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn drive_downloader(server: &MockServer) -> Downloader {
    let config = DownloadConfig::default().with_drive_base_url(server.uri());
    Downloader::with_config(&config).unwrap()
}

fn zip_bytes(dir: &Path, entries: &[(&str, &[u8])]) -> Vec<u8> {
    let path = dir.join("fixture.zip");
    let mut writer = zip::ZipWriter::new(File::create(&path).unwrap());
    for (name, data) in entries {
        writer
            .start_file(*name, zip::write::FileOptions::default())
            .unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap();
    fs::read(&path).unwrap()
}

#[tokio::test]
async fn http_download_writes_body() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/corpus/train.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"hello world".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("train.txt");
    let downloader = Downloader::new().unwrap();

    downloader
        .download(&format!("{}/corpus/train.txt", server.uri()), &dest)
        .await
        .unwrap();

    assert_eq!(fs::read(&dest).unwrap(), b"hello world");
}

#[tokio::test]
async fn http_error_status_is_propagated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.zip"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let downloader = Downloader::new().unwrap();

    let err = downloader
        .download(
            &format!("{}/missing.zip", server.uri()),
            dir.path().join("missing.zip"),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Http(ref e) if e.status().map(|s| s.as_u16()) == Some(404)));
}

#[tokio::test]
async fn existing_file_is_not_downloaded_again() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/vocab.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"new".to_vec()))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let check = dir.path().join("vocab.txt");
    fs::write(&check, b"old").unwrap();
    let downloader = Downloader::new().unwrap();

    let downloaded = downloader
        .download_if_missing(&format!("{}/vocab.txt", server.uri()), &check)
        .await
        .unwrap();

    assert!(!downloaded);
    assert_eq!(fs::read(&check).unwrap(), b"old");
}

#[tokio::test]
async fn missing_file_is_downloaded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/vocab.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"the\nof\n".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let check = dir.path().join("vocab.txt");
    let downloader = Downloader::new().unwrap();

    let downloaded = downloader
        .download_if_missing(&format!("{}/vocab.txt", server.uri()), &check)
        .await
        .unwrap();

    assert!(downloaded);
    assert_eq!(fs::read(&check).unwrap(), b"the\nof\n");
}

#[tokio::test]
async fn drive_share_link_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("data.zip");

    let err = dataset_fetch::download("https://drive.google.com/open?id=XYZ", &dest)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidUrlFormat { .. }));
    assert!(!dest.exists());
}

#[tokio::test]
async fn drive_file_is_served_directly() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/uc"))
        .and(query_param("id", "abc123"))
        .and(query_param("export", "download"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-disposition", "attachment; filename=\"small.bin\"")
                .set_body_bytes(vec![1u8, 2, 3, 4]),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("small.bin");

    drive_downloader(&server)
        .download("https://drive.google.com/uc?id=abc123", &dest)
        .await
        .unwrap();

    assert_eq!(fs::read(&dest).unwrap(), vec![1u8, 2, 3, 4]);
}

#[tokio::test]
async fn drive_confirmation_form_is_followed() {
    init_logging();
    let server = MockServer::start().await;
    let page = format!(
        r#"<html><body>
        <form id="download-form" action="{}/download" method="get">
          <input type="hidden" name="id" value="big1">
          <input type="hidden" name="export" value="download">
          <input type="hidden" name="confirm" value="t">
          <input type="hidden" name="uuid" value="u-77">
        </form></body></html>"#,
        server.uri()
    );
    Mock::given(method("GET"))
        .and(path("/uc"))
        .and(query_param("id", "big1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_body_string(page),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/download"))
        .and(query_param("id", "big1"))
        .and(query_param("confirm", "t"))
        .and(query_param("uuid", "u-77"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-disposition", "attachment; filename=\"big.bin\"")
                .set_body_bytes(b"large payload".to_vec()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("big.bin");

    drive_downloader(&server)
        .download("https://drive.google.com/uc?id=big1", &dest)
        .await
        .unwrap();

    assert_eq!(fs::read(&dest).unwrap(), b"large payload");
}

#[tokio::test]
async fn drive_error_page_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/uc"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<p class="uc-error-subcaption">Sorry, you can't view or download this file at this time.</p>"#,
        ))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();

    let err = drive_downloader(&server)
        .download("https://drive.google.com/uc?id=gone", dir.path().join("gone.zip"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Drive(ref msg) if msg.contains("can't view or download")));
}

#[tokio::test]
async fn drive_gives_up_after_max_confirmations() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/uc"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<a href="/uc?export=download&amp;confirm=again&amp;id=loop">Download anyway</a>"#,
        ))
        .expect(2)
        .mount(&server)
        .await;

    let mut config = DownloadConfig::default().with_drive_base_url(server.uri());
    config.max_confirmations = 1;
    let downloader = Downloader::with_config(&config).unwrap();
    let dir = tempfile::tempdir().unwrap();

    let err = downloader
        .download("https://drive.google.com/uc?id=loop", dir.path().join("loop.bin"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Drive(_)));
}

#[tokio::test]
async fn download_unzip_creates_directories_and_extracts() {
    init_logging();
    let server = MockServer::start().await;
    let scratch = tempfile::tempdir().unwrap();
    let body = zip_bytes(scratch.path(), &[("a.txt", b"alpha"), ("b.txt", b"beta")]);
    Mock::given(method("GET"))
        .and(path("/datasets/pair.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("cache").join("pair").join("pair.zip");
    let downloader = Downloader::new().unwrap();

    let extracted = downloader
        .download_unzip(&format!("{}/datasets/pair.zip", server.uri()), &file_path)
        .await
        .unwrap();

    assert_eq!(extracted, dir.path().join("cache").join("pair"));
    assert!(file_path.exists());
    assert_eq!(fs::read(extracted.join("a.txt")).unwrap(), b"alpha");
    assert_eq!(fs::read(extracted.join("b.txt")).unwrap(), b"beta");
}

#[tokio::test]
async fn download_unzip_rejects_unknown_extension_after_download() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/notes.xyz"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"plain".to_vec()))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("notes").join("notes.xyz");

    let err = dataset_fetch::download_unzip(&format!("{}/notes.xyz", server.uri()), &file_path)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::UnsupportedExtension { .. }));
    assert_eq!(fs::read(&file_path).unwrap(), b"plain");
}

#[tokio::test]
async fn download_replaces_existing_destination() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/vocab.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"fresh".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("vocab.txt");
    fs::write(&dest, b"stale contents").unwrap();

    dataset_fetch::download(&format!("{}/vocab.txt", server.uri()), &dest)
        .await
        .unwrap();

    assert_eq!(fs::read(&dest).unwrap(), b"fresh");
}
