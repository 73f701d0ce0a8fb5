mod common;

use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use cloudinary_mgr::CloudinaryError;
use cloudinary_mgr::interfaces::MockTransport;
use cloudinary_mgr::resource::ResourceType;
use common::{API_KEY, API_SECRET, echo_upload, field, keys, response, service, sha1_hex};
use tempfile::tempdir;

#[test]
fn test_single_file_upload_sends_signed_multipart() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let images = dir.path().join("images");
    fs::create_dir(&images)?;
    let logo = images.join("logo.png");
    fs::write(&logo, b"\x89PNG")?;

    let mut mock = MockTransport::new();
    mock.expect_post_multipart()
        .times(1)
        .returning(|url, fields, file_field, file_name, content| {
            assert_eq!(url, "https://api.cloudinary.com/v1_1/demo/image/upload/");
            assert_eq!(keys(fields), ["public_id", "api_key", "timestamp", "signature"]);
            assert_eq!(field(fields, "public_id"), Some("images/logo"));
            assert_eq!(field(fields, "api_key"), Some(API_KEY));

            let ts = field(fields, "timestamp").unwrap();
            let expected = sha1_hex(&format!("public_id=images/logo&timestamp={ts}{API_SECRET}"));
            assert_eq!(field(fields, "signature"), Some(expected.as_str()));

            assert_eq!(file_field, "file");
            assert_eq!(file_name, "logo.png");
            assert_eq!(content, b"\x89PNG");
            Ok(echo_upload(fields, "png"))
        });

    let svc = service(mock);
    let public_id = svc.upload(&logo, None, "", false, ResourceType::Image)?;
    assert_eq!(public_id, "images/logo");
    Ok(())
}

#[test]
fn test_random_public_id_omits_field() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let file = dir.path().join("photo.jpg");
    fs::write(&file, b"jpeg")?;

    let mut mock = MockTransport::new();
    mock.expect_post_multipart()
        .times(1)
        .returning(|_, fields, _, _, _| {
            assert!(field(fields, "public_id").is_none());
            let ts = field(fields, "timestamp").unwrap();
            let expected = sha1_hex(&format!("timestamp={ts}{API_SECRET}"));
            assert_eq!(field(fields, "signature"), Some(expected.as_str()));
            Ok(response(
                200,
                "200 OK",
                r#"{"public_id":"x8kq2lz","version":1,"format":"jpg","resource_type":"image"}"#,
            ))
        });

    let public_id = service(mock).upload(&file, None, "", true, ResourceType::Image)?;
    assert_eq!(public_id, "x8kq2lz");
    Ok(())
}

#[test]
fn test_upload_from_reader_uses_path_for_naming() -> Result<(), Box<dyn std::error::Error>> {
    let mut mock = MockTransport::new();
    mock.expect_post_multipart()
        .times(1)
        .returning(|url, fields, _, file_name, content| {
            assert_eq!(url, "https://api.cloudinary.com/v1_1/demo/raw/upload/");
            assert_eq!(field(fields, "public_id"), Some("static/css/default.css"));
            assert_eq!(file_name, "default.css");
            assert_eq!(content, b"body{}");
            Ok(echo_upload(fields, ""))
        });

    let mut cursor = Cursor::new(b"body{}".to_vec());
    let reader: &mut dyn Read = &mut cursor;
    let public_id = service(mock).upload_static_raw(
        Path::new("/does/not/exist/css/default.css"),
        Some(reader),
        "static",
    )?;
    assert_eq!(public_id, "static/css/default.css");
    Ok(())
}

#[test]
fn test_pdf_and_video_endpoints() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let pdf = dir.path().join("manual.pdf");
    let clip = dir.path().join("intro.mp4");
    fs::write(&pdf, b"%PDF")?;
    fs::write(&clip, b"mp4!")?;

    let urls = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&urls);
    let mut mock = MockTransport::new();
    mock.expect_post_multipart()
        .times(2)
        .returning(move |url, fields, _, _, _| {
            seen.lock().unwrap().push(url.to_string());
            Ok(echo_upload(fields, "pdf"))
        });

    let svc = service(mock);
    svc.upload_pdf(&pdf, None, "")?;
    svc.upload_video(&clip, None, "")?;

    assert_eq!(
        *urls.lock().unwrap(),
        [
            "https://api.cloudinary.com/v1_1/demo/image/upload/",
            "https://api.cloudinary.com/v1_1/demo/video/upload/",
        ]
    );
    Ok(())
}

#[test]
fn test_simulate_makes_no_transport_calls() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let css = dir.path().join("css");
    fs::create_dir(&css)?;
    let file = css.join("default.css");
    fs::write(&file, b"body{}")?;

    let mut mock = MockTransport::new();
    mock.expect_post_multipart().never();
    mock.expect_post_form().never();

    let mut svc = service(mock);
    svc.simulate(true);

    assert_eq!(
        svc.upload(&file, None, "new/", false, ResourceType::Raw)?,
        "new/css/default.css"
    );
    assert_eq!(
        svc.upload(&file, None, "", true, ResourceType::Raw)?,
        file.display().to_string()
    );

    let uploaded = svc.upload_tree(dir.path(), "site", ResourceType::Image)?;
    assert_eq!(uploaded.len(), 1);
    assert_eq!(uploaded[0].public_id, "site/css/default");
    assert_eq!(
        uploaded[0].url,
        "https://res.cloudinary.com/demo/image/upload/site/css/default.css"
    );
    assert_eq!(uploaded[0].checksum, sha1_hex("body{}"));
    Ok(())
}

#[test]
fn test_directory_upload_visits_files_only() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let root = dir.path();
    fs::create_dir_all(root.join("sub/deeper"))?;
    fs::create_dir(root.join("empty"))?;
    fs::write(root.join("a.png"), b"aaaa")?;
    fs::write(root.join("sub/b.png"), b"bbbb")?;
    fs::write(root.join("sub/deeper/c.png"), b"cccc")?;

    let sent = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&sent);
    let mut mock = MockTransport::new();
    mock.expect_post_multipart()
        .times(3)
        .returning(move |_, fields, _, _, _| {
            recorder
                .lock()
                .unwrap()
                .push(field(fields, "public_id").unwrap_or_default().to_string());
            Ok(echo_upload(fields, "png"))
        });

    let svc = service(mock);
    let returned = svc.upload(root, None, "site", true, ResourceType::Image)?;
    assert_eq!(returned, root.display().to_string());

    assert_eq!(*sent.lock().unwrap(), ["site/a", "site/sub/b", "site/sub/deeper/c"]);
    Ok(())
}

#[test]
fn test_directory_upload_stops_at_first_failure() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    for name in ["1.png", "2.png", "3.png"] {
        fs::write(dir.path().join(name), b"data")?;
    }

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let mut mock = MockTransport::new();
    mock.expect_post_multipart()
        .times(2)
        .returning(move |_, fields, _, _, _| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(echo_upload(fields, "png"))
            } else {
                Ok(response(500, "500 Internal Server Error", "oops"))
            }
        });

    let err = service(mock)
        .upload_tree(dir.path(), "", ResourceType::Image)
        .unwrap_err();
    assert_eq!(err.to_string(), "Request error: 500 Internal Server Error");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    Ok(())
}

#[test]
fn test_non_200_is_a_failure() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let file = dir.path().join("x.png");
    fs::write(&file, b"png")?;

    let mut mock = MockTransport::new();
    mock.expect_post_multipart()
        .times(1)
        .returning(|_, _, _, _, _| {
            Ok(response(
                401,
                "401 Unauthorized",
                r#"{"error":{"message":"Invalid Signature"}}"#,
            ))
        });

    let err = service(mock)
        .upload(&file, None, "", false, ResourceType::Image)
        .unwrap_err();
    assert!(matches!(err, CloudinaryError::Remote(ref m) if m == "Request error: 401 Unauthorized"));
    Ok(())
}

#[test]
fn test_undecodable_success_body_is_a_failure() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let file = dir.path().join("x.png");
    fs::write(&file, b"png")?;

    let mut mock = MockTransport::new();
    mock.expect_post_multipart()
        .times(1)
        .returning(|_, _, _, _, _| Ok(response(200, "200 OK", "<html>")));

    let err = service(mock)
        .upload(&file, None, "", false, ResourceType::Image)
        .unwrap_err();
    assert!(matches!(err, CloudinaryError::Json(_)));
    Ok(())
}

#[test]
fn test_missing_local_file_is_io_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("gone.png");

    let mut mock = MockTransport::new();
    mock.expect_post_multipart().never();

    let err = service(mock)
        .upload(&missing, None, "", false, ResourceType::Image)
        .unwrap_err();
    assert!(matches!(err, CloudinaryError::LocalIo { ref path, .. } if path == &missing));
}
