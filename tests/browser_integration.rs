#![cfg(feature = "browser")]
//! End-to-end verification runs through headless Chrome.
//!
//! These mirror the concrete scenarios the tool exists for: a local
//! document exposing `#editor-container`, verified and screenshotted.

use pagecheck::{CheckConfig, Error, PageVisualChecker, StrategyKind, VerificationRequest};
use std::fs;
use std::path::PathBuf;

const VISIBLE_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Editor Shell</title></head>
<body>
<div id="editor-container" style="width: 400px; height: 300px; background: #eee">
editor ready
</div>
</body>
</html>"#;

const HIDDEN_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Editor Shell</title></head>
<body>
<div id="editor-container" style="display: none">editor hidden</div>
</body>
</html>"#;

fn workdir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pagecheck-bit-{}-{}", std::process::id(), name));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn browser_checker(wait_timeout_ms: u64) -> PageVisualChecker {
    PageVisualChecker::new(CheckConfig {
        strategy: StrategyKind::Browser,
        wait_timeout_ms,
        ..Default::default()
    })
}

#[test]
#[ignore] // Requires Chrome to be installed
fn test_verify_visible_element_writes_png() {
    let dir = workdir("visible");
    fs::write(dir.join("index.html"), VISIBLE_PAGE).unwrap();
    let out = dir.join("verification.png");
    let _ = fs::remove_file(&out);

    let request =
        VerificationRequest::for_document(&dir, "index.html", "#editor-container", &out).unwrap();
    let report = browser_checker(10_000)
        .verify(&request)
        .expect("verification should succeed");

    let png_data = fs::read(&out).expect("screenshot should exist");
    assert!(png_data.len() > 100, "PNG data seems too small");
    assert_eq!(&png_data[0..8], b"\x89PNG\r\n\x1a\n");
    assert_eq!(report.bytes_written, png_data.len() as u64);
}

#[test]
#[ignore] // Requires Chrome to be installed
fn test_hidden_element_fails_assertion_without_output() {
    let dir = workdir("hidden");
    fs::write(dir.join("index.html"), HIDDEN_PAGE).unwrap();
    let out = dir.join("verification.png");
    let _ = fs::remove_file(&out);

    let request =
        VerificationRequest::for_document(&dir, "index.html", "#editor-container", &out).unwrap();
    // Short wait budget keeps the failing case fast
    let result = browser_checker(2_000).verify(&request);

    assert!(matches!(result, Err(Error::Assertion { .. })));
    assert!(!out.exists());
}

#[test]
#[ignore] // Requires Chrome to be installed
fn test_missing_document_fails_navigation_without_output() {
    let dir = workdir("missing");
    let out = dir.join("verification.png");
    let _ = fs::remove_file(&out);

    let request =
        VerificationRequest::for_document(&dir, "absent.html", "#editor-container", &out).unwrap();
    let result = browser_checker(2_000).verify(&request);

    assert!(matches!(result, Err(Error::Navigation(_))));
    assert!(!out.exists());
}

#[test]
#[ignore] // Requires Chrome to be installed
fn test_reverify_overwrites_output_deterministically() {
    let dir = workdir("idempotent");
    fs::write(dir.join("index.html"), VISIBLE_PAGE).unwrap();
    let out = dir.join("verification.png");

    let request =
        VerificationRequest::for_document(&dir, "index.html", "#editor-container", &out).unwrap();
    let checker = browser_checker(10_000);

    let first = checker.verify(&request).expect("first run should succeed");
    let second = checker.verify(&request).expect("second run should succeed");

    // Same page, same viewport: the overwrite lands in the same size class
    let written = fs::metadata(&out).unwrap().len();
    assert_eq!(written, second.bytes_written);
    assert!(first.bytes_written > 0 && second.bytes_written > 0);
}

#[test]
#[ignore] // Requires Chrome to be installed
fn test_verify_http_served_page() {
    let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr();

    std::thread::spawn(move || {
        for request in server.incoming_requests() {
            let response = tiny_http::Response::from_string(VISIBLE_PAGE).with_header(
                "Content-Type: text/html; charset=utf-8"
                    .parse::<tiny_http::Header>()
                    .unwrap(),
            );
            let _ = request.respond(response);
        }
    });

    let dir = workdir("http");
    let out = dir.join("verification.png");
    let url = url::Url::parse(&format!("http://{}/", addr)).unwrap();

    let request = VerificationRequest::from_url(url, "#editor-container", &out).unwrap();
    browser_checker(10_000)
        .verify(&request)
        .expect("verification over HTTP should succeed");

    assert!(fs::metadata(&out).unwrap().len() > 0);
}
