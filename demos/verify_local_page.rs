//! Minimal verification run: write a local page, check that its editor
//! container is visible, capture a screenshot.
//!
//! Run with: cargo run --example verify_local_page

use pagecheck::{CheckConfig, PageVisualChecker, VerificationRequest};
use std::fs;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("pagecheck - Local Page Verification Example\n");

    let dir = std::env::temp_dir().join(format!("pagecheck-demo-{}", std::process::id()));
    fs::create_dir_all(&dir)?;
    fs::write(
        dir.join("index.html"),
        r#"<!DOCTYPE html>
<html>
<head><title>Demo Editor</title></head>
<body>
<div id="editor-container" style="width: 600px; height: 400px; background: #ddd">
editor ready
</div>
</body>
</html>"#,
    )?;

    let out = dir.join("verification.png");
    let request =
        VerificationRequest::for_document(&dir, "index.html", "#editor-container", &out)?;

    let checker = PageVisualChecker::new(CheckConfig::default());
    println!("Verifying: {}", request.page_url);

    // The default strategy needs Chrome; report rather than panic when it is
    // not installed.
    match checker.verify(&request) {
        Ok(report) => println!(
            "Verified '{}' ({} bytes) -> {}",
            report.selector,
            report.bytes_written,
            report.output_path.display()
        ),
        Err(e) => eprintln!("Verification unavailable: {}", e),
    }

    Ok(())
}
