//! Chrome DevTools Protocol probe implementation

use crate::{CheckConfig, Error, Probe, Result};
use headless_chrome::browser::tab::Tab;
use headless_chrome::protocol::cdp::Page;
use headless_chrome::{Browser, LaunchOptions};
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// CDP-based verification probe (uses the `headless_chrome` crate)
///
/// This probe launches a headless Chrome instance and drives a single tab
/// through the open → wait → capture sequence. Dropping the browser handle
/// terminates the child process.
pub struct BrowserProbe {
    browser: Browser,
    tab: Arc<Tab>,
    config: CheckConfig,
}

impl Probe for BrowserProbe {
    fn new(config: CheckConfig) -> Result<Self>
    where
        Self: Sized,
    {
        let launch_options = LaunchOptions::default_builder()
            .headless(true)
            .window_size(Some((config.viewport.width, config.viewport.height)))
            .build()
            .map_err(|e| Error::Launch(format!("Failed to build launch options: {}", e)))?;

        let browser = Browser::new(launch_options)
            .map_err(|e| Error::Launch(format!("Failed to launch browser: {}", e)))?;

        let tab = browser
            .new_tab()
            .map_err(|e| Error::Launch(format!("Failed to create tab: {}", e)))?;

        tab.set_user_agent(&config.user_agent, None, None)
            .map_err(|e| Error::Launch(format!("Failed to set user agent: {}", e)))?;

        tab.set_default_timeout(Duration::from_millis(config.timeout_ms));

        Ok(Self {
            browser,
            tab,
            config,
        })
    }

    fn open(&mut self, url: &Url) -> Result<()> {
        // Chrome reports unloadable targets (e.g. net::ERR_FILE_NOT_FOUND for
        // a missing local file) through the navigate call itself.
        self.tab
            .navigate_to(url.as_str())
            .map_err(|e| Error::Navigation(format!("Navigation failed: {}", e)))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| Error::Navigation(format!("Wait for navigation failed: {}", e)))?;

        Ok(())
    }

    fn wait_visible(&mut self, selector: &str) -> Result<()> {
        let predicate = visibility_predicate(selector);
        let deadline = Instant::now() + Duration::from_millis(self.config.wait_timeout_ms);

        loop {
            let eval = self
                .tab
                .evaluate(&predicate, false)
                .map_err(|e| Error::Backend(format!("Visibility check failed: {}", e)))?;

            if matches!(eval.value, Some(serde_json::Value::Bool(true))) {
                return Ok(());
            }

            if Instant::now() >= deadline {
                return Err(Error::Assertion {
                    selector: selector.to_string(),
                    timeout_ms: self.config.wait_timeout_ms,
                });
            }

            std::thread::sleep(Duration::from_millis(self.config.poll_interval_ms));
        }
    }

    fn capture_png(&mut self) -> Result<Vec<u8>> {
        let screenshot_data = self
            .tab
            .capture_screenshot(Page::CaptureScreenshotFormatOption::Png, None, None, true)
            .map_err(|e| Error::Capture(format!("Screenshot failed: {}", e)))?;

        Ok(screenshot_data)
    }

    fn close(self) -> Result<()> {
        // Drop the browser/tab explicitly so the child process is terminated
        // promptly.
        drop(self.tab);
        drop(self.browser);
        Ok(())
    }
}

/// Build the in-page predicate: the element exists, is not hidden by computed
/// style, and occupies a non-empty box.
fn visibility_predicate(selector: &str) -> String {
    // serde_json quoting keeps arbitrary selectors safe to embed as a JS
    // string literal.
    let quoted = serde_json::to_string(selector).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        r#"(function() {{
            const el = document.querySelector({quoted});
            if (!el) return false;
            const style = window.getComputedStyle(el);
            if (style.display === 'none' || style.visibility === 'hidden') return false;
            const rect = el.getBoundingClientRect();
            return rect.width > 0 && rect.height > 0;
        }})()"#,
        quoted = quoted
    )
}
