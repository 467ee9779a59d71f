//! A browser-less probe that inspects local documents statically.
//!
//! This probe is intentionally minimal: it reads the document behind a
//! `file://` URL, parses the HTML and decides element visibility from the
//! markup alone (`hidden` attribute, inline style, document-level `<style>`
//! rules). It runs where no browser is installed, at the cost of screenshot
//! support and computed-style accuracy.

use crate::{CheckConfig, Error, Probe, Result};
use scraper::{ElementRef, Html, Selector};
use std::fs;
use url::Url;

/// Static DOM probe for `file://` documents.
///
/// The loaded document is a snapshot that cannot change, so the visibility
/// wait degenerates to a single check instead of a poll.
pub struct DomProbe {
    config: CheckConfig,
    last_html: Option<String>,
}

impl Probe for DomProbe {
    fn new(config: CheckConfig) -> Result<Self>
    where
        Self: Sized,
    {
        Ok(Self {
            config,
            last_html: None,
        })
    }

    fn open(&mut self, url: &Url) -> Result<()> {
        if url.scheme() != "file" {
            return Err(Error::Navigation(format!(
                "DomProbe only loads file:// URLs, got '{}'",
                url
            )));
        }

        let path = url
            .to_file_path()
            .map_err(|_| Error::Navigation(format!("Malformed file URL: {}", url)))?;

        let html = fs::read_to_string(&path)
            .map_err(|e| Error::Navigation(format!("Cannot read {}: {}", path.display(), e)))?;

        self.last_html = Some(html);
        Ok(())
    }

    fn wait_visible(&mut self, selector: &str) -> Result<()> {
        let html = self
            .last_html
            .as_ref()
            .ok_or_else(|| Error::Navigation("No document loaded".into()))?;

        let parsed = Selector::parse(selector)
            .map_err(|e| Error::Config(format!("Invalid selector '{}': {:?}", selector, e)))?;

        let document = Html::parse_document(html);
        let stylesheet = inline_stylesheets(&document);

        let any_visible = document
            .select(&parsed)
            .any(|el| element_visible(&el, &stylesheet));

        if any_visible {
            Ok(())
        } else {
            Err(Error::Assertion {
                selector: selector.to_string(),
                timeout_ms: self.config.wait_timeout_ms,
            })
        }
    }

    fn capture_png(&mut self) -> Result<Vec<u8>> {
        Err(Error::Capture(
            "Screenshots are not supported by DomProbe; use the browser strategy".into(),
        ))
    }

    fn close(self) -> Result<()> {
        Ok(())
    }
}

/// Concatenated text of all `<style>` elements in the document
fn inline_stylesheets(document: &Html) -> String {
    let style_sel = Selector::parse("style").unwrap();
    document
        .select(&style_sel)
        .map(|s| s.text().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Markup-level visibility: no `hidden` attribute, no hiding inline style,
/// and no document `<style>` rule that both matches the element and hides it.
fn element_visible(element: &ElementRef, stylesheet: &str) -> bool {
    if element.value().attr("hidden").is_some() {
        return false;
    }

    if let Some(style) = element.value().attr("style") {
        if declarations_hide(style) {
            return false;
        }
    }

    !stylesheet_hides(stylesheet, element)
}

/// Whether a declaration block contains `display: none` or
/// `visibility: hidden` (whitespace-insensitive).
fn declarations_hide(declarations: &str) -> bool {
    let squeezed: String = declarations
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    squeezed.contains("display:none") || squeezed.contains("visibility:hidden")
}

/// Scan `<style>` rules for one that hides the element. Rule parsing is
/// deliberately crude (split on braces); selectors that fail to parse are
/// skipped.
fn stylesheet_hides(stylesheet: &str, element: &ElementRef) -> bool {
    for rule in stylesheet.split('}') {
        let Some((selector_part, declarations)) = rule.split_once('{') else {
            continue;
        };
        if !declarations_hide(declarations) {
            continue;
        }
        for single in selector_part.split(',') {
            let single = single.trim();
            if single.is_empty() {
                continue;
            }
            if let Ok(sel) = Selector::parse(single) {
                if sel.matches(element) {
                    return true;
                }
            }
        }
    }
    false
}
