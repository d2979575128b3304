//! Simulated web browser: URL normalisation and the fake page-load lifecycle.

use serde::{Deserialize, Serialize};

pub const HOME_URL: &str = "https://www.google.com";
/// Delay before a simulated page load completes.
pub const PAGE_LOAD_DELAY_MS: u64 = 1500;

pub const QUICK_LINKS: [(&str, &str); 3] = [
    ("Google", "https://www.google.com"),
    ("GitHub", "https://www.github.com"),
    ("Stack Overflow", "https://www.stackoverflow.com"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BrowserPage {
    Blank,
    Loading { url: String },
    Loaded { url: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserState {
    pub page: BrowserPage,
}

impl Default for BrowserState {
    fn default() -> Self {
        Self {
            page: BrowserPage::Blank,
        }
    }
}

impl BrowserState {
    /// Starts loading `url` and returns the normalised address, or `None` for blank input.
    pub fn begin_navigation(&mut self, url: &str) -> Option<String> {
        let url = normalize_url(url)?;
        self.page = BrowserPage::Loading { url: url.clone() };
        Some(url)
    }

    /// Completes a load only if `url` is still the page being loaded.
    ///
    /// Returns `false` for superseded loads.
    pub fn complete_navigation(&mut self, url: &str) -> bool {
        match &self.page {
            BrowserPage::Loading { url: loading } if loading == url => {
                self.page = BrowserPage::Loaded {
                    url: url.to_string(),
                };
                true
            }
            _ => false,
        }
    }

    pub fn current_url(&self) -> Option<&str> {
        match &self.page {
            BrowserPage::Blank => None,
            BrowserPage::Loading { url } | BrowserPage::Loaded { url } => Some(url),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.page, BrowserPage::Loading { .. })
    }
}

/// Trims `raw` and prefixes `https://` when no http(s) scheme is present.
pub fn normalize_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Some(trimmed.to_string())
    } else {
        Some(format!("https://{trimmed}"))
    }
}
