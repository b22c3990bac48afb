//! HTML extraction as ordered strategies.
//!
//! Legacy CMS markup is inconsistent, so each field is looked for in
//! several places. Every place is one [`Strategy`]: a named, pure function
//! from a [`Page`] to an optional value. [`first_success`] runs them in order
//! and reports which one matched. No match is an ordinary `None`.

pub mod fields;
pub mod images;
pub mod links;
pub mod video;

use scraper::{ElementRef, Html, Selector};

pub use fields::{Label, find_labelled, find_title, label_strategies, title_strategies};
pub use images::{find_headshot, find_thumbnail, gallery_images, thumbnail_strategies};
pub use links::project_links;
pub use video::{find_video, match_video, video_strategies};

/// A fetched page: the raw text plus its parsed document.
pub struct Page {
    raw: String,
    document: Html,
}

impl Page {
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let document = Html::parse_document(&raw);
        Self { raw, document }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn document(&self) -> &Html {
        &self.document
    }

    /// Elements matching `selector` in document order. An invalid selector
    /// matches nothing.
    pub fn select(&self, selector: &str) -> Vec<ElementRef<'_>> {
        match Selector::parse(selector) {
            Ok(sel) => self.document.select(&sel).collect(),
            Err(_) => {
                log::warn!("Invalid selector: {selector}");
                Vec::new()
            }
        }
    }

    /// All text nodes of the document, concatenated.
    pub fn text(&self) -> String {
        self.document.root_element().text().collect()
    }
}

/// One named attempt at extracting a `T` from a page.
pub struct Strategy<'a, T> {
    pub name: &'static str,
    run: Box<dyn Fn(&Page) -> Option<T> + 'a>,
}

impl<'a, T> Strategy<'a, T> {
    pub fn new(name: &'static str, run: impl Fn(&Page) -> Option<T> + 'a) -> Self {
        Self {
            name,
            run: Box::new(run),
        }
    }

    pub fn apply(&self, page: &Page) -> Option<T> {
        (self.run)(page)
    }
}

impl<T> std::fmt::Debug for Strategy<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Strategy").field("name", &self.name).finish()
    }
}

/// A value together with the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted<T> {
    pub value: T,
    pub strategy: &'static str,
}

/// Run `strategies` in order; the first `Some` wins.
pub fn first_success<T>(page: &Page, strategies: &[Strategy<'_, T>]) -> Option<Extracted<T>> {
    strategies.iter().find_map(|s| {
        s.apply(page).map(|value| Extracted {
            value,
            strategy: s.name,
        })
    })
}

/// Which image URLs count as real content images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRules {
    /// Substring identifying the image CDN host.
    pub cdn_marker: String,
    /// Substrings marking logos and low-resolution renditions.
    pub reject_tokens: Vec<String>,
}

impl Default for ImageRules {
    fn default() -> Self {
        Self {
            cdn_marker: "squarespace-cdn".to_string(),
            reject_tokens: vec!["logo".to_string(), "100w".to_string()],
        }
    }
}

impl ImageRules {
    pub fn is_cdn(&self, url: &str) -> bool {
        url.contains(&self.cdn_marker)
    }

    pub fn rejects(&self, url: &str) -> bool {
        self.reject_tokens.iter().any(|t| url.contains(t.as_str()))
    }
}

/// Canonical form of an asset URL: no query string or fragment, and an
/// explicit scheme for protocol-relative URLs.
pub fn normalize_asset_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let base = trimmed.split(['?', '#']).next().unwrap_or_default();
    if base.starts_with("//") {
        format!("https:{base}")
    } else {
        base.to_string()
    }
}

/// An image element's source: `src`, else the lazy-load `data-src`.
/// Inline `data:` placeholders are ignored.
pub fn image_source<'a>(img: &ElementRef<'a>) -> Option<&'a str> {
    let usable = |s: &&str| !s.trim().is_empty() && !s.starts_with("data:");
    img.value()
        .attr("src")
        .filter(usable)
        .or_else(|| img.value().attr("data-src").filter(usable))
}

/// Collapse runs of whitespace to single spaces and trim.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
