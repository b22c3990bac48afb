//! Labelled text fields and page titles.

use std::sync::LazyLock;

use regex::Regex;

use super::{Extracted, Page, Strategy, collapse_whitespace, first_success};

/// A credit line label such as `Client | Oporto`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Client,
    Production,
}

static CLIENT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[r"(?i)Client\s*[|:]\s*([^\n|]+)", r"(?i)Client\s*-\s*([^\n-]+)"])
});

static PRODUCTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)Production\s*[|:]\s*([^\n|]+)",
        r"(?i)Production\s*-\s*([^\n-]+)",
        r"(?i)Production Company\s*[|:]\s*([^\n|]+)",
    ])
});

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("static label pattern"))
        .collect()
}

impl Label {
    fn word(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Production => "production",
        }
    }

    fn patterns(self) -> &'static [Regex] {
        match self {
            Self::Client => CLIENT_PATTERNS.as_slice(),
            Self::Production => PRODUCTION_PATTERNS.as_slice(),
        }
    }
}

/// `Label | value` anywhere in the page text.
fn from_page_text(page: &Page, label: Label) -> Option<String> {
    let text = page.text();
    label.patterns().iter().find_map(|re| {
        let value = re.captures(&text)?.get(1)?.as_str().trim();
        (!value.is_empty()).then(|| value.to_string())
    })
}

/// Block or inline elements whose own text starts with the label.
fn from_elements(page: &Page, label: Label) -> Option<String> {
    page.select("p, span, div").iter().find_map(|el| {
        let text: String = el.text().collect();
        let text = text.trim();
        if !text.to_lowercase().starts_with(label.word()) {
            return None;
        }
        let parts: Vec<&str> = text.split(['|', ':', '-']).collect();
        if parts.len() < 2 {
            return None;
        }
        let value = parts[1..].join(" ");
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    })
}

pub fn label_strategies<'a>(label: Label) -> Vec<Strategy<'a, String>> {
    vec![
        Strategy::new("page-text", move |page: &Page| from_page_text(page, label)),
        Strategy::new("element-prefix", move |page: &Page| from_elements(page, label)),
    ]
}

pub fn find_labelled(page: &Page, label: Label) -> Option<Extracted<String>> {
    first_success(page, &label_strategies(label))
}

fn first_text(page: &Page, selector: &str) -> Option<String> {
    page.select(selector).iter().find_map(|el| {
        let text = collapse_whitespace(&el.text().collect::<String>());
        (!text.is_empty()).then_some(text)
    })
}

/// The page heading. `og:title` and `<title>` are left out: the CMS copies
/// them onto duplicated pages, so they do not tell projects apart.
pub fn title_strategies<'a>() -> Vec<Strategy<'a, String>> {
    vec![Strategy::new("heading", |page: &Page| {
        first_text(
            page,
            r#"h1, .page-title, .entry-title, [data-content-field="title"]"#,
        )
    })]
}

pub fn find_title(page: &Page) -> Option<Extracted<String>> {
    first_success(page, &title_strategies())
}
