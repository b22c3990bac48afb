//! Thumbnail, gallery and headshot images.

use std::sync::LazyLock;

use regex::Regex;

use super::{Extracted, ImageRules, Page, Strategy, first_success, image_source, normalize_asset_url};

const PRIMARY_IMAGES: &str =
    ".content-wrapper img, .main-image img, article img, .project-image img, [data-image-id] img";
const HEADSHOT_IMAGES: &str = ".image-block img, .sqs-block-image img, article img";

static BACKGROUND_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"url\(\s*['"]?((?:https?:)?//[^'")\s]+)['"]?\s*\)"#)
        .expect("static background pattern")
});

/// First acceptable image among the elements matching `selector`.
fn first_image(page: &Page, selector: &str, rules: &ImageRules) -> Option<String> {
    page.select(selector)
        .iter()
        .filter_map(image_source)
        .find(|src| !rules.rejects(src))
        .map(normalize_asset_url)
}

/// Primary content image, any CDN image, then inline background images.
pub fn thumbnail_strategies(rules: &ImageRules) -> Vec<Strategy<'_, String>> {
    vec![
        Strategy::new("primary-image", move |page: &Page| {
            first_image(page, PRIMARY_IMAGES, rules)
        }),
        Strategy::new("cdn-image", move |page: &Page| {
            page.select("img")
                .iter()
                .filter_map(image_source)
                .find(|src| rules.is_cdn(src) && !rules.rejects(src))
                .map(normalize_asset_url)
        }),
        Strategy::new("background-style", move |page: &Page| {
            page.select(r#"[style*="background"]"#).iter().find_map(|el| {
                let style = el.value().attr("style")?;
                BACKGROUND_URL
                    .captures_iter(style)
                    .filter_map(|c| c.get(1))
                    .map(|m| m.as_str())
                    .find(|src| rules.is_cdn(src) && !rules.rejects(src))
                    .map(normalize_asset_url)
            })
        }),
    ]
}

pub fn find_thumbnail(page: &Page, rules: &ImageRules) -> Option<Extracted<String>> {
    first_success(page, &thumbnail_strategies(rules))
}

/// Every CDN image on the page in document order, without duplicates.
pub fn gallery_images(page: &Page, rules: &ImageRules) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();
    for img in page.select("img") {
        let Some(src) = image_source(&img) else {
            continue;
        };
        if !rules.is_cdn(src) || rules.rejects(src) {
            continue;
        }
        let url = normalize_asset_url(src);
        if !urls.contains(&url) {
            urls.push(url);
        }
    }
    urls
}

/// The portrait on the about page.
pub fn find_headshot(page: &Page, rules: &ImageRules) -> Option<String> {
    first_image(page, HEADSHOT_IMAGES, rules)
}
