//! Embedded player detection.

use std::sync::LazyLock;

use folio_catalog::VideoRef;
use regex::Regex;

use super::{Extracted, Page, Strategy, first_success};

#[derive(Clone, Copy)]
enum Host {
    Vimeo,
    YouTube,
}

/// Player URL and embedded-JSON patterns, most specific first.
static PATTERNS: LazyLock<Vec<(Host, Regex)>> = LazyLock::new(|| {
    [
        (Host::Vimeo, r"player\.vimeo\.com/video/(\d+)"),
        (Host::Vimeo, r"vimeo\.com/video/(\d+)"),
        (Host::Vimeo, r"vimeo\.com/(\d+)"),
        (Host::Vimeo, r#""videoId":"(\d+)""#),
        (Host::YouTube, r"youtube(?:-nocookie)?\.com/embed/([A-Za-z0-9_-]{11})"),
        (Host::YouTube, r"youtube\.com/watch\?v=([A-Za-z0-9_-]{11})"),
        (Host::YouTube, r"youtu\.be/([A-Za-z0-9_-]{11})"),
    ]
    .into_iter()
    .map(|(host, pattern)| (host, Regex::new(pattern).expect("static video pattern")))
    .collect()
});

const EMBED_BLOCKS: &str = r#".sqs-video-wrapper, .video-block, [data-block-type="5"]"#;

/// First video reference found in `text`, trying patterns in order.
pub fn match_video(text: &str) -> Option<VideoRef> {
    PATTERNS.iter().find_map(|(host, re)| {
        let id = re.captures(text)?.get(1)?.as_str().to_string();
        Some(match host {
            Host::Vimeo => VideoRef::Vimeo(id),
            Host::YouTube => VideoRef::YouTube(id),
        })
    })
}

/// Iframe attributes, embed blocks, raw HTML, then script bodies.
pub fn video_strategies<'a>() -> Vec<Strategy<'a, VideoRef>> {
    vec![
        Strategy::new("iframe", |page: &Page| {
            page.select("iframe").iter().find_map(|frame| {
                ["src", "data-src"]
                    .iter()
                    .filter_map(|attr| frame.value().attr(attr))
                    .find_map(match_video)
            })
        }),
        Strategy::new("embed-block", |page: &Page| {
            page.select(EMBED_BLOCKS)
                .iter()
                .find_map(|block| match_video(&block.html()))
        }),
        Strategy::new("raw-html", |page: &Page| match_video(page.raw())),
        Strategy::new("script", |page: &Page| {
            page.select("script")
                .iter()
                .find_map(|script| match_video(&script.text().collect::<String>()))
        }),
    ]
}

pub fn find_video(page: &Page) -> Option<Extracted<VideoRef>> {
    first_success(page, &video_strategies())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iframe_player_url() {
        let page = Page::parse(
            r#"<div><iframe src="https://player.vimeo.com/video/123456?h=abc"></iframe></div>"#,
        );
        let found = find_video(&page).unwrap();
        assert_eq!(found.value, VideoRef::Vimeo("123456".to_string()));
        assert_eq!(found.strategy, "iframe");
    }

    #[test]
    fn lazy_iframe_uses_data_src() {
        let page = Page::parse(
            r#"<iframe data-src="https://www.youtube.com/embed/dQw4w9WgXcQ"></iframe>"#,
        );
        assert_eq!(
            find_video(&page).unwrap().value,
            VideoRef::YouTube("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn escaped_embed_block() {
        let page = Page::parse(
            r#"<div class="sqs-video-wrapper" data-html="&lt;iframe src=&quot;https://player.vimeo.com/video/777&quot;&gt;"></div>"#,
        );
        let found = find_video(&page).unwrap();
        assert_eq!(found.value, VideoRef::Vimeo("777".to_string()));
        assert_eq!(found.strategy, "embed-block");
    }

    #[test]
    fn embedded_json_in_script() {
        assert_eq!(
            match_video(r#"{"provider":"vimeo","videoId":"424242"}"#),
            Some(VideoRef::Vimeo("424242".to_string()))
        );
        let page = Page::parse(r#"<script>window.x = {"videoId":"31337"};</script>"#);
        let found = find_video(&page).unwrap();
        assert_eq!(found.value.id(), "31337");
    }

    #[test]
    fn no_player_is_a_miss() {
        let page = Page::parse("<p>Watch the reel on our channel.</p>");
        assert!(find_video(&page).is_none());
    }
}
