use super::Page;

/// Project page links on a category listing, deduplicated, in page order.
///
/// A link qualifies when its `href` sits directly under `listing_path`
/// (e.g. `/branded/some-film` for `/branded`) and carries no fragment.
pub fn project_links(page: &Page, listing_path: &str) -> Vec<String> {
    let prefix = format!("{}/", listing_path.trim_end_matches('/'));
    let mut links: Vec<String> = Vec::new();
    for anchor in page.select("a[href]") {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let href = href.trim();
        if href.len() > prefix.len()
            && href.starts_with(&prefix)
            && !href.contains('#')
            && !links.iter().any(|l| l == href)
        {
            links.push(href.to_string());
        }
    }
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_links() {
        let page = Page::parse(
            r##"<nav><a href="/branded">Branded</a><a href="/about">About</a></nav>
               <div class="portfolio-grid-basic">
                 <a href="/branded/mud-to-marle"><img src="x.jpg"></a>
                 <a href="/branded/heisi">Heisi</a>
                 <a href="/branded/mud-to-marle">again</a>
                 <a href="/branded/heisi#top">anchor</a>
                 <a href="/branded/">bare</a>
                 <a href="/commercial/other">other</a>
               </div>"##,
        );
        assert_eq!(
            project_links(&page, "/branded"),
            vec!["/branded/mud-to-marle".to_string(), "/branded/heisi".to_string()]
        );
    }
}
