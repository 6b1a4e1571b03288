// src/utils/url.rs

//! URL shapes of the board site.

/// Listing page URL: `{base}/bbs/{board}/index{n}.html`.
///
/// # Examples
/// ```
/// use ptt_crawler::utils::url::listing_url;
///
/// assert_eq!(
///     listing_url("https://www.ptt.cc/", "Gossiping", 39000),
///     "https://www.ptt.cc/bbs/Gossiping/index39000.html"
/// );
/// ```
pub fn listing_url(base: &str, board: &str, index: u32) -> String {
    format!("{}/bbs/{board}/index{index}.html", base.trim_end_matches('/'))
}

/// Article page URL: `{base}/bbs/{board}/{item_id}.html`.
pub fn article_url(base: &str, board: &str, item_id: &str) -> String {
    format!("{}/bbs/{board}/{item_id}.html", base.trim_end_matches('/'))
}

/// Derive an item identifier from an article link.
///
/// Takes the last path segment and removes one trailing `.html`.
/// Returns `None` when nothing is left.
pub fn item_id_from_href(href: &str) -> Option<String> {
    let last = href.rsplit('/').next()?;
    let id = last.strip_suffix(".html").unwrap_or(last);
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}
