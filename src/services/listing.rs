//! Listing page parser.
//!
//! Turns a board index page into the ordered list of articles it links to.

use scraper::{Html, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::LinkRef;
use crate::utils::resolve_url;
use crate::utils::url::item_id_from_href;

/// Selector for one listing entry.
const ENTRY_SELECTOR: &str = "div.r-ent";

/// Selector for the entry's article link.
const LINK_SELECTOR: &str = "a";

/// Parses listing pages of one site.
#[derive(Debug, Clone)]
pub struct ListingParser {
    base: Url,
    entry_sel: Selector,
    link_sel: Selector,
}

impl ListingParser {
    /// Create a parser resolving links against `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base: Url::parse(base_url)?,
            entry_sel: parse_selector(ENTRY_SELECTOR)?,
            link_sel: parse_selector(LINK_SELECTOR)?,
        })
    }

    /// Extract article links in document order.
    ///
    /// Entries without an anchor, without an `href`, or whose href yields
    /// an empty identifier are skipped. Deleted posts render that way.
    pub fn parse(&self, html: &str) -> Vec<LinkRef> {
        let document = Html::parse_document(html);

        document
            .select(&self.entry_sel)
            .filter_map(|entry| {
                let href = entry.select(&self.link_sel).next()?.value().attr("href")?;
                let item_id = item_id_from_href(href)?;
                Some(LinkRef {
                    item_id,
                    url: resolve_url(&self.base, href),
                })
            })
            .collect()
    }
}

pub(crate) fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}
