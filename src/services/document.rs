//! Typed view over an article page.
//!
//! All assumptions about the article markup live here. Callers ask for
//! "value of metadata row K", "comment blocks" and "body strings" instead
//! of walking the tree themselves.

use std::collections::HashSet;

use scraper::{ElementRef, Html, Selector};

use crate::error::Result;
use crate::services::listing::parse_selector;

/// Compiled selectors for the article layout.
#[derive(Debug, Clone)]
pub struct ArticleSelectors {
    main_content: Selector,
    meta_row: Selector,
    meta_row_right: Selector,
    meta_value: Selector,
    comment_block: Selector,
    comment_tag: Selector,
    comment_user: Selector,
    comment_text: Selector,
    comment_time: Selector,
}

impl ArticleSelectors {
    pub fn new() -> Result<Self> {
        Ok(Self {
            main_content: parse_selector("#main-content")?,
            meta_row: parse_selector("div.article-metaline")?,
            meta_row_right: parse_selector("div.article-metaline-right")?,
            meta_value: parse_selector("span.article-meta-value")?,
            comment_block: parse_selector("div.push")?,
            comment_tag: parse_selector("span.push-tag")?,
            comment_user: parse_selector("span.push-userid")?,
            comment_text: parse_selector("span.push-content")?,
            comment_time: parse_selector("span.push-ipdatetime")?,
        })
    }
}

/// Raw, untrimmed fields of one comment block. `None` marks a missing span.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentBlock {
    pub tag: Option<String>,
    pub user_id: Option<String>,
    pub text: Option<String>,
    pub timestamp: Option<String>,
}

/// A parsed article page.
pub struct ArticleDocument<'s> {
    html: Html,
    sel: &'s ArticleSelectors,
}

impl<'s> ArticleDocument<'s> {
    pub fn parse(markup: &str, sel: &'s ArticleSelectors) -> Self {
        Self {
            html: Html::parse_document(markup),
            sel,
        }
    }

    fn main_content(&self) -> Option<ElementRef<'_>> {
        self.html.select(&self.sel.main_content).next()
    }

    /// Number of metadata rows in the content region.
    pub fn metadata_count(&self) -> usize {
        self.main_content()
            .map_or(0, |main| main.select(&self.sel.meta_row).count())
    }

    /// Text of the first value element under metadata row `row`.
    pub fn metadata_value(&self, row: usize) -> Option<String> {
        let main = self.main_content()?;
        let row = main.select(&self.sel.meta_row).nth(row)?;
        let value = row.select(&self.sel.meta_value).next()?;
        Some(value.text().collect())
    }

    /// Comment blocks in page order.
    pub fn comment_blocks(&self) -> Vec<CommentBlock> {
        let Some(main) = self.main_content() else {
            return Vec::new();
        };

        main.select(&self.sel.comment_block)
            .map(|block| CommentBlock {
                tag: first_text(block, &self.sel.comment_tag),
                user_id: first_text(block, &self.sel.comment_user),
                text: first_text(block, &self.sel.comment_text),
                timestamp: first_text(block, &self.sel.comment_time),
            })
            .collect()
    }

    /// Trimmed, non-empty text nodes of the content region in document
    /// order, excluding metadata rows and comment blocks.
    pub fn body_strings(&self) -> Vec<String> {
        let Some(main) = self.main_content() else {
            return Vec::new();
        };

        let excluded: HashSet<_> = main
            .select(&self.sel.meta_row)
            .chain(main.select(&self.sel.meta_row_right))
            .chain(main.select(&self.sel.comment_block))
            .map(|element| element.id())
            .collect();

        main.descendants()
            .filter_map(|node| {
                let text = node.value().as_text()?;
                if node.ancestors().any(|a| excluded.contains(&a.id())) {
                    return None;
                }
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .collect()
    }
}

fn first_text(element: ElementRef<'_>, selector: &Selector) -> Option<String> {
    element
        .select(selector)
        .next()
        .map(|e| e.text().collect::<String>())
}
