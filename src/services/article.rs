//! Article page parser.
//!
//! Builds an [`ItemRecord`] from an article page: positional metadata,
//! sanitized body text, source IP and the comment list with its tally.

use regex::Regex;

use crate::error::{AppError, Result};
use crate::models::{Comment, ItemRecord, ReactionTally};
use crate::services::document::{ArticleDocument, ArticleSelectors, CommentBlock};
use crate::services::sanitize::BodySanitizer;

/// Marker of the line recording where the article was posted from.
pub const POSTED_FROM_MARKER: &str = "※ 發信站:";

/// Value stored when no source IP can be found.
pub const NO_IP: &str = "None";

/// Metadata rows read positionally: author, title, date.
const METADATA_ROWS: usize = 3;

/// Parser for article pages.
#[derive(Debug, Clone)]
pub struct ArticleParser {
    selectors: ArticleSelectors,
    sanitizer: BodySanitizer,
    ipv4: Regex,
}

impl ArticleParser {
    pub fn new() -> Result<Self> {
        let ipv4 = Regex::new(r"\d{1,3}(?:\.\d{1,3}){3}")
            .map_err(|e| AppError::config(format!("invalid IPv4 pattern: {e}")))?;
        Ok(Self {
            selectors: ArticleSelectors::new()?,
            sanitizer: BodySanitizer::new()?,
            ipv4,
        })
    }

    /// Parse one article page.
    ///
    /// Fails with `MetadataMissing` when fewer than three metadata rows are
    /// present, and with `Parse` when a comment block lacks a field. Never
    /// returns a partially filled record.
    pub fn parse(&self, html: &str, item_id: &str, board: &str) -> Result<ItemRecord> {
        let doc = ArticleDocument::parse(html, &self.selectors);

        let found = doc.metadata_count();
        if found < METADATA_ROWS {
            return Err(AppError::MetadataMissing { found });
        }
        let meta = |row: usize| {
            doc.metadata_value(row)
                .ok_or_else(|| AppError::parse(item_id, format!("metadata row {row} has no value")))
        };
        let author = meta(0)?;
        let title = meta(1)?;
        let date = meta(2)?;

        let strings = doc.body_strings();
        let source_ip = self.source_ip(&strings);
        let content = self.sanitizer.body_text(&strings, item_id);

        let comments = doc
            .comment_blocks()
            .into_iter()
            .map(|block| comment_from_block(block, item_id))
            .collect::<Result<Vec<_>>>()?;
        let reaction_tally = ReactionTally::from_comments(&comments);

        Ok(ItemRecord {
            item_id: item_id.to_string(),
            title,
            author,
            board: board.to_string(),
            content,
            date,
            source_ip,
            reaction_tally,
            comments,
        })
    }

    /// First IPv4 token on the posted-from line, or `"None"`.
    pub fn source_ip<S: AsRef<str>>(&self, strings: &[S]) -> String {
        strings
            .iter()
            .map(AsRef::<str>::as_ref)
            .find(|s| s.contains(POSTED_FROM_MARKER))
            .and_then(|line| self.ipv4.find(line))
            .map_or_else(|| NO_IP.to_string(), |m| m.as_str().to_string())
    }
}

fn comment_from_block(block: CommentBlock, item_id: &str) -> Result<Comment> {
    let field = |value: Option<String>, name: &str| {
        value.ok_or_else(|| AppError::parse(item_id, format!("comment block without {name}")))
    };

    let tag = field(block.tag, "push-tag")?;
    let user_id = field(block.user_id, "push-userid")?;
    let text = field(block.text, "push-content")?;
    let timestamp = field(block.timestamp, "push-ipdatetime")?;

    let text = text.trim();
    let text = text.strip_prefix(':').unwrap_or(text);

    Ok(Comment {
        text: text.trim().to_string(),
        timestamp: timestamp.trim().to_string(),
        tag: tag.trim().to_string(),
        user_id: user_id.trim().to_string(),
    })
}
