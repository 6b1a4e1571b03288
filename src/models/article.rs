//! Article record structures.
//!
//! Field declaration order matches the alphabetical order of the serialized
//! keys, so `serde_json` emits sorted objects without a post-processing pass.

use serde::{Deserialize, Serialize};

/// Tag marking an endorsing comment.
pub const PUSH_TAG: &str = "推";

/// Tag marking an opposing comment.
pub const BOO_TAG: &str = "噓";

/// A fully parsed article.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemRecord {
    /// Item identifier, e.g. `M.1127742013.A.240`
    #[serde(rename = "article_id")]
    pub item_id: String,

    #[serde(rename = "article_title")]
    pub title: String,

    pub author: String,

    /// Board name
    pub board: String,

    /// Sanitized body text
    pub content: String,

    pub date: String,

    /// Originating IPv4 address, or the literal `"None"`
    #[serde(rename = "ip")]
    pub source_ip: String,

    /// Reaction counts derived from `comments`
    #[serde(rename = "message_conut")]
    pub reaction_tally: ReactionTally,

    /// Comments in page order
    #[serde(rename = "messages")]
    pub comments: Vec<Comment>,
}

/// A single comment ("push") under an article.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    #[serde(rename = "push_content")]
    pub text: String,

    #[serde(rename = "push_ipdatetime")]
    pub timestamp: String,

    #[serde(rename = "push_tag")]
    pub tag: String,

    #[serde(rename = "push_userid")]
    pub user_id: String,
}

/// Polarity of a comment tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    Positive,
    Negative,
    Neutral,
}

impl Reaction {
    /// Classify a trimmed comment tag.
    pub fn classify(tag: &str) -> Self {
        match tag {
            PUSH_TAG => Reaction::Positive,
            BOO_TAG => Reaction::Negative,
            _ => Reaction::Neutral,
        }
    }
}

impl Comment {
    pub fn reaction(&self) -> Reaction {
        Reaction::classify(&self.tag)
    }
}

/// Aggregate comment counts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReactionTally {
    /// positive + negative + neutral
    #[serde(rename = "all")]
    pub total: i64,

    #[serde(rename = "boo")]
    pub negative: i64,

    /// positive - negative
    #[serde(rename = "count")]
    pub net: i64,

    pub neutral: i64,

    #[serde(rename = "push")]
    pub positive: i64,
}

impl ReactionTally {
    /// Derive the tally from a comment sequence.
    pub fn from_comments(comments: &[Comment]) -> Self {
        let (mut positive, mut negative, mut neutral) = (0, 0, 0);
        for comment in comments {
            match comment.reaction() {
                Reaction::Positive => positive += 1,
                Reaction::Negative => negative += 1,
                Reaction::Neutral => neutral += 1,
            }
        }

        Self {
            total: positive + negative + neutral,
            negative,
            net: positive - negative,
            neutral,
            positive,
        }
    }
}
