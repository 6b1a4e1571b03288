//! Listing entry reference.

/// An article referenced by a listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRef {
    /// Identifier derived from the trailing path segment of the link
    pub item_id: String,

    /// Absolute URL of the article page
    pub url: String,
}
