//! What a crawl run should fetch.

use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};

/// The two mutually exclusive crawl modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlTarget {
    /// Inclusive range of listing pages
    Range { board: String, start: u32, end: u32 },

    /// A single article
    Single { board: String, item_id: String },
}

impl CrawlTarget {
    /// Build a range target, rejecting `start > end`.
    pub fn range(board: impl Into<String>, start: u32, end: u32) -> Result<Self> {
        let board = Self::checked_board(board.into())?;
        if start > end {
            return Err(AppError::validation(format!(
                "start index {start} is greater than end index {end}"
            )));
        }
        Ok(Self::Range { board, start, end })
    }

    /// Build a single-article target.
    pub fn single(board: impl Into<String>, item_id: impl Into<String>) -> Result<Self> {
        let board = Self::checked_board(board.into())?;
        let item_id = item_id.into();
        if item_id.trim().is_empty() {
            return Err(AppError::validation("article id is empty"));
        }
        Ok(Self::Single { board, item_id })
    }

    fn checked_board(board: String) -> Result<String> {
        if board.trim().is_empty() || board.contains('/') {
            return Err(AppError::validation(format!("invalid board name '{board}'")));
        }
        Ok(board)
    }

    /// Output file name: `{board}-{start}-{end}.json` or `{board}-{id}.json`.
    pub fn file_name(&self) -> String {
        match self {
            Self::Range { board, start, end } => format!("{board}-{start}-{end}.json"),
            Self::Single { board, item_id } => format!("{board}-{item_id}.json"),
        }
    }

    /// Output path inside `dir`.
    pub fn output_path(&self, dir: impl AsRef<Path>) -> PathBuf {
        dir.as_ref().join(self.file_name())
    }
}
