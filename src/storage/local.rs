//! Local filesystem output.
//!
//! Every write opens the destination, writes, flushes and closes it before
//! returning; the handle is never held across the crawl loop.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::error::Result;
use crate::models::ItemRecord;
use crate::storage::{RecordSink, to_pretty_json};

/// Output of a single-article crawl whose page could not be fetched.
pub const ERROR_MARKER: &str = r#"{"error": "invalid url"}"#;

/// How `write_text` opens the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Create or truncate
    Truncate,
    /// Create or append
    Append,
}

/// Write `text` to `path` in a scoped open. The handle is released on every
/// exit path; write errors are returned after that.
pub async fn write_text(path: &Path, text: &str, mode: WriteMode) -> Result<()> {
    let mut options = OpenOptions::new();
    match mode {
        WriteMode::Truncate => options.write(true).create(true).truncate(true),
        WriteMode::Append => options.append(true).create(true),
    };

    let mut file = options.open(path).await?;
    file.write_all(text.as_bytes()).await?;
    file.flush().await?;
    Ok(())
}

/// Streams records into a well-formed JSON array on disk.
///
/// Tracks whether an element has been written so separators only go
/// between elements.
#[derive(Debug)]
pub struct JsonArrayWriter {
    path: PathBuf,
    written: usize,
}

impl JsonArrayWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            written: 0,
        }
    }
}

#[async_trait]
impl RecordSink for JsonArrayWriter {
    async fn begin(&mut self) -> Result<()> {
        self.written = 0;
        write_text(&self.path, "[", WriteMode::Truncate).await
    }

    async fn append(&mut self, record: &ItemRecord) -> Result<()> {
        let separator = if self.written == 0 { "\n" } else { ",\n" };
        let text = format!("{separator}{}", to_pretty_json(record)?);
        write_text(&self.path, &text, WriteMode::Append).await?;
        self.written += 1;
        Ok(())
    }

    async fn finish(&mut self) -> Result<()> {
        write_text(&self.path, "\n]\n", WriteMode::Append).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Comment, ReactionTally};
    use tempfile::TempDir;

    fn record(id: &str) -> ItemRecord {
        let comments = vec![Comment {
            text: "好".to_string(),
            timestamp: "01/01 00:00".to_string(),
            tag: "推".to_string(),
            user_id: "u".to_string(),
        }];
        ItemRecord {
            item_id: id.to_string(),
            title: "標題".to_string(),
            author: "a".to_string(),
            board: "B".to_string(),
            content: "內文".to_string(),
            date: "d".to_string(),
            source_ip: "None".to_string(),
            reaction_tally: ReactionTally::from_comments(&comments),
            comments,
        }
    }

    #[tokio::test]
    async fn test_array_is_well_formed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("B-1-2.json");
        let mut writer = JsonArrayWriter::new(&path);

        writer.begin().await.unwrap();
        writer.append(&record("M.1")).await.unwrap();
        writer.append(&record("M.2")).await.unwrap();
        writer.finish().await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(!text.contains("},\n]"));
        let parsed: Vec<ItemRecord> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, vec![record("M.1"), record("M.2")]);
    }

    #[tokio::test]
    async fn test_empty_array() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("B-1-1.json");
        let mut writer = JsonArrayWriter::new(&path);

        writer.begin().await.unwrap();
        writer.finish().await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<ItemRecord> = serde_json::from_str(&text).unwrap();
        assert!(parsed.is_empty());
    }

    #[tokio::test]
    async fn test_begin_truncates_previous_output() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.json");
        std::fs::write(&path, "stale content").unwrap();

        let mut writer = JsonArrayWriter::new(&path);
        writer.begin().await.unwrap();
        writer.finish().await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[\n]\n");
    }

    #[tokio::test]
    async fn test_interrupted_run_leaves_open_array() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.json");
        let mut writer = JsonArrayWriter::new(&path);

        writer.begin().await.unwrap();
        writer.append(&record("M.1")).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("[\n{"));
        assert!(serde_json::from_str::<Vec<ItemRecord>>(&text).is_err());
    }

    #[tokio::test]
    async fn test_write_text_modes() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("t.json");

        write_text(&path, "a", WriteMode::Truncate).await.unwrap();
        write_text(&path, "b", WriteMode::Append).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "ab");

        write_text(&path, "c", WriteMode::Truncate).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "c");
    }

    #[tokio::test]
    async fn test_write_failure_propagates() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing-dir").join("t.json");
        assert!(write_text(&path, "a", WriteMode::Truncate).await.is_err());
    }
}
