//! Output persistence for parsed articles.
//!
//! A range crawl streams records into a JSON array; a single-article crawl
//! writes one object as the whole file.

pub mod local;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::Result;
use crate::models::ItemRecord;

// Re-export for convenience
pub use local::{ERROR_MARKER, JsonArrayWriter, WriteMode, write_text};

/// Destination for records produced by a range crawl.
#[async_trait]
pub trait RecordSink: Send {
    /// Called once before the first record.
    async fn begin(&mut self) -> Result<()>;

    /// Called once per successfully parsed record, in crawl order.
    async fn append(&mut self, record: &ItemRecord) -> Result<()>;

    /// Called once after the last record.
    async fn finish(&mut self) -> Result<()>;
}

/// In-memory sink, mostly useful for tests and library callers.
#[async_trait]
impl RecordSink for Vec<ItemRecord> {
    async fn begin(&mut self) -> Result<()> {
        Ok(())
    }

    async fn append(&mut self, record: &ItemRecord) -> Result<()> {
        self.push(record.clone());
        Ok(())
    }

    async fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Serialize with 4-space indentation and literal non-ASCII.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}
