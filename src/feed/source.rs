use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use rayon::prelude::*;
use serde::Deserialize;
use tracing::{info, warn};
use walkdir::WalkDir;

use super::cache::{load_cache, partition_by_cache, save_cache};
use super::types::{Item, Sender};

/// Wire-side record as the backend writes it into the spool. Looser
/// than [`Item`]: the timestamp may arrive as an integer, a numeric
/// string, or garbage, and garbage must not sink the record.
#[derive(Debug, Deserialize)]
struct SpoolRecord {
    id: String,
    #[serde(default)]
    timestamp: Option<serde_json::Value>,
    subject: Option<String>,
    sender: Option<Sender>,
    #[serde(default)]
    preview: String,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    labels: Vec<String>,
}

impl SpoolRecord {
    fn into_item(self) -> Item {
        Item {
            id: self.id,
            timestamp: self.timestamp.as_ref().and_then(coerce_timestamp),
            subject: self.subject,
            sender: self.sender,
            preview: self.preview,
            keywords: self.keywords,
            labels: self.labels,
        }
    }
}

/// Epoch seconds from whatever the backend sent; anything unusable
/// becomes None and the item orders as oldest.
fn coerce_timestamp(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Scan the feed spool and parse every message record.
/// Unchanged files are served from the mtime cache; new and modified
/// files are parsed in parallel. Records that fail to parse are
/// skipped with a warning, never fatal.
pub fn scan_feed<F>(feed_dir: &str, progress: F) -> Result<Vec<Item>>
where
    F: Fn(usize, usize) + Sync, // (current, total)
{
    let messages_dir = Path::new(feed_dir).join("messages");
    if !messages_dir.is_dir() {
        info!(dir = %messages_dir.display(), "no spool directory, feed is empty");
        return Ok(Vec::new());
    }

    let file_paths: Vec<PathBuf> = WalkDir::new(&messages_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_type().is_file() && e.path().extension().is_some_and(|ext| ext == "json")
        })
        .map(|e| e.into_path())
        .collect();

    let total = file_paths.len();
    let cache = load_cache();
    let (to_parse, cached) = partition_by_cache(&file_paths, &cache);
    let cache_hits = cached.len();

    let parsed_count = AtomicUsize::new(cache_hits);
    let parsed: Vec<(PathBuf, Item)> = to_parse
        .par_iter()
        .filter_map(|path| {
            let current = parsed_count.fetch_add(1, Ordering::Relaxed);
            progress(current, total);
            match parse_record_file(path) {
                Ok(item) => Some((path.clone(), item)),
                Err(e) => {
                    warn!(path = %path.display(), "skipping unreadable record: {e}");
                    None
                }
            }
        })
        .collect();

    info!(
        total,
        cache_hits,
        parsed = parsed.len(),
        "feed scan complete"
    );

    let mut entries = cached;
    entries.extend(parsed);
    if let Err(e) = save_cache(&entries) {
        warn!("could not save item cache: {e}");
    }

    Ok(entries.into_iter().map(|(_, item)| item).collect())
}

fn parse_record_file(path: &Path) -> Result<Item> {
    let content = std::fs::read_to_string(path)?;
    let record: SpoolRecord = serde_json::from_str(&content)?;
    Ok(record.into_item())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_and_string_timestamps_parse() {
        let a: SpoolRecord =
            serde_json::from_str(r#"{"id":"a","timestamp":1722945600}"#).expect("parse");
        assert_eq!(a.into_item().timestamp, Some(1_722_945_600));

        let b: SpoolRecord =
            serde_json::from_str(r#"{"id":"b","timestamp":"1722945600"}"#).expect("parse");
        assert_eq!(b.into_item().timestamp, Some(1_722_945_600));
    }

    #[test]
    fn malformed_timestamp_is_oldest_not_an_error() {
        let rec: SpoolRecord =
            serde_json::from_str(r#"{"id":"c","timestamp":"next tuesday"}"#).expect("parse");
        assert_eq!(rec.into_item().timestamp, None);

        let rec: SpoolRecord =
            serde_json::from_str(r#"{"id":"d","timestamp":{"tz":"utc"}}"#).expect("parse");
        assert_eq!(rec.into_item().timestamp, None);
    }

    #[test]
    fn scan_reads_spool_and_skips_bad_records() {
        let dir = tempfile::tempdir().expect("tempdir");
        let messages = dir.path().join("messages");
        std::fs::create_dir_all(&messages).expect("mkdir");
        std::fs::write(
            messages.join("m1.json"),
            r#"{"id":"m1","timestamp":100,"subject":"leak in 4B","preview":"the sink"}"#,
        )
        .expect("write");
        std::fs::write(messages.join("broken.json"), "{ not json").expect("write");
        std::fs::write(messages.join("notes.txt"), "ignored").expect("write");

        let items = scan_feed(dir.path().to_str().expect("utf8 path"), |_, _| {}).expect("scan");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "m1");
    }

    #[test]
    fn missing_spool_is_an_empty_feed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let items = scan_feed(dir.path().to_str().expect("utf8 path"), |_, _| {}).expect("scan");
        assert!(items.is_empty());
    }
}
