use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::Result;
use rayon::prelude::*;
use tracing::{debug, warn};

use super::types::{CachedItem, Item};

const CACHE_VERSION: u32 = 1;

#[derive(serde::Serialize, serde::Deserialize)]
struct CacheFile {
    version: u32,
    items: HashMap<String, CachedItem>, // keyed by spool file path
}

fn default_cache_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|p| p.join("feedtui/items.bin"))
}

/// Load the item cache from disk. Anything wrong with the file
/// (missing, unreadable, stale version) just means an empty cache.
pub fn load_cache() -> HashMap<String, CachedItem> {
    match default_cache_path() {
        Some(p) => load_cache_from(&p),
        None => HashMap::new(),
    }
}

pub fn load_cache_from(path: &Path) -> HashMap<String, CachedItem> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(_) => return HashMap::new(),
    };
    let cache: CacheFile = match bincode::deserialize_from(BufReader::new(file)) {
        Ok(c) => c,
        Err(e) => {
            warn!("discarding unreadable item cache: {e}");
            return HashMap::new();
        }
    };
    if cache.version != CACHE_VERSION {
        debug!(found = cache.version, "item cache version mismatch, rebuilding");
        return HashMap::new();
    }
    cache.items
}

/// Persist the cache, keyed by spool path with each file's mtime.
pub fn save_cache(entries: &[(PathBuf, Item)]) -> Result<()> {
    match default_cache_path() {
        Some(p) => save_cache_to(&p, entries),
        None => Ok(()),
    }
}

pub fn save_cache_to(path: &Path, entries: &[(PathBuf, Item)]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let items: HashMap<String, CachedItem> = entries
        .iter()
        .map(|(p, item)| {
            let key = p.to_string_lossy().to_string();
            let mtime = file_mtime(p).unwrap_or(0);
            (key, CachedItem { item: item.clone(), mtime })
        })
        .collect();

    let file = File::create(path)?;
    bincode::serialize_into(BufWriter::new(file), &CacheFile { version: CACHE_VERSION, items })?;
    Ok(())
}

/// File modification time in seconds since epoch
pub fn file_mtime(path: &Path) -> Option<u64> {
    let mtime = fs::metadata(path).ok()?.modified().ok()?;
    mtime.duration_since(SystemTime::UNIX_EPOCH).ok().map(|d| d.as_secs())
}

/// Split the spool file list into files that still need parsing and
/// items served straight from cache. When the file count matches the
/// cache exactly, the mtime checks are skipped entirely.
pub fn partition_by_cache(
    file_paths: &[PathBuf],
    cache: &HashMap<String, CachedItem>,
) -> (Vec<PathBuf>, Vec<(PathBuf, Item)>) {
    // Fast path: same file count, assume nothing changed in place
    if file_paths.len() == cache.len() {
        let hits = file_paths
            .iter()
            .filter_map(|p| {
                let key = p.to_string_lossy();
                cache.get(key.as_ref()).map(|c| (p.clone(), c.item.clone()))
            })
            .collect::<Vec<_>>();
        if hits.len() == file_paths.len() {
            return (Vec::new(), hits);
        }
    }

    // Slow path: parallel mtime check of every file
    let (to_parse, hits): (Vec<_>, Vec<_>) = file_paths
        .par_iter()
        .map(|path| {
            let key = path.to_string_lossy().to_string();
            match cache.get(&key) {
                Some(cached) if file_mtime(path) == Some(cached.mtime) => {
                    (None, Some((path.clone(), cached.item.clone())))
                }
                _ => (Some(path.clone()), None),
            }
        })
        .unzip();

    (
        to_parse.into_iter().flatten().collect(),
        hits.into_iter().flatten().collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> Item {
        Item {
            id: id.to_string(),
            subject: Some("s".to_string()),
            ..Item::default()
        }
    }

    #[test]
    fn cache_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let spool = dir.path().join("a.json");
        fs::write(&spool, "{}").expect("write");
        let cache_file = dir.path().join("items.bin");

        save_cache_to(&cache_file, &[(spool.clone(), item("a"))]).expect("save");
        let loaded = load_cache_from(&cache_file);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[&spool.to_string_lossy().to_string()].item.id, "a");
    }

    #[test]
    fn corrupt_cache_loads_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cache_file = dir.path().join("items.bin");
        fs::write(&cache_file, b"not bincode").expect("write");
        assert!(load_cache_from(&cache_file).is_empty());
    }

    #[test]
    fn unchanged_files_come_from_cache() {
        let dir = tempfile::tempdir().expect("tempdir");
        let spool = dir.path().join("a.json");
        fs::write(&spool, "{}").expect("write");
        let cache_file = dir.path().join("items.bin");
        save_cache_to(&cache_file, &[(spool.clone(), item("a"))]).expect("save");
        let cache = load_cache_from(&cache_file);

        let (to_parse, hits) = partition_by_cache(&[spool], &cache);
        assert!(to_parse.is_empty());
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn new_files_need_parsing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let spool = dir.path().join("b.json");
        fs::write(&spool, "{}").expect("write");

        let (to_parse, hits) = partition_by_cache(&[spool], &HashMap::new());
        assert_eq!(to_parse.len(), 1);
        assert!(hits.is_empty());
    }
}
