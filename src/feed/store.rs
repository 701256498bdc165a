use std::collections::{HashMap, HashSet};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

const STORE_VERSION: u32 = 1;

/// Persistent done/snooze memberships for feed items. The list
/// subsystem only reads these; every mutation comes from the shell
/// applying a user action.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StatusStore {
    #[serde(skip)]
    path: Option<PathBuf>,
    version: u32,
    done: HashSet<String>,
    /// item id -> wake-at epoch seconds
    snoozed: HashMap<String, i64>,
}

impl StatusStore {
    /// Load from the default location under the user data dir.
    pub fn load() -> Self {
        match dirs::data_dir().map(|p| p.join("feedtui/status.bin")) {
            Some(path) => Self::load_from(path),
            None => Self::default(),
        }
    }

    /// Load from an explicit path. A missing, corrupt, or stale file
    /// yields an empty store, never an error.
    pub fn load_from(path: PathBuf) -> Self {
        let mut store = match File::open(&path) {
            Ok(f) => match bincode::deserialize_from::<_, StatusStore>(BufReader::new(f)) {
                Ok(s) if s.version == STORE_VERSION => s,
                Ok(_) => {
                    info!("status store version mismatch, starting fresh");
                    Self::default()
                }
                Err(e) => {
                    warn!("discarding unreadable status store: {e}");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        };
        store.version = STORE_VERSION;
        store.path = Some(path);
        store
    }

    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        bincode::serialize_into(BufWriter::new(file), self)?;
        Ok(())
    }

    pub fn done_ids(&self) -> &HashSet<String> {
        &self.done
    }

    pub fn snoozed_ids(&self) -> &HashMap<String, i64> {
        &self.snoozed
    }

    pub fn mark_done(&mut self, id: &str) {
        self.done.insert(id.to_string());
    }

    pub fn snooze(&mut self, id: &str, hours: u32, now_epoch: i64) {
        self.snoozed
            .insert(id.to_string(), now_epoch + i64::from(hours) * 3600);
    }

    /// Clear both memberships; the item shows as open again.
    pub fn reopen(&mut self, id: &str) {
        self.done.remove(id);
        self.snoozed.remove(id);
    }

    /// Drop snoozes whose wake time has passed. Run at load and on
    /// refresh; returns how many woke.
    pub fn sweep(&mut self, now_epoch: i64) -> usize {
        let before = self.snoozed.len();
        self.snoozed.retain(|_, wake_at| *wake_at > now_epoch);
        before - self.snoozed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_snooze_reopen() {
        let mut store = StatusStore::default();
        store.mark_done("a");
        store.snooze("b", 24, 1_000);
        assert!(store.done_ids().contains("a"));
        assert_eq!(store.snoozed_ids()["b"], 1_000 + 24 * 3600);

        store.reopen("a");
        store.reopen("b");
        assert!(store.done_ids().is_empty());
        assert!(store.snoozed_ids().is_empty());
    }

    #[test]
    fn sweep_wakes_expired_snoozes() {
        let mut store = StatusStore::default();
        store.snooze("soon", 1, 0);
        store.snooze("later", 48, 0);
        assert_eq!(store.sweep(7200), 1);
        assert!(!store.snoozed_ids().contains_key("soon"));
        assert!(store.snoozed_ids().contains_key("later"));
    }

    #[test]
    fn store_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("status.bin");

        let mut store = StatusStore::load_from(path.clone());
        store.mark_done("a");
        store.snooze("b", 2, 500);
        store.save().expect("save");

        let reloaded = StatusStore::load_from(path);
        assert!(reloaded.done_ids().contains("a"));
        assert_eq!(reloaded.snoozed_ids()["b"], 500 + 7200);
    }

    #[test]
    fn corrupt_store_loads_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("status.bin");
        fs::write(&path, b"garbage").expect("write");

        let store = StatusStore::load_from(path);
        assert!(store.done_ids().is_empty());
        assert!(store.snoozed_ids().is_empty());
    }
}
