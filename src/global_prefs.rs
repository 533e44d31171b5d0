// Forum preferences shared by the router, composer and reconciler
use crate::state::AppResult;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ForumPrefs {
    /// Threads requested per page when a panel opens.
    pub page_size: u32,
    pub include_ownerless: bool,
    /// Category new threads are posted under.
    pub default_category_id: i32,
    /// Discard thread pages whose group id differs from the open panel.
    pub guard_thread_pages_by_group: bool,
    pub server_addr: String,
}

impl Default for ForumPrefs {
    fn default() -> Self {
        Self {
            page_size: 100,
            include_ownerless: false,
            default_category_id: 0,
            guard_thread_pages_by_group: false,
            server_addr: "127.0.0.1:8080".to_string(),
        }
    }
}

impl ForumPrefs {
    pub fn config_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".group_forum_prefs.json")
    }

    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Missing or malformed files yield the defaults.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(data) => serde_json::from_str(&data).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed prefs at {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data)?;
        Ok(())
    }
}

static GLOBAL_PREFS: OnceCell<RwLock<ForumPrefs>> = OnceCell::new();

pub fn init_global_prefs() {
    let prefs = ForumPrefs::load();
    GLOBAL_PREFS.set(RwLock::new(prefs)).ok();
}

/// Snapshot of the global prefs; defaults when uninitialized.
pub fn global_prefs() -> ForumPrefs {
    GLOBAL_PREFS
        .get()
        .and_then(|lock| lock.read().ok().map(|prefs| prefs.clone()))
        .unwrap_or_default()
}
