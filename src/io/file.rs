use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Directory;
use crate::store::TaskStore;

/// On-disk representation of a whole board: the room/staff directory plus
/// the task collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardFile {
    pub name: String,
    pub directory: Directory,
    pub store: TaskStore,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl BoardFile {
    pub fn new(name: impl Into<String>, directory: Directory, store: TaskStore) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            directory,
            store,
            created: now,
            modified: now,
        }
    }

    /// Touch the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }
}

/// Save a board to a JSON file.
pub fn save_board(board: &BoardFile, path: &Path) -> Result<(), String> {
    let json = serde_json::to_string_pretty(board).map_err(|e| e.to_string())?;
    std::fs::write(path, json).map_err(|e| e.to_string())
}

/// Load a board from a JSON file.
pub fn load_board(path: &Path) -> Result<BoardFile, String> {
    let json = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_json::from_str(&json).map_err(|e| e.to_string())
}

/// Default folder for board files under the platform data dir.
pub fn boards_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "HousekeepingBoard")
        .map(|dirs| dirs.data_dir().join("boards"))
}
