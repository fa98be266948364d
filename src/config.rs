use crate::factory::DEFAULT_AUTHOR;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_AUTOSAVE_DELAY_MS: u64 = 700;

/// Settings for the draft core. `data_dir` is where both backends keep
/// their files; the UI shell supplies its app-data directory here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    #[serde(default = "default_author")]
    pub author: String,
    #[serde(default = "default_autosave_delay_ms")]
    pub autosave_delay_ms: u64,
}

fn default_author() -> String {
    DEFAULT_AUTHOR.to_string()
}

fn default_autosave_delay_ms() -> u64 {
    DEFAULT_AUTOSAVE_DELAY_MS
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            author: default_author(),
            autosave_delay_ms: default_autosave_delay_ms(),
        }
    }
}
