use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = ".symdex.json";

/// Hard safety ceiling: files larger than this are **always** skipped, regardless of config.
pub const ABSOLUTE_MAX_FILE_BYTES: u64 = 8 * 1024 * 1024;

/// Controls workspace scanning behavior (what to skip).
///
/// Note: `.gitignore` is always respected by the scanner; these are additional
/// hard skips on top of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Directory *names* to skip anywhere in the tree (e.g. "testdata", "third_party").
    ///
    /// These are compared against path components, not full paths.
    pub exclude_dir_names: Vec<String>,

    /// Files larger than this are not indexed.
    pub max_file_bytes: u64,

    /// Gitignore-style pattern file, relative to the scan root.
    pub ignore_file: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            exclude_dir_names: vec![],
            max_file_bytes: 1024 * 1024,
            ignore_file: ".symdexignore".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Settings that govern file discovery and exclusion.
    pub scan: ScanConfig,
    /// Worker threads for extraction; 0 uses rayon's default.
    pub jobs: usize,
}

impl Config {
    pub fn effective_max_file_bytes(&self) -> u64 {
        self.scan.max_file_bytes.min(ABSOLUTE_MAX_FILE_BYTES)
    }
}

pub fn load_config(root: &Path) -> Config {
    let primary = root.join(CONFIG_FILE_NAME);

    let Ok(text) = std::fs::read_to_string(&primary) else {
        return Config::default();
    };

    serde_json::from_str::<Config>(&text).unwrap_or_else(|e| {
        tracing::warn!(path = %primary.display(), error = %e, "ignoring unparsable config");
        Config::default()
    })
}
