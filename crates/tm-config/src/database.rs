//! libSQL database configuration.

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    "template_matching.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path to the local database file, or `:memory:` for a throwaway store.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

impl DatabaseConfig {
    /// Whether the store lives only for the lifetime of the process.
    pub fn is_in_memory(&self) -> bool {
        self.path == ":memory:"
    }
}
