//! Recap persistence configuration.

use serde::{Deserialize, Serialize};

use super::default_true;

/// Persistence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Export recap rows and reload them at startup.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Recap CSV path.
    #[serde(default = "default_recap_path")]
    pub recap_path: String,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            recap_path: default_recap_path(),
        }
    }
}

fn default_recap_path() -> String {
    "recap.csv".to_string()
}
