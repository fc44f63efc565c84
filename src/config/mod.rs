use crate::utils::atomic_write;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

/// User-tunable settings, persisted as a small camelCase JSON document.
///
/// Absent or unreadable settings fall back to defaults — a fresh install
/// must never fail because the file is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Minutes between reminder fires for an unanswered message.
    pub reminder_interval_minutes: u64,
    /// Keyword-based priority detection for new messages.
    pub auto_priority: bool,
    /// Daily summary reminders toggle.
    pub daily_reminders: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reminder_interval_minutes: 10,
            auto_priority: true,
            daily_reminders: true,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(settings) => settings,
                Err(e) => {
                    warn!(
                        "Unparseable settings at {}, using defaults: {}",
                        path.display(),
                        e
                    );
                    Self::default()
                }
            },
            Err(e) => {
                warn!(
                    "Failed to read settings from {}, using defaults: {}",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        atomic_write(path, &content)
            .with_context(|| format!("Failed to write settings to {}", path.display()))
    }
}
