use crate::classify::Classifier;
use crate::errors::{NudgebotError, NudgebotResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

/// Urgency tier assigned to a message at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

fn default_platform() -> String {
    "other".to_string()
}

/// One tracked inbound communication awaiting a reply.
///
/// `id` and `created_at` are set once at creation and never change;
/// `completed` only ever transitions false → true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub sender: String,
    pub text: String,
    pub priority: Priority,
    #[serde(default = "default_platform")]
    pub platform: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed: bool,
}

/// Ordered collection of tracked messages with a durable JSON slot.
///
/// Insertion order is the canonical listing order. Every mutation persists
/// the full collection before returning, so a subsequent read on the same
/// task always observes the mutation on disk as well as in memory.
pub struct MessageStore {
    path: PathBuf,
    messages: Mutex<Vec<Message>>,
    classifier: Mutex<Classifier>,
}

impl MessageStore {
    /// Load the store from its durable slot. Missing or unparseable data
    /// starts an empty collection — never an error.
    pub fn load(path: PathBuf, auto_priority: bool) -> Self {
        let messages = if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(content) => match serde_json::from_str::<Vec<Message>>(&content) {
                    Ok(list) => list,
                    Err(e) => {
                        warn!(
                            "Corrupt message store at {}, starting empty: {}",
                            path.display(),
                            e
                        );
                        Vec::new()
                    }
                },
                Err(e) => {
                    warn!(
                        "Failed to read message store from {}, starting empty: {}",
                        path.display(),
                        e
                    );
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        Self {
            path,
            messages: Mutex::new(messages),
            classifier: Mutex::new(Classifier::new(auto_priority)),
        }
    }

    /// Add a new message. Assigns a fresh id and the current timestamp,
    /// falls back to the classifier when no priority is supplied, and
    /// persists before returning.
    pub async fn add(
        &self,
        sender: &str,
        text: &str,
        priority: Option<Priority>,
        platform: Option<&str>,
    ) -> NudgebotResult<Message> {
        let priority = match priority {
            Some(p) => p,
            None => self.classifier.lock().await.classify(text),
        };

        let message = Message {
            id: Uuid::new_v4().to_string(),
            sender: sender.to_string(),
            text: text.to_string(),
            priority,
            platform: platform.unwrap_or("other").to_string(),
            created_at: Utc::now(),
            completed: false,
        };

        let mut messages = self.messages.lock().await;
        messages.push(message.clone());
        self.persist(&messages)?;
        Ok(message)
    }

    /// Mark a message completed. Unknown ids are a silent no-op
    /// (`Ok(false)`); timer cancellation is the caller's concern.
    pub async fn mark_completed(&self, id: &str) -> NudgebotResult<bool> {
        let mut messages = self.messages.lock().await;
        let found = match messages.iter_mut().find(|m| m.id == id) {
            Some(message) => {
                message.completed = true;
                true
            }
            None => false,
        };
        if !found {
            debug!("mark_completed for unknown message id {}", id);
            return Ok(false);
        }
        self.persist(&messages)?;
        Ok(true)
    }

    /// Uncompleted messages in insertion order, optionally filtered by
    /// exact priority.
    pub async fn list_pending(&self, filter: Option<Priority>) -> Vec<Message> {
        let messages = self.messages.lock().await;
        messages
            .iter()
            .filter(|m| !m.completed)
            .filter(|m| filter.is_none_or(|p| m.priority == p))
            .cloned()
            .collect()
    }

    /// Full ordered copy of the collection.
    pub async fn snapshot(&self) -> Vec<Message> {
        self.messages.lock().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<Message> {
        let messages = self.messages.lock().await;
        messages.iter().find(|m| m.id == id).cloned()
    }

    pub async fn set_auto_priority(&self, enabled: bool) {
        self.classifier.lock().await.set_enabled(enabled);
    }

    /// Serialize the full collection to the durable slot. A failed save
    /// surfaces as `Storage` while the in-memory state stays valid.
    fn persist(&self, messages: &[Message]) -> NudgebotResult<()> {
        let content = serde_json::to_string_pretty(messages)
            .map_err(|e| NudgebotError::Storage(format!("serialize messages: {e}")))?;
        crate::utils::atomic_write(&self.path, &content)
            .map_err(|e| NudgebotError::Storage(e.to_string()))?;
        Ok(())
    }
}
