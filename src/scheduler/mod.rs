use crate::store::{Message, MessageStore};
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Near-zero delay used on startup for messages already past their deadline.
const CATCH_UP_DELAY: Duration = Duration::from_secs(1);

/// Async callback invoked when a reminder fires. Implemented by the
/// presentation layer; errors are logged, never propagated.
pub type ReminderCallback = Arc<
    dyn Fn(Message) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<()>> + Send>>
        + Send
        + Sync,
>;

/// Per-message recurring reminder timers.
///
/// Each armed id owns exactly one task: an explicit sleep/fire loop that
/// re-waits the full interval after every fire and exits on its own once the
/// message completes. The scheduler never mutates message data — it holds
/// ids and reads `completed` through the store.
#[derive(Clone)]
pub struct ReminderScheduler {
    store: Arc<MessageStore>,
    interval: Arc<Mutex<Duration>>,
    on_reminder: Arc<Mutex<Option<ReminderCallback>>>,
    timers: Arc<Mutex<HashMap<String, JoinHandle<()>>>>,
}

impl ReminderScheduler {
    pub fn new(store: Arc<MessageStore>, interval: Duration) -> Self {
        Self {
            store,
            interval: Arc::new(Mutex::new(interval)),
            on_reminder: Arc::new(Mutex::new(None)),
            timers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn set_on_reminder<F>(&self, callback: F)
    where
        F: Fn(
                Message,
            )
                -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<()>> + Send>>
            + Send
            + Sync
            + 'static,
    {
        *self.on_reminder.lock().await = Some(Arc::new(callback));
    }

    pub async fn interval(&self) -> Duration {
        *self.interval.lock().await
    }

    /// Arm a reminder for `id`, firing first after `initial_delay` and then
    /// every interval. Replaces any existing timer for the id — at most one
    /// timer per id at any instant.
    pub async fn arm(&self, id: &str, initial_delay: Duration) {
        let mut timers = self.timers.lock().await;
        if let Some(existing) = timers.remove(id) {
            existing.abort();
        }

        let scheduler = self.clone();
        let timer_id = id.to_string();
        let handle = tokio::spawn(async move {
            let mut delay = initial_delay;
            loop {
                tokio::time::sleep(delay).await;

                let Some(message) = scheduler.store.get(&timer_id).await else {
                    debug!("Reminder timer for unknown message {}, stopping", timer_id);
                    break;
                };
                // Raced with a completion between fire and lookup
                if message.completed {
                    debug!("Message {} completed, reminder loop ending", timer_id);
                    break;
                }

                let callback = scheduler.on_reminder.lock().await.clone();
                if let Some(callback) = callback {
                    if let Err(e) = callback(message).await {
                        error!("Reminder callback failed for {}: {}", timer_id, e);
                    }
                } else {
                    debug!("Reminder due for {} but no callback is set", timer_id);
                }

                delay = *scheduler.interval.lock().await;
            }
        });
        timers.insert(id.to_string(), handle);
    }

    /// Arm a freshly added message with the full interval.
    pub async fn track(&self, id: &str) {
        let interval = *self.interval.lock().await;
        self.arm(id, interval).await;
    }

    /// Cancel the outstanding timer for `id`, if any. Idempotent.
    pub async fn cancel(&self, id: &str) {
        let mut timers = self.timers.lock().await;
        if let Some(handle) = timers.remove(id) {
            handle.abort();
        }
    }

    pub async fn cancel_all(&self) {
        let mut timers = self.timers.lock().await;
        for (_, handle) in timers.drain() {
            handle.abort();
        }
    }

    /// Number of timers that are armed and still running.
    pub async fn active_count(&self) -> usize {
        let timers = self.timers.lock().await;
        timers.values().filter(|h| !h.is_finished()).count()
    }

    /// Arm timers for every uncompleted message in the snapshot.
    ///
    /// Messages already past the interval fire almost immediately (the
    /// catch-up case where the process was not running at the deadline);
    /// the rest wait out the remaining time.
    pub async fn initialize(&self, messages: &[Message], now: DateTime<Utc>) {
        self.cancel_all().await;
        let interval = *self.interval.lock().await;

        let mut armed = 0usize;
        for message in messages.iter().filter(|m| !m.completed) {
            let elapsed = now
                .signed_duration_since(message.created_at)
                .to_std()
                .unwrap_or(Duration::ZERO);
            let delay = if elapsed >= interval {
                CATCH_UP_DELAY
            } else {
                interval - elapsed
            };
            self.arm(&message.id, delay).await;
            armed += 1;
        }
        info!("Armed reminders for {} pending messages", armed);
    }

    /// Change the reminder interval and replace every outstanding timer.
    pub async fn set_interval(
        &self,
        interval: Duration,
        messages: &[Message],
        now: DateTime<Utc>,
    ) {
        *self.interval.lock().await = interval;
        info!("Reminder interval set to {:?}", interval);
        self.initialize(messages, now).await;
    }
}
