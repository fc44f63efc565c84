use crate::config::Settings;
use crate::errors::NudgebotResult;
use crate::scheduler::ReminderScheduler;
use crate::store::{Message, MessageStore, Priority};
use crate::summary::{DailySummary, daily_summary};
use crate::utils::ensure_dir;
use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::info;

const MESSAGES_FILE: &str = "messages.json";
const SETTINGS_FILE: &str = "settings.json";

/// The reminder service: one instance per process, wiring the message store,
/// classifier, scheduler and settings together. The presentation layer talks
/// only to this type (plus the pure `replies`/`summary` helpers).
pub struct Nudgebot {
    home: PathBuf,
    settings: Mutex<Settings>,
    store: Arc<MessageStore>,
    scheduler: ReminderScheduler,
}

impl Nudgebot {
    /// Construct against an explicit home directory, loading whatever
    /// settings and messages are already there.
    pub fn new(home: impl Into<PathBuf>) -> Result<Self> {
        let home = ensure_dir(home.into())?;
        let settings = Settings::load(&home.join(SETTINGS_FILE));
        let store = Arc::new(MessageStore::load(
            home.join(MESSAGES_FILE),
            settings.auto_priority,
        ));
        let scheduler = ReminderScheduler::new(
            store.clone(),
            Duration::from_secs(settings.reminder_interval_minutes * 60),
        );
        info!("nudgebot v{} using {}", crate::VERSION, home.display());
        Ok(Self {
            home,
            settings: Mutex::new(settings),
            store,
            scheduler,
        })
    }

    /// Construct against `$NUDGEBOT_HOME` or `~/.nudgebot`.
    pub fn with_default_home() -> Result<Self> {
        Self::new(crate::utils::get_nudgebot_home()?)
    }

    /// Install the alert callback the scheduler invokes when a reminder
    /// fires. Callback errors are logged, never propagated.
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
        self.scheduler.set_on_reminder(callback).await;
    }

    /// Arm reminders for every message that was still pending when the
    /// process last stopped. Overdue messages fire almost immediately.
    pub async fn start(&self) {
        let snapshot = self.store.snapshot().await;
        self.scheduler.initialize(&snapshot, Utc::now()).await;
    }

    /// Track a new message: classify (unless a priority is supplied),
    /// persist, and arm its reminder with the full interval.
    pub async fn add_message(
        &self,
        sender: &str,
        text: &str,
        priority: Option<Priority>,
        platform: Option<&str>,
    ) -> NudgebotResult<Message> {
        let message = self.store.add(sender, text, priority, platform).await?;
        self.scheduler.track(&message.id).await;
        Ok(message)
    }

    /// Mark a message answered: no further reminders for its id.
    /// Unknown ids are a no-op (`Ok(false)`).
    pub async fn mark_completed(&self, id: &str) -> NudgebotResult<bool> {
        let updated = self.store.mark_completed(id).await?;
        if updated {
            self.scheduler.cancel(id).await;
        }
        Ok(updated)
    }

    pub async fn list_pending(&self, filter: Option<Priority>) -> Vec<Message> {
        self.store.list_pending(filter).await
    }

    /// Aggregate counts over messages created since midnight of `now`.
    pub async fn daily_summary<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DailySummary {
        let snapshot = self.store.snapshot().await;
        daily_summary(&snapshot, now)
    }

    /// Quick-reply suggestions for a message text.
    pub fn suggest_replies(text: &str) -> Vec<String> {
        crate::replies::suggest(text)
    }

    /// Change the reminder interval, persist it, and replace every
    /// outstanding timer against the new interval.
    pub async fn set_reminder_interval(&self, minutes: u64) -> NudgebotResult<()> {
        {
            let mut settings = self.settings.lock().await;
            settings.reminder_interval_minutes = minutes;
            settings.save(&self.home.join(SETTINGS_FILE))?;
        }
        let snapshot = self.store.snapshot().await;
        self.scheduler
            .set_interval(Duration::from_secs(minutes * 60), &snapshot, Utc::now())
            .await;
        Ok(())
    }

    /// Toggle keyword-based priority detection for new messages.
    pub async fn set_auto_priority(&self, enabled: bool) -> NudgebotResult<()> {
        {
            let mut settings = self.settings.lock().await;
            settings.auto_priority = enabled;
            settings.save(&self.home.join(SETTINGS_FILE))?;
        }
        self.store.set_auto_priority(enabled).await;
        Ok(())
    }

    pub async fn set_daily_reminders(&self, enabled: bool) -> NudgebotResult<()> {
        let mut settings = self.settings.lock().await;
        settings.daily_reminders = enabled;
        settings.save(&self.home.join(SETTINGS_FILE))?;
        Ok(())
    }

    pub async fn settings(&self) -> Settings {
        self.settings.lock().await.clone()
    }

    /// Cancel every outstanding reminder timer.
    pub async fn shutdown(&self) {
        self.scheduler.cancel_all().await;
    }
}

#[cfg(test)]
mod tests;
