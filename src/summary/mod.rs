use crate::store::{Message, Priority};
use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

/// One still-unanswered message from today, with a humanized age.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingEntry {
    pub sender: String,
    pub text: String,
    pub time: String,
    pub priority: Priority,
}

/// Aggregate counts over messages created since local midnight.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub total: usize,
    pub pending: usize,
    pub replied: usize,
    pub high_priority: usize,
    pub unresponded: Vec<PendingEntry>,
}

/// Stateless transform over a snapshot of the store at instant `now`.
///
/// "Today" is the calendar day of `now` in `now`'s timezone; the caller
/// decides the zone (local time in production, UTC in tests).
pub fn daily_summary<Tz: TimeZone>(messages: &[Message], now: &DateTime<Tz>) -> DailySummary {
    let today = now.date_naive();
    let tz = now.timezone();
    let now_utc = now.with_timezone(&Utc);

    let todays: Vec<&Message> = messages
        .iter()
        .filter(|m| m.created_at.with_timezone(&tz).date_naive() >= today)
        .collect();

    let unresponded: Vec<PendingEntry> = todays
        .iter()
        .filter(|m| !m.completed)
        .map(|m| PendingEntry {
            sender: m.sender.clone(),
            text: m.text.clone(),
            time: format_time_ago(m.created_at, now_utc),
            priority: m.priority,
        })
        .collect();

    let total = todays.len();
    let pending = unresponded.len();
    let high_priority = todays
        .iter()
        .filter(|m| !m.completed && m.priority == Priority::High)
        .count();

    DailySummary {
        total,
        pending,
        replied: total - pending,
        high_priority,
        unresponded,
    }
}

/// Humanize the elapsed time since `from` ("just now", "5 minutes ago",
/// "2 hours ago", "3 days ago").
pub fn format_time_ago(from: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(from);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if days > 0 {
        format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
    } else if hours > 0 {
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else if minutes > 0 {
        format!("{} minute{} ago", minutes, if minutes == 1 { "" } else { "s" })
    } else {
        "just now".to_string()
    }
}
