use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};

async fn counting_bot(home: PathBuf) -> (Nudgebot, Arc<AtomicUsize>) {
    let bot = Nudgebot::new(home).unwrap();
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = fired.clone();
    bot.set_on_reminder(move |_message| {
        let counter = counter.clone();
        Box::pin(async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    })
    .await;
    (bot, fired)
}

#[tokio::test]
async fn add_and_list_pending() {
    let tmp = tempfile::tempdir().unwrap();
    let (bot, _fired) = counting_bot(tmp.path().join("home")).await;

    bot.add_message("John", "hey there", None, Some("whatsapp"))
        .await
        .unwrap();
    bot.add_message("Sarah", "thanks!", None, Some("instagram"))
        .await
        .unwrap();

    let pending = bot.list_pending(None).await;
    assert_eq!(pending.len(), 2);
    assert_eq!(pending[0].sender, "John");
    assert_eq!(pending[1].sender, "Sarah");
    assert_eq!(pending[1].priority, Priority::Low, "classifier fallback ran");
}

#[tokio::test(start_paused = true)]
async fn reminder_fires_for_unanswered_message() {
    let tmp = tempfile::tempdir().unwrap();
    let (bot, fired) = counting_bot(tmp.path().join("home")).await;

    bot.add_message("John", "ping", None, None).await.unwrap();

    // Default interval is 10 minutes
    tokio::time::sleep(Duration::from_secs(601)).await;
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn mark_completed_silences_reminders() {
    let tmp = tempfile::tempdir().unwrap();
    let (bot, fired) = counting_bot(tmp.path().join("home")).await;

    let message = bot.add_message("John", "ping", None, None).await.unwrap();
    assert!(bot.mark_completed(&message.id).await.unwrap());

    tokio::time::sleep(Duration::from_secs(1800)).await;
    assert_eq!(fired.load(Ordering::SeqCst), 0);
    assert!(bot.list_pending(None).await.is_empty());
}

#[tokio::test]
async fn mark_completed_unknown_id_is_noop() {
    let tmp = tempfile::tempdir().unwrap();
    let (bot, _fired) = counting_bot(tmp.path().join("home")).await;
    assert!(!bot.mark_completed("missing").await.unwrap());
}

#[tokio::test(start_paused = true)]
async fn interval_change_rearms_timers() {
    let tmp = tempfile::tempdir().unwrap();
    let (bot, fired) = counting_bot(tmp.path().join("home")).await;

    bot.add_message("John", "ping", None, None).await.unwrap();
    bot.set_reminder_interval(1).await.unwrap();

    tokio::time::sleep(Duration::from_secs(61)).await;
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert_eq!(bot.settings().await.reminder_interval_minutes, 1);
}

#[tokio::test]
async fn state_survives_restart() {
    let tmp = tempfile::tempdir().unwrap();
    let home = tmp.path().join("home");

    {
        let (bot, _fired) = counting_bot(home.clone()).await;
        bot.add_message("John", "urgent deadline!", None, None)
            .await
            .unwrap();
        bot.set_reminder_interval(25).await.unwrap();
        bot.set_auto_priority(false).await.unwrap();
        bot.shutdown().await;
    }

    let (bot, _fired) = counting_bot(home).await;
    let settings = bot.settings().await;
    assert_eq!(settings.reminder_interval_minutes, 25);
    assert!(!settings.auto_priority);

    let pending = bot.list_pending(None).await;
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].priority, Priority::High);
}

#[tokio::test]
async fn auto_priority_toggle_affects_new_messages() {
    let tmp = tempfile::tempdir().unwrap();
    let (bot, _fired) = counting_bot(tmp.path().join("home")).await;

    bot.set_auto_priority(false).await.unwrap();
    let message = bot
        .add_message("Boss", "urgent emergency!", None, None)
        .await
        .unwrap();
    assert_eq!(message.priority, Priority::Medium);

    bot.set_auto_priority(true).await.unwrap();
    let message = bot
        .add_message("Boss", "urgent emergency!", None, None)
        .await
        .unwrap();
    assert_eq!(message.priority, Priority::High);
}

#[tokio::test]
async fn daily_summary_reflects_store() {
    let tmp = tempfile::tempdir().unwrap();
    let (bot, _fired) = counting_bot(tmp.path().join("home")).await;

    bot.add_message("A", "hello", Some(Priority::High), None)
        .await
        .unwrap();
    let answered = bot
        .add_message("B", "hello", Some(Priority::Low), None)
        .await
        .unwrap();
    bot.mark_completed(&answered.id).await.unwrap();

    let summary = bot.daily_summary(&Utc::now()).await;
    assert_eq!(summary.total, 2);
    assert_eq!(summary.pending, 1);
    assert_eq!(summary.replied, 1);
    assert_eq!(summary.high_priority, 1);
}

#[test]
fn suggest_replies_passthrough() {
    let replies = Nudgebot::suggest_replies("thanks for the call");
    assert!(!replies.is_empty());
    assert!(replies.len() <= 4);
}

#[tokio::test]
async fn daily_reminders_setting_persists() {
    let tmp = tempfile::tempdir().unwrap();
    let home = tmp.path().join("home");

    {
        let (bot, _fired) = counting_bot(home.clone()).await;
        bot.set_daily_reminders(false).await.unwrap();
    }

    let (bot, _fired) = counting_bot(home).await;
    assert!(!bot.settings().await.daily_reminders);
}
