//! Canned quick-reply suggestions for a pending message.

const MAX_SUGGESTIONS: usize = 4;

const GENERIC_REPLIES: &[&str] = &[
    "I'm a bit busy right now, but I saw your message. I'll reply shortly.",
    "Thanks for reaching out! I'll get back to you soon.",
    "Give me a moment, I'm working on something. Will respond soon!",
    "I saw your message. Let me get back to you in a bit.",
];

const SCHEDULING_REPLY: &str = "I'll check my schedule and get back to you about this.";
const URGENCY_REPLY: &str = "I see this is important. Let me address this right away.";
const GRATITUDE_REPLY: &str = "You're welcome! Happy to help.";

/// Suggest up to four reply strings for the given message text.
///
/// Starts from the generic templates, then three ordered insert-at-front
/// checks on the lowercased text. The check order fixes the net precedence:
/// gratitude > urgency > scheduling > generic.
pub fn suggest(text: &str) -> Vec<String> {
    let mut replies: Vec<String> = GENERIC_REPLIES.iter().map(ToString::to_string).collect();
    let lowered = text.to_lowercase();

    if lowered.contains("meet") || lowered.contains("call") {
        replies.insert(0, SCHEDULING_REPLY.to_string());
    }
    if lowered.contains("urgent") || lowered.contains("important") {
        replies.insert(0, URGENCY_REPLY.to_string());
    }
    if lowered.contains("thanks") || lowered.contains("thank") {
        replies.insert(0, GRATITUDE_REPLY.to_string());
    }

    replies.truncate(MAX_SUGGESTIONS);
    replies
}
