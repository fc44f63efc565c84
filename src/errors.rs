use thiserror::Error;

/// Typed error hierarchy for nudgebot.
///
/// Use at module boundaries (store persistence, settings, scheduler wiring).
/// Internal/leaf functions can continue using `anyhow::Result` — the `Internal`
/// variant allows seamless conversion via the `?` operator.
#[derive(Debug, Error)]
pub enum NudgebotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Scheduler error: {0}")]
    Scheduler(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Convenience alias for results using `NudgebotError`.
pub type NudgebotResult<T> = std::result::Result<T, NudgebotError>;
