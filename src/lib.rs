#![warn(clippy::pedantic)]
// Noisy doc/signature lints — would require annotating most pub functions
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
// Module structure — store::MessageStore etc. by design
#![allow(clippy::module_name_repetitions)]

pub mod bot;
pub mod classify;
pub mod config;
pub mod errors;
pub mod replies;
pub mod scheduler;
pub mod store;
pub mod summary;
pub(crate) mod utils;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
