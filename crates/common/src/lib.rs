//! # GPT Trainer Common
//!
//! Reusable plumbing shared by the client crates, with no domain knowledge:
//! - `time`: clock abstraction for deterministic time-based testing
//! - `cache`: generic thread-safe TTL cache with an injectable clock

pub mod cache;
pub mod time;

pub use cache::TtlCache;
pub use time::{Clock, MockClock, SystemClock};
