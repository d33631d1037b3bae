//! GPT Trainer API client
//!
//! # Architecture
//!
//! - **Client**: [`client::GptTrainerClient`] - composition root tying the
//!   transport, response cache, error observer, and test-mode fixture layer
//!   into one CRUD surface over data sources, chatbots, agents, and tags
//! - **Cache**: [`cache::ResponseCache`] - 5-minute TTL store per collection,
//!   invalidated by every mutating call on that collection
//! - **Observer**: [`observer::ApiErrorObserver`] - injectable sink receiving
//!   one event per failed live operation before the error is re-raised
//!
//! # Test mode
//!
//! A client built with the sentinel token `test_token` serves every
//! operation from deterministic local fixtures and never invokes the
//! transport. The flag is derived once at construction and immutable.
//!
//! # Error handling
//!
//! - Validation and configuration errors surface immediately, unwrapped
//! - Network/HTTP/decode failures are reported to the observer, then
//!   re-raised wrapped with the failing operation's name
//! - A 404 on chatbot lookup is not an error: `get_chatbot` returns `None`

pub mod cache;
pub mod client;
pub mod observer;

mod agents;
mod analysis;
mod chatbots;
mod data_sources;
mod tags;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{ClientBuilder, GptTrainerClient};
pub use observer::{ApiErrorEvent, ApiErrorObserver, TracingErrorObserver};
