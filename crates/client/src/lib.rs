//! # GPT Trainer Client
//!
//! Typed client for the GPT Trainer REST API: uniform CRUD access to data
//! sources, chatbots, agents, and tags, plus a content-analysis operation.
//!
//! Reads of whole collections go through a 5-minute TTL response cache that
//! every mutating call invalidates. Constructing the client with the
//! sentinel token `test_token` switches every operation to locally
//! synthesized fixture data, so integration tests and local development
//! never touch the network.
//!
//! ```no_run
//! use gpttrainer_client::{GptTrainerClient, TrainerConfig};
//! use gpttrainer_domain::NewTag;
//!
//! # async fn example() -> gpttrainer_domain::Result<()> {
//! let config = TrainerConfig::from_env()?;
//! let client = GptTrainerClient::new(config)?;
//!
//! let tag = client
//!     .create_tag(NewTag { name: "Beta".to_string(), description: None })
//!     .await?;
//! println!("created tag {}", tag.uuid);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod http;
pub mod prompts;
pub mod validation;

mod fixtures;

// Re-export the primary surface
pub use api::client::{ClientBuilder, GptTrainerClient};
pub use api::observer::{ApiErrorEvent, ApiErrorObserver, TracingErrorObserver};
pub use config::TrainerConfig;
pub use http::{HttpTransport, Transport};
