//! HTTP transport
//!
//! One authenticated JSON request per call, no retry. The [`Transport`]
//! trait is the seam the API client talks through, so tests can substitute
//! a scripted transport and count invocations.

pub mod transport;

pub use transport::{HttpTransport, Transport};
