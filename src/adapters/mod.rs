//! Adapters - Implementations of port interfaces.
//!
//! - `customgpt` - the upstream conversation API over reqwest
//! - `http` - axum routes exposed by this service

pub mod customgpt;
pub mod http;

pub use customgpt::CustomGptClient;
