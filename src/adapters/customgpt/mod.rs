//! CustomGPT adapter - the upstream conversation API over HTTPS.

mod client;

pub use client::CustomGptClient;
