//! A.C.E relay
//!
//! HTTP service between the orchestrator and the CustomGPT conversation API.
//! It proxies conversation listing, renaming and message paging, and relays
//! chat messages through a fixed four-stage agent pipeline.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
pub mod ports;
