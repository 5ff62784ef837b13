//! Common test utilities for the citelink torture harnesses
//!
//! Shared helpers for building synthetic conversations, streaming message
//! elements into a view tree under degraded conditions, and summarizing
//! navigation latencies.

#![allow(dead_code)] // not every harness uses every helper

pub mod conversation;
pub mod metrics;
pub mod sim;

pub use conversation::{cited_message, mixed_sources, web_sources};
pub use metrics::{summarize, LatencySummary};
pub use sim::{stream_messages, SimConditions};
