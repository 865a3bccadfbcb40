//! # abidecoder-observability
//!
//! Structured logging for abidecoder binaries.
//!
//! Library crates only emit `tracing` events; a binary calls
//! [`init_tracing`] once to install a subscriber. Log levels are
//! configurable globally and per component, as text or JSON.

pub mod tracing_setup;

pub use tracing_setup::{filter_directives, init_tracing, LogConfig};
