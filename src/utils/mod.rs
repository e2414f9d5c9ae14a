//! Utility functions and helpers for the scentwise endpoint.
//!
//! # Submodules
//!
//! - `logging`: Tracing initialization and secret scrubbing.
//! - `retry`: The fixed-delay per-model retry policy.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod logging;
pub mod retry;
