//! Translation from the inbound recommend request into a Gemini payload.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod request;

pub use request::{build_payload, MAX_OUTPUT_TOKENS};
