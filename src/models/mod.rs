//! Data models for the inbound endpoint and the Gemini API.
//!
//! This module contains the type definitions for request/response bodies used by:
//! - The inbound `/api/recommend` endpoint (`recommend`)
//! - The upstream Google Gemini `generateContent` API (`gemini`)

// Author: kelexine (https://github.com/kelexine)

pub mod gemini;
pub mod recommend;

pub use gemini::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, InlineData, Part, SystemInstruction};
pub use recommend::{ChatMessage, Mode, RecommendRequest, RecommendResponse};
