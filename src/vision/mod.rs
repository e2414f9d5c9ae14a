//! Image handling for photo-mode requests.
//!
//! Photo requests carry the image inline as base64. This module turns the
//! caller's `imageBase64` / `imageMime` pair into Gemini `InlineData`,
//! stripping `data:` URL prefixes, sniffing the MIME type from magic bytes when
//! none was given, and enforcing the inline size limit.
//!
//! # Submodules
//!
//! - `models`: Supported formats and size estimation.
//! - `translation`: Conversion into Gemini inline data.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod models;
pub mod translation;

pub use translation::inline_image;
