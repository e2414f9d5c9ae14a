// Vision translation logic
// Author: kelexine (https://github.com/kelexine)

use super::models::{decoded_len, validate_image_size, ImageFormat, DEFAULT_MIME_TYPE};
use crate::error::{ProxyError, Result};
use crate::models::gemini::InlineData;
use base64::Engine;
use tracing::{debug, warn};

/// Turn the caller's image fields into Gemini InlineData.
///
/// MIME type precedence: explicit `mime`, then the `data:` URL type, then the
/// sniffed magic bytes, then `image/jpeg`. Unknown explicit types are passed
/// through untouched and left for Gemini to judge.
pub fn inline_image(image_base64: &str, mime: Option<&str>, max_bytes: usize) -> Result<InlineData> {
    let (url_mime, data) = split_data_url(image_base64.trim());

    validate_image_size(decoded_len(data), max_bytes).map_err(ProxyError::InvalidRequest)?;

    let explicit = mime.map(str::trim).filter(|m| !m.is_empty()).or(url_mime);

    let mime_type = match explicit {
        Some(m) => match ImageFormat::from_mime_type(m) {
            Some(format) => format.mime_type().to_string(),
            None => {
                warn!("Passing through unrecognised image MIME type: {}", m);
                m.to_string()
            }
        },
        None => {
            let sniffed = sniff_base64(data);
            debug!("Sniffed image format: {:?}", sniffed);
            sniffed
                .map(|f| f.mime_type())
                .unwrap_or(DEFAULT_MIME_TYPE)
                .to_string()
        }
    };

    // Gemini expects base64 data as-is (no prefix like "data:image/png;base64,")
    Ok(InlineData {
        mime_type,
        data: data.to_string(),
    })
}

/// Split `data:<mime>;base64,<payload>` into its parts. Plain base64 passes through.
fn split_data_url(input: &str) -> (Option<&str>, &str) {
    input
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(";base64,"))
        .map(|(mime, data)| (Some(mime).filter(|m| !m.is_empty()), data))
        .unwrap_or((None, input))
}

/// Decode just enough of the payload to read the magic bytes.
fn sniff_base64(data: &str) -> Option<ImageFormat> {
    // 16 base64 chars = 12 bytes, the longest signature we check
    let head = data.get(..16)?;
    let bytes = base64::engine::general_purpose::STANDARD.decode(head).ok()?;
    ImageFormat::sniff(&bytes)
}
