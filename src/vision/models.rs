// Vision models and types
// Author: kelexine (https://github.com/kelexine)

/// Fallback when neither the caller nor the image bytes say otherwise.
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    WebP,
    Gif,
    Heic,
}

impl ImageFormat {
    /// Get MIME type for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::WebP => "image/webp",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Heic => "image/heic",
        }
    }

    /// Try to detect format from MIME type
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        match mime.trim().to_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(ImageFormat::Jpeg),
            "image/png" => Some(ImageFormat::Png),
            "image/webp" => Some(ImageFormat::WebP),
            "image/gif" => Some(ImageFormat::Gif),
            "image/heic" => Some(ImageFormat::Heic),
            _ => None,
        }
    }

    /// Detect format from the magic bytes at the start of the image
    pub fn sniff(data: &[u8]) -> Option<Self> {
        if data.len() < 12 {
            return None;
        }

        if data.starts_with(b"\xFF\xD8\xFF") {
            Some(ImageFormat::Jpeg)
        } else if data.starts_with(b"\x89PNG\r\n\x1a\n") {
            Some(ImageFormat::Png)
        } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            Some(ImageFormat::Gif)
        } else if data.starts_with(b"RIFF") && data[8..12] == *b"WEBP" {
            Some(ImageFormat::WebP)
        } else if data[4..12] == *b"ftypheic" || data[4..12] == *b"ftypheix" {
            Some(ImageFormat::Heic)
        } else {
            None
        }
    }
}

/// Decoded size of a base64 string, without decoding it.
pub fn decoded_len(base64: &str) -> usize {
    let padding = base64.bytes().rev().take_while(|b| *b == b'=').count();
    (base64.len() / 4 * 3 + (base64.len() % 4) * 3 / 4).saturating_sub(padding)
}

/// Validate image data size
pub fn validate_image_size(data_len: usize, max_bytes: usize) -> Result<(), String> {
    if data_len > max_bytes {
        return Err(format!(
            "Image size {} bytes exceeds maximum of {} bytes",
            data_len, max_bytes
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoded_len() {
        assert_eq!(decoded_len("dGVzdA=="), 4); // "test"
        assert_eq!(decoded_len("dGVzdDE="), 5);
        assert_eq!(decoded_len("dGVzdDEy"), 6);
        assert_eq!(decoded_len(""), 0);
    }

    #[test]
    fn test_from_mime_type_aliases() {
        assert_eq!(ImageFormat::from_mime_type("image/jpg"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_mime_type("IMAGE/PNG"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_mime_type("image/bmp"), None);
    }

    #[test]
    fn test_size_limit() {
        assert!(validate_image_size(10, 10).is_ok());
        assert!(validate_image_size(11, 10).is_err());
    }
}
