//! Recipe image inputs.
//!
//! Images reach the core in one of three shapes: nothing at all, an inline
//! `data:<mime>;base64,<payload>` URI (a fresh upload or an AI-analysed
//! photo), or a URL that is already hosted somewhere else. Only inline
//! images are ever written to the asset store.

use base64::{Engine as _, engine::general_purpose};
use std::fmt;
use thiserror::Error;

/// Errors produced while decoding an inline image.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InlineImageError {
    /// The text does not start with `data:` or has no `,` separator.
    #[error("Image is not a data URI")]
    NotDataUri,

    /// The media type is missing or is not an image type.
    #[error("Unsupported media type for image: {0:?}")]
    UnsupportedMediaType(String),

    /// Only base64 payloads are accepted.
    #[error("Image data URI must be base64 encoded")]
    NotBase64,

    /// The payload failed to decode.
    #[error("Invalid base64 image payload: {0}")]
    InvalidPayload(String),

    /// The payload decoded to zero bytes.
    #[error("Image payload is empty")]
    Empty,
}

/// A decoded inline image.
#[derive(Clone, PartialEq, Eq)]
pub struct InlineImage {
    mime_type: String,
    bytes: Vec<u8>,
}

impl InlineImage {
    /// Build an inline image from raw bytes.
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Decode a `data:<mime>;base64,<payload>` URI.
    pub fn from_data_uri(uri: &str) -> Result<Self, InlineImageError> {
        let rest = uri
            .trim()
            .strip_prefix("data:")
            .ok_or(InlineImageError::NotDataUri)?;
        let (header, payload) = rest.split_once(',').ok_or(InlineImageError::NotDataUri)?;

        let mime_type = header
            .strip_suffix(";base64")
            .ok_or(InlineImageError::NotBase64)?;
        if !mime_type.starts_with("image/") || mime_type.len() == "image/".len() {
            return Err(InlineImageError::UnsupportedMediaType(
                mime_type.to_string(),
            ));
        }

        let bytes = general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| InlineImageError::InvalidPayload(e.to_string()))?;
        if bytes.is_empty() {
            return Err(InlineImageError::Empty);
        }

        Ok(Self::new(mime_type.to_ascii_lowercase(), bytes))
    }

    /// Re-encode as a data URI, e.g. for sending to a vision model.
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            general_purpose::STANDARD.encode(&self.bytes)
        )
    }

    /// MIME type such as `image/png`.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Decoded image bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// File extension used when the image is stored.
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/png" => "png",
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            "image/avif" => "avif",
            "image/heic" => "heic",
            _ => "img",
        }
    }
}

// Image payloads can be megabytes; keep them out of logs.
impl fmt::Debug for InlineImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InlineImage")
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// The image field of a recipe draft.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImageInput {
    /// No image supplied.
    #[default]
    None,
    /// A new image to upload into the asset store.
    Inline(InlineImage),
    /// A URL hosted elsewhere, used verbatim and never managed.
    Hosted(String),
}

impl ImageInput {
    /// Classify a raw image form field.
    ///
    /// Blank text is [`ImageInput::None`], anything starting with `data:` is
    /// decoded as an inline image, and everything else is treated as a
    /// hosted URL.
    pub fn from_field(field: &str) -> Result<Self, InlineImageError> {
        let trimmed = field.trim();
        if trimmed.is_empty() {
            Ok(Self::None)
        } else if trimmed.starts_with("data:") {
            InlineImage::from_data_uri(trimmed).map(Self::Inline)
        } else {
            Ok(Self::Hosted(trimmed.to_string()))
        }
    }

    /// Whether this input carries a new image to upload.
    pub const fn is_inline(&self) -> bool {
        matches!(self, Self::Inline(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1x1 transparent PNG
    const PNG_DATA_URI: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

    #[test]
    fn test_decode_png_data_uri() {
        let image = InlineImage::from_data_uri(PNG_DATA_URI).unwrap();
        assert_eq!(image.mime_type(), "image/png");
        assert_eq!(image.extension(), "png");
        assert_eq!(&image.bytes()[1..4], b"PNG");
    }

    #[test]
    fn test_data_uri_round_trip() {
        let image = InlineImage::new("image/jpeg", vec![0xFF, 0xD8, 0xFF, 0xE0]);
        let decoded = InlineImage::from_data_uri(&image.to_data_uri()).unwrap();
        assert_eq!(decoded, image);
        assert_eq!(decoded.extension(), "jpg");
    }

    #[test]
    fn test_rejects_malformed_uris() {
        assert_eq!(
            InlineImage::from_data_uri("https://example.com/a.png"),
            Err(InlineImageError::NotDataUri)
        );
        assert_eq!(
            InlineImage::from_data_uri("data:image/png;base64"),
            Err(InlineImageError::NotDataUri)
        );
        assert_eq!(
            InlineImage::from_data_uri("data:image/png,rawbytes"),
            Err(InlineImageError::NotBase64)
        );
        assert!(matches!(
            InlineImage::from_data_uri("data:text/plain;base64,aGVsbG8="),
            Err(InlineImageError::UnsupportedMediaType(_))
        ));
        assert!(matches!(
            InlineImage::from_data_uri("data:image/png;base64,@@@"),
            Err(InlineImageError::InvalidPayload(_))
        ));
        assert_eq!(
            InlineImage::from_data_uri("data:image/png;base64,"),
            Err(InlineImageError::Empty)
        );
    }

    #[test]
    fn test_debug_omits_payload() {
        let image = InlineImage::new("image/png", vec![7; 4096]);
        let debug = format!("{image:?}");
        assert!(debug.contains("4096"));
        assert!(!debug.contains("7, 7"));
    }

    #[test]
    fn test_image_input_from_field() {
        assert_eq!(ImageInput::from_field("   ").unwrap(), ImageInput::None);
        assert_eq!(
            ImageInput::from_field(" https://placehold.co/600x400 ").unwrap(),
            ImageInput::Hosted("https://placehold.co/600x400".to_string())
        );
        let inline = ImageInput::from_field(PNG_DATA_URI).unwrap();
        assert!(inline.is_inline());
        assert!(ImageInput::from_field("data:nonsense").is_err());
    }
}
