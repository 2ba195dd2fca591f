use crate::core::error::UploadError;
use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use bytes::Bytes;

// standard alphabet, trailing '=' optional
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// The closed allow-list of image types accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageType {
    Jpeg,
    Jpg,
    Png,
    Gif,
    Webp,
}

impl ImageType {
    pub const ALL: [ImageType; 5] = [
        ImageType::Jpeg,
        ImageType::Jpg,
        ImageType::Png,
        ImageType::Gif,
        ImageType::Webp,
    ];

    /// Exact, case-sensitive match against the allow-list.
    pub fn from_mime(mime: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_mime() == mime)
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            ImageType::Jpeg => "image/jpeg",
            ImageType::Jpg => "image/jpg",
            ImageType::Png => "image/png",
            ImageType::Gif => "image/gif",
            ImageType::Webp => "image/webp",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageType::Jpeg | ImageType::Jpg => "jpg",
            ImageType::Png => "png",
            ImageType::Gif => "gif",
            ImageType::Webp => "webp",
        }
    }
}

#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub image_type: ImageType,
    pub bytes: Bytes,
}

/// Splits `data:<mime>;base64,<payload>` into its mime and payload parts.
///
/// The mime may only hold ASCII letters, `-`, `+` and `/`; the payload must be
/// non-empty and sit on a single line.
pub fn split_data_uri(uri: &str) -> Option<(&str, &str)> {
    let rest = uri.strip_prefix("data:")?;
    let (mime, rest) = rest.split_once(';')?;
    let payload = rest.strip_prefix("base64,")?;

    let mime_ok = !mime.is_empty()
        && mime
            .chars()
            .all(|c| c.is_ascii_alphabetic() || matches!(c, '-' | '+' | '/'));
    let payload_ok = !payload.is_empty()
        && !payload
            .chars()
            .any(|c| matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}'));

    if mime_ok && payload_ok {
        Some((mime, payload))
    } else {
        None
    }
}

/// Parses and validates a data uri, in order: shape, mime allow-list, base64.
/// The size ceiling is checked by the caller on the decoded bytes.
pub fn decode_data_uri(uri: &str) -> Result<DecodedImage, UploadError> {
    let (mime, payload) = split_data_uri(uri)
        .ok_or_else(|| UploadError::MalformedPayload("Invalid image format".to_string()))?;

    let image_type = ImageType::from_mime(mime)
        .ok_or_else(|| UploadError::UnsupportedMediaType(mime.to_string()))?;

    let bytes = PAYLOAD_ENGINE
        .decode(payload)
        .map_err(|e| UploadError::MalformedPayload(format!("Invalid base64 image data: {e}")))?;

    Ok(DecodedImage {
        image_type,
        bytes: Bytes::from(bytes),
    })
}
