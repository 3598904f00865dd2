use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::error::RecipesServiceError;

/// Decoded image upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub extension: &'static str,
    pub bytes: Vec<u8>,
}

impl ImagePayload {
    /// Parse `data:image/<png|jpeg|gif|webp>;base64,<data>`.
    ///
    /// A blank payload is `MissingImage`; anything else that does not decode is `InvalidImage`.
    pub fn from_data_uri(raw: &str) -> Result<Self, RecipesServiceError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(RecipesServiceError::MissingImage);
        }
        let (header, data) = raw
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(','))
            .ok_or(RecipesServiceError::InvalidImage)?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or(RecipesServiceError::InvalidImage)?;
        let extension = match mime {
            "image/png" => "png",
            "image/jpeg" | "image/jpg" => "jpg",
            "image/gif" => "gif",
            "image/webp" => "webp",
            _ => return Err(RecipesServiceError::InvalidImage),
        };
        let bytes = STANDARD
            .decode(data.trim())
            .map_err(|_| RecipesServiceError::InvalidImage)?;
        if bytes.is_empty() {
            return Err(RecipesServiceError::InvalidImage);
        }
        Ok(Self { extension, bytes })
    }
}
