use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;

/// Opaque reference to an image shown next to a question or option.
///
/// The bytes are never inspected; the handle is threaded from extraction (or
/// upload) to storage, where it becomes a [`ImageHandle::Url`].
#[derive(Debug, Clone, PartialEq)]
pub enum ImageHandle {
    Embedded(EmbeddedImage),
    Url(String),
}

#[derive(Clone, PartialEq)]
pub struct EmbeddedImage {
    pub name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl fmt::Debug for EmbeddedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddedImage")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("bytes", &self.data.len())
            .finish()
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ImageHandleError {
    #[error("malformed data url")]
    MalformedDataUrl,
    #[error("data url payload is not base64: {0}")]
    InvalidBase64(String),
    #[error("empty image payload")]
    Empty,
}

impl ImageHandle {
    pub fn embedded(name: impl Into<String>, data: Bytes) -> Self {
        let name = name.into();
        let content_type = content_type_for(&name).to_string();
        Self::Embedded(EmbeddedImage {
            name,
            content_type,
            data,
        })
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self, Self::Embedded(_))
    }

    /// Wire form: the stored URL, or a base64 `data:` URL for bytes not yet stored.
    pub fn to_wire(&self) -> String {
        match self {
            Self::Url(url) => url.clone(),
            Self::Embedded(image) => format!(
                "data:{};base64,{}",
                image.content_type,
                STANDARD.encode(&image.data)
            ),
        }
    }

    pub fn from_wire(value: &str) -> Result<Self, ImageHandleError> {
        let Some(rest) = value.strip_prefix("data:") else {
            return Ok(Self::Url(value.to_string()));
        };

        let (meta, payload) = rest
            .split_once(',')
            .ok_or(ImageHandleError::MalformedDataUrl)?;
        let content_type = meta
            .strip_suffix(";base64")
            .ok_or(ImageHandleError::MalformedDataUrl)?;
        let data = STANDARD
            .decode(payload.trim())
            .map_err(|e| ImageHandleError::InvalidBase64(e.to_string()))?;
        if data.is_empty() {
            return Err(ImageHandleError::Empty);
        }

        let content_type = if content_type.is_empty() {
            "application/octet-stream"
        } else {
            content_type
        };

        Ok(Self::Embedded(EmbeddedImage {
            name: format!("upload.{}", extension_for(content_type)),
            content_type: content_type.to_string(),
            data: Bytes::from(data),
        }))
    }
}

pub fn content_type_for(name: &str) -> &'static str {
    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" | "jpe" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "emf" => "image/x-emf",
        "wmf" => "image/x-wmf",
        _ => "application/octet-stream",
    }
}

pub fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "image/gif" => "gif",
        "image/bmp" => "bmp",
        "image/tiff" => "tiff",
        "image/svg+xml" => "svg",
        "image/webp" => "webp",
        "image/x-emf" => "emf",
        "image/x-wmf" => "wmf",
        _ => "bin",
    }
}
