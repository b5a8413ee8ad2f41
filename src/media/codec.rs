use std::{fmt, path::PathBuf};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::ImageFormat;
use tracing::debug;

use crate::studio::error::DecodeError;

const FALLBACK_MIME: &str = "image/jpeg";
const UNKNOWN_MIME: &str = "application/octet-stream";

/// Self-describing image: `data:<mime>;base64,<payload>`.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageHandle(String);

impl ImageHandle {
    pub fn new(data_url: impl Into<String>) -> Self {
        Self(data_url.into())
    }

    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Self {
        Self(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
    }

    /// Wraps a bare base64 payload returned by the model.
    pub fn png_from_payload(payload: &str) -> Self {
        Self(format!("data:image/png;base64,{payload}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn mime_type(&self) -> &str {
        mime_type_of(&self.0)
    }

    pub fn payload(&self) -> &str {
        raw_payload_of(&self.0)
    }

    pub fn decode(&self) -> Result<Vec<u8>, DecodeError> {
        Ok(STANDARD.decode(self.payload().trim())?)
    }
}

impl fmt::Display for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Handles are megabytes of base64; keep logs readable.
impl fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ImageHandle({}, {} bytes)",
            self.mime_type(),
            self.payload().len()
        )
    }
}

/// A file the user picked, with the content type its name declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub content_type: Option<String>,
}

impl SelectedFile {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let content_type = ImageFormat::from_path(&path)
            .ok()
            .map(|format| format.to_mime_type().to_string());

        Self { path, content_type }
    }

    /// Accepts what a terminal hands over on paste or drop: quoted paths,
    /// `file://` URLs and backslash-escaped spaces.
    pub fn from_input(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let unquoted = trimmed
            .strip_prefix('\'')
            .and_then(|s| s.strip_suffix('\''))
            .or_else(|| trimmed.strip_prefix('"').and_then(|s| s.strip_suffix('"')))
            .unwrap_or(trimmed);
        let without_scheme = unquoted.strip_prefix("file://").unwrap_or(unquoted);
        let path = without_scheme.replace("\\ ", " ");

        if path.is_empty() {
            return None;
        }

        Some(Self::from_path(path))
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

pub fn is_image(file: &SelectedFile) -> bool {
    file.content_type
        .as_deref()
        .is_some_and(|t| t.starts_with("image/"))
}

pub async fn encode_file_as_image(file: &SelectedFile) -> Result<ImageHandle, DecodeError> {
    let bytes = tokio::fs::read(&file.path)
        .await
        .map_err(|source| DecodeError::Read {
            path: file.path.display().to_string(),
            source,
        })?;

    let mime = match &file.content_type {
        Some(declared) => declared.clone(),
        None => sniff_mime(&bytes),
    };

    debug!(
        "Encoded {} ({} bytes) as {}",
        file.path.display(),
        bytes.len(),
        mime
    );

    Ok(ImageHandle::from_bytes(&mime, &bytes))
}

fn sniff_mime(bytes: &[u8]) -> String {
    image::guess_format(bytes)
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|_| UNKNOWN_MIME.to_string())
}

/// MIME type from a data-URL prefix, or `image/jpeg` when there isn't one.
pub fn mime_type_of(data_url: &str) -> &str {
    data_url
        .strip_prefix("data:")
        .and_then(|rest| rest.find(";base64,").map(|end| &rest[..end]))
        .filter(|mime| !mime.is_empty())
        .unwrap_or(FALLBACK_MIME)
}

/// Everything after the first comma; the input itself if there is none.
pub fn raw_payload_of(data_url: &str) -> &str {
    match data_url.split_once(',') {
        Some((_, payload)) => payload,
        None => data_url,
    }
}
