use thiserror::Error;

/// A selected file could not be turned into an image handle.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Image payload is not valid base64: {0}")]
    Payload(#[from] base64::DecodeError),

    #[error("Image bytes could not be decoded: {0}")]
    Image(#[from] image::ImageError),
}

/// Detailed client failures. Logged, never shown to the user as-is.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("No API key configured")]
    MissingApiKey,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error: HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Malformed response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No response text from model")]
    EmptyText,

    #[error("Response contained no candidates")]
    NoCandidates,

    #[error("No image generated by the model; it may have returned text instead of an image")]
    NoImagePart,
}

/// The only failure the composite call reports to its consumer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("composite generation failed")]
pub struct GenerationFailed;

impl From<ClientError> for GenerationFailed {
    fn from(_: ClientError) -> Self {
        GenerationFailed
    }
}
