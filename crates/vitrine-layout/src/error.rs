use thiserror::Error;

/// Errors raised while decoding layouts and their side-channel data.
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Failed to parse layout JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Layout document must be a JSON object")]
    NotAnObject,

    #[error("Layout document has no root node")]
    MissingRoot,

    #[error("Logo bytes are not valid base64: {0}")]
    LogoEncoding(#[from] base64::DecodeError),

    #[error("No layout found in {frames} frame(s)")]
    NoLayout { frames: usize },
}
