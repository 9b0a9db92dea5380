use thiserror::Error;

/// Errors that abort a single extraction request.
///
/// Normalization and correction never fail; an image that yields no text
/// degrades to a `no_text_detected` result instead of an error.
#[derive(Error, Debug)]
pub enum OcrError {
    #[error("failed to decode image: {0}")]
    ImageDecode(String),

    #[error("recognition engine failed: {0}")]
    Recognition(String),

    #[error("invalid configuration: {0}")]
    Configuration(String),
}
