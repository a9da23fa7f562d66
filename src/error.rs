use thiserror::Error;

/// Rules a candidate file can break before any work starts. The display
/// strings double as the messages shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Unsupported file format. Please use a JPG or PNG image.")]
    UnsupportedFormat,
    #[error("The image is too large. The maximum size is 5 MB.")]
    TooLarge,
    #[error("Could not read the selected file. Please try another image.")]
    Unreadable,
}

/// Failures while writing the original to the object store. Shown to the
/// user as a single generic message; the detail only goes to the log.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("storage request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("storage rejected the upload ({code}): {body}")]
    Rejected { code: u16, body: String },
}

/// Failures while asking the remote service for an upscale.
#[derive(Debug, Error)]
pub enum UpscaleError {
    #[error("upscale request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("upscale response was not valid JSON: {0}")]
    MalformedResponse(#[from] serde_json::Error),
    #[error("upscale response did not include a result image")]
    MissingResultUrl,
}
