// Errors produced while relaying an image to a hosting provider.

use crate::backends::Backend;

#[derive(thiserror::Error, Debug)]
pub enum UploadError {
    // The selected backend has no credentials; no upstream call was made.
    #[error("{}", .0.not_configured_message())]
    NotConfigured(Backend),

    // The provider rejected the upload. The message is the provider's own.
    #[error("{0}")]
    Provider(String),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("Invalid JSON from image host: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Unexpected response from image host: {0}")]
    MalformedResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_configured_messages() {
        assert_eq!(
            UploadError::NotConfigured(Backend::Cloudinary).to_string(),
            "Cloudinary credentials not configured"
        );
        assert_eq!(
            UploadError::NotConfigured(Backend::Imgbb).to_string(),
            "ImgBB API key not configured"
        );
    }

    #[test]
    fn test_provider_message_is_verbatim() {
        assert_eq!(
            UploadError::Provider("Invalid API key".into()).to_string(),
            "Invalid API key"
        );
    }
}
