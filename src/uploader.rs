// The single-upload procedure shared by the single and batch endpoints.
// Credentials are checked before any adapter runs, so an unconfigured backend
// never produces an outbound request.

use crate::{
    backends::{Backend, cloudinary, imgbb},
    config::Credentials,
    error::UploadError,
    models::UploadResult,
    transport::Transport,
};
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub struct Uploader {
    transport: Arc<dyn Transport>,
    credentials: Arc<Credentials>,
}

impl Uploader {
    pub fn new(transport: Arc<dyn Transport>, credentials: Credentials) -> Self {
        Self {
            transport,
            credentials: Arc::new(credentials),
        }
    }

    pub fn is_configured(&self, backend: Backend) -> bool {
        match backend {
            Backend::Cloudinary => self.credentials.cloudinary.is_some(),
            Backend::Imgbb => self.credentials.imgbb.is_some(),
        }
    }

    pub async fn upload(&self, image: &str, backend: Backend) -> Result<UploadResult, UploadError> {
        let transport = self.transport.as_ref();
        match backend {
            Backend::Cloudinary => {
                let credentials = self
                    .credentials
                    .cloudinary
                    .as_ref()
                    .ok_or(UploadError::NotConfigured(backend))?;
                cloudinary::upload(transport, credentials, image).await
            }
            Backend::Imgbb => {
                let credentials = self
                    .credentials
                    .imgbb
                    .as_ref()
                    .ok_or(UploadError::NotConfigured(backend))?;
                imgbb::upload(transport, credentials, image).await
            }
        }
    }

    /// Upload each image in order. A failed item never stops the ones after it.
    pub async fn upload_batch(
        &self,
        images: &[String],
        backend: Backend,
    ) -> Vec<Result<UploadResult, UploadError>> {
        let mut results = Vec::with_capacity(images.len());
        for (index, image) in images.iter().enumerate() {
            let result = self.upload(image, backend).await;
            if let Err(err) = &result {
                warn!("Batch item {} failed on {}: {}", index, backend, err);
            }
            results.push(result);
        }
        results
    }
}
