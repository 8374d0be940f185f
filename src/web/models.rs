// API-specific data models for the web server

use crate::{backends::Backend, error::UploadError, models::UploadResult};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Body of `POST /upload`: either `image` or `images`, plus an optional `backend`.
#[derive(Deserialize, Debug, Default)]
pub struct UploadRequest {
    #[serde(default)]
    pub image: Option<String>,
    // `None` unless `images` is an array; anything else falls through to the single path.
    #[serde(default, deserialize_with = "deserialize_batch_images")]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub backend: Option<String>,
}

impl UploadRequest {
    /// Only an exact backend name selects that backend. Absent, empty or
    /// unrecognized names go to the default backend.
    pub fn backend(&self) -> Backend {
        match self.backend.as_deref() {
            None | Some("") => Backend::default(),
            Some(name) => name.parse().unwrap_or_else(|err| {
                warn!("{}, using {}", err, Backend::default());
                Backend::default()
            }),
        }
    }
}

fn deserialize_batch_images<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Array(items) => {
            serde_json::from_value(serde_json::Value::Array(items))
                .map(Some)
                .map_err(serde::de::Error::custom)
        }
        _ => Ok(None),
    }
}

/// Response envelope shared by every JSON response. Unset fields are omitted.
#[derive(Serialize, Debug, Default)]
pub struct UploadResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<UploadResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<BatchItemResult>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UploadResponse {
    pub fn single(result: UploadResult) -> Self {
        Self {
            success: true,
            data: Some(result),
            ..Default::default()
        }
    }

    pub fn batch(results: Vec<BatchItemResult>) -> Self {
        Self {
            success: true,
            batch: Some(true),
            results: Some(results),
            ..Default::default()
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }
}

/// Outcome of one image within a batch
#[derive(Serialize, Debug)]
pub struct BatchItemResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<UploadResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<UploadResult, UploadError>> for BatchItemResult {
    fn from(result: Result<UploadResult, UploadError>) -> Self {
        match result {
            Ok(data) => Self {
                success: true,
                data: Some(data),
                error: None,
            },
            Err(err) => Self {
                success: false,
                data: None,
                error: Some(err.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_backend_defaults() {
        let request: UploadRequest = serde_json::from_value(json!({ "image": "x" })).unwrap();
        assert_eq!(request.backend(), Backend::Cloudinary);

        let request: UploadRequest =
            serde_json::from_value(json!({ "image": "x", "backend": "" })).unwrap();
        assert_eq!(request.backend(), Backend::Cloudinary);

        let request: UploadRequest =
            serde_json::from_value(json!({ "images": [], "backend": "imgbb" })).unwrap();
        assert_eq!(request.backend(), Backend::Imgbb);
    }

    #[test]
    fn test_unrecognized_backend_falls_back_to_cloudinary() {
        for name in ["IMGBB", "flickr", "ImgBB "] {
            let request: UploadRequest =
                serde_json::from_value(json!({ "image": "x", "backend": name })).unwrap();
            assert_eq!(request.backend(), Backend::Cloudinary);
        }
    }

    #[test]
    fn test_non_array_images_is_ignored() {
        let request: UploadRequest =
            serde_json::from_value(json!({ "image": "cat", "images": "cat" })).unwrap();
        assert_eq!(request.images, None);
        assert_eq!(request.image.as_deref(), Some("cat"));

        let request: UploadRequest =
            serde_json::from_value(json!({ "images": null })).unwrap();
        assert_eq!(request.images, None);

        let request: UploadRequest =
            serde_json::from_value(json!({ "images": ["a", "b"] })).unwrap();
        assert_eq!(request.images, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn test_array_with_non_string_item_is_rejected() {
        assert!(serde_json::from_value::<UploadRequest>(json!({ "images": ["a", 1] })).is_err());
    }

    #[test]
    fn test_batch_envelope_shape() {
        let results = vec![
            BatchItemResult::from(Ok(UploadResult {
                id: "a".into(),
                link: "https://example.com/a".into(),
                width: 1,
                height: 1,
                delete_url: None,
            })),
            BatchItemResult::from(Err(UploadError::Provider("quota exceeded".into()))),
        ];
        let value = serde_json::to_value(UploadResponse::batch(results)).unwrap();
        assert_eq!(
            value,
            json!({
                "success": true,
                "batch": true,
                "results": [
                    { "success": true, "data": { "id": "a", "link": "https://example.com/a", "width": 1, "height": 1 } },
                    { "success": false, "error": "quota exceeded" }
                ]
            })
        );
    }
}
