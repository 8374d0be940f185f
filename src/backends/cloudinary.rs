// Cloudinary signed upload.
// https://cloudinary.com/documentation/upload_images#generating_authentication_signatures

use crate::{
    config::CloudinaryCredentials,
    error::UploadError,
    models::{ProviderErrorBody, UploadResult, deserialize_dimension},
    signature,
    transport::{FormField, Transport},
};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::debug;

pub const UPLOAD_FOLDER: &str = "imagebed";

pub fn upload_url(cloud_name: &str) -> String {
    format!("https://api.cloudinary.com/v1_1/{cloud_name}/image/upload")
}

/// Fields of the signed upload form. `image` is passed through untouched:
/// Cloudinary accepts data URLs in the `file` field.
pub fn build_form(
    credentials: &CloudinaryCredentials,
    image: &str,
    timestamp: i64,
) -> Vec<FormField> {
    let params = BTreeMap::from([
        ("folder", UPLOAD_FOLDER.to_string()),
        ("timestamp", timestamp.to_string()),
    ]);
    let signature = signature::sign(&params, &credentials.api_secret);

    vec![
        FormField::new("file", image),
        FormField::new("api_key", credentials.api_key.as_str()),
        FormField::new("timestamp", timestamp.to_string()),
        FormField::new("folder", UPLOAD_FOLDER),
        FormField::new("signature", signature),
    ]
}

#[derive(Deserialize, Debug)]
struct ErrorReply {
    #[serde(default)]
    error: Option<ProviderErrorBody>,
}

#[derive(Deserialize, Debug)]
struct Asset {
    public_id: String,
    secure_url: String,
    #[serde(deserialize_with = "deserialize_dimension")]
    width: u32,
    #[serde(deserialize_with = "deserialize_dimension")]
    height: u32,
}

pub fn parse_reply(reply: serde_json::Value) -> Result<UploadResult, UploadError> {
    let ErrorReply { error } = ErrorReply::deserialize(&reply)?;
    if let Some(error) = error {
        return Err(UploadError::Provider(
            error
                .message
                .unwrap_or_else(|| "Cloudinary upload failed".to_string()),
        ));
    }

    let asset = Asset::deserialize(&reply)
        .map_err(|e| UploadError::MalformedResponse(format!("Cloudinary reply: {}", e)))?;

    Ok(UploadResult {
        id: asset.public_id,
        link: asset.secure_url,
        width: asset.width,
        height: asset.height,
        delete_url: None,
    })
}

pub async fn upload(
    transport: &dyn Transport,
    credentials: &CloudinaryCredentials,
    image: &str,
) -> Result<UploadResult, UploadError> {
    let timestamp = chrono::Utc::now().timestamp();
    let url = upload_url(&credentials.cloud_name);
    debug!("Uploading {} bytes to Cloudinary", image.len());

    let reply = transport
        .post_form(&url, build_form(credentials, image, timestamp))
        .await?;
    parse_reply(reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::StubTransport;
    use serde_json::json;

    fn credentials() -> CloudinaryCredentials {
        CloudinaryCredentials {
            cloud_name: "demo".into(),
            api_key: "123456".into(),
            api_secret: "s3cr3t".into(),
        }
    }

    #[test]
    fn test_build_form_fields() {
        let fields = build_form(&credentials(), "data:image/png;base64,AAAA", 1_700_000_000);
        let names: Vec<_> = fields.iter().map(|f| f.name).collect();
        assert_eq!(names, ["file", "api_key", "timestamp", "folder", "signature"]);

        assert_eq!(fields[0].value, "data:image/png;base64,AAAA");
        assert_eq!(fields[1].value, "123456");
        assert_eq!(fields[2].value, "1700000000");
        assert_eq!(fields[3].value, "imagebed");

        let params = BTreeMap::from([
            ("folder", "imagebed".to_string()),
            ("timestamp", "1700000000".to_string()),
        ]);
        assert_eq!(fields[4].value, signature::sign(&params, "s3cr3t"));
    }

    #[test]
    fn test_parse_reply_success() {
        let result = parse_reply(json!({
            "asset_id": "f0c1",
            "public_id": "imagebed/abc123",
            "secure_url": "https://res.cloudinary.com/demo/image/upload/v1/imagebed/abc123.png",
            "width": 800,
            "height": 600,
            "format": "png"
        }))
        .unwrap();

        assert_eq!(result.id, "imagebed/abc123");
        assert_eq!(
            result.link,
            "https://res.cloudinary.com/demo/image/upload/v1/imagebed/abc123.png"
        );
        assert_eq!((result.width, result.height), (800, 600));
        assert_eq!(result.delete_url, None);
    }

    #[test]
    fn test_parse_reply_provider_error() {
        let err = parse_reply(json!({ "error": { "message": "Invalid Signature abc" } }))
            .unwrap_err();
        assert!(matches!(err, UploadError::Provider(ref m) if m == "Invalid Signature abc"));
    }

    #[test]
    fn test_parse_reply_string_error() {
        let err = parse_reply(json!({ "error": "Invalid cloud_name demo" })).unwrap_err();
        assert!(matches!(err, UploadError::Provider(ref m) if m == "Invalid cloud_name demo"));
    }

    #[test]
    fn test_parse_reply_missing_fields() {
        let err = parse_reply(json!({ "public_id": "x" })).unwrap_err();
        assert!(matches!(err, UploadError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_upload_posts_to_cloud_endpoint() {
        let transport = StubTransport::replying(json!({
            "public_id": "imagebed/xyz",
            "secure_url": "https://res.cloudinary.com/demo/image/upload/imagebed/xyz.jpg",
            "width": 10,
            "height": 20
        }));

        let result = upload(&transport, &credentials(), "QUJD").await.unwrap();
        assert_eq!(result.id, "imagebed/xyz");

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].url,
            "https://api.cloudinary.com/v1_1/demo/image/upload"
        );
        assert_eq!(calls[0].field("file"), Some("QUJD"));
        assert_eq!(calls[0].field("folder"), Some("imagebed"));
        assert_eq!(calls[0].field("signature").map(str::len), Some(40));
    }
}
