// ImgBB upload API.
// https://api.imgbb.com/

use crate::{
    config::ImgbbCredentials,
    error::UploadError,
    models::{ProviderErrorBody, UploadResult, deserialize_dimension},
    transport::{FormField, Transport},
};
use serde::Deserialize;
use tracing::debug;

pub const UPLOAD_URL: &str = "https://api.imgbb.com/1/upload";

/// Remove a leading `data:image/<subtype>;base64,` prefix, leaving raw base64.
/// Anything else is returned as-is.
pub fn strip_data_url_prefix(image: &str) -> &str {
    let Some(rest) = image.strip_prefix("data:image/") else {
        return image;
    };
    let Some((subtype, payload)) = rest.split_once(";base64,") else {
        return image;
    };
    let is_word = |c: char| c.is_ascii_alphanumeric() || c == '_';
    if !subtype.is_empty() && subtype.chars().all(is_word) {
        payload
    } else {
        image
    }
}

pub fn build_form(credentials: &ImgbbCredentials, image: &str) -> Vec<FormField> {
    vec![
        FormField::new("key", credentials.api_key.as_str()),
        FormField::new("image", strip_data_url_prefix(image)),
    ]
}

#[derive(Deserialize, Debug)]
struct UploadReply {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<ProviderErrorBody>,
}

#[derive(Deserialize, Debug)]
struct ImageData {
    id: String,
    url: String,
    #[serde(deserialize_with = "deserialize_dimension")]
    width: u32,
    #[serde(deserialize_with = "deserialize_dimension")]
    height: u32,
    #[serde(default)]
    delete_url: Option<String>,
}

pub fn parse_reply(reply: serde_json::Value) -> Result<UploadResult, UploadError> {
    let reply: UploadReply = serde_json::from_value(reply)?;

    if !reply.success {
        let message = reply
            .error
            .and_then(|e| e.message)
            .unwrap_or_else(|| "ImgBB upload failed".to_string());
        return Err(UploadError::Provider(message));
    }

    let data = reply
        .data
        .ok_or_else(|| UploadError::MalformedResponse("ImgBB reply has no data".to_string()))?;
    let image: ImageData = serde_json::from_value(data)
        .map_err(|e| UploadError::MalformedResponse(format!("ImgBB reply: {}", e)))?;

    Ok(UploadResult {
        id: image.id,
        link: image.url,
        width: image.width,
        height: image.height,
        delete_url: image.delete_url,
    })
}

pub async fn upload(
    transport: &dyn Transport,
    credentials: &ImgbbCredentials,
    image: &str,
) -> Result<UploadResult, UploadError> {
    debug!("Uploading {} bytes to ImgBB", image.len());
    let reply = transport
        .post_form(UPLOAD_URL, build_form(credentials, image))
        .await?;
    parse_reply(reply)
}
