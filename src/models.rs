// Provider-agnostic data shared between the backend adapters and the web layer.

use serde::{Deserialize, Serialize};

/// Normalized upload result returned to the client regardless of backend.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    pub id: String,
    pub link: String,
    pub width: u32,
    pub height: u32,
    // Only ImgBB issues deletion URLs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_url: Option<String>,
}

/// Provider error body. Usually `{"error": {"message": "..."}}`, occasionally a bare
/// string (`{"error": "..."}`); both carry the message.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(from = "ProviderErrorRepr")]
pub struct ProviderErrorBody {
    pub message: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ProviderErrorRepr {
    Text(String),
    Object {
        #[serde(default)]
        message: Option<String>,
    },
}

impl From<ProviderErrorRepr> for ProviderErrorBody {
    fn from(repr: ProviderErrorRepr) -> Self {
        match repr {
            ProviderErrorRepr::Text(message) => Self {
                message: Some(message),
            },
            ProviderErrorRepr::Object { message } => Self { message },
        }
    }
}

// Custom deserializer for image dimensions.
// ImgBB reports width/height as strings ("800"), Cloudinary as numbers.
pub fn deserialize_dimension<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Dimension {
        Number(u32),
        Text(String),
    }

    match Dimension::deserialize(deserializer)? {
        Dimension::Number(n) => Ok(n),
        Dimension::Text(s) => s.trim().parse().map_err(|_| {
            serde::de::Error::invalid_value(
                serde::de::Unexpected::Str(&s),
                &"a non-negative integer or numeric string",
            )
        }),
    }
}
