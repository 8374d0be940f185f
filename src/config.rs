// Runtime configuration: listener settings and provider credentials.
// Parsed once at startup from command line arguments and environment variables,
// then injected into the upload service. Nothing reads the environment after that.

use clap::Parser;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024 * 1024; // 64MB

/// Command line arguments for imagebed-relay
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct AppConfig {
    /// Hostname/IP to bind the server to.
    /// If this option is specified without value, it will default to "*", meaning the server will listen on all interfaces.
    #[arg(long, env = "IMAGEBED_HOST", default_value = "localhost", num_args = 0..=1, default_missing_value = "*")]
    pub host: String,

    /// Port number to listen on.
    #[arg(short, long, env = "IMAGEBED_PORT", default_value_t = 8787)]
    pub port: u16,

    /// Maximum accepted request body size in bytes.
    #[arg(long, env = "IMAGEBED_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,

    /// Timeout for a single call to an image hosting provider, in seconds.
    #[arg(long, env = "IMAGEBED_UPSTREAM_TIMEOUT_SECS", default_value_t = 60)]
    pub upstream_timeout_secs: u64,

    /// Cloudinary cloud name.
    #[arg(long, env = "CLOUDINARY_CLOUD_NAME", hide_env_values = true)]
    pub cloudinary_cloud_name: Option<String>,

    /// Cloudinary API key.
    #[arg(long, env = "CLOUDINARY_API_KEY", hide_env_values = true)]
    pub cloudinary_api_key: Option<String>,

    /// Cloudinary API secret.
    #[arg(long, env = "CLOUDINARY_API_SECRET", hide_env_values = true)]
    pub cloudinary_api_secret: Option<String>,

    /// ImgBB API key.
    #[arg(long, env = "IMGBB_API_KEY", hide_env_values = true)]
    pub imgbb_api_key: Option<String>,
}

impl AppConfig {
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            cloudinary: CloudinaryCredentials::from_parts(
                self.cloudinary_cloud_name.as_deref(),
                self.cloudinary_api_key.as_deref(),
                self.cloudinary_api_secret.as_deref(),
            ),
            imgbb: ImgbbCredentials::from_key(self.imgbb_api_key.as_deref()),
        }
    }
}

/// Provider credentials. A backend whose credentials are `None` is treated as not configured.
#[derive(Clone, Debug, Default)]
pub struct Credentials {
    pub cloudinary: Option<CloudinaryCredentials>,
    pub imgbb: Option<ImgbbCredentials>,
}

#[derive(Clone)]
pub struct CloudinaryCredentials {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

impl CloudinaryCredentials {
    /// All three values must be present and non-empty.
    pub fn from_parts(
        cloud_name: Option<&str>,
        api_key: Option<&str>,
        api_secret: Option<&str>,
    ) -> Option<Self> {
        Some(Self {
            cloud_name: non_empty(cloud_name)?,
            api_key: non_empty(api_key)?,
            api_secret: non_empty(api_secret)?,
        })
    }
}

impl fmt::Debug for CloudinaryCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudinaryCredentials")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &"<redacted>")
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Clone)]
pub struct ImgbbCredentials {
    pub api_key: String,
}

impl ImgbbCredentials {
    pub fn from_key(api_key: Option<&str>) -> Option<Self> {
        Some(Self {
            api_key: non_empty(api_key)?,
        })
    }
}

impl fmt::Debug for ImgbbCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImgbbCredentials")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
