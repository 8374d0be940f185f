// Image hosting providers.
// Each provider lives in its own module and exposes an `upload` function that turns an
// image payload into a normalized `UploadResult`. Adding a provider means adding a
// variant here, a module next to this one, and an arm in `Uploader::upload`.

pub mod cloudinary;
pub mod imgbb;

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Backend {
    #[default]
    Cloudinary,
    Imgbb,
}

impl Backend {
    pub const ALL: [Backend; 2] = [Backend::Cloudinary, Backend::Imgbb];

    /// Name used on the wire (`"backend": "imgbb"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Cloudinary => "cloudinary",
            Backend::Imgbb => "imgbb",
        }
    }

    pub fn not_configured_message(&self) -> &'static str {
        match self {
            Backend::Cloudinary => "Cloudinary credentials not configured",
            Backend::Imgbb => "ImgBB API key not configured",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBackend(pub String);

impl fmt::Display for UnknownBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown backend '{}'", self.0)
    }
}

impl FromStr for Backend {
    type Err = UnknownBackend;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Backend::ALL
            .into_iter()
            .find(|backend| backend.as_str() == s)
            .ok_or_else(|| UnknownBackend(s.to_string()))
    }
}
