//! Cloudinary signed-upload signature.
//!
//! ```text
//! sha1_hex( sorted "k=v" pairs joined by '&' ++ api_secret )
//! ```
//!
//! The provider recomputes this value server side, so the canonical form must
//! match byte for byte or the upload is rejected.

use sha1::{Digest, Sha1};
use std::collections::BTreeMap;

/// Build the canonical parameter string: keys in byte order, `k=v` joined with `&`.
pub fn canonical_string(params: &BTreeMap<&str, String>) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Sign `params` with `api_secret`, returning 40 lowercase hex characters.
pub fn sign(params: &BTreeMap<&str, String>, api_secret: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(canonical_string(params).as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}
