// Web server module
// Handles the HTTP surface: upload endpoints, CORS, the upload page and error envelopes

mod app;
mod error;
mod handlers;
mod listeners;
mod models;

pub use app::create_app;
pub use listeners::create_listener;

use crate::uploader::Uploader;
use std::sync::Arc;

// Maximum number of images accepted by one batch request
pub const MAX_BATCH_SIZE: usize = 10;

pub type SharedUploader = Arc<Uploader>;
