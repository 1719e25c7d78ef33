//! Upload/delete client for the hosted media store
//!
//! The client never lets a transport or API failure escape its boundary: a
//! failed upload maps to `None` (the caller treats it as "this file did not
//! upload") and every delete path resolves to a plain boolean.

use std::env;
use std::path::Path;

use async_trait::async_trait;
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

use super::is_demo_public_id;
use crate::state::data::ImageRecord;

/// The remote media boundary, as the gallery core sees it.
///
/// Implemented by [`MediaClient`] for the real API and by in-memory fakes in
/// tests. Futures are not required to be `Send`; the whole gallery core runs
/// on a single logical task.
#[async_trait(?Send)]
pub trait RemoteMedia {
    /// Upload one file. `None` means the file did not upload; the cause has
    /// already been logged.
    async fn upload(&self, file: &Path) -> Option<ImageRecord>;

    /// Delete one item by its remote public id. Demo identifiers succeed
    /// without a network call; "not found remotely" counts as success.
    async fn delete(&self, public_id: &str) -> bool;
}

/// Connection settings for the remote media store
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Account name, part of the upload URL
    pub cloud_name: String,
    /// Fixed unsigned-upload preset sent with every upload
    pub upload_preset: String,
    /// Full URL of the delete proxy endpoint
    pub delete_endpoint: String,
}

impl MediaConfig {
    /// Read the configuration from the environment.
    ///
    /// Expects `CLOUDINARY_CLOUD_NAME`, `CLOUDINARY_UPLOAD_PRESET`, and
    /// `CLOUDINARY_DELETE_URL`. Returns `None` (logged) if any is missing.
    pub fn from_env() -> Option<Self> {
        let cloud_name = env::var("CLOUDINARY_CLOUD_NAME").ok()?;
        let upload_preset = env::var("CLOUDINARY_UPLOAD_PRESET").ok()?;
        let delete_endpoint = match env::var("CLOUDINARY_DELETE_URL") {
            Ok(url) => url,
            Err(_) => {
                warn!("CLOUDINARY_DELETE_URL not set, remote deletes will fail");
                String::new()
            }
        };

        Some(MediaConfig {
            cloud_name,
            upload_preset,
            delete_endpoint,
        })
    }
}

/// HTTP client for the media store's upload endpoint and the delete proxy
pub struct MediaClient {
    http: reqwest::Client,
    config: MediaConfig,
}

/// Fields the upload endpoint returns that we map onto an [`ImageRecord`]
#[derive(Debug, Deserialize)]
struct UploadApiResponse {
    public_id: String,
    secure_url: String,
    width: u32,
    height: u32,
    #[serde(default)]
    original_filename: Option<String>,
    created_at: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteRequest<'a> {
    public_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct DeleteResponse {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

impl MediaClient {
    pub fn new(config: MediaConfig) -> Self {
        MediaClient {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn upload_url(&self) -> String {
        format!(
            "https://api.cloudinary.com/v1_1/{}/image/upload",
            self.config.cloud_name
        )
    }

    async fn try_upload(&self, file: &Path) -> Result<ImageRecord, String> {
        let bytes = tokio::fs::read(file)
            .await
            .map_err(|e| format!("failed to read {}: {}", file.display(), e))?;

        let filename = file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload".to_string());

        let form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(bytes).file_name(filename.clone()),
            )
            .text("upload_preset", self.config.upload_preset.clone());

        let response = self
            .http
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| format!("upload request failed: {}", e))?
            .error_for_status()
            .map_err(|e| format!("upload rejected: {}", e))?;

        let body: UploadApiResponse = response
            .json()
            .await
            .map_err(|e| format!("unreadable upload response: {}", e))?;

        debug!(
            "Uploaded {} -> {} ({}x{})",
            filename, body.public_id, body.width, body.height
        );

        Ok(ImageRecord {
            id: body.public_id.clone(),
            url: body.secure_url,
            title: body.original_filename.unwrap_or(filename),
            tags: None,
            created_at: body.created_at,
            date: None,
            public_id: body.public_id,
            width: body.width,
            height: body.height,
            seed: false,
        })
    }

    async fn try_delete(&self, public_id: &str) -> Result<bool, String> {
        let response = self
            .http
            .delete(&self.config.delete_endpoint)
            .json(&DeleteRequest { public_id })
            .send()
            .await
            .map_err(|e| format!("delete request failed: {}", e))?;

        // Error statuses still carry a JSON body with the success flag, so
        // the body is parsed regardless of the status code.
        let body: DeleteResponse = response
            .json()
            .await
            .map_err(|e| format!("unreadable delete response: {}", e))?;

        if !body.success {
            warn!(
                "Remote delete of {} reported failure: {}",
                public_id,
                body.error.as_deref().unwrap_or("no error detail")
            );
        }

        Ok(body.success)
    }
}

#[async_trait(?Send)]
impl RemoteMedia for MediaClient {
    async fn upload(&self, file: &Path) -> Option<ImageRecord> {
        match self.try_upload(file).await {
            Ok(record) => Some(record),
            Err(e) => {
                error!("Upload failed for {}: {}", file.display(), e);
                None
            }
        }
    }

    async fn delete(&self, public_id: &str) -> bool {
        if is_demo_public_id(public_id) {
            info!(
                "Demo image {} detected, simulating successful deletion",
                public_id
            );
            return true;
        }

        match self.try_delete(public_id).await {
            Ok(success) => success,
            Err(e) => {
                error!("Delete of {} failed: {}", public_id, e);
                false
            }
        }
    }
}
