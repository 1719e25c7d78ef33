//! Sequential batch uploads with aggregate progress
//!
//! One upload is in flight at a time, in input order. A single file failing
//! never aborts the batch; the caller gets every record that did succeed and
//! a single aggregate error only when a non-empty batch produced nothing.

use std::path::PathBuf;

use log::{info, warn};

use super::client::RemoteMedia;
use crate::state::data::ImageRecord;

/// Progress ceiling while the batch is still running. The reported percentage
/// climbs toward this value as files complete and only snaps to 100 once the
/// whole batch is done.
const PROGRESS_CEILING: f32 = 95.0;

/// Turns a batch of local files into uploaded [`ImageRecord`]s
pub struct BatchUploader<R: RemoteMedia> {
    remote: R,
    uploading: bool,
    progress: f32,
    last_error: Option<String>,
}

impl<R: RemoteMedia> BatchUploader<R> {
    pub fn new(remote: R) -> Self {
        BatchUploader {
            remote,
            uploading: false,
            progress: 0.0,
            last_error: None,
        }
    }

    /// True while a batch is running
    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    /// Progress of the current (or last) batch, 0–100, non-decreasing within
    /// a batch
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Aggregate failure from the last batch, set only when a non-empty batch
    /// yielded no records
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Upload every file, strictly sequentially, skipping failures.
    pub async fn upload_batch(&mut self, files: &[PathBuf]) -> Vec<ImageRecord> {
        self.upload_batch_with(files, |_| {}).await
    }

    /// Like [`Self::upload_batch`], reporting progress after each file.
    ///
    /// The reported percentage is `(completed / total) * 95`, then 100 when
    /// the batch finishes, so an observer never sees 100 while a file is
    /// still pending.
    pub async fn upload_batch_with<F>(
        &mut self,
        files: &[PathBuf],
        mut on_progress: F,
    ) -> Vec<ImageRecord>
    where
        F: FnMut(f32),
    {
        if files.is_empty() {
            return Vec::new();
        }

        self.uploading = true;
        self.progress = 0.0;
        self.last_error = None;

        let total = files.len();
        let mut records = Vec::new();

        for (done, file) in files.iter().enumerate() {
            match self.remote.upload(file).await {
                Some(record) => records.push(record),
                None => {
                    // Already logged by the client; the batch continues
                    warn!("Skipping {} after failed upload", file.display());
                }
            }

            self.progress = ((done + 1) as f32 / total as f32) * PROGRESS_CEILING;
            on_progress(self.progress);
        }

        self.progress = 100.0;
        on_progress(self.progress);
        self.uploading = false;

        if records.is_empty() {
            self.last_error = Some(format!("All {} uploads failed", total));
        }

        info!("Upload batch finished: {} of {} succeeded", records.len(), total);

        records
    }
}
