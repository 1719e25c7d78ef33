use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the gallery core.
///
/// Most failure paths in this crate deliberately degrade instead of erroring
/// (a failed remote delete is logged, a failed store write is logged, a failed
/// per-file upload is skipped). This enum covers the paths that do surface to
/// a caller: the store's fallible helpers and setup.
#[derive(Debug, Error)]
pub enum GalleryError {
    /// The persisted collection file could not be read or written.
    #[error("storage I/O failed for {}: {}", .path.display(), .source)]
    StorageIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The persisted collection file exists but does not parse.
    #[error("storage contents malformed: {0}")]
    StorageFormat(#[from] serde_json::Error),

    /// No per-user data directory could be determined on this platform.
    #[error("could not determine a data directory for the gallery store")]
    NoDataDir,
}
