//! Shared data structures for the gallery state
//!
//! These structs represent the data model that flows between the storage
//! layer, the remote media client, and the presentation layer.

use serde::{Deserialize, Serialize};

/// Represents a single image in the gallery
///
/// Records come from two places: the fixed demo seed set (`seed: true`) and
/// the remote media store after an upload (`seed: false`). The partition is
/// decided once, at construction, so deletion routing never has to re-derive
/// it from the identifier string.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    /// Unique ID within the collection
    pub id: String,
    /// Location the image content can be fetched from
    pub url: String,
    /// Human-readable title; may be empty (displayed as "Untitled")
    #[serde(default)]
    pub title: String,
    /// Optional ordered tags, searched alongside the title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
    /// Optional display date, distinct from the creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// The remote media store's identifier, required for real deletion
    pub public_id: String,
    /// Display width in pixels
    pub width: u32,
    /// Display height in pixels
    pub height: u32,
    /// True for built-in demo records, false for user uploads
    #[serde(default)]
    pub seed: bool,
}

impl ImageRecord {
    /// Title for display, falling back to "Untitled" for empty titles
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "Untitled"
        } else {
            &self.title
        }
    }

    /// Check whether the record matches a search term.
    ///
    /// The term is trimmed and compared case-insensitively against the title
    /// and every tag. An empty (or whitespace-only) term matches everything.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }

        if self.title.to_lowercase().contains(&term) {
            return true;
        }

        if let Some(tags) = &self.tags {
            if tags.iter().any(|tag| tag.to_lowercase().contains(&term)) {
                return true;
            }
        }

        false
    }
}

/// Per-image deletion phase, tracked after the optimistic local removal
///
/// The item disappears from the collection before the remote outcome is
/// known. Both terminal phases look identical to the user; they are kept
/// distinct here so a future reconciliation pass can find orphaned remote
/// objects without a redesign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletePhase {
    /// Removed locally, remote delete still in flight
    PendingRemote,
    /// Remote store confirmed the deletion (or the item was already gone)
    Confirmed,
    /// Remote delete failed; the object may still exist at the remote store
    Orphaned,
}
