//! The core gallery controller
//!
//! Single source of truth for what images exist and which are currently
//! visible. Owns the in-memory collection, derives the filtered and paginated
//! views, and runs add/delete mutations local-first: the collection changes
//! synchronously and the remote outcome is recorded afterward, never rolled
//! back.

use std::collections::{BTreeSet, HashMap, HashSet};

use log::{debug, info, warn};

use super::data::{DeletePhase, ImageRecord};
use super::store::CollectionStore;
use crate::remote::client::RemoteMedia;

/// Number of images per page in the grid
pub const IMAGES_PER_PAGE: usize = 12;

/// Build the working collection from its two partitions.
///
/// User images come first in their persisted (most-recent-first) order,
/// followed by the seed records in seed order, minus the suppressed ids and
/// minus any seed id a user image already occupies.
pub fn merge_collections(
    user_images: Vec<ImageRecord>,
    seed: &[ImageRecord],
    suppressed: &BTreeSet<String>,
) -> Vec<ImageRecord> {
    let mut merged = user_images;
    let mut ids: HashSet<String> = merged.iter().map(|img| img.id.clone()).collect();

    for img in seed {
        if suppressed.contains(&img.id) || ids.contains(&img.id) {
            continue;
        }
        ids.insert(img.id.clone());
        merged.push(img.clone());
    }

    merged
}

/// The gallery state controller.
///
/// The store and the remote client are injected; seed data is a parameter to
/// [`Self::initialize`]. Mutations persist the affected subset through the
/// store as part of the same operation.
pub struct GalleryState<S: CollectionStore, R: RemoteMedia> {
    store: S,
    remote: R,
    /// The working collection, user images first, most recent first
    images: Vec<ImageRecord>,
    /// Ids of seed records the user deleted; survives reloads via the store
    suppressed: BTreeSet<String>,
    search_term: String,
    /// 1-based page the grid has scrolled to
    current_page: usize,
    /// At most one record selected for the preview surface
    selected: Option<ImageRecord>,
    /// Deletion phase per removed id; orphaned entries are kept for a future
    /// reconciliation pass
    deletions: HashMap<String, DeletePhase>,
}

impl<S: CollectionStore, R: RemoteMedia> GalleryState<S, R> {
    pub fn new(store: S, remote: R) -> Self {
        GalleryState {
            store,
            remote,
            images: Vec::new(),
            suppressed: BTreeSet::new(),
            search_term: String::new(),
            current_page: 1,
            selected: None,
            deletions: HashMap::new(),
        }
    }

    /// Load the persisted collection and merge it with the seed set.
    ///
    /// Absent or unreadable persisted data counts as empty. Resets search,
    /// pagination, and selection.
    pub fn initialize(&mut self, seed: &[ImageRecord]) {
        let stored = self.store.load();
        self.suppressed = stored.suppressed_ids;
        self.images = merge_collections(stored.user_images, seed, &self.suppressed);
        self.search_term.clear();
        self.current_page = 1;
        self.selected = None;
        self.deletions.clear();

        info!(
            "Gallery initialized with {} images ({} demo ids hidden)",
            self.images.len(),
            self.suppressed.len()
        );
    }

    // ========== Derived views ==========

    /// The full working collection
    pub fn images(&self) -> &[ImageRecord] {
        &self.images
    }

    /// Subsequence of the collection matching the active search term
    pub fn filtered_images(&self) -> Vec<&ImageRecord> {
        self.images
            .iter()
            .filter(|img| img.matches(&self.search_term))
            .collect()
    }

    /// The page-sized window of the filtered set for the current page.
    ///
    /// A page left dangling past the end of a shrunken filtered set clamps to
    /// the last page that still has content.
    pub fn paginated_images(&self) -> Vec<&ImageRecord> {
        let filtered = self.filtered_images();
        let page = self.clamped_page(filtered.len());
        let start = (page - 1) * IMAGES_PER_PAGE;
        let end = (start + IMAGES_PER_PAGE).min(filtered.len());
        if start >= filtered.len() {
            return Vec::new();
        }
        filtered[start..end].to_vec()
    }

    /// Everything the infinite-scroll grid shows: pages 1 through the current
    /// page as one prefix of the filtered set
    pub fn visible_images(&self) -> Vec<&ImageRecord> {
        let filtered = self.filtered_images();
        let end = (self.current_page * IMAGES_PER_PAGE).min(filtered.len());
        filtered[..end].to_vec()
    }

    /// True when pages beyond the current one still have content
    pub fn has_more(&self) -> bool {
        IMAGES_PER_PAGE * self.current_page < self.filtered_images().len()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn selected_image(&self) -> Option<&ImageRecord> {
        self.selected.as_ref()
    }

    /// Ids of seed records hidden by the user
    pub fn suppressed_ids(&self) -> &BTreeSet<String> {
        &self.suppressed
    }

    /// Deletion phase of a removed image, if any
    pub fn deletion_phase(&self, id: &str) -> Option<DeletePhase> {
        self.deletions.get(id).copied()
    }

    fn clamped_page(&self, filtered_len: usize) -> usize {
        let last = filtered_len.div_ceil(IMAGES_PER_PAGE).max(1);
        self.current_page.min(last)
    }

    // ========== Mutations ==========

    /// Update the search predicate and jump back to the first page
    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.to_string();
        self.current_page = 1;
    }

    /// Advance to the next page, if one exists
    pub fn load_more(&mut self) {
        self.set_page(self.current_page + 1);
    }

    /// Jump to a page, clamping into the valid range for the filtered set
    pub fn set_page(&mut self, page: usize) {
        let last = self.filtered_images().len().div_ceil(IMAGES_PER_PAGE).max(1);
        self.current_page = page.clamp(1, last);
    }

    /// Prepend new records to the collection, most recent first.
    ///
    /// Records whose id is already present (including duplicates within the
    /// batch) are dropped; existing images keep their relative order. The
    /// user-image subset is persisted when anything was added. Returns the
    /// number of records actually added.
    pub fn add_images(&mut self, new_images: Vec<ImageRecord>) -> usize {
        let existing: HashSet<String> = self.images.iter().map(|img| img.id.clone()).collect();

        let mut fresh: Vec<ImageRecord> = Vec::new();
        for img in new_images {
            if existing.contains(&img.id) || fresh.iter().any(|f| f.id == img.id) {
                debug!("Skipping duplicate image id {}", img.id);
                continue;
            }
            fresh.push(img);
        }

        let added = fresh.len();
        if added > 0 {
            self.images.splice(0..0, fresh);
            self.persist_user_images();
            info!("Added {} new images to the gallery", added);
        }

        added
    }

    /// Delete an image, local-first.
    ///
    /// The record leaves the collection (and the selection slot) before the
    /// remote call is made. Seed records are hidden by persisting their id in
    /// the suppressed set; user records are dropped from the persisted list.
    /// A failed remote delete is recorded as [`DeletePhase::Orphaned`] and
    /// logged, never rolled back or surfaced. Returns false only when the id
    /// is not in the collection.
    pub async fn delete_image(&mut self, id: &str) -> bool {
        let Some(pos) = self.images.iter().position(|img| img.id == id) else {
            debug!("Delete of unknown image {} ignored", id);
            return false;
        };

        let record = self.images.remove(pos);

        if self.selected.as_ref().is_some_and(|sel| sel.id == record.id) {
            self.selected = None;
        }

        if record.seed {
            self.suppressed.insert(record.id.clone());
            self.store.save_suppressed(&self.suppressed);
        } else {
            self.persist_user_images();
        }

        self.deletions
            .insert(record.id.clone(), DeletePhase::PendingRemote);

        let confirmed = self.remote.delete(&record.public_id).await;
        let phase = if confirmed {
            DeletePhase::Confirmed
        } else {
            // Local state stays authoritative; the object may linger remotely
            warn!(
                "Remote delete of {} failed, object may be orphaned at the remote store",
                record.public_id
            );
            DeletePhase::Orphaned
        };
        self.deletions.insert(record.id, phase);

        true
    }

    /// Set or clear the preview selection.
    ///
    /// A record whose id is not in the collection is ignored.
    pub fn select_image(&mut self, image: Option<ImageRecord>) {
        if let Some(img) = &image {
            if !self.images.iter().any(|i| i.id == img.id) {
                warn!("Ignoring selection of unknown image {}", img.id);
                return;
            }
        }
        self.selected = image;
    }

    fn persist_user_images(&self) {
        let user_images: Vec<ImageRecord> = self
            .images
            .iter()
            .filter(|img| !img.seed)
            .cloned()
            .collect();
        self.store.save_images(&user_images);
    }
}
