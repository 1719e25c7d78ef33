//! Durable storage for the gallery collection
//!
//! Two values are persisted, under two fixed keys: the user-uploaded image
//! records (saved verbatim) and the ids of demo seed images the user has
//! hidden (the seed records themselves are rebuilt from the compiled-in set
//! on every load). Both values are optional; a missing or malformed file is
//! treated as empty, never as a fatal error, and a failed write is logged and
//! otherwise ignored so it can never block the mutation that triggered it.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use log::{debug, info, warn};

use super::data::ImageRecord;
use crate::error::GalleryError;

/// File name for the serialized user-image collection
const IMAGES_KEY: &str = "gallery_images.json";
/// File name for the serialized hidden-demo-id set
const SUPPRESSED_KEY: &str = "hidden_demo_ids.json";

/// Everything the store holds, as loaded in one best-effort pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredCollection {
    /// User-uploaded records, in persisted (most-recent-first) order
    pub user_images: Vec<ImageRecord>,
    /// Ids of demo seed records the user deleted
    pub suppressed_ids: BTreeSet<String>,
}

/// Storage boundary for the gallery controller.
///
/// Injected into [`crate::GalleryState`] so the controller never touches a
/// hidden global storage surface.
pub trait CollectionStore {
    /// Load the persisted contents; absent or malformed data loads as empty
    fn load(&self) -> StoredCollection;

    /// Persist the user-image subset; failures are logged, not propagated
    fn save_images(&self, user_images: &[ImageRecord]);

    /// Persist the hidden-demo-id set; failures are logged, not propagated
    fn save_suppressed(&self, ids: &BTreeSet<String>);
}

/// On-disk store keeping each key as a JSON file in the user's data directory.
///
/// The directory is created on construction:
/// - Linux: ~/.local/share/cloud-gallery/
/// - macOS: ~/Library/Application Support/cloud-gallery/
/// - Windows: %APPDATA%\cloud-gallery\
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at the per-user data directory
    pub fn new() -> Result<Self, GalleryError> {
        let mut dir = dirs::data_dir()
            .or_else(dirs::home_dir)
            .ok_or(GalleryError::NoDataDir)?;
        dir.push("cloud-gallery");
        Self::at_dir(dir)
    }

    /// Create a store rooted at an explicit directory
    pub fn at_dir(dir: PathBuf) -> Result<Self, GalleryError> {
        fs::create_dir_all(&dir).map_err(|source| GalleryError::StorageIo {
            path: dir.clone(),
            source,
        })?;
        info!("Gallery store initialized at {}", dir.display());
        Ok(JsonFileStore { dir })
    }

    /// Directory holding the store's files
    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    fn read_value<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<Option<T>, GalleryError> {
        let path = self.dir.join(key);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path).map_err(|source| GalleryError::StorageIo {
            path: path.clone(),
            source,
        })?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn write_value<T: serde::Serialize>(&self, key: &str, value: &T) -> Result<(), GalleryError> {
        let path = self.dir.join(key);
        let raw = serde_json::to_string(value)?;
        fs::write(&path, raw).map_err(|source| GalleryError::StorageIo { path, source })?;
        Ok(())
    }
}

impl CollectionStore for JsonFileStore {
    fn load(&self) -> StoredCollection {
        // Each key degrades to empty on its own, so a corrupt image file does
        // not also wipe the hidden-id set.
        let user_images = match self.read_value::<Vec<ImageRecord>>(IMAGES_KEY) {
            Ok(Some(images)) => images,
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Ignoring unreadable image collection: {}", e);
                Vec::new()
            }
        };

        let suppressed_ids = match self.read_value::<BTreeSet<String>>(SUPPRESSED_KEY) {
            Ok(Some(ids)) => ids,
            Ok(None) => BTreeSet::new(),
            Err(e) => {
                warn!("Ignoring unreadable hidden-demo-id set: {}", e);
                BTreeSet::new()
            }
        };

        debug!(
            "Loaded {} user images, {} hidden demo ids",
            user_images.len(),
            suppressed_ids.len()
        );

        StoredCollection {
            user_images,
            suppressed_ids,
        }
    }

    fn save_images(&self, user_images: &[ImageRecord]) {
        if let Err(e) = self.write_value(IMAGES_KEY, &user_images) {
            warn!("Failed to persist image collection: {}", e);
        } else {
            debug!("Saved {} user images", user_images.len());
        }
    }

    fn save_suppressed(&self, ids: &BTreeSet<String>) {
        if let Err(e) = self.write_value(SUPPRESSED_KEY, ids) {
            warn!("Failed to persist hidden-demo-id set: {}", e);
        }
    }
}

/// In-memory store for tests and embedders without a disk.
///
/// Clones share the same backing cell, so a handle kept by the caller
/// observes every save made through the controller's copy.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<StoredCollection>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with pre-existing contents
    pub fn with_contents(contents: StoredCollection) -> Self {
        MemoryStore {
            inner: Rc::new(RefCell::new(contents)),
        }
    }
}

impl CollectionStore for MemoryStore {
    fn load(&self) -> StoredCollection {
        self.inner.borrow().clone()
    }

    fn save_images(&self, user_images: &[ImageRecord]) {
        self.inner.borrow_mut().user_images = user_images.to_vec();
    }

    fn save_suppressed(&self, ids: &BTreeSet<String>) {
        self.inner.borrow_mut().suppressed_ids = ids.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_image(id: &str) -> ImageRecord {
        ImageRecord {
            id: id.to_string(),
            url: format!("https://example.com/{}.jpg", id),
            title: format!("Image {}", id),
            tags: None,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            date: None,
            public_id: format!("user/{}", id),
            width: 1024,
            height: 768,
            seed: false,
        }
    }

    #[test]
    fn test_load_from_empty_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let store = JsonFileStore::at_dir(tmp.path().to_path_buf()).unwrap();
        assert_eq!(store.load(), StoredCollection::default());
    }

    #[test]
    fn test_save_and_reload() {
        let tmp = tempfile::tempdir().unwrap();
        let store = JsonFileStore::at_dir(tmp.path().to_path_buf()).unwrap();

        let images = vec![sample_image("a"), sample_image("b")];
        let mut suppressed = BTreeSet::new();
        suppressed.insert("3".to_string());

        store.save_images(&images);
        store.save_suppressed(&suppressed);

        // A second store over the same directory sees the same contents
        let reopened = JsonFileStore::at_dir(tmp.path().to_path_buf()).unwrap();
        let loaded = reopened.load();
        assert_eq!(loaded.user_images, images);
        assert_eq!(loaded.suppressed_ids, suppressed);
    }

    #[test]
    fn test_malformed_file_loads_as_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let store = JsonFileStore::at_dir(tmp.path().to_path_buf()).unwrap();

        fs::write(tmp.path().join(IMAGES_KEY), "{not json").unwrap();
        let loaded = store.load();
        assert!(loaded.user_images.is_empty());
    }

    #[test]
    fn test_malformed_images_keep_suppressed_ids() {
        let tmp = tempfile::tempdir().unwrap();
        let store = JsonFileStore::at_dir(tmp.path().to_path_buf()).unwrap();

        let mut suppressed = BTreeSet::new();
        suppressed.insert("1".to_string());
        store.save_suppressed(&suppressed);
        fs::write(tmp.path().join(IMAGES_KEY), "[[[").unwrap();

        let loaded = store.load();
        assert!(loaded.user_images.is_empty());
        assert_eq!(loaded.suppressed_ids, suppressed);
    }

    #[test]
    fn test_memory_store_clones_share_state() {
        let store = MemoryStore::new();
        let handle = store.clone();

        store.save_images(&[sample_image("a")]);
        assert_eq!(handle.load().user_images.len(), 1);
    }
}
