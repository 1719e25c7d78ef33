//! Local-first image gallery core.
//!
//! The crate owns everything between the presentation layer and the hosted
//! media store:
//! - [`state::gallery::GalleryState`]: the in-memory collection, search,
//!   pagination, selection, and optimistic add/delete mutations
//! - [`remote::upload::BatchUploader`]: sequential multi-file uploads with
//!   aggregate progress
//! - [`remote::client::MediaClient`]: the upload/delete boundary to the
//!   remote media API
//! - [`state::store`]: durable storage of the user's images and of the
//!   demo images they have hidden
//!
//! Rendering, routing, and styling are the embedding application's problem;
//! this crate only decides what images exist and which are visible.

pub mod error;
pub mod remote;
pub mod state;

pub use error::GalleryError;
pub use remote::client::{MediaClient, MediaConfig, RemoteMedia};
pub use remote::is_demo_public_id;
pub use remote::upload::BatchUploader;
pub use state::data::{DeletePhase, ImageRecord};
pub use state::gallery::{GalleryState, IMAGES_PER_PAGE};
pub use state::seed::demo_images;
pub use state::store::{CollectionStore, JsonFileStore, MemoryStore, StoredCollection};
