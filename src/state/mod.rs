/// State management module
///
/// This module handles all gallery state, including:
/// - The core collection controller (gallery.rs)
/// - Shared data structures (data.rs)
/// - The built-in demo seed records (seed.rs)
/// - Durable storage of user images and hidden demo ids (store.rs)
pub mod data;
pub mod gallery;
pub mod seed;
pub mod store;
