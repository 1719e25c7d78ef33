//! Built-in demo seed records
//!
//! Every fresh gallery starts with these five sample images from the remote
//! store's public demo account. They are never uploaded or truly deleted;
//! deleting one only records its id in the suppressed set so it stays hidden
//! across reloads.

use chrono::Utc;

use super::data::ImageRecord;

/// Build the demo seed set.
///
/// Rebuilt on every call (with a fresh timestamp) rather than persisted, so
/// the seed records always reflect the compiled-in definitions.
pub fn demo_images() -> Vec<ImageRecord> {
    let now = Utc::now().to_rfc3339();

    let entries: [(&str, &str, &str, &str, u32, u32); 5] = [
        (
            "1",
            "https://res.cloudinary.com/demo/image/upload/v1312461204/sample.jpg",
            "Sample Image 1",
            "sample",
            864,
            576,
        ),
        (
            "2",
            "https://res.cloudinary.com/demo/image/upload/v1696496183/cld-sample-2.jpg",
            "Sample Image 2",
            "cld-sample-2",
            800,
            600,
        ),
        (
            "3",
            "https://res.cloudinary.com/demo/image/upload/v1696496182/cld-sample-3.jpg",
            "Sample Image 3",
            "cld-sample-3",
            800,
            600,
        ),
        (
            "4",
            "https://res.cloudinary.com/demo/image/upload/v1696496183/cld-sample-4.jpg",
            "Sample Image 4",
            "cld-sample-4",
            800,
            600,
        ),
        (
            "5",
            "https://res.cloudinary.com/demo/image/upload/v1696496183/cld-sample-5.jpg",
            "Sample Image 5",
            "cld-sample-5",
            800,
            600,
        ),
    ];

    entries
        .into_iter()
        .map(|(id, url, title, public_id, width, height)| ImageRecord {
            id: id.to_string(),
            url: url.to_string(),
            title: title.to_string(),
            tags: None,
            created_at: now.clone(),
            date: None,
            public_id: public_id.to_string(),
            width,
            height,
            seed: true,
        })
        .collect()
}
