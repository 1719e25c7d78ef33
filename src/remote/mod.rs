/// Remote media store boundary
///
/// This module wraps the hosted media API:
/// - Upload/delete client and its configuration (client.rs)
/// - Sequential batch uploads with progress tracking (upload.rs)
pub mod client;
pub mod upload;

/// Check whether a public id names one of the shared demo images.
///
/// Demo identifiers are reserved by the remote store's public account and
/// must never be sent to the real delete endpoint; deleting one is
/// short-circuited to success without a network call.
pub fn is_demo_public_id(public_id: &str) -> bool {
    public_id == "sample" || public_id.starts_with("demo/") || public_id.contains("cld-sample")
}
