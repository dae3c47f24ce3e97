use thiserror::Error;

/// A non-success HTTP response from a remote photo backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to fetch from API: {status} {reason} ({url})")]
pub struct FetchError {
    pub url: String,
    pub status: u16,
    /// Canonical reason phrase for `status`, not the phrase the server sent.
    pub reason: String,
}

/// Fatal errors for one aggregation call. Any of these aborts the whole call.
#[derive(Debug, Error)]
pub enum GalleryError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Malformed response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("album: {album} does not have a valid shared link")]
    MissingShareLink { album: String },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Why a single asset could not become a gallery image.
///
/// These never escape the formatter: the asset is skipped and a warning logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("asset {asset_id} has unsupported mime type {mime_type}")]
    UnknownMimeType { asset_id: String, mime_type: String },

    #[error("asset {asset_id} has no mime type")]
    MissingMimeType { asset_id: String },

    #[error("asset {asset_id} has no exif info")]
    MissingExif { asset_id: String },

    #[error("asset {asset_id} has no image dimensions")]
    MissingDimensions { asset_id: String },

    #[error("resource {asset_id} has no format")]
    MissingFormat { asset_id: String },
}
