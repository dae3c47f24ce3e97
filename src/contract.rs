//! # contract: remote backend seams
//!
//! Read-only traits over the two photo backends. The aggregators only talk to these traits,
//! so tests drive them with `mockall` mocks and production code with the reqwest clients in
//! [`crate::client`] and [`crate::cloudinary`].
//!
//! - [`PhotoApi`]: the self-hosted Immich API (albums, album detail, shared links).
//! - [`MediaListing`]: the Cloudinary public list endpoint.
//!
//! Every method is one HTTP GET. Errors are fatal to the calling aggregation.

use async_trait::async_trait;

#[allow(unused_imports)]
use mockall::{automock, predicate::*};

use crate::cloudinary::ImageListResponse;
use crate::error::GalleryError;
use crate::immich_types::{AlbumCollectionResponse, AlbumResponse, SharedKeysResponse};

/// Authenticated access to the photo-management backend.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait PhotoApi: Send + Sync {
    /// `GET /api/albums`
    async fn list_albums(&self) -> Result<AlbumCollectionResponse, GalleryError>;

    /// `GET /api/albums/{id}`, including the album's assets.
    async fn get_album(&self, album_id: &str) -> Result<AlbumResponse, GalleryError>;

    /// `GET /api/shared-links`
    async fn list_shared_links(&self) -> Result<SharedKeysResponse, GalleryError>;

    /// Base URL that display URLs are built from.
    fn base_url(&self) -> String;
}

/// Unauthenticated access to a CDN's public resource listing.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait MediaListing: Send + Sync {
    async fn list_resources(&self) -> Result<ImageListResponse, GalleryError>;
}
