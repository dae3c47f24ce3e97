//! # aggregate: photo-collection aggregation over the Immich API
//!
//! Turns the album, shared-link and album-detail responses of one Immich server into a flat,
//! deduplicated list of shareable assets, then hands them to [`crate::format`].
//!
//! Pipeline for one call:
//!   1. album list and shared-link list are fetched concurrently
//!   2. albums are filtered by naming convention, then by requested collection
//!   3. share keys are joined onto albums according to the [`ShareKeyPolicy`]
//!   4. album details are fetched concurrently, one request per album
//!   5. assets are tagged with their album's share key and deduplicated by id
//!
//! Any failed request aborts the whole call. Nothing is cached between calls: every value built
//! here is returned to the caller, including the raw album responses used for membership tags.

use std::collections::HashSet;

use async_trait::async_trait;
use futures::future::try_join_all;
use tracing::{info, warn};

use crate::album::{
    attach_share_keys, filter_by_collection, public_name, qualifying_albums, visible_collections,
    Album, Collection,
};
use crate::config::{AlbumSettings, ShareKeyPolicy};
use crate::contract::PhotoApi;
use crate::error::GalleryError;
use crate::format::{sort_images, to_gallery_images, Image};
use crate::immich_types::{AlbumResponse, Asset};
use crate::store::{GetImagesOptions, ImageStore};

/// An asset together with the share key of the album it was discovered through.
#[derive(Debug, Clone, PartialEq)]
pub struct SharedAsset {
    pub asset: Asset,
    pub share_key: String,
}

/// Result of loading a set of albums.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedAssets {
    /// Assets in album order, possibly with duplicates until [`deduplicate_by_id`] runs.
    pub assets: Vec<SharedAsset>,
    /// One raw response per loaded album, in the same order as the input albums.
    pub album_responses: Vec<AlbumResponse>,
}

/// Fetch every album's detail concurrently and tag its assets with the album's share key.
///
/// Results keep the order of `albums` regardless of completion order. Albums without a share key
/// have nothing to authorize their assets with and are skipped.
pub async fn load_assets<A>(api: &A, albums: &[Album]) -> Result<LoadedAssets, GalleryError>
where
    A: PhotoApi + ?Sized,
{
    let fetches = albums.iter().map(|album| async move {
        let response = api.get_album(&album.id).await?;
        Ok::<_, GalleryError>((album, response))
    });
    let fetched = try_join_all(fetches).await?;

    let mut loaded = LoadedAssets::default();
    for (album, response) in fetched {
        let Some(share_key) = album.share_key.as_deref() else {
            warn!(album = %album.name, album_id = %album.id, "Album has no share key, skipping its assets");
            continue;
        };
        loaded
            .assets
            .extend(response.assets.iter().cloned().map(|asset| SharedAsset {
                asset,
                share_key: share_key.to_string(),
            }));
        loaded.album_responses.push(response);
    }
    Ok(loaded)
}

/// Drop later duplicates, keeping first-seen order and the first share key.
pub fn deduplicate_by_id(assets: Vec<SharedAsset>) -> Vec<SharedAsset> {
    let mut seen = HashSet::new();
    assets
        .into_iter()
        .filter(|shared| seen.insert(shared.asset.id.clone()))
        .collect()
}

/// Public names of every loaded album containing `asset_id`.
pub fn collections_for_asset(
    asset_id: &str,
    responses: &[AlbumResponse],
    album_prefix: &str,
) -> Vec<String> {
    responses
        .iter()
        .filter(|response| response.contains_asset(asset_id))
        .filter_map(|response| public_name(&response.album_name, album_prefix))
        .collect()
}

/// Aggregator over one Immich server.
pub struct ImmichGallery<A> {
    api: A,
    settings: AlbumSettings,
}

impl<A: PhotoApi> ImmichGallery<A> {
    pub fn new(api: A, settings: AlbumSettings) -> Self {
        Self { api, settings }
    }

    pub fn with_policy(api: A, share_key_policy: ShareKeyPolicy) -> Self {
        Self::new(
            api,
            AlbumSettings {
                share_key_policy,
                ..AlbumSettings::default()
            },
        )
    }

    /// Published albums, without share keys.
    pub async fn list_qualifying_albums(&self) -> Result<Vec<Album>, GalleryError> {
        let summaries = self.api.list_albums().await?;
        Ok(qualifying_albums(&summaries, &self.settings.album_prefix))
    }

    /// Authorized, deduplicated assets of one collection (or all of them).
    pub async fn load_collection(
        &self,
        collection: Option<&str>,
    ) -> Result<LoadedAssets, GalleryError> {
        info!(collection = ?collection, "Loading collection");
        let (summaries, links) =
            futures::try_join!(self.api.list_albums(), self.api.list_shared_links())?;

        let albums = qualifying_albums(&summaries, &self.settings.album_prefix);
        let albums = filter_by_collection(albums, collection);
        let albums = attach_share_keys(albums, &links, self.settings.share_key_policy)?;
        info!(albums = albums.len(), "Albums authorized for loading");

        let loaded = load_assets(&self.api, &albums).await?;
        let total = loaded.assets.len();
        let assets = deduplicate_by_id(loaded.assets);
        info!(total, unique = assets.len(), "Loaded collection assets");

        Ok(LoadedAssets {
            assets,
            album_responses: loaded.album_responses,
        })
    }
}

#[async_trait]
impl<A: PhotoApi> ImageStore for ImmichGallery<A> {
    async fn get_images(&self, options: &GetImagesOptions) -> Result<Vec<Image>, GalleryError> {
        let loaded = self.load_collection(options.collection.as_deref()).await?;
        let images = to_gallery_images(
            &loaded.assets,
            &self.api.base_url(),
            &loaded.album_responses,
            &self.settings.album_prefix,
        );
        Ok(sort_images(images, &options.sort))
    }

    async fn get_collections(&self, exclude: &[String]) -> Result<Vec<Collection>, GalleryError> {
        let (summaries, links) =
            futures::try_join!(self.api.list_albums(), self.api.list_shared_links())?;
        let albums = qualifying_albums(&summaries, &self.settings.album_prefix);
        let collections =
            visible_collections(albums, exclude, &links, self.settings.share_key_policy)?;
        info!(count = collections.len(), "Listed collections");
        Ok(collections)
    }
}
