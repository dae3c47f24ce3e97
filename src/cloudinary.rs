//! Cloudinary backend: a public JSON listing of resources, served straight from the CDN.
//!
//! Unlike Immich there is no authentication and no share key. Display URLs are built from the
//! resource's `public_id`, and a resource's folder is its only collection.

use std::collections::HashSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::album::Collection;
use crate::client::ApiClient;
use crate::config::CloudinarySettings;
use crate::contract::MediaListing;
use crate::error::{GalleryError, MappingError};
use crate::format::{collect_images, sort_images, Image};
use crate::store::{GetImagesOptions, ImageStore};

pub const CDN_BASE_URL: &str = "https://res.cloudinary.com";

/// `GET /{cloud_name}/any/list/{tag}.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageListResponse {
    #[serde(default)]
    pub resources: Vec<CloudinaryResource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudinaryResource {
    pub public_id: String,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub context: Option<ResourceContext>,
    #[serde(default)]
    pub asset_folder: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl CloudinaryResource {
    fn custom(&self) -> Option<&CustomContext> {
        self.context.as_ref().and_then(|c| c.custom.as_ref())
    }

    fn folder(&self) -> Option<&str> {
        self.asset_folder.as_deref().filter(|f| !f.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceContext {
    #[serde(default)]
    pub custom: Option<CustomContext>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomContext {
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
}

/// Delivery URL for a resource: images under `image/upload`, every other type under `video/upload`.
pub fn display_url(cloud_name: &str, resource: &CloudinaryResource) -> String {
    let kind = match resource.resource_type.as_deref() {
        Some("image") => "image",
        _ => "video",
    };
    format!(
        "{}/{}/{}/upload/{}",
        CDN_BASE_URL, cloud_name, kind, resource.public_id
    )
}

pub fn resource_to_image(
    resource: &CloudinaryResource,
    cloud_name: &str,
) -> Result<Image, MappingError> {
    let format = resource
        .format
        .clone()
        .ok_or_else(|| MappingError::MissingFormat {
            asset_id: resource.public_id.clone(),
        })?;
    let (width, height) = match (resource.width, resource.height) {
        (Some(w), Some(h)) => (w, h),
        _ => {
            return Err(MappingError::MissingDimensions {
                asset_id: resource.public_id.clone(),
            })
        }
    };
    let custom = resource.custom();
    let url = display_url(cloud_name, resource);

    Ok(Image {
        thumbnail: url.clone(),
        src: url,
        title: custom.and_then(|c| c.caption.clone()).unwrap_or_default(),
        description: custom.and_then(|c| c.alt.clone()).unwrap_or_default(),
        collections: resource.folder().map(|f| vec![f.to_string()]).unwrap_or_default(),
        width,
        height,
        format,
        captured_at: resource.created_at.clone(),
    })
}

/// Keep images tagged with `collection` (case-insensitive). `None` keeps everything.
pub fn filter_images_by_collection(images: Vec<Image>, collection: Option<&str>) -> Vec<Image> {
    let Some(wanted) = collection else {
        return images;
    };
    let wanted = wanted.to_lowercase();
    images
        .into_iter()
        .filter(|image| image.collections.iter().any(|c| c.to_lowercase() == wanted))
        .collect()
}

/// Reqwest-backed [`MediaListing`].
pub struct CloudinaryClient {
    api: ApiClient,
    cloud_name: String,
    list_tag: String,
}

impl CloudinaryClient {
    pub fn new(settings: &CloudinarySettings) -> Self {
        Self::with_base_url(CDN_BASE_URL, settings)
    }

    /// Point the client at another host serving the same listing layout.
    pub fn with_base_url(base_url: &str, settings: &CloudinarySettings) -> Self {
        Self {
            api: ApiClient::new(base_url, None),
            cloud_name: settings.cloud_name.clone(),
            list_tag: settings.list_tag.clone(),
        }
    }

    pub fn list_path(&self) -> String {
        format!("/{}/any/list/{}.json", self.cloud_name, self.list_tag)
    }
}

#[async_trait]
impl MediaListing for CloudinaryClient {
    async fn list_resources(&self) -> Result<ImageListResponse, GalleryError> {
        let listing: ImageListResponse = self.api.fetch_resource(&self.list_path()).await?;
        info!(count = listing.resources.len(), tag = %self.list_tag, "Fetched Cloudinary listing");
        Ok(listing)
    }
}

pub struct CloudinaryGallery<L> {
    listing: L,
    cloud_name: String,
}

impl<L: MediaListing> CloudinaryGallery<L> {
    pub fn new(listing: L, cloud_name: String) -> Self {
        Self {
            listing,
            cloud_name,
        }
    }
}

#[async_trait]
impl<L: MediaListing> ImageStore for CloudinaryGallery<L> {
    async fn get_images(&self, options: &GetImagesOptions) -> Result<Vec<Image>, GalleryError> {
        let listing = self.listing.list_resources().await?;
        let images = collect_images(&listing.resources, |r| resource_to_image(r, &self.cloud_name));
        let images = filter_images_by_collection(images, options.collection.as_deref());
        Ok(sort_images(images, &options.sort))
    }

    async fn get_collections(&self, exclude: &[String]) -> Result<Vec<Collection>, GalleryError> {
        let listing = self.listing.list_resources().await?;
        let mut seen = HashSet::new();
        let collections: Vec<Collection> = listing
            .resources
            .iter()
            .filter_map(CloudinaryResource::folder)
            .filter(|folder| seen.insert(folder.to_lowercase()))
            .filter(|folder| !exclude.iter().any(|x| x.to_lowercase() == folder.to_lowercase()))
            .map(Collection::named)
            .collect();
        info!(count = collections.len(), "Listed Cloudinary collections");
        Ok(collections)
    }
}
