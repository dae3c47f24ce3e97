//! Backend-agnostic entry points used by the site build.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::aggregate::ImmichGallery;
use crate::album::Collection;
use crate::client::ImmichClient;
use crate::cloudinary::{CloudinaryClient, CloudinaryGallery};
use crate::config::{BackendConfig, GalleryConfig};
use crate::error::GalleryError;
use crate::format::{Image, SortOptions};

/// Caller-facing query options for [`ImageStore::get_images`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetImagesOptions {
    /// Restrict to one collection, matched case-insensitively.
    #[serde(default)]
    pub collection: Option<String>,
    #[serde(default)]
    pub sort: SortOptions,
}

impl GetImagesOptions {
    pub fn for_collection(collection: &str) -> Self {
        Self {
            collection: Some(collection.to_string()),
            ..Self::default()
        }
    }
}

/// A source of gallery images and collections.
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn get_images(&self, options: &GetImagesOptions) -> Result<Vec<Image>, GalleryError>;

    /// Collections for navigation, minus `exclude` (case-insensitive).
    async fn get_collections(&self, exclude: &[String]) -> Result<Vec<Collection>, GalleryError>;
}

/// Build the store selected by configuration.
pub fn build_store(config: &GalleryConfig) -> Box<dyn ImageStore> {
    match &config.backend {
        BackendConfig::Immich { connection, albums } => {
            info!("Using Immich image store");
            Box::new(ImmichGallery::new(
                ImmichClient::new(connection),
                albums.clone(),
            ))
        }
        BackendConfig::Cloudinary(settings) => {
            info!(cloud_name = %settings.cloud_name, "Using Cloudinary image store");
            Box::new(CloudinaryGallery::new(
                CloudinaryClient::new(settings),
                settings.cloud_name.clone(),
            ))
        }
    }
}
