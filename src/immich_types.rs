//! Response shapes of the Immich REST API, reduced to the fields this crate reads.
//!
//! Identity fields (`id`, `albumName`, share `key`) are required: a record without them is a
//! malformed response and fails the whole call. Everything the formatter consumes is optional,
//! so a single incomplete asset is skipped later instead of poisoning the batch.

use serde::{Deserialize, Serialize};

/// One entry of `GET /api/albums`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumSummary {
    pub id: String,
    pub album_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub asset_count: Option<u64>,
    #[serde(default)]
    pub has_shared_link: Option<bool>,
}

pub type AlbumCollectionResponse = Vec<AlbumSummary>;

/// `GET /api/albums/{id}`: album detail with embedded assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumResponse {
    pub id: String,
    pub album_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

impl AlbumResponse {
    pub fn contains_asset(&self, asset_id: &str) -> bool {
        self.assets.iter().any(|a| a.id == asset_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    #[serde(default, rename = "type")]
    pub asset_type: Option<String>,
    #[serde(default)]
    pub original_file_name: Option<String>,
    #[serde(default)]
    pub original_mime_type: Option<String>,
    #[serde(default)]
    pub file_created_at: Option<String>,
    #[serde(default)]
    pub local_date_time: Option<String>,
    #[serde(default)]
    pub is_favorite: Option<bool>,
    #[serde(default)]
    pub exif_info: Option<ExifInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExifInfo {
    #[serde(default)]
    pub exif_image_width: Option<u32>,
    #[serde(default)]
    pub exif_image_height: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date_time_original: Option<String>,
    #[serde(default)]
    pub make: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub lens_model: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// One entry of `GET /api/shared-links`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedLink {
    #[serde(default)]
    pub id: Option<String>,
    pub key: String,
    #[serde(default, rename = "type")]
    pub link_type: Option<String>,
    #[serde(default)]
    pub expires_at: Option<String>,
    /// Absent for links that share individual assets rather than an album.
    #[serde(default)]
    pub album: Option<SharedLinkAlbum>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedLinkAlbum {
    pub id: String,
    #[serde(default)]
    pub album_name: Option<String>,
}

pub type SharedKeysResponse = Vec<SharedLink>;
