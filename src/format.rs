//! Presentation: turning aggregated assets into gallery image records, and ordering them.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::aggregate::{collections_for_asset, SharedAsset};
use crate::error::MappingError;
use crate::immich_types::AlbumResponse;

/// Output record handed to the site generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Full-size display URL.
    pub src: String,
    pub thumbnail: String,
    pub title: String,
    pub description: String,
    pub collections: Vec<String>,
    pub width: u32,
    pub height: u32,
    /// File extension derived from the asset's MIME type (or the CDN's format field).
    pub format: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbnailSize {
    Fullsize,
    Preview,
}

impl ThumbnailSize {
    pub fn as_str(self) -> &'static str {
        match self {
            ThumbnailSize::Fullsize => "fullsize",
            ThumbnailSize::Preview => "preview",
        }
    }
}

/// `{base_url}/api/assets/{asset_id}/thumbnail?size={size}&key={share_key}`
pub fn thumbnail_url(base_url: &str, asset_id: &str, size: ThumbnailSize, share_key: &str) -> String {
    format!(
        "{}/api/assets/{}/thumbnail?size={}&key={}",
        base_url.trim_end_matches('/'),
        asset_id,
        size.as_str(),
        share_key
    )
}

const MIME_EXTENSIONS: &[(&str, &str)] = &[
    ("image/jpeg", "jpeg"),
    ("image/pjpeg", "jpeg"),
    ("image/png", "png"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
    ("image/avif", "avif"),
    ("image/heic", "heic"),
    ("image/heif", "heif"),
    ("image/jxl", "jxl"),
    ("image/tiff", "tif"),
    ("image/bmp", "bmp"),
    ("image/svg+xml", "svg"),
    ("image/x-icon", "ico"),
    ("image/x-adobe-dng", "dng"),
    ("image/x-canon-cr2", "cr2"),
    ("image/x-nikon-nef", "nef"),
    ("image/x-sony-arw", "arw"),
    ("video/mp4", "mp4"),
    ("video/quicktime", "mov"),
    ("video/webm", "webm"),
    ("video/x-msvideo", "avi"),
    ("video/x-matroska", "mkv"),
];

/// File extension for a MIME type, ignoring case and parameters. `None` when unknown.
///
/// The table above fixes the preferred extension for common photo and video types; anything
/// else falls back to the first extension `mime_guess` knows for it.
pub fn extension_for_mime(mime_type: &str) -> Option<&'static str> {
    let parsed: mime::Mime = mime_type.trim().parse().ok()?;
    let essence = parsed.essence_str().to_ascii_lowercase();
    MIME_EXTENSIONS
        .iter()
        .find(|(known, _)| *known == essence)
        .map(|(_, ext)| *ext)
        .or_else(|| {
            mime_guess::get_mime_extensions_str(&essence)
                .and_then(|extensions| extensions.first().copied())
        })
}

/// Map one Immich asset to its display record.
pub fn asset_to_image(
    asset: &SharedAsset,
    base_url: &str,
    collections: Vec<String>,
) -> Result<Image, MappingError> {
    let id = &asset.asset.id;
    let exif = asset
        .asset
        .exif_info
        .as_ref()
        .ok_or_else(|| MappingError::MissingExif { asset_id: id.clone() })?;

    let mime_type = asset
        .asset
        .original_mime_type
        .as_deref()
        .ok_or_else(|| MappingError::MissingMimeType { asset_id: id.clone() })?;
    let format = extension_for_mime(mime_type).ok_or_else(|| MappingError::UnknownMimeType {
        asset_id: id.clone(),
        mime_type: mime_type.to_string(),
    })?;

    let (width, height) = match (exif.exif_image_width, exif.exif_image_height) {
        (Some(w), Some(h)) => (w, h),
        _ => return Err(MappingError::MissingDimensions { asset_id: id.clone() }),
    };

    let text = exif.description.clone().unwrap_or_default();

    Ok(Image {
        src: thumbnail_url(base_url, id, ThumbnailSize::Fullsize, &asset.share_key),
        thumbnail: thumbnail_url(base_url, id, ThumbnailSize::Preview, &asset.share_key),
        title: text.clone(),
        description: text,
        collections,
        width,
        height,
        format: format.to_string(),
        captured_at: exif
            .date_time_original
            .clone()
            .or_else(|| asset.asset.local_date_time.clone()),
    })
}

/// Run `map` over every item, keeping the successes.
///
/// A failed item is logged at warn level and skipped; it never aborts the batch.
pub fn collect_images<T, F>(items: &[T], map: F) -> Vec<Image>
where
    F: Fn(&T) -> Result<Image, MappingError>,
{
    let mut images = Vec::with_capacity(items.len());
    for item in items {
        match map(item) {
            Ok(image) => images.push(image),
            Err(e) => warn!(error = %e, "Skipping asset that cannot be displayed"),
        }
    }
    debug!(input = items.len(), output = images.len(), "Built gallery images");
    images
}

/// Gallery images for deduplicated assets.
///
/// `responses` are the raw per-album responses from the same aggregation; they provide each
/// asset's full collection membership, which deduplication alone would lose.
pub fn to_gallery_images(
    assets: &[SharedAsset],
    base_url: &str,
    responses: &[AlbumResponse],
    album_prefix: &str,
) -> Vec<Image> {
    collect_images(assets, |asset| {
        let collections = collections_for_asset(&asset.asset.id, responses, album_prefix);
        asset_to_image(asset, base_url, collections)
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Title,
    Date,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// `sort_by: None` keeps arrival order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOptions {
    #[serde(default)]
    pub sort_by: Option<SortKey>,
    #[serde(default)]
    pub order: SortOrder,
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|d| d.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|d| d.and_utc())
        })
}

/// Stable sort. Images without a usable date go last in either direction.
pub fn sort_images(mut images: Vec<Image>, options: &SortOptions) -> Vec<Image> {
    let order = options.order;
    match options.sort_by {
        None => {}
        Some(SortKey::Title) => {
            images.sort_by(|a, b| order.apply(a.title.to_lowercase().cmp(&b.title.to_lowercase())));
        }
        Some(SortKey::Date) => {
            images.sort_by(|a, b| {
                let a = a.captured_at.as_deref().and_then(parse_date);
                let b = b.captured_at.as_deref().and_then(parse_date);
                match (a, b) {
                    (Some(a), Some(b)) => order.apply(a.cmp(&b)),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                }
            });
        }
    }
    images
}
