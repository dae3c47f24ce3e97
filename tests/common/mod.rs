#![allow(dead_code)]

use gallery_source::aggregate::SharedAsset;
use gallery_source::immich_types::{
    AlbumResponse, AlbumSummary, Asset, ExifInfo, SharedLink, SharedLinkAlbum,
};

pub const BASE_URL: &str = "https://photos.example.com";

pub fn summary(id: &str, album_name: &str) -> AlbumSummary {
    AlbumSummary {
        id: id.to_string(),
        album_name: album_name.to_string(),
        description: None,
        asset_count: None,
        has_shared_link: None,
    }
}

pub fn link(album_id: &str, key: &str) -> SharedLink {
    SharedLink {
        id: Some(format!("link-{album_id}")),
        key: key.to_string(),
        link_type: Some("ALBUM".to_string()),
        expires_at: None,
        album: Some(SharedLinkAlbum {
            id: album_id.to_string(),
            album_name: None,
        }),
    }
}

pub fn asset(id: &str, mime_type: &str) -> Asset {
    Asset {
        id: id.to_string(),
        asset_type: Some("IMAGE".to_string()),
        original_file_name: Some(format!("{id}.jpg")),
        original_mime_type: Some(mime_type.to_string()),
        file_created_at: None,
        local_date_time: None,
        is_favorite: None,
        exif_info: Some(ExifInfo {
            exif_image_width: Some(4000),
            exif_image_height: Some(3000),
            description: Some(format!("Photo {id}")),
            ..ExifInfo::default()
        }),
    }
}

pub fn jpeg(id: &str) -> Asset {
    asset(id, "image/jpeg")
}

pub fn album_response(id: &str, album_name: &str, assets: Vec<Asset>) -> AlbumResponse {
    AlbumResponse {
        id: id.to_string(),
        album_name: album_name.to_string(),
        description: None,
        assets,
    }
}

pub fn shared(asset: Asset, key: &str) -> SharedAsset {
    SharedAsset {
        asset,
        share_key: key.to_string(),
    }
}
