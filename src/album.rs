//! Album discovery, share-link authorization and collection filtering.
//!
//! Albums are published by naming convention: only remote albums whose name contains the
//! configured prefix are visible, under their name with that prefix removed.

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::ShareKeyPolicy;
use crate::error::GalleryError;
use crate::immich_types::{AlbumSummary, SharedLink};

/// A qualifying remote album under its public name.
///
/// `share_key` is unset right after discovery and filled in by [`attach_share_keys`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub name: String,
    pub id: String,
    pub share_key: Option<String>,
}

/// A user-facing named grouping, used for navigation. `id` is the public name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub name: String,
    pub id: String,
}

impl Collection {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            id: name.to_string(),
        }
    }
}

/// Public name for a raw album name, or `None` if the album is not published.
pub fn public_name(raw_name: &str, prefix: &str) -> Option<String> {
    raw_name
        .contains(prefix)
        .then(|| raw_name.replacen(prefix, "", 1))
}

/// Keep the albums that follow the naming convention, in listing order.
pub fn qualifying_albums(summaries: &[AlbumSummary], prefix: &str) -> Vec<Album> {
    summaries
        .iter()
        .filter_map(|summary| {
            let name = public_name(&summary.album_name, prefix);
            if name.is_none() {
                debug!(album_id = %summary.id, album_name = %summary.album_name, "Skipping unpublished album");
            }
            name.map(|name| Album {
                name,
                id: summary.id.clone(),
                share_key: None,
            })
        })
        .collect()
}

/// First share key in list order whose album matches `album_id`.
pub fn find_share_key<'a>(album_id: &str, links: &'a [SharedLink]) -> Option<&'a str> {
    links
        .iter()
        .find(|link| link.album.as_ref().is_some_and(|a| a.id == album_id))
        .map(|link| link.key.as_str())
}

/// Attach each album's share key.
///
/// Albums without a share link are dropped under [`ShareKeyPolicy::Lenient`]; under
/// [`ShareKeyPolicy::Strict`] the first such album fails the call.
pub fn attach_share_keys(
    albums: Vec<Album>,
    links: &[SharedLink],
    policy: ShareKeyPolicy,
) -> Result<Vec<Album>, GalleryError> {
    let mut authorized = Vec::with_capacity(albums.len());
    for mut album in albums {
        match find_share_key(&album.id, links) {
            Some(key) => {
                album.share_key = Some(key.to_string());
                authorized.push(album);
            }
            None => match policy {
                ShareKeyPolicy::Lenient => {
                    debug!(album = %album.name, album_id = %album.id, "Dropping album without shared link");
                }
                ShareKeyPolicy::Strict => {
                    error!(album = %album.name, album_id = %album.id, "Album has no shared link");
                    return Err(GalleryError::MissingShareLink { album: album.name });
                }
            },
        }
    }
    Ok(authorized)
}

/// Case-insensitive exact match on the public name. `None` keeps every album.
pub fn filter_by_collection(albums: Vec<Album>, collection: Option<&str>) -> Vec<Album> {
    match collection {
        Some(wanted) => {
            let wanted = wanted.to_lowercase();
            albums
                .into_iter()
                .filter(|album| album.name.to_lowercase() == wanted)
                .collect()
        }
        None => albums,
    }
}

/// Collections for navigation: published, not excluded, and shareable.
///
/// The share-link check only gates visibility; no key ends up in the result.
pub fn visible_collections(
    albums: Vec<Album>,
    exclude: &[String],
    links: &[SharedLink],
    policy: ShareKeyPolicy,
) -> Result<Vec<Collection>, GalleryError> {
    let candidates: Vec<Album> = albums
        .into_iter()
        .filter(|album| !exclude.iter().any(|x| x.to_lowercase() == album.name.to_lowercase()))
        .collect();

    Ok(attach_share_keys(candidates, links, policy)?
        .into_iter()
        .map(|album| Collection {
            id: album.name.clone(),
            name: album.name,
        })
        .collect())
}
