use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::error::GalleryError;

pub const DEFAULT_ALBUM_PREFIX: &str = "public_";
pub const DEFAULT_LIST_TAG: &str = "public";

pub const IMMICH_BASE_URL_VAR: &str = "IMMICH_BASE_URL";
pub const IMMICH_API_KEY_VAR: &str = "IMMICH_API_KEY";

/// What to do with a qualifying album that has no active share link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareKeyPolicy {
    /// Drop the album silently.
    #[default]
    Lenient,
    /// Fail the call, naming the album.
    Strict,
}

/// Where the Immich server lives and how to authenticate. Comes from the environment only.
#[derive(Clone)]
pub struct ImmichConnection {
    pub base_url: String,
    pub api_key: String,
}

impl std::fmt::Debug for ImmichConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImmichConnection")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl ImmichConnection {
    pub fn from_env() -> Result<Self, GalleryError> {
        let base_url = required_env(IMMICH_BASE_URL_VAR)?;
        let api_key = required_env(IMMICH_API_KEY_VAR)?;
        info!(base_url = %base_url, api_key_set = !api_key.is_empty(), "Loaded Immich connection from env");
        Ok(Self { base_url, api_key })
    }
}

fn required_env(name: &str) -> Result<String, GalleryError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        Ok(_) => {
            error!(var = name, "Environment variable is empty");
            Err(GalleryError::Config(format!("{name} environment variable is empty")))
        }
        Err(e) => {
            error!(error = ?e, var = name, "Environment variable not set");
            Err(GalleryError::Config(format!("{name} environment variable not set: {e}")))
        }
    }
}

/// How albums are selected and authorized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumSettings {
    #[serde(default = "default_album_prefix")]
    pub album_prefix: String,
    #[serde(default)]
    pub share_key_policy: ShareKeyPolicy,
}

impl Default for AlbumSettings {
    fn default() -> Self {
        Self {
            album_prefix: default_album_prefix(),
            share_key_policy: ShareKeyPolicy::default(),
        }
    }
}

fn default_album_prefix() -> String {
    DEFAULT_ALBUM_PREFIX.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudinarySettings {
    pub cloud_name: String,
    #[serde(default = "default_list_tag")]
    pub list_tag: String,
}

fn default_list_tag() -> String {
    DEFAULT_LIST_TAG.to_string()
}

#[derive(Debug, Clone)]
pub enum BackendConfig {
    Immich {
        connection: ImmichConnection,
        albums: AlbumSettings,
    },
    Cloudinary(CloudinarySettings),
}

/// Fully merged configuration: static file plus environment.
#[derive(Debug, Clone)]
pub struct GalleryConfig {
    pub backend: BackendConfig,
}

impl GalleryConfig {
    pub fn trace_loaded(&self) {
        match &self.backend {
            BackendConfig::Immich { connection, albums } => info!(
                backend = "immich",
                base_url = %connection.base_url,
                album_prefix = %albums.album_prefix,
                share_key_policy = ?albums.share_key_policy,
                "Loaded GalleryConfig"
            ),
            BackendConfig::Cloudinary(c) => info!(
                backend = "cloudinary",
                cloud_name = %c.cloud_name,
                list_tag = %c.list_tag,
                "Loaded GalleryConfig"
            ),
        }
        debug!(backend = ?self.backend, "GalleryConfig loaded (full debug)");
    }
}
