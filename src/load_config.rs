use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::Deserialize;
use tracing::{error, info};

use crate::config::{
    AlbumSettings, BackendConfig, CloudinarySettings, GalleryConfig, ImmichConnection,
};

#[derive(Deserialize)]
struct StaticConfig {
    backend: BackendYaml,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum BackendYaml {
    Immich(AlbumSettings),
    Cloudinary(CloudinarySettings),
}

/// Loads a static YAML config file (no secrets) and merges the Immich connection from the
/// environment (`IMMICH_BASE_URL`, `IMMICH_API_KEY`) when the immich backend is selected.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<GalleryConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => content,
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!("Failed to read config file {:?}: {}", path_ref, e));
        }
    };

    let static_conf: StaticConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    let backend = match static_conf.backend {
        BackendYaml::Immich(albums) => {
            if albums.album_prefix.is_empty() {
                error!("album_prefix must not be empty");
                anyhow::bail!("album_prefix must not be empty");
            }
            let connection = ImmichConnection::from_env()?;
            BackendConfig::Immich { connection, albums }
        }
        BackendYaml::Cloudinary(settings) => BackendConfig::Cloudinary(settings),
    };

    let config = GalleryConfig { backend };
    config.trace_loaded();
    Ok(config)
}
