//! HTTP plumbing shared by both backends, and the Immich implementation of [`PhotoApi`].

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

use crate::config::ImmichConnection;
use crate::contract::PhotoApi;
use crate::error::{FetchError, GalleryError};
use crate::immich_types::{AlbumCollectionResponse, AlbumResponse, SharedKeysResponse};

/// Header Immich expects the API key in.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Read-only JSON client bound to one base URL.
///
/// When an API key is configured it is sent with every request.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, api_key: Option<String>) -> Self {
        Self::with_client(Client::new(), base_url, api_key)
    }

    /// Use a preconfigured reqwest client (proxy, TLS or timeout settings).
    pub fn with_client(http: Client, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET `{base_url}{path}` and decode the JSON body as `T`.
    ///
    /// Non-2xx responses become [`FetchError`] carrying status and reason phrase. The body is not
    /// validated beyond what `T`'s `Deserialize` impl requires.
    pub async fn fetch_resource<T: DeserializeOwned>(&self, path: &str) -> Result<T, GalleryError> {
        let url = self.url_for(path);
        debug!(url = %url, "Fetching resource");

        let mut request = self.http.get(&url);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await.map_err(|e| {
            error!(error = ?e, url = %url, "Request to remote API failed");
            e
        })?;

        let status = response.status();
        if !status.is_success() {
            error!(status = %status, url = %url, "Remote API returned error status");
            return Err(FetchError {
                url,
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            }
            .into());
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| {
            error!(error = %source, url = %url, "Failed to decode response JSON");
            GalleryError::Decode { url, source }
        })
    }
}

/// Immich REST client.
pub struct ImmichClient {
    api: ApiClient,
}

impl ImmichClient {
    pub fn new(connection: &ImmichConnection) -> Self {
        info!(base_url = %connection.base_url, "Initialized Immich client");
        Self {
            api: ApiClient::new(&connection.base_url, Some(connection.api_key.clone())),
        }
    }

    /// Build a client from `IMMICH_BASE_URL` and `IMMICH_API_KEY`.
    pub fn new_from_env() -> Result<Self, GalleryError> {
        let connection = ImmichConnection::from_env()?;
        Ok(Self::new(&connection))
    }
}

#[async_trait]
impl PhotoApi for ImmichClient {
    async fn list_albums(&self) -> Result<AlbumCollectionResponse, GalleryError> {
        let albums: AlbumCollectionResponse = self.api.fetch_resource("/api/albums").await?;
        info!(count = albums.len(), "Fetched album list");
        Ok(albums)
    }

    async fn get_album(&self, album_id: &str) -> Result<AlbumResponse, GalleryError> {
        let album: AlbumResponse = self
            .api
            .fetch_resource(&format!("/api/albums/{album_id}"))
            .await?;
        debug!(album_id, assets = album.assets.len(), "Fetched album detail");
        Ok(album)
    }

    async fn list_shared_links(&self) -> Result<SharedKeysResponse, GalleryError> {
        let links: SharedKeysResponse = self.api.fetch_resource("/api/shared-links").await?;
        info!(count = links.len(), "Fetched shared links");
        Ok(links)
    }

    fn base_url(&self) -> String {
        self.api.base_url().to_string()
    }
}
