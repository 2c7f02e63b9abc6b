use std::time::Duration;

use catalog_logging::{catalog_debug, catalog_info};
use futures_util::StreamExt;
use reqwest::{StatusCode, Url};

use crate::{CharacterPage, FailureKind, FetchError};

pub const DEFAULT_BASE_URL: &str = "https://rickandmortyapi.com/api/";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// The remote listing API.
#[async_trait::async_trait]
pub trait CharacterFetcher: Send + Sync {
    /// Fetches one listing page. `params` are sent as query parameters in
    /// the given order.
    async fn fetch_page(&self, params: &[(String, String)]) -> Result<CharacterPage, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
    endpoint: Url,
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let endpoint = character_endpoint(&settings.base_url)?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            settings,
            endpoint,
            client,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Full request URL for `params`.
    pub fn request_url(&self, params: &[(String, String)]) -> Url {
        let mut url = self.endpoint.clone();
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        url
    }
}

fn character_endpoint(base_url: &str) -> Result<Url, FetchError> {
    let mut base = Url::parse(base_url)
        .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
    // Without a trailing slash `join` would replace the last path segment.
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("character")
        .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))
}

#[async_trait::async_trait]
impl CharacterFetcher for ReqwestFetcher {
    async fn fetch_page(&self, params: &[(String, String)]) -> Result<CharacterPage, FetchError> {
        let url = self.request_url(params);
        catalog_debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        // The API answers searches without matches with 404.
        if status == StatusCode::NOT_FOUND {
            catalog_info!("No characters for {}", url);
            return Ok(CharacterPage::default());
        }
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(too_large(self.settings.max_bytes, content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(too_large(self.settings.max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }

        let page: CharacterPage = serde_json::from_slice(&bytes)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;
        catalog_debug!(
            "Fetched {} of {} characters from {}",
            page.results.len(),
            page.info.count,
            url
        );
        Ok(page)
    }
}

fn too_large(max_bytes: u64, actual: u64) -> FetchError {
    FetchError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return FetchError::new(FailureKind::Decode, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
