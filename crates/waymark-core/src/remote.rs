//! Remote city store client.
//!
//! Speaks the key-ordered REST collection contract: list, lookup by id,
//! create, delete. The concrete [`RemoteCityStore`] sits behind the
//! [`CityBackend`] trait so the controller can be exercised without a
//! network.

use serde::Deserialize;

use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::models::{City, CityDraft, CityId};
use crate::util::compact_text;

/// Trait for city storage operations consumed by the controller.
pub trait CityBackend {
    /// Fetch the full city collection
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<City>>> + Send;

    /// Fetch a single city by id
    fn get(&self, id: CityId) -> impl std::future::Future<Output = Result<City>> + Send;

    /// Persist a new city, returning the record with its assigned id
    fn create(&self, draft: &CityDraft) -> impl std::future::Future<Output = Result<City>> + Send;

    /// Delete a city by id
    fn remove(&self, id: CityId) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// HTTP implementation of [`CityBackend`].
#[derive(Debug, Clone)]
pub struct RemoteCityStore {
    base_url: String,
    client: reqwest::Client,
}

impl RemoteCityStore {
    /// Build a client for the configured store endpoint.
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            base_url: config.base_url().to_string(),
            client,
        })
    }

    fn cities_url(&self) -> String {
        format!("{}/cities", self.base_url)
    }

    fn city_url(&self, id: CityId) -> String {
        format!("{}/cities/{id}", self.base_url)
    }
}

impl CityBackend for RemoteCityStore {
    async fn list(&self) -> Result<Vec<City>> {
        let response = self.client.get(self.cities_url()).send().await?;
        let response = check_status(response).await?;
        Ok(response.json::<Vec<City>>().await?)
    }

    async fn get(&self, id: CityId) -> Result<City> {
        let response = self
            .client
            .get(self.cities_url())
            .query(&[("id", id.to_string())])
            .send()
            .await?;
        let response = check_status(response).await?;

        // the store answers id lookups with a zero-or-one element array
        let mut matches = response.json::<Vec<City>>().await?;
        if matches.is_empty() {
            return Err(Error::NotFound(id));
        }
        Ok(matches.remove(0))
    }

    async fn create(&self, draft: &CityDraft) -> Result<City> {
        let response = self
            .client
            .post(self.cities_url())
            .json(draft)
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json::<City>().await?)
    }

    async fn remove(&self, id: CityId) -> Result<()> {
        let response = self.client.delete(self.city_url(id)).send().await?;
        check_status(response).await?;
        Ok(())
    }
}

/// Turn a non-success response into a typed API error, body included.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Api {
            status: status.as_u16(),
            message: parse_api_error(status, &body),
        });
    }
    Ok(response)
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
    message: Option<String>,
}

fn parse_api_error(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ApiErrorBody>(body) {
        if let Some(message) = payload.message.or(payload.error) {
            return format!("{} ({})", message.trim(), status.as_u16());
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", compact_text(trimmed), status.as_u16())
    }
}
