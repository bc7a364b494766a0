use std::time::Duration;

use async_trait::async_trait;
use billboard_common::{Config, Event, GeoPoint};

use crate::error::{CatalogError, Result};
use crate::query::{CatalogQuery, Page};
use crate::traits::CatalogClient;

/// Production catalog client over HTTP.
///
/// Filters serialize as optional query parameters (absent means omitted).
/// The transport carries its own timeout but no retry; retry policy belongs
/// to the caller.
pub struct HttpCatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalogClient {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.api_base_url)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.client.get(&url).query(params).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.json().await?)
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn fetch_page(&self, query: &CatalogQuery) -> Result<Page> {
        tracing::debug!(skip = query.skip, limit = query.limit, "fetching catalog page");
        self.get_json("/events", &query.query_pairs()).await
    }

    async fn fetch_nearby(&self, origin: GeoPoint, radius_km: f64) -> Result<Vec<Event>> {
        let params = [
            ("lat", origin.lat.to_string()),
            ("lng", origin.lng.to_string()),
            ("radius_km", radius_km.to_string()),
        ];
        self.get_json("/events/nearby", &params).await
    }

    async fn fetch_event(&self, id: i64) -> Result<Event> {
        self.get_json(&format!("/events/{id}"), &[]).await
    }

    async fn fetch_cities(&self) -> Result<Vec<String>> {
        self.get_json("/events/filters/cities", &[]).await
    }

    async fn fetch_genres(&self) -> Result<Vec<String>> {
        self.get_json("/events/filters/genres", &[]).await
    }
}
