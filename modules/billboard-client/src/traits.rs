//! Seams to the outside world.

use std::sync::Arc;

use async_trait::async_trait;
use billboard_common::{Event, GeoPoint};

use crate::error::{LocationUnavailable, Result};
use crate::query::{CatalogQuery, Page};

/// The remote catalog service. Accepts filter parameters plus a pagination
/// window and answers with an ordered page and a total count.
///
/// Implemented by `HttpCatalogClient` (production) and `MemoryCatalog`
/// (tests). Also implemented for `Arc<C>` so one client can back several
/// engines.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// One page of the main catalog query.
    async fn fetch_page(&self, query: &CatalogQuery) -> Result<Page>;

    /// Events within `radius_km` of `origin`. Separate endpoint; shares no
    /// pagination state with the main query.
    async fn fetch_nearby(&self, origin: GeoPoint, radius_km: f64) -> Result<Vec<Event>>;

    /// Single-event detail lookup.
    async fn fetch_event(&self, id: i64) -> Result<Event>;

    /// Distinct city values for filter controls.
    async fn fetch_cities(&self) -> Result<Vec<String>>;

    /// Distinct genre values for filter controls.
    async fn fetch_genres(&self) -> Result<Vec<String>>;
}

/// One-shot device coordinate lookup. May fail silently on the platform
/// side; that surfaces here as [`LocationUnavailable`].
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    async fn current_coordinate(&self) -> std::result::Result<GeoPoint, LocationUnavailable>;
}

#[async_trait]
impl<C: CatalogClient + ?Sized> CatalogClient for Arc<C> {
    async fn fetch_page(&self, query: &CatalogQuery) -> Result<Page> {
        (**self).fetch_page(query).await
    }

    async fn fetch_nearby(&self, origin: GeoPoint, radius_km: f64) -> Result<Vec<Event>> {
        (**self).fetch_nearby(origin, radius_km).await
    }

    async fn fetch_event(&self, id: i64) -> Result<Event> {
        (**self).fetch_event(id).await
    }

    async fn fetch_cities(&self) -> Result<Vec<String>> {
        (**self).fetch_cities().await
    }

    async fn fetch_genres(&self) -> Result<Vec<String>> {
        (**self).fetch_genres().await
    }
}

#[async_trait]
impl<G: GeolocationProvider + ?Sized> GeolocationProvider for Arc<G> {
    async fn current_coordinate(&self) -> std::result::Result<GeoPoint, LocationUnavailable> {
        (**self).current_coordinate().await
    }
}
