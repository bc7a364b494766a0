//! Distance- and recency-based discovery relative to a device coordinate.

use billboard_client::{CatalogClient, CatalogError, GeolocationProvider, LocationUnavailable};
use billboard_common::{haversine_km, is_upcoming, Event, GeoPoint};
use chrono::{Local, NaiveDate};
use thiserror::Error;

/// Default search radius, in kilometers.
pub const NEARBY_RADIUS_KM: f64 = 50.0;

/// Why a nearby query produced no list. `LocationUnavailable` is its own
/// variant so callers can tell "could not determine location" apart from a
/// successful query with zero results.
#[derive(Debug, Error)]
pub enum ProximityError {
    #[error(transparent)]
    Location(#[from] LocationUnavailable),

    #[error("nearby fetch failed: {0}")]
    Catalog(#[from] CatalogError),
}

/// Rank `candidates` for a viewer at `origin`: upcoming only (the shared
/// calendar-date rule), geo-coded only, within `radius_km`, closest first
/// with ties broken by ascending occurs-at.
pub fn rank_nearby(
    origin: GeoPoint,
    candidates: Vec<Event>,
    radius_km: f64,
    today: NaiveDate,
) -> Vec<Event> {
    let mut ranked: Vec<(f64, Event)> = candidates
        .into_iter()
        .filter_map(|event| {
            if !is_upcoming(event.date, today) {
                return None;
            }
            let point = event.geo()?;
            let distance = haversine_km(origin, point);
            (distance <= radius_km).then_some((distance, event))
        })
        .collect();

    ranked.sort_by(|a, b| {
        a.0.partial_cmp(&b.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.1.date.cmp(&b.1.date))
    });
    ranked.into_iter().map(|(_, event)| event).collect()
}

/// Orchestrates the one-shot nearby flow: geolocate, query the dedicated
/// nearby endpoint, rank. Shares no pagination state with the main catalog
/// query.
pub struct ProximityFilter<C, G> {
    client: C,
    provider: G,
    radius_km: f64,
}

impl<C: CatalogClient, G: GeolocationProvider> ProximityFilter<C, G> {
    pub fn new(client: C, provider: G) -> Self {
        Self {
            client,
            provider,
            radius_km: NEARBY_RADIUS_KM,
        }
    }

    pub fn with_radius(mut self, radius_km: f64) -> Self {
        self.radius_km = radius_km;
        self
    }

    pub async fn discover(&self) -> Result<Vec<Event>, ProximityError> {
        let origin = self.provider.current_coordinate().await?;
        tracing::debug!(lat = origin.lat, lng = origin.lng, "resolving nearby events");
        let candidates = self.client.fetch_nearby(origin, self.radius_km).await?;
        let today = Local::now().date_naive();
        Ok(rank_nearby(origin, candidates, self.radius_km, today))
    }
}
