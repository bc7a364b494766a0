//! In-memory collaborators for tests. No network required.

use std::sync::Mutex;

use async_trait::async_trait;
use billboard_common::{haversine_km, same_calendar_day, Event, GeoPoint};

use crate::error::{CatalogError, LocationUnavailable, Result};
use crate::query::{CatalogQuery, Page};
use crate::traits::{CatalogClient, GeolocationProvider};

/// A catalog service simulated over a seeded event list. Applies the same
/// filter semantics the real service documents (AND across dimensions, OR
/// within a multi-valued one), records every received query for assertions,
/// and can be scripted to fail the next call.
pub struct MemoryCatalog {
    events: Mutex<Vec<Event>>,
    queries: Mutex<Vec<CatalogQuery>>,
    fail_next: Mutex<Option<CatalogError>>,
}

impl MemoryCatalog {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events: Mutex::new(events),
            queries: Mutex::new(Vec::new()),
            fail_next: Mutex::new(None),
        }
    }

    /// Replace the seeded events (e.g. to simulate concurrent deletions).
    pub fn set_events(&self, events: Vec<Event>) {
        *self.events.lock().unwrap() = events;
    }

    /// Queries received so far, oldest first.
    pub fn queries(&self) -> Vec<CatalogQuery> {
        self.queries.lock().unwrap().clone()
    }

    /// Make the next `fetch_page` fail with `err`.
    pub fn fail_next(&self, err: CatalogError) {
        *self.fail_next.lock().unwrap() = Some(err);
    }

    fn matches(query: &CatalogQuery, event: &Event) -> bool {
        if let Some(genre) = &query.genre {
            if &event.genre != genre {
                return false;
            }
        }
        if !query.cities.is_empty() && !query.cities.contains(&event.city) {
            return false;
        }
        if let Some(day) = query.date_exact {
            if !same_calendar_day(event.date, day) {
                return false;
            }
        }
        if let Some(floor) = query.date_from {
            if event.date.date_naive() < floor {
                return false;
            }
        }
        if !query.type_tags.is_empty()
            && !query.type_tags.iter().any(|t| event.type_tags.contains(t))
        {
            return false;
        }
        if let Some(search) = &query.search {
            let needle = search.to_lowercase();
            let hit = event.name.to_lowercase().contains(&needle)
                || event.artist.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }
        true
    }
}

#[async_trait]
impl CatalogClient for MemoryCatalog {
    async fn fetch_page(&self, query: &CatalogQuery) -> Result<Page> {
        self.queries.lock().unwrap().push(query.clone());

        if let Some(err) = self.fail_next.lock().unwrap().take() {
            return Err(err);
        }

        let mut matched: Vec<Event> = self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| Self::matches(query, e))
            .cloned()
            .collect();
        matched.sort_by_key(|e| (e.date, e.id));
        if query.descending {
            matched.reverse();
        }

        let total_count = matched.len() as u32;
        let items: Vec<Event> = matched
            .into_iter()
            .skip(query.skip as usize)
            .take(query.limit as usize)
            .collect();

        Ok(Page { items, total_count })
    }

    async fn fetch_nearby(&self, origin: GeoPoint, radius_km: f64) -> Result<Vec<Event>> {
        let events = self.events.lock().unwrap();
        Ok(events
            .iter()
            .filter(|e| {
                e.geo()
                    .is_some_and(|p| haversine_km(origin, p) <= radius_km)
            })
            .cloned()
            .collect())
    }

    async fn fetch_event(&self, id: i64) -> Result<Event> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or(CatalogError::Api {
                status: 404,
                message: "Event not found".to_string(),
            })
    }

    async fn fetch_cities(&self) -> Result<Vec<String>> {
        let mut cities: Vec<String> = self
            .events
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.city.clone())
            .collect();
        cities.sort();
        cities.dedup();
        Ok(cities)
    }

    async fn fetch_genres(&self) -> Result<Vec<String>> {
        let mut genres: Vec<String> = self
            .events
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.genre.clone())
            .collect();
        genres.sort();
        genres.dedup();
        Ok(genres)
    }
}

/// Geolocation double: either a fixed coordinate or always unavailable.
pub struct StaticLocation {
    coordinate: Option<GeoPoint>,
}

impl StaticLocation {
    pub fn at(coordinate: GeoPoint) -> Self {
        Self {
            coordinate: Some(coordinate),
        }
    }

    pub fn unavailable() -> Self {
        Self { coordinate: None }
    }
}

#[async_trait]
impl GeolocationProvider for StaticLocation {
    async fn current_coordinate(&self) -> std::result::Result<GeoPoint, LocationUnavailable> {
        self.coordinate.ok_or(LocationUnavailable)
    }
}
