use billboard_common::TypeTag;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use billboard_common::Event;

/// Wire-level projection of the active filters plus the pagination window.
///
/// This is what actually crosses the boundary to the catalog service; the
/// engine derives it from its `FilterSet` and `PageCursor` on every fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogQuery {
    pub skip: u32,
    pub limit: u32,
    pub genre: Option<String>,
    pub cities: Vec<String>,
    /// Exact calendar-day match.
    pub date_exact: Option<NaiveDate>,
    /// Inclusive lower bound; carries the default "upcoming only" floor.
    pub date_from: Option<NaiveDate>,
    pub type_tags: Vec<TypeTag>,
    pub search: Option<String>,
    /// Descending by occurs-at. Ascending is the service default.
    pub descending: bool,
}

impl CatalogQuery {
    /// Serialize to query parameters. Absent optional filters are omitted
    /// entirely, never sent as empty values; multi-valued dimensions repeat
    /// their key.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("skip", self.skip.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(genre) = &self.genre {
            pairs.push(("genre", genre.clone()));
        }
        for city in &self.cities {
            pairs.push(("city", city.clone()));
        }
        if let Some(day) = self.date_exact {
            pairs.push(("date", day.format("%Y-%m-%d").to_string()));
        }
        if let Some(day) = self.date_from {
            pairs.push(("date_from", day.format("%Y-%m-%d").to_string()));
        }
        for tag in &self.type_tags {
            pairs.push(("tag", tag.to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if self.descending {
            pairs.push(("order", "desc".to_string()));
        }
        pairs
    }
}

/// One page of results plus the total the query matched, so callers can
/// derive whether more pages exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub items: Vec<Event>,
    #[serde(rename = "total")]
    pub total_count: u32,
}
