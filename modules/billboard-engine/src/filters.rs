//! The composed, immutable set of active browse criteria.

use std::collections::BTreeSet;

use billboard_client::CatalogQuery;
use billboard_common::{same_calendar_day, sanitize_search_text, Event, TypeTag};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::cursor::PageCursor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Active selection criteria. Immutable: every change builds a replacement
/// value, so equality checks and pagination resets stay cheap and
/// predictable. An absent or empty key means "no constraint on that
/// dimension", never "constraint on absence".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSet {
    pub genre: Option<String>,
    /// OR within the set; empty = no constraint.
    pub cities: BTreeSet<String>,
    /// Exact calendar-day match, not a range.
    pub date_exact: Option<NaiveDate>,
    /// `free` and `paid` never coexist here.
    pub type_tags: BTreeSet<TypeTag>,
    /// Stored sanitized; see `billboard_common::sanitize_search_text`.
    pub search_text: Option<String>,
    pub sort_order: SortOrder,
}

/// A partial update to a [`FilterSet`]. `None` leaves a key untouched; an
/// explicit empty value (`Some(None)`, an empty set, an empty string)
/// clears it.
#[derive(Debug, Clone, Default)]
pub struct FilterPatch {
    pub genre: Option<Option<String>>,
    pub cities: Option<BTreeSet<String>>,
    pub date_exact: Option<Option<NaiveDate>>,
    pub type_tags: Option<BTreeSet<TypeTag>>,
    pub search_text: Option<Option<String>>,
    pub sort_order: Option<SortOrder>,
}

impl FilterPatch {
    pub fn genre(value: impl Into<String>) -> Self {
        Self {
            genre: Some(Some(value.into())),
            ..Self::default()
        }
    }

    pub fn clear_genre() -> Self {
        Self {
            genre: Some(None),
            ..Self::default()
        }
    }

    pub fn cities<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cities: Some(values.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    pub fn date_exact(day: NaiveDate) -> Self {
        Self {
            date_exact: Some(Some(day)),
            ..Self::default()
        }
    }

    pub fn clear_date() -> Self {
        Self {
            date_exact: Some(None),
            ..Self::default()
        }
    }

    pub fn search(value: impl Into<String>) -> Self {
        Self {
            search_text: Some(Some(value.into())),
            ..Self::default()
        }
    }

    pub fn sort(order: SortOrder) -> Self {
        Self {
            sort_order: Some(order),
            ..Self::default()
        }
    }
}

impl FilterSet {
    /// Shallow-merge `patch` into this set, producing the replacement value.
    /// Search text is sanitized here so a FilterSet never holds a raw value.
    pub fn merged(&self, patch: &FilterPatch) -> FilterSet {
        let mut next = self.clone();
        if let Some(genre) = &patch.genre {
            next.genre = genre.clone().filter(|g| !g.is_empty());
        }
        if let Some(cities) = &patch.cities {
            next.cities = cities.clone();
        }
        if let Some(date) = patch.date_exact {
            next.date_exact = date;
        }
        if let Some(tags) = &patch.type_tags {
            next.type_tags = normalize_tags(tags);
        }
        if let Some(search) = &patch.search_text {
            next.search_text = search
                .as_deref()
                .map(|s| sanitize_search_text(s).text)
                .filter(|s| !s.is_empty());
        }
        if let Some(order) = patch.sort_order {
            next.sort_order = order;
        }
        next
    }

    /// Toggle one tag, producing the replacement set. Toggling on a tag
    /// removes the tag it conflicts with, so the most recent toggle wins.
    pub fn toggle_tag(&self, tag: TypeTag) -> FilterSet {
        let mut next = self.clone();
        if !next.type_tags.remove(&tag) {
            if let Some(conflict) = tag.conflicts_with() {
                next.type_tags.remove(&conflict);
            }
            next.type_tags.insert(tag);
        }
        next
    }

    /// The derived predicate: logical AND across present dimensions, OR
    /// within a multi-valued one.
    pub fn matches(&self, event: &Event) -> bool {
        if let Some(genre) = &self.genre {
            if &event.genre != genre {
                return false;
            }
        }
        if !self.cities.is_empty() && !self.cities.contains(&event.city) {
            return false;
        }
        if let Some(day) = self.date_exact {
            if !same_calendar_day(event.date, day) {
                return false;
            }
        }
        if !self.type_tags.is_empty()
            && !self.type_tags.iter().any(|t| event.type_tags.contains(t))
        {
            return false;
        }
        if let Some(search) = &self.search_text {
            let needle = search.to_lowercase();
            let hit = event.name.to_lowercase().contains(&needle)
                || event.artist.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }
        true
    }

    /// Project onto the wire query for one pagination window. When no exact
    /// date is selected the query carries a `date_from` floor of `today`, so
    /// default browsing only ever shows upcoming events; the stored
    /// FilterSet is not changed by this.
    pub fn to_query(&self, cursor: PageCursor, today: NaiveDate) -> CatalogQuery {
        CatalogQuery {
            skip: cursor.offset,
            limit: cursor.page_size,
            genre: self.genre.clone(),
            cities: self.cities.iter().cloned().collect(),
            date_exact: self.date_exact,
            date_from: self.date_exact.is_none().then_some(today),
            type_tags: self.type_tags.iter().copied().collect(),
            search: self.search_text.clone(),
            descending: self.sort_order == SortOrder::Descending,
        }
    }
}

/// Re-apply a wholesale tag set as successive inserts so the mutual
/// exclusion between `free` and `paid` holds whatever the caller sent.
fn normalize_tags(tags: &BTreeSet<TypeTag>) -> BTreeSet<TypeTag> {
    let mut out = BTreeSet::new();
    for &tag in tags {
        if let Some(conflict) = tag.conflicts_with() {
            out.remove(&conflict);
        }
        out.insert(tag);
    }
    out
}
