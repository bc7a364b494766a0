//! The in-memory catalog must honor the same query semantics the real
//! service documents, or every engine test built on it proves nothing.

use billboard_client::{CatalogClient, CatalogQuery, MemoryCatalog};
use billboard_common::{Event, TypeTag};
use chrono::{TimeZone, Utc};

fn event(id: i64, name: &str, artist: &str, tags: Vec<TypeTag>) -> Event {
    Event {
        id,
        name: name.into(),
        artist: artist.into(),
        genre: "rock".into(),
        date: Utc.with_ymd_and_hms(2030, 1, 1, 21, 0, 0).unwrap()
            + chrono::Duration::days(id),
        location: String::new(),
        city: "Rosario".into(),
        venue: "Anfiteatro".into(),
        description: String::new(),
        image_url: None,
        ticket_url: None,
        is_featured: false,
        latitude: None,
        longitude: None,
        type_tags: tags,
        ticket_price: None,
    }
}

fn query() -> CatalogQuery {
    CatalogQuery {
        skip: 0,
        limit: 100,
        genre: None,
        cities: Vec::new(),
        date_exact: None,
        date_from: None,
        type_tags: Vec::new(),
        search: None,
        descending: false,
    }
}

#[tokio::test]
async fn descending_order_reverses_by_occurs_at() {
    let catalog = MemoryCatalog::new(vec![
        event(1, "Primero", "A", vec![]),
        event(2, "Segundo", "B", vec![]),
        event(3, "Tercero", "C", vec![]),
    ]);

    let mut q = query();
    q.descending = true;
    let page = catalog.fetch_page(&q).await.unwrap();
    let ids: Vec<i64> = page.items.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

#[tokio::test]
async fn tag_filter_is_or_within_the_dimension() {
    let catalog = MemoryCatalog::new(vec![
        event(1, "Gratis", "A", vec![TypeTag::Free]),
        event(2, "Fiesta", "B", vec![TypeTag::Dj]),
        event(3, "Recital", "C", vec![TypeTag::Concert]),
    ]);

    let mut q = query();
    q.type_tags = vec![TypeTag::Free, TypeTag::Dj];
    let page = catalog.fetch_page(&q).await.unwrap();
    let ids: Vec<i64> = page.items.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(page.total_count, 2);
}

#[tokio::test]
async fn search_matches_name_or_artist() {
    let catalog = MemoryCatalog::new(vec![
        event(1, "Noche de Rock", "Los Persas", vec![]),
        event(2, "Jazz al Río", "Trio Azul", vec![]),
    ]);

    let mut q = query();
    q.search = Some("persas".into());
    let page = catalog.fetch_page(&q).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, 1);
}

#[tokio::test]
async fn pagination_window_slices_after_filtering() {
    let catalog = MemoryCatalog::new((1..=30).map(|i| event(i, "Show", "X", vec![])).collect());

    let mut q = query();
    q.skip = 24;
    q.limit = 12;
    let page = catalog.fetch_page(&q).await.unwrap();
    assert_eq!(page.items.len(), 6);
    assert_eq!(page.total_count, 30);
    assert_eq!(page.items[0].id, 25);
}
