use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// --- Geo Types ---

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Haversine great-circle distance between two points in kilometers.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();
    EARTH_RADIUS_KM * c
}

// --- Type Tags ---

/// Closed tag vocabulary the catalog service understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeTag {
    Free,
    Paid,
    Festival,
    Concert,
    Dj,
}

impl TypeTag {
    /// Parse a wire string. Unknown strings yield `None` so tolerant readers
    /// can drop them instead of failing a whole page.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Some(TypeTag::Free),
            "paid" => Some(TypeTag::Paid),
            "festival" => Some(TypeTag::Festival),
            "concert" => Some(TypeTag::Concert),
            "dj" => Some(TypeTag::Dj),
            _ => None,
        }
    }

    /// The tag this one displaces when toggled on. `free` and `paid` are
    /// mutually exclusive; every other pair coexists.
    pub fn conflicts_with(self) -> Option<TypeTag> {
        match self {
            TypeTag::Free => Some(TypeTag::Paid),
            TypeTag::Paid => Some(TypeTag::Free),
            _ => None,
        }
    }
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeTag::Free => write!(f, "free"),
            TypeTag::Paid => write!(f, "paid"),
            TypeTag::Festival => write!(f, "festival"),
            TypeTag::Concert => write!(f, "concert"),
            TypeTag::Dj => write!(f, "dj"),
        }
    }
}

// --- Event ---

/// A catalog event as the remote service reports it. Read-only here: the
/// service owns identity and content, the engine only filters and orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub artist: String,
    pub genre: String,
    /// The single occurs-at timestamp.
    pub date: DateTime<Utc>,
    /// Free-form address line, distinct from the venue name.
    #[serde(default)]
    pub location: String,
    pub city: String,
    pub venue: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub ticket_url: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "de_type_tags")]
    pub type_tags: Vec<TypeTag>,
    /// Absent means free admission.
    #[serde(default)]
    pub ticket_price: Option<f64>,
}

impl Event {
    /// Coordinate, present only when the service sent both halves.
    pub fn geo(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(GeoPoint { lat, lng }),
            _ => None,
        }
    }

    pub fn is_free(&self) -> bool {
        self.ticket_price.is_none()
    }
}

/// Tolerant reader for the `type_tags` array: unknown vocabulary entries are
/// dropped, a missing or null field is an empty set.
fn de_type_tags<'de, D>(de: D) -> Result<Vec<TypeTag>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<String>> = Option::deserialize(de)?;
    Ok(raw
        .unwrap_or_default()
        .iter()
        .filter_map(|s| TypeTag::parse(s))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_zero_for_same_point() {
        let p = GeoPoint {
            lat: -32.9442,
            lng: -60.6505,
        };
        assert!(haversine_km(p, p) < 1e-9);
    }

    #[test]
    fn haversine_rosario_to_santa_fe() {
        // Rosario → Santa Fe is roughly 145 km as the crow flies.
        let rosario = GeoPoint {
            lat: -32.9442,
            lng: -60.6505,
        };
        let santa_fe = GeoPoint {
            lat: -31.6333,
            lng: -60.7000,
        };
        let d = haversine_km(rosario, santa_fe);
        assert!(d > 140.0 && d < 150.0, "got {d}");
    }

    #[test]
    fn unknown_tags_are_dropped_on_deserialize() {
        let json = serde_json::json!({
            "id": 1,
            "name": "Noche de Rock",
            "artist": "Los Persas",
            "genre": "rock",
            "date": "2025-03-10T23:00:00Z",
            "city": "Rosario",
            "venue": "Anfiteatro",
            "type_tags": ["free", "matinee", "concert"]
        });
        let event: Event = serde_json::from_value(json).unwrap();
        assert_eq!(event.type_tags, vec![TypeTag::Free, TypeTag::Concert]);
    }

    #[test]
    fn geo_requires_both_halves() {
        let json = serde_json::json!({
            "id": 2,
            "name": "x",
            "artist": "y",
            "genre": "z",
            "date": "2025-03-10T23:00:00Z",
            "city": "Rosario",
            "venue": "v",
            "latitude": -32.9
        });
        let event: Event = serde_json::from_value(json).unwrap();
        assert!(event.geo().is_none());
    }
}
