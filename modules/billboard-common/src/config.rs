use std::env;

/// Runtime configuration loaded from environment variables. Everything has a
/// workable default so an embedding UI can construct the stack with no setup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote catalog service.
    pub api_base_url: String,
    /// Items requested per page.
    pub page_size: u32,
    /// Radius for the nearby query, in kilometers.
    pub nearby_radius_km: f64,
    /// Baseline seconds for one full carousel traversal from rest.
    pub carousel_base_secs: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            page_size: 12,
            nearby_radius_km: 50.0,
            carousel_base_secs: 60.0,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults. Panics with a clear message on unparseable numbers.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: env::var("BILLBOARD_API_URL").unwrap_or(defaults.api_base_url),
            page_size: env::var("BILLBOARD_PAGE_SIZE")
                .map(|v| v.parse().expect("BILLBOARD_PAGE_SIZE must be a number"))
                .unwrap_or(defaults.page_size),
            nearby_radius_km: env::var("BILLBOARD_NEARBY_RADIUS_KM")
                .map(|v| {
                    v.parse()
                        .expect("BILLBOARD_NEARBY_RADIUS_KM must be a number")
                })
                .unwrap_or(defaults.nearby_radius_km),
            carousel_base_secs: env::var("BILLBOARD_CAROUSEL_BASE_SECS")
                .map(|v| {
                    v.parse()
                        .expect("BILLBOARD_CAROUSEL_BASE_SECS must be a number")
                })
                .unwrap_or(defaults.carousel_base_secs),
        }
    }
}
