use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CatalogError::MalformedResponse(err.to_string())
        } else {
            CatalogError::Network(err.to_string())
        }
    }
}

/// The geolocation provider could not produce a coordinate (permission
/// denied, provider failure). Distinct from "zero nearby events".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("device location unavailable")]
pub struct LocationUnavailable;
