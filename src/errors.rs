use thiserror::Error;

pub type Result<T> = std::result::Result<T, GridError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("Invalid code: '{0}'")]
    InvalidCode(String),

    #[error("Invalid coordinate: lat={latitude}, lng={longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("Coordinate outside the scheme domain: lat={latitude}, lng={longitude}")]
    OutOfDomain { latitude: f64, longitude: f64 },

    #[error("Vincenty iteration did not converge after {iterations} iterations")]
    NonconvergentGeodesic { iterations: usize },

    #[error("Unknown scheme: '{0}'")]
    UnknownScheme(String),

    #[error("Geohash error: {0}")]
    Geohash(String),
}

impl GridError {
    pub fn invalid_code(code: impl Into<String>) -> Self {
        GridError::InvalidCode(code.into())
    }
}

impl From<geohash::GeohashError> for GridError {
    fn from(err: geohash::GeohashError) -> Self {
        GridError::Geohash(err.to_string())
    }
}
