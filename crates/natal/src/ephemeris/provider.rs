use crate::ephemeris::types::{EphemerisSnapshot, GeoLocation};
use crate::error::ChartError;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Invalid house system: {system}. Valid systems: {valid:?}")]
    InvalidHouseSystem { system: String, valid: Vec<String> },
    #[error("House calculation failed: {message}")]
    HouseCalculationFailed { message: String },
    #[error("Failed to read snapshot {path}: {source}")]
    SnapshotRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse snapshot {path}: {source}")]
    SnapshotParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Chart(#[from] ChartError),
}

/// Source of body longitudes and house cusps for a moment and place.
///
/// Cusps always come back as exactly twelve entries, house 1 first. A body
/// that cannot be computed is reported as an unavailable reading rather than
/// failing the whole call.
pub trait EphemerisProvider {
    fn positions_and_cusps(
        &mut self,
        utc: DateTime<Utc>,
        location: &GeoLocation,
    ) -> Result<EphemerisSnapshot, EphemerisError>;
}

impl<P: EphemerisProvider + ?Sized> EphemerisProvider for Box<P> {
    fn positions_and_cusps(
        &mut self,
        utc: DateTime<Utc>,
        location: &GeoLocation,
    ) -> Result<EphemerisSnapshot, EphemerisError> {
        (**self).positions_and_cusps(utc, location)
    }
}

/// House system mapping
pub const HOUSE_SYSTEMS: &[(&str, u8)] = &[
    ("placidus", b'P'),
    ("whole_sign", b'W'),
    ("koch", b'K'),
    ("equal", b'E'),
    ("regiomontanus", b'R'),
    ("campanus", b'C'),
    ("alcabitius", b'A'),
    ("morinus", b'M'),
];

/// Convert house system string to byte format
pub fn house_system_byte(house_system: &str) -> Result<u8, EphemerisError> {
    HOUSE_SYSTEMS
        .iter()
        .find(|(name, _)| *name == house_system.to_lowercase())
        .map(|(_, byte)| *byte)
        .ok_or_else(|| EphemerisError::InvalidHouseSystem {
            system: house_system.to_string(),
            valid: HOUSE_SYSTEMS.iter().map(|(name, _)| name.to_string()).collect(),
        })
}
