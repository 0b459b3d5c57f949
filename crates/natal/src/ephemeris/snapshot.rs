//! Ephemeris backed by a precomputed JSON file.
//!
//! ```json
//! {
//!   "utc": "1991-06-18T01:40:00Z",
//!   "bodies": [{ "body": "sun", "longitude": 86.9 }, { "body": "chiron", "longitude": null }],
//!   "cusps": [101.2, 122.0, 145.3, 175.8, 210.4, 245.1, 281.2, 302.0, 325.3, 355.8, 30.4, 65.1],
//!   "ascendant": 101.2,
//!   "midheaven": 355.8
//! }
//! ```

use crate::chart::HouseCusps;
use crate::ephemeris::provider::{EphemerisError, EphemerisProvider};
use crate::ephemeris::types::{
    Body, BodyReading, CelestialBody, EphemerisSnapshot, GeoLocation, UnavailableBody,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub body: Body,
    #[serde(default)]
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotFile {
    #[serde(default)]
    pub utc: Option<DateTime<Utc>>,
    pub bodies: Vec<SnapshotEntry>,
    pub cusps: HouseCusps,
    #[serde(default)]
    pub ascendant: Option<f64>,
    #[serde(default)]
    pub midheaven: Option<f64>,
}

impl SnapshotFile {
    pub fn into_snapshot(self) -> EphemerisSnapshot {
        let readings: Vec<BodyReading> = self
            .bodies
            .into_iter()
            .map(|entry| match entry.longitude {
                Some(longitude) => Ok(CelestialBody::new(entry.body, longitude)),
                None => Err(UnavailableBody {
                    body: entry.body,
                    message: "no longitude in snapshot".to_string(),
                }),
            })
            .collect();
        let ascendant = self.ascendant.unwrap_or_else(|| self.cusps.ascendant());
        // Quadrant systems put the MC on cusp 10; fall back to it when absent.
        let midheaven = self
            .midheaven
            .unwrap_or_else(|| self.cusps.cusp(10).unwrap_or(ascendant));
        EphemerisSnapshot {
            readings,
            cusps: self.cusps,
            ascendant,
            midheaven,
        }
    }
}

/// Serves the same snapshot on every call.
pub struct SnapshotEphemeris {
    path: PathBuf,
    file: SnapshotFile,
}

impl SnapshotEphemeris {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EphemerisError> {
        let path = path.as_ref().to_path_buf();
        let text = fs::read_to_string(&path).map_err(|source| EphemerisError::SnapshotRead {
            path: path.display().to_string(),
            source,
        })?;
        let file: SnapshotFile =
            serde_json::from_str(&text).map_err(|source| EphemerisError::SnapshotParse {
                path: path.display().to_string(),
                source,
            })?;
        log::info!("loaded ephemeris snapshot {} ({} bodies)", path.display(), file.bodies.len());
        Ok(Self { path, file })
    }

    pub fn from_file(file: SnapshotFile) -> Self {
        Self {
            path: PathBuf::from("<memory>"),
            file,
        }
    }
}

impl EphemerisProvider for SnapshotEphemeris {
    fn positions_and_cusps(
        &mut self,
        utc: DateTime<Utc>,
        _location: &GeoLocation,
    ) -> Result<EphemerisSnapshot, EphemerisError> {
        if let Some(recorded) = self.file.utc {
            if recorded != utc {
                log::warn!(
                    "snapshot {} was computed for {}, requested {}",
                    self.path.display(),
                    recorded,
                    utc
                );
            }
        }
        Ok(self.file.clone().into_snapshot())
    }
}
