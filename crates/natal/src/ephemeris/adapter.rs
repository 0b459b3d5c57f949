use crate::chart::HouseCusps;
use crate::ephemeris::provider::{house_system_byte, EphemerisError, EphemerisProvider};
use crate::ephemeris::types::{
    Body, BodyReading, CelestialBody, EphemerisSettings, EphemerisSnapshot, GeoLocation,
    UnavailableBody,
};
use crate::western::normalize_degrees;
use chrono::{DateTime, Datelike, Timelike, Utc};
use std::env;
use std::path::PathBuf;
use swisseph::swe::{calc_ut, houses_ex, julday};

/// FLG_SWIEPH: use the Swiss Ephemeris data files.
const FLG_SWIEPH: i32 = 2;
/// GREG_CAL
const GREGORIAN: i32 = 1;

/// Swiss Ephemeris body numbers. TRUE_NODE is 11, CHIRON 15.
fn swiss_body_code(body: Body) -> Option<u32> {
    match body {
        Body::Sun => Some(0),
        Body::Moon => Some(1),
        Body::Mercury => Some(2),
        Body::Venus => Some(3),
        Body::Mars => Some(4),
        Body::Jupiter => Some(5),
        Body::Saturn => Some(6),
        Body::Uranus => Some(7),
        Body::Neptune => Some(8),
        Body::Pluto => Some(9),
        Body::NorthNode => Some(11),
        Body::Chiron => Some(15),
        Body::SouthNode | Body::Ascendant | Body::Midheaven => None,
    }
}

/// Swiss Ephemeris adapter implementation
pub struct SwissEphemerisAdapter {
    _ephemeris_path: PathBuf,
    house_system: u8,
    settings: EphemerisSettings,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter with optional ephemeris path
    pub fn new(
        ephemeris_path: Option<PathBuf>,
        settings: EphemerisSettings,
    ) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/usr/local/share/swisseph"))
        });

        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }

        let house_system = house_system_byte(&settings.house_system)?;
        log::info!(
            "swiss ephemeris at {} ({} houses)",
            path.display(),
            settings.house_system
        );

        Ok(Self {
            _ephemeris_path: path,
            house_system,
            settings,
        })
    }

    /// Longitude of one body; failures stay local to that body.
    fn calc_body(&self, body: Body, jd: f64) -> BodyReading {
        if body == Body::SouthNode {
            return self
                .calc_body(Body::NorthNode, jd)
                .map(|north| CelestialBody::new(Body::SouthNode, normalize_degrees(north.longitude + 180.0)))
                .map_err(|err| UnavailableBody { body, message: err.message });
        }

        let code = swiss_body_code(body).ok_or_else(|| UnavailableBody {
            body,
            message: format!("{} is not computed by calc_ut", body.id()),
        })?;

        let result = calc_ut(jd, code, FLG_SWIEPH as u32).map_err(|e| UnavailableBody {
            body,
            message: format!("Swiss Ephemeris error: {}", e),
        })?;

        let longitude = result.out[0];
        if !longitude.is_finite() {
            return Err(UnavailableBody {
                body,
                message: format!("non-finite longitude {}", longitude),
            });
        }
        Ok(CelestialBody::new(body, normalize_degrees(longitude)))
    }

    /// House cusps plus ascendant and midheaven.
    fn calc_houses(&self, jd: f64, location: &GeoLocation) -> Result<(HouseCusps, f64, f64), EphemerisError> {
        use swisseph::{AscMc, Cusp};

        let (c, a) = houses_ex(jd, FLG_SWIEPH, location.lat, location.lon, self.house_system as i32);
        let cusps = Cusp::from_array(c);
        let ascmc = AscMc::from_array(a);

        let values = [
            cusps.first, cusps.second, cusps.third, cusps.fourth,
            cusps.fifth, cusps.sixth, cusps.seventh, cusps.eighth,
            cusps.ninth, cusps.tenth, cusps.eleventh, cusps.twelfth,
        ];
        let cusps = HouseCusps::new(values.map(normalize_degrees)).map_err(|e| {
            EphemerisError::HouseCalculationFailed { message: e.to_string() }
        })?;

        Ok((cusps, normalize_degrees(ascmc.ascendant), normalize_degrees(ascmc.mc)))
    }
}

impl EphemerisProvider for SwissEphemerisAdapter {
    fn positions_and_cusps(
        &mut self,
        utc: DateTime<Utc>,
        location: &GeoLocation,
    ) -> Result<EphemerisSnapshot, EphemerisError> {
        let jd = datetime_to_julian_day(utc);
        let readings = self
            .settings
            .include_objects
            .iter()
            .map(|body| self.calc_body(*body, jd))
            .collect();
        let (cusps, ascendant, midheaven) = self.calc_houses(jd, location)?;

        Ok(EphemerisSnapshot {
            readings,
            cusps,
            ascendant,
            midheaven,
        })
    }
}

/// Convert UTC datetime to Julian Day
fn datetime_to_julian_day(dt: DateTime<Utc>) -> f64 {
    let hour_decimal =
        dt.hour() as f64 + dt.minute() as f64 / 60.0 + dt.second() as f64 / 3600.0;
    julday(dt.year(), dt.month() as i32, dt.day() as i32, hour_decimal, GREGORIAN)
}
