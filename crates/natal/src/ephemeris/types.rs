use crate::chart::HouseCusps;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

impl GeoLocation {
    /// Latitude within [-90, 90], longitude within [-180, 180], both finite.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Chart points the ephemeris can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    Chiron,
    NorthNode,
    SouthNode,
    #[serde(rename = "asc")]
    Ascendant,
    #[serde(rename = "mc")]
    Midheaven,
}

impl Body {
    pub const ALL: [Body; 15] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
        Body::Chiron,
        Body::NorthNode,
        Body::SouthNode,
        Body::Ascendant,
        Body::Midheaven,
    ];

    /// The ten bodies a default chart asks for.
    pub const PLANETS: [Body; 10] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    /// Identifier used in configuration files and JSON.
    pub const fn id(self) -> &'static str {
        match self {
            Body::Sun => "sun",
            Body::Moon => "moon",
            Body::Mercury => "mercury",
            Body::Venus => "venus",
            Body::Mars => "mars",
            Body::Jupiter => "jupiter",
            Body::Saturn => "saturn",
            Body::Uranus => "uranus",
            Body::Neptune => "neptune",
            Body::Pluto => "pluto",
            Body::Chiron => "chiron",
            Body::NorthNode => "north_node",
            Body::SouthNode => "south_node",
            Body::Ascendant => "asc",
            Body::Midheaven => "mc",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
            Body::Chiron => "Chiron",
            Body::NorthNode => "North Node",
            Body::SouthNode => "South Node",
            Body::Ascendant => "Ascendant",
            Body::Midheaven => "Midheaven",
        }
    }

    /// Chart angles are points on the horizon/meridian, not bodies in the sky.
    pub const fn is_angle(self) -> bool {
        matches!(self, Body::Ascendant | Body::Midheaven)
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        let alias = match wanted.as_str() {
            "ascendant" => "asc",
            "midheaven" => "mc",
            "true_node" | "rahu" => "north_node",
            "ketu" => "south_node",
            other => other,
        };
        Body::ALL
            .iter()
            .copied()
            .find(|body| body.id() == alias)
            .ok_or_else(|| format!("Unknown body: {}", s))
    }
}

/// A body paired with its ecliptic longitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CelestialBody {
    pub body: Body,
    pub longitude: f64,
}

impl CelestialBody {
    pub fn new(body: Body, longitude: f64) -> Self {
        Self { body, longitude }
    }
}

/// A body the ephemeris could not compute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{body} unavailable: {message}")]
pub struct UnavailableBody {
    pub body: Body,
    pub message: String,
}

/// One per-body result from an ephemeris run.
pub type BodyReading = Result<CelestialBody, UnavailableBody>;

/// Everything an ephemeris run hands to the chart builder.
#[derive(Debug, Clone)]
pub struct EphemerisSnapshot {
    pub readings: Vec<BodyReading>,
    pub cusps: HouseCusps,
    pub ascendant: f64,
    pub midheaven: f64,
}

impl EphemerisSnapshot {
    /// Body readings followed by the Ascendant and Midheaven as chart points.
    pub fn readings_with_angles(&self) -> Vec<BodyReading> {
        let mut readings = self.readings.clone();
        readings.push(Ok(CelestialBody::new(Body::Ascendant, self.ascendant)));
        readings.push(Ok(CelestialBody::new(Body::Midheaven, self.midheaven)));
        readings
    }
}

/// Settings for ephemeris calculations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EphemerisSettings {
    /// House system name
    pub house_system: String,
    /// Bodies to compute, in report order
    pub include_objects: Vec<Body>,
}

impl Default for EphemerisSettings {
    fn default() -> Self {
        Self {
            house_system: "placidus".to_string(),
            include_objects: Body::PLANETS.to_vec(),
        }
    }
}
