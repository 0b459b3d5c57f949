//! Place and timezone resolution seams.
//!
//! Geocoding is network-bound and lives behind an async trait; timezone
//! resolution is synchronous. The chart core never calls either directly.

use crate::ephemeris::GeoLocation;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;
use tzf_rs::DefaultFinder;

#[derive(Error, Debug)]
pub enum LocationError {
    #[error("could not geocode place '{place}'")]
    NotFound { place: String },
    #[error("no place name or coordinates given")]
    MissingLocation,
    #[error("invalid UTC offset '{value}' (expected +HH:MM)")]
    InvalidOffset { value: String },
    #[error("no timezone known for {lat:.4}, {lon:.4}")]
    TimezoneNotFound { lat: f64, lon: f64 },
    #[error("geocoder failed: {message}")]
    Geocoder { message: String },
}

/// A resolved place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPlace {
    pub location: GeoLocation,
    pub display_name: String,
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    /// `Ok(None)` means the place is unknown.
    async fn resolve(&self, place: &str) -> Result<Option<GeoPlace>, LocationError>;
}

/// How local wall-clock time maps to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// A constant offset, whatever the date.
    Fixed(FixedOffset),
    /// An IANA zone with its daylight-saving history.
    Iana(Tz),
}

impl Zone {
    /// Offset in force at `utc`.
    pub fn offset_at(&self, utc: DateTime<Utc>) -> FixedOffset {
        match self {
            Zone::Fixed(offset) => *offset,
            Zone::Iana(tz) => tz.offset_from_utc_datetime(&utc.naive_utc()).fix(),
        }
    }

    /// Earliest UTC instant whose wall clock reads `local`; `None` when the
    /// clock skips over it.
    pub fn earliest_utc(&self, local: &NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            Zone::Fixed(offset) => offset
                .from_local_datetime(local)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
            Zone::Iana(tz) => tz
                .from_local_datetime(local)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Fixed(offset) => f.write_str(&format_offset(*offset)),
            Zone::Iana(tz) => f.write_str(tz.name()),
        }
    }
}

impl Serialize for Zone {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Zone::Fixed(offset) => {
                let text = format_offset(*offset);
                serializer.serialize_str(text.trim_start_matches("UTC"))
            }
            Zone::Iana(tz) => serializer.serialize_str(tz.name()),
        }
    }
}

impl<'de> Deserialize<'de> for Zone {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        if let Ok(offset) = parse_utc_offset(&text) {
            return Ok(Zone::Fixed(offset));
        }
        text.parse::<Tz>()
            .map(Zone::Iana)
            .map_err(|_| serde::de::Error::custom(format!("unknown timezone '{text}'")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimezoneInfo {
    pub name: String,
    pub zone: Zone,
}

pub trait TimezoneResolver {
    fn timezone_for(&self, location: &GeoLocation) -> Option<TimezoneInfo>;
}

/// Always answers with the same offset, whatever the location.
#[derive(Debug, Clone)]
pub struct FixedOffsetResolver {
    info: TimezoneInfo,
}

impl FixedOffsetResolver {
    pub fn new(name: impl Into<String>, offset: FixedOffset) -> Self {
        Self {
            info: TimezoneInfo {
                name: name.into(),
                zone: Zone::Fixed(offset),
            },
        }
    }

    /// Parse `+HH:MM` style text; the text also serves as the zone name.
    pub fn parse(text: &str) -> Result<Self, LocationError> {
        let offset = parse_utc_offset(text)?;
        Ok(Self::new(format_offset(offset), offset))
    }
}

impl TimezoneResolver for FixedOffsetResolver {
    fn timezone_for(&self, _location: &GeoLocation) -> Option<TimezoneInfo> {
        Some(self.info.clone())
    }
}

/// Looks up the IANA zone containing a coordinate from bundled boundary data.
pub struct IanaResolver {
    finder: DefaultFinder,
}

impl IanaResolver {
    /// Loads the boundary data; do this once per process.
    pub fn new() -> Self {
        Self {
            finder: DefaultFinder::new(),
        }
    }
}

impl Default for IanaResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TimezoneResolver for IanaResolver {
    fn timezone_for(&self, location: &GeoLocation) -> Option<TimezoneInfo> {
        if !location.is_valid() {
            return None;
        }
        let name = self.finder.get_tz_name(location.lon, location.lat);
        let Ok(tz) = name.parse::<Tz>() else {
            log::debug!("no IANA zone for {:.4}, {:.4} (got '{name}')", location.lat, location.lon);
            return None;
        };
        Some(TimezoneInfo {
            name: tz.name().to_string(),
            zone: Zone::Iana(tz),
        })
    }
}

/// Nautical time zones: whole hours of 15 degrees of longitude each.
///
/// Ignores political borders and daylight saving, so it is only a fallback
/// when neither an explicit offset nor an IANA zone is known.
#[derive(Debug, Clone, Copy, Default)]
pub struct NauticalResolver;

impl TimezoneResolver for NauticalResolver {
    fn timezone_for(&self, location: &GeoLocation) -> Option<TimezoneInfo> {
        if !location.is_valid() {
            return None;
        }
        let hours = (location.lon / 15.0).round() as i32;
        let offset = FixedOffset::east_opt(hours * 3600)?;
        Some(TimezoneInfo {
            name: format!("{} (nautical)", format_offset(offset)),
            zone: Zone::Fixed(offset),
        })
    }
}

/// Parse `Z`, `UTC`, `+5`, `+0530` or `-03:00`.
pub fn parse_utc_offset(text: &str) -> Result<FixedOffset, LocationError> {
    let invalid = || LocationError::InvalidOffset { value: text.to_string() };
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(invalid);
    }

    let (sign, rest) = match trimmed.chars().next() {
        Some('+') => (1, &trimmed[1..]),
        Some('-') => (-1, &trimmed[1..]),
        _ => return Err(invalid()),
    };
    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 && rest.is_ascii() => rest.split_at(2),
        None => (rest, "0"),
    };
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if !(0..=14).contains(&hours) || !(0..60).contains(&minutes) {
        return Err(invalid());
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

pub fn format_offset(offset: FixedOffset) -> String {
    let seconds = offset.local_minus_utc();
    let sign = if seconds < 0 { '-' } else { '+' };
    let seconds = seconds.abs();
    format!("UTC{}{:02}:{:02}", sign, seconds / 3600, (seconds % 3600) / 60)
}

/// Raw user input describing where the birth happened.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationQuery<'a> {
    pub place: Option<&'a str>,
    pub lat: Option<&'a str>,
    pub lon: Option<&'a str>,
}

/// Explicit coordinates win when both parse and are in range; otherwise the
/// place name is geocoded.
pub async fn resolve_location<G>(query: LocationQuery<'_>, geocoder: &G) -> Result<GeoPlace, LocationError>
where
    G: Geocoder + ?Sized,
{
    fn non_empty(s: Option<&str>) -> Option<&str> {
        s.map(str::trim).filter(|s| !s.is_empty())
    }

    if let (Some(lat), Some(lon)) = (non_empty(query.lat), non_empty(query.lon)) {
        match (lat.parse::<f64>(), lon.parse::<f64>()) {
            (Ok(lat), Ok(lon)) if (GeoLocation { lat, lon }).is_valid() => {
                return Ok(GeoPlace {
                    location: GeoLocation { lat, lon },
                    display_name: format!("Lat:{}, Lon:{}", lat, lon),
                });
            }
            _ => log::warn!("invalid coordinates '{lat}', '{lon}'; trying the place name instead"),
        }
    }

    let place = non_empty(query.place).ok_or(LocationError::MissingLocation)?;
    log::debug!("geocoding '{place}'");
    geocoder
        .resolve(place)
        .await?
        .ok_or_else(|| LocationError::NotFound { place: place.to_string() })
}
