use thiserror::Error;

/// Errors raised by the deterministic chart core.
///
/// Per-body problems (bad longitude, body missing from the ephemeris) never
/// abort a chart; the builder records them as skipped entries. Only a cusp
/// set that breaks the 12-entry contract is a hard failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("invalid longitude: {value} is not a finite number of degrees")]
    InvalidLongitude { value: f64 },
    #[error("malformed house cusps: expected 12 entries, found {found}")]
    MalformedCusps { found: usize },
    #[error("malformed house cusps: cusp of house {house} is {value}")]
    NonFiniteCusp { house: usize, value: f64 },
    #[error("local time {local} does not exist in timezone {timezone}")]
    InvalidLocalTime { local: String, timezone: String },
}
