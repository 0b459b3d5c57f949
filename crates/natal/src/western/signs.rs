//! Zodiac signs and the longitude -> sign classifier.
//!
//! The ecliptic is cut into 12 arcs of 30 degrees each, starting with Aries
//! at 0 degrees. Any finite longitude is accepted and wrapped into [0, 360).

use crate::error::ChartError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Width of one sign in degrees.
pub const SIGN_SPAN: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl Sign {
    /// All signs in zodiacal order, Aries first.
    pub const ALL: [Sign; 12] = [
        Sign::Aries,
        Sign::Taurus,
        Sign::Gemini,
        Sign::Cancer,
        Sign::Leo,
        Sign::Virgo,
        Sign::Libra,
        Sign::Scorpio,
        Sign::Sagittarius,
        Sign::Capricorn,
        Sign::Aquarius,
        Sign::Pisces,
    ];

    /// Position in the zodiac, 0 (Aries) to 11 (Pisces).
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Sign> {
        Self::ALL.get(index).copied()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Sign::Aries => "Aries",
            Sign::Taurus => "Taurus",
            Sign::Gemini => "Gemini",
            Sign::Cancer => "Cancer",
            Sign::Leo => "Leo",
            Sign::Virgo => "Virgo",
            Sign::Libra => "Libra",
            Sign::Scorpio => "Scorpio",
            Sign::Sagittarius => "Sagittarius",
            Sign::Capricorn => "Capricorn",
            Sign::Aquarius => "Aquarius",
            Sign::Pisces => "Pisces",
        }
    }

    /// Longitude where the sign begins.
    pub fn start_degree(self) -> f64 {
        self.index() as f64 * SIGN_SPAN
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Sign {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sign::ALL
            .iter()
            .copied()
            .find(|sign| sign.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown sign: {}", s))
    }
}

/// Result of classifying a longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignPosition {
    pub sign: Sign,
    pub degree_in_sign: f64,
    pub sign_index: usize,
}

impl SignPosition {
    /// Degree within the sign split into whole degrees, minutes and seconds.
    pub fn dms(&self) -> (u32, u32, u32) {
        let total_seconds = (self.degree_in_sign * 3600.0).floor() as u32;
        (total_seconds / 3600, (total_seconds % 3600) / 60, total_seconds % 60)
    }
}

impl fmt::Display for SignPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (d, m, s) = self.dms();
        write!(f, "{} {}°{:02}'{:02}\"", self.sign, d, m, s)
    }
}

/// Wrap any finite angle into [0, 360).
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Map an ecliptic longitude to its sign, the offset inside that sign and
/// the sign index.
pub fn classify(longitude: f64) -> Result<SignPosition, ChartError> {
    if !longitude.is_finite() {
        return Err(ChartError::InvalidLongitude { value: longitude });
    }

    let normalized = normalize_degrees(longitude);
    let degree_in_sign = normalized % SIGN_SPAN;
    let sign_index = (((normalized - degree_in_sign) / SIGN_SPAN).round() as usize).min(11);

    Ok(SignPosition {
        sign: Sign::ALL[sign_index],
        degree_in_sign,
        sign_index,
    })
}
