//! House cusps and the longitude -> house locator.
//!
//! House `n` covers the arc from cusp `n` up to (but not including) cusp
//! `n + 1`, with house 12 closing back onto cusp 1. Arcs are walked forward
//! through the zodiac, so an arc whose end is numerically smaller than its
//! start crosses the 0/360 seam.

use crate::error::ChartError;
use crate::western::signs::normalize_degrees;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Twelve house cusp longitudes, house 1 first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct HouseCusps([f64; 12]);

impl HouseCusps {
    pub fn new(cusps: [f64; 12]) -> Result<Self, ChartError> {
        for (i, value) in cusps.iter().enumerate() {
            if !value.is_finite() {
                return Err(ChartError::NonFiniteCusp { house: i + 1, value: *value });
            }
        }
        Ok(Self(cusps))
    }

    /// Build from a slice that must hold exactly 12 cusps.
    pub fn from_slice(cusps: &[f64]) -> Result<Self, ChartError> {
        let array: [f64; 12] = cusps
            .try_into()
            .map_err(|_| ChartError::MalformedCusps { found: cusps.len() })?;
        Self::new(array)
    }

    /// Equal houses of 30 degrees starting at `start`.
    pub fn equal(start: f64) -> Result<Self, ChartError> {
        let mut cusps = [0.0; 12];
        for (i, cusp) in cusps.iter_mut().enumerate() {
            *cusp = normalize_degrees(start + i as f64 * 30.0);
        }
        Self::new(cusps)
    }

    /// Cusp of house `house` (1..=12).
    pub fn cusp(&self, house: u8) -> Option<f64> {
        match house {
            1..=12 => Some(self.0[house as usize - 1]),
            _ => None,
        }
    }

    /// Start and end longitude of house `house` (1..=12).
    pub fn span(&self, house: u8) -> Option<(f64, f64)> {
        let start = self.cusp(house)?;
        let end = self.cusp(house % 12 + 1)?;
        Some((start, end))
    }

    /// Cusp of the first house.
    pub fn ascendant(&self) -> f64 {
        self.0[0]
    }

    pub fn as_array(&self) -> &[f64; 12] {
        &self.0
    }

    pub fn locate(&self, longitude: f64) -> HousePlacement {
        locate(longitude, self)
    }
}

impl TryFrom<Vec<f64>> for HouseCusps {
    type Error = ChartError;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        Self::from_slice(&value)
    }
}

impl From<HouseCusps> for Vec<f64> {
    fn from(value: HouseCusps) -> Self {
        value.0.to_vec()
    }
}

/// House a longitude falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<u8>", into = "Option<u8>")]
pub enum HousePlacement {
    House(u8),
    /// No arc contains the longitude; the house is unknown.
    Unresolved,
}

impl HousePlacement {
    pub fn number(self) -> Option<u8> {
        match self {
            HousePlacement::House(n) => Some(n),
            HousePlacement::Unresolved => None,
        }
    }

    pub fn is_resolved(self) -> bool {
        matches!(self, HousePlacement::House(_))
    }
}

impl From<Option<u8>> for HousePlacement {
    fn from(value: Option<u8>) -> Self {
        match value {
            Some(n @ 1..=12) => HousePlacement::House(n),
            _ => HousePlacement::Unresolved,
        }
    }
}

impl From<HousePlacement> for Option<u8> {
    fn from(value: HousePlacement) -> Self {
        value.number()
    }
}

impl fmt::Display for HousePlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HousePlacement::House(n) => write!(f, "{}", n),
            HousePlacement::Unresolved => f.write_str("-"),
        }
    }
}

/// Find the house containing `longitude`.
///
/// A longitude sitting exactly on a cusp belongs to the house that starts
/// there. Zero-width arcs contain nothing, so a cusp set where every cusp is
/// equal leaves every longitude `Unresolved`.
pub fn locate(longitude: f64, cusps: &HouseCusps) -> HousePlacement {
    if !longitude.is_finite() {
        return HousePlacement::Unresolved;
    }
    let point = normalize_degrees(longitude);

    for i in 0..12 {
        let start = normalize_degrees(cusps.0[i]);
        let mut end = normalize_degrees(cusps.0[(i + 1) % 12]);
        if end == start {
            continue;
        }
        if end < start {
            end += 360.0;
        }

        let mut p = point;
        if p < start {
            p += 360.0;
        }

        if start <= p && p < end {
            return HousePlacement::House(i as u8 + 1);
        }
    }

    log::debug!("longitude {longitude} not inside any house arc of {:?}", cusps.0);
    HousePlacement::Unresolved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrapping_cusps() -> HouseCusps {
        HouseCusps::new([350.0, 20.0, 50.0, 80.0, 110.0, 140.0, 170.0, 200.0, 230.0, 260.0, 290.0, 320.0])
            .unwrap()
    }

    #[test]
    fn test_cusp_is_lower_inclusive() {
        let cusps = wrapping_cusps();
        assert_eq!(locate(50.0, &cusps), HousePlacement::House(3));
        assert_eq!(locate(49.999, &cusps), HousePlacement::House(2));
    }

    #[test]
    fn test_house_one_crosses_seam() {
        let cusps = wrapping_cusps();
        assert_eq!(locate(355.0, &cusps), HousePlacement::House(1));
        assert_eq!(locate(5.0, &cusps), HousePlacement::House(1));
        assert_eq!(locate(0.0, &cusps), HousePlacement::House(1));
        assert_eq!(locate(345.0, &cusps), HousePlacement::House(12));
    }

    #[test]
    fn test_all_equal_cusps_are_unresolved() {
        let cusps = HouseCusps::new([42.0; 12]).unwrap();
        assert_eq!(locate(42.0, &cusps), HousePlacement::Unresolved);
        assert_eq!(locate(200.0, &cusps), HousePlacement::Unresolved);
    }

    #[test]
    fn test_non_finite_longitude_is_unresolved() {
        assert_eq!(locate(f64::NAN, &wrapping_cusps()), HousePlacement::Unresolved);
    }

    #[test]
    fn test_from_slice_checks_cardinality() {
        assert_eq!(
            HouseCusps::from_slice(&[0.0; 11]),
            Err(ChartError::MalformedCusps { found: 11 })
        );
        assert!(HouseCusps::from_slice(&[0.0; 13]).is_err());
        assert!(matches!(
            HouseCusps::new([0.0, f64::NAN, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
            Err(ChartError::NonFiniteCusp { house: 2, .. })
        ));
    }

    #[test]
    fn test_span_wraps_house_twelve() {
        let cusps = wrapping_cusps();
        assert_eq!(cusps.span(12), Some((320.0, 350.0)));
        assert_eq!(cusps.span(1), Some((350.0, 20.0)));
        assert_eq!(cusps.span(13), None);
    }

    #[test]
    fn test_placement_serde() {
        let json = serde_json::to_string(&HousePlacement::House(7)).unwrap();
        assert_eq!(json, "7");
        let unresolved: HousePlacement = serde_json::from_str("null").unwrap();
        assert_eq!(unresolved, HousePlacement::Unresolved);
    }
}
