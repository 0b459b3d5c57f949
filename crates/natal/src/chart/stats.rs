//! Summary statistics over a built chart.

use crate::chart::builder::ChartOutcome;
use crate::western::{Element, Modality, Sign};
use std::collections::BTreeMap;

/// Bodies needed in one sign to count as a stellium.
pub const STELLIUM_MIN_BODIES: usize = 3;

impl ChartOutcome {
    /// Number of bodies per element. Angles are left out.
    pub fn element_balance(&self) -> BTreeMap<Element, usize> {
        let mut counts: BTreeMap<Element, usize> = Element::ALL.iter().map(|e| (*e, 0)).collect();
        for position in self.positions.iter().filter(|p| !p.body().is_angle()) {
            *counts.entry(position.element()).or_insert(0) += 1;
        }
        counts
    }

    /// Number of bodies per modality. Angles are left out.
    pub fn modality_balance(&self) -> BTreeMap<Modality, usize> {
        let mut counts: BTreeMap<Modality, usize> = Modality::ALL.iter().map(|m| (*m, 0)).collect();
        for position in self.positions.iter().filter(|p| !p.body().is_angle()) {
            *counts.entry(position.modality()).or_insert(0) += 1;
        }
        counts
    }

    /// Signs holding at least three bodies, in zodiac order.
    pub fn stelliums(&self) -> Vec<(Sign, usize)> {
        let mut per_sign: BTreeMap<Sign, usize> = BTreeMap::new();
        for position in self.positions.iter().filter(|p| !p.body().is_angle()) {
            *per_sign.entry(position.sign()).or_insert(0) += 1;
        }
        per_sign
            .into_iter()
            .filter(|(_, count)| *count >= STELLIUM_MIN_BODIES)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::chart::{build, HouseCusps};
    use crate::ephemeris::{Body, CelestialBody};
    use crate::western::{Element, Modality, Sign};

    #[test]
    fn test_balance_and_stellium() {
        let bodies = [
            CelestialBody::new(Body::Sun, 125.0),
            CelestialBody::new(Body::Mercury, 131.0),
            CelestialBody::new(Body::Venus, 142.0),
            CelestialBody::new(Body::Moon, 20.0),
            CelestialBody::new(Body::Ascendant, 128.0),
        ];
        let outcome = build(&bodies, &HouseCusps::equal(128.0).unwrap());

        let elements = outcome.element_balance();
        assert_eq!(elements[&Element::Fire], 4);
        assert_eq!(elements[&Element::Water], 0);

        let modalities = outcome.modality_balance();
        assert_eq!(modalities[&Modality::Fixed], 3);
        assert_eq!(modalities[&Modality::Cardinal], 1);

        assert_eq!(outcome.stelliums(), vec![(Sign::Leo, 3)]);
    }
}
