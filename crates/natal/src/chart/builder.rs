use crate::chart::houses::{locate, HouseCusps, HousePlacement};
use crate::ephemeris::{Body, BodyReading, CelestialBody};
use crate::error::ChartError;
use crate::western::{classify, element_of, modality_of, ruler_of, Element, Modality, Ruler, Sign, SignPosition};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Everything the chart knows about one body. Built once, never mutated.
///
/// Deserializing recomputes the sign traits from the longitude and rejects a
/// record whose stored traits disagree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PositionRecord")]
pub struct ChartPosition {
    body: Body,
    longitude: f64,
    sign: Sign,
    degree_in_sign: f64,
    house: HousePlacement,
    element: Element,
    modality: Modality,
    ruler: Ruler,
}

impl ChartPosition {
    fn from_parts(body: CelestialBody, placement: SignPosition, house: HousePlacement) -> Self {
        Self {
            body: body.body,
            longitude: body.longitude,
            sign: placement.sign,
            degree_in_sign: placement.degree_in_sign,
            house,
            element: element_of(placement.sign),
            modality: modality_of(placement.sign),
            ruler: ruler_of(placement.sign),
        }
    }

    pub fn body(&self) -> Body {
        self.body
    }

    /// Longitude exactly as supplied by the ephemeris.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    pub fn degree_in_sign(&self) -> f64 {
        self.degree_in_sign
    }

    pub fn sign_position(&self) -> SignPosition {
        SignPosition {
            sign: self.sign,
            degree_in_sign: self.degree_in_sign,
            sign_index: self.sign.index(),
        }
    }

    pub fn house(&self) -> HousePlacement {
        self.house
    }

    pub fn element(&self) -> Element {
        self.element
    }

    pub fn modality(&self) -> Modality {
        self.modality
    }

    pub fn ruler(&self) -> Ruler {
        self.ruler
    }
}

#[derive(Deserialize)]
struct PositionRecord {
    body: Body,
    longitude: f64,
    sign: Sign,
    degree_in_sign: f64,
    house: HousePlacement,
    element: Element,
    modality: Modality,
    ruler: Ruler,
}

impl TryFrom<PositionRecord> for ChartPosition {
    type Error = String;

    fn try_from(record: PositionRecord) -> Result<Self, Self::Error> {
        let placement = classify(record.longitude).map_err(|e| e.to_string())?;
        let position = ChartPosition::from_parts(
            CelestialBody::new(record.body, record.longitude),
            placement,
            record.house,
        );
        let consistent = position.sign == record.sign
            && (position.degree_in_sign - record.degree_in_sign).abs() < 1e-6
            && position.element == record.element
            && position.modality == record.modality
            && position.ruler == record.ruler;
        if !consistent {
            return Err(format!(
                "{} at {} does not match its recorded sign traits",
                record.body, record.longitude
            ));
        }
        Ok(position)
    }
}

/// Why a body is missing from the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// The longitude was NaN or infinite.
    InvalidLongitude(#[serde(with = "longitude_text")] f64),
    /// The ephemeris could not compute the body.
    Unavailable(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::InvalidLongitude(value) => write!(f, "invalid longitude {}", value),
            SkipReason::Unavailable(message) => write!(f, "unavailable: {}", message),
        }
    }
}

/// JSON has no NaN or infinity, so non-finite values travel as `"NaN"`,
/// `"inf"` or `"-inf"`.
mod longitude_text {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_str(&value.to_string())
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Number(value) => Ok(value),
            Raw::Text(text) => text
                .parse::<f64>()
                .map_err(|_| serde::de::Error::custom(format!("not a longitude: '{text}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedBody {
    pub body: Body,
    pub reason: SkipReason,
}

/// Positions that could be placed plus the bodies that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartOutcome {
    pub positions: Vec<ChartPosition>,
    pub skipped: Vec<SkippedBody>,
}

impl ChartOutcome {
    /// Partition per-body results, keeping input order on both sides.
    pub fn from_results<I>(results: I) -> Self
    where
        I: IntoIterator<Item = Result<ChartPosition, SkippedBody>>,
    {
        let mut outcome = ChartOutcome::default();
        for result in results {
            match result {
                Ok(position) => outcome.positions.push(position),
                Err(skipped) => {
                    log::warn!("skipping {}: {}", skipped.body, skipped.reason);
                    outcome.skipped.push(skipped);
                }
            }
        }
        outcome
    }

    pub fn position(&self, body: Body) -> Option<&ChartPosition> {
        self.positions.iter().find(|p| p.body == body)
    }

    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Stateless builder turning body longitudes and house cusps into chart positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartBuilder;

impl ChartBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Place a single body.
    pub fn place(&self, body: CelestialBody, cusps: &HouseCusps) -> Result<ChartPosition, ChartError> {
        let placement = classify(body.longitude)?;
        let house = locate(body.longitude, cusps);
        Ok(ChartPosition::from_parts(body, placement, house))
    }

    pub fn build(&self, bodies: &[CelestialBody], cusps: &HouseCusps) -> ChartOutcome {
        ChartOutcome::from_results(bodies.iter().map(|body| self.place_or_skip(*body, cusps)))
    }

    /// Like [`ChartBuilder::build`] but for raw ephemeris readings, where a
    /// body may already have failed upstream.
    pub fn build_from_readings(&self, readings: &[BodyReading], cusps: &HouseCusps) -> ChartOutcome {
        ChartOutcome::from_results(readings.iter().map(|reading| match reading {
            Ok(body) => self.place_or_skip(*body, cusps),
            Err(unavailable) => Err(SkippedBody {
                body: unavailable.body,
                reason: SkipReason::Unavailable(unavailable.message.clone()),
            }),
        }))
    }

    fn place_or_skip(&self, body: CelestialBody, cusps: &HouseCusps) -> Result<ChartPosition, SkippedBody> {
        self.place(body, cusps).map_err(|err| match err {
            ChartError::InvalidLongitude { value } => SkippedBody {
                body: body.body,
                reason: SkipReason::InvalidLongitude(value),
            },
            other => SkippedBody {
                body: body.body,
                reason: SkipReason::Unavailable(other.to_string()),
            },
        })
    }
}

/// Convenience wrapper around [`ChartBuilder::build`].
pub fn build(bodies: &[CelestialBody], cusps: &HouseCusps) -> ChartOutcome {
    ChartBuilder.build(bodies, cusps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::UnavailableBody;

    fn cusps() -> HouseCusps {
        HouseCusps::equal(0.0).unwrap()
    }

    #[test]
    fn test_place_attaches_traits() {
        let pos = ChartBuilder.place(CelestialBody::new(Body::Sun, 135.0), &cusps()).unwrap();
        assert_eq!(pos.sign(), Sign::Leo);
        assert_eq!(pos.house(), HousePlacement::House(5));
        assert_eq!(pos.element(), Element::Fire);
        assert_eq!(pos.modality(), Modality::Fixed);
        assert_eq!(pos.ruler().modern(), Body::Sun);
        assert_eq!(pos.longitude(), 135.0);
    }

    #[test]
    fn test_unavailable_reading_is_skipped() {
        let readings: Vec<BodyReading> = vec![
            Ok(CelestialBody::new(Body::Sun, 10.0)),
            Err(UnavailableBody { body: Body::Chiron, message: "no asteroid file".to_string() }),
            Ok(CelestialBody::new(Body::Moon, 200.0)),
        ];
        let outcome = ChartBuilder.build_from_readings(&readings, &cusps());
        let bodies: Vec<Body> = outcome.positions.iter().map(|p| p.body()).collect();
        assert_eq!(bodies, vec![Body::Sun, Body::Moon]);
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].body, Body::Chiron);
        assert!(matches!(outcome.skipped[0].reason, SkipReason::Unavailable(_)));
    }

    #[test]
    fn test_skip_reason_survives_json() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let outcome = build(&[CelestialBody::new(Body::Moon, value)], &cusps());
            let json = serde_json::to_string(&outcome).unwrap();
            let back: ChartOutcome = serde_json::from_str(&json).unwrap();
            match back.skipped[0].reason {
                SkipReason::InvalidLongitude(v) if value.is_nan() => assert!(v.is_nan()),
                SkipReason::InvalidLongitude(v) => assert_eq!(v, value),
                ref other => panic!("unexpected reason {other:?}"),
            }
        }
    }

    #[test]
    fn test_position_json_must_match_its_longitude() {
        let pos = ChartBuilder.place(CelestialBody::new(Body::Venus, 47.25), &cusps()).unwrap();
        let mut value = serde_json::to_value(pos).unwrap();
        let back: ChartPosition = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(back, pos);

        value["sign"] = serde_json::json!("virgo");
        assert!(serde_json::from_value::<ChartPosition>(value.clone()).is_err());

        value["sign"] = serde_json::json!("taurus");
        value["ruler"] = serde_json::json!({ "primary": "mars" });
        assert!(serde_json::from_value::<ChartPosition>(value).is_err());
    }

    #[test]
    fn test_empty_input_gives_empty_chart() {
        let outcome = build(&[], &cusps());
        assert!(outcome.positions.is_empty());
        assert!(outcome.is_complete());
    }
}
