use natal::chart::{build, ChartBuilder, ChartOutcome, HouseCusps, HousePlacement, SkipReason};
use natal::ephemeris::{Body, CelestialBody};
use natal::western::{Element, Sign};

fn cusps() -> HouseCusps {
    HouseCusps::new([350.0, 20.0, 50.0, 80.0, 110.0, 140.0, 170.0, 200.0, 230.0, 260.0, 290.0, 320.0])
        .unwrap()
}

#[test]
fn test_nan_body_is_skipped_and_order_kept() {
    let bodies = [
        CelestialBody::new(Body::Sun, 135.0),
        CelestialBody::new(Body::Moon, f64::NAN),
        CelestialBody::new(Body::Mercury, 5.0),
        CelestialBody::new(Body::Venus, 355.0),
    ];

    let outcome = build(&bodies, &cusps());

    let order: Vec<Body> = outcome.positions.iter().map(|p| p.body()).collect();
    assert_eq!(order, vec![Body::Sun, Body::Mercury, Body::Venus]);
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].body, Body::Moon);
    assert!(matches!(outcome.skipped[0].reason, SkipReason::InvalidLongitude(v) if v.is_nan()));

    let without_moon = build(&[bodies[0], bodies[2], bodies[3]], &cusps());
    assert_eq!(without_moon.positions, outcome.positions);
}

#[test]
fn test_positions_carry_all_fields() {
    let outcome = build(&[CelestialBody::new(Body::Mars, 5.0)], &cusps());
    let mars = outcome.position(Body::Mars).unwrap();
    assert_eq!(mars.sign(), Sign::Aries);
    assert_eq!(mars.degree_in_sign(), 5.0);
    assert_eq!(mars.house(), HousePlacement::House(1));
    assert_eq!(mars.element(), Element::Fire);
    assert_eq!(mars.ruler().primary, Body::Mars);
}

#[test]
fn test_same_input_same_output() {
    let bodies: Vec<CelestialBody> = Body::PLANETS
        .iter()
        .enumerate()
        .map(|(i, b)| CelestialBody::new(*b, i as f64 * 41.7 - 100.0))
        .collect();
    let builder = ChartBuilder::new();
    assert_eq!(builder.build(&bodies, &cusps()), builder.build(&bodies, &cusps()));
}

#[test]
fn test_from_results_keeps_input_order_after_parallel_style_evaluation() {
    let bodies = [
        CelestialBody::new(Body::Jupiter, 250.0),
        CelestialBody::new(Body::Saturn, f64::INFINITY),
        CelestialBody::new(Body::Uranus, 10.0),
    ];
    let cusps = cusps();
    // Evaluate out of order, then reassemble by input index.
    let mut indexed: Vec<(usize, _)> = bodies
        .iter()
        .enumerate()
        .rev()
        .map(|(i, b)| (i, ChartBuilder.place(*b, &cusps)))
        .collect();
    indexed.sort_by_key(|(i, _)| *i);
    let outcome = ChartOutcome::from_results(indexed.into_iter().zip(bodies.iter()).map(|((_, r), b)| {
        r.map_err(|_| natal::chart::SkippedBody {
            body: b.body,
            reason: SkipReason::InvalidLongitude(b.longitude),
        })
    }));

    assert_eq!(outcome, build(&bodies, &cusps));
}

#[test]
fn test_outcome_serializes_houses_as_numbers() {
    let outcome = build(&[CelestialBody::new(Body::Sun, 135.0)], &cusps());
    let value = serde_json::to_value(&outcome).unwrap();
    assert_eq!(value["positions"][0]["house"], 5);
    assert_eq!(value["positions"][0]["ruler"]["primary"], "sun");
    assert!(value["positions"][0]["ruler"].get("secondary").is_none());
}
