use natal::western::*;
use natal::Body;

fn sample_longitudes() -> impl Iterator<Item = f64> {
    // Quarter degrees are exact in binary, so adding 360 never rounds.
    (-2880..2880).map(|k| k as f64 * 0.25)
}

#[test]
fn test_classify_reference_scenarios() {
    let aries = classify(0.0).unwrap();
    assert_eq!((aries.sign, aries.degree_in_sign, aries.sign_index), (Sign::Aries, 0.0, 0));

    let taurus = classify(35.0).unwrap();
    assert_eq!((taurus.sign, taurus.degree_in_sign, taurus.sign_index), (Sign::Taurus, 5.0, 1));

    let pisces = classify(-10.0).unwrap();
    assert_eq!((pisces.sign, pisces.degree_in_sign, pisces.sign_index), (Sign::Pisces, 20.0, 11));
}

#[test]
fn test_classify_is_periodic() {
    for longitude in sample_longitudes() {
        let a = classify(longitude).unwrap();
        let b = classify(longitude + 360.0).unwrap();
        assert_eq!(a.sign, b.sign, "sign differs at {longitude}");
        assert_eq!(a.degree_in_sign, b.degree_in_sign, "degree differs at {longitude}");
    }
}

#[test]
fn test_degree_in_sign_range() {
    let awkward = [29.999999999999996, 359.99999999999994, -1e-12, 1e-300, 1e12, -7.5e9];
    for longitude in sample_longitudes().chain(awkward) {
        let pos = classify(longitude).unwrap();
        assert!(
            (0.0..30.0).contains(&pos.degree_in_sign),
            "degree {} out of range for {longitude}",
            pos.degree_in_sign
        );
        assert!(pos.sign_index < 12);
        assert_eq!(pos.sign.index(), pos.sign_index);
    }
}

#[test]
fn test_sign_arcs_partition_the_circle() {
    for longitude in sample_longitudes() {
        let normalized = normalize_degrees(longitude);
        let matching: Vec<usize> = (0..12)
            .filter(|i| (*i as f64) * 30.0 <= normalized && normalized < (*i as f64 + 1.0) * 30.0)
            .collect();
        assert_eq!(matching.len(), 1, "{longitude} matched {matching:?}");
        assert_eq!(matching[0], classify(longitude).unwrap().sign_index);
    }
}

#[test]
fn test_element_and_modality_partitions() {
    let mut element_signs: Vec<Sign> = Element::ALL.iter().flat_map(|e| e.signs()).collect();
    element_signs.sort();
    assert_eq!(element_signs, Sign::ALL.to_vec());
    for element in Element::ALL {
        assert_eq!(element.signs().len(), 3);
    }

    let mut modality_signs: Vec<Sign> = Modality::ALL.iter().flat_map(|m| m.signs()).collect();
    modality_signs.sort();
    assert_eq!(modality_signs, Sign::ALL.to_vec());
    for modality in Modality::ALL {
        assert_eq!(modality.signs().len(), 4);
    }
}

#[test]
fn test_trait_reference_values() {
    assert_eq!(element_of(Sign::Leo), Element::Fire);
    assert_eq!(modality_of(Sign::Leo), Modality::Fixed);

    let scorpio = ruler_of(Sign::Scorpio);
    assert_eq!((scorpio.primary, scorpio.secondary), (Body::Pluto, Some(Body::Mars)));
    assert_eq!(ruler_of(Sign::Aries).secondary, None);
}
