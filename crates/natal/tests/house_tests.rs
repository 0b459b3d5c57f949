use natal::chart::{locate, HouseCusps, HousePlacement};

fn wrap_cusps() -> HouseCusps {
    HouseCusps::new([350.0, 20.0, 50.0, 80.0, 110.0, 140.0, 170.0, 200.0, 230.0, 260.0, 290.0, 320.0])
        .unwrap()
}

fn placidus_like_cusps() -> HouseCusps {
    HouseCusps::new([101.2, 122.0, 145.3, 175.8, 210.4, 245.1, 281.2, 302.0, 325.3, 355.8, 30.4, 65.1])
        .unwrap()
}

fn near_seam_cusps() -> HouseCusps {
    HouseCusps::new([359.9, 29.9, 59.9, 89.9, 119.9, 149.9, 179.9, 209.9, 239.9, 269.9, 299.9, 329.9])
        .unwrap()
}

/// Forward-arc membership, independent of the locator's linearisation.
fn arc_contains(start: f64, end: f64, longitude: f64) -> bool {
    (longitude - start).rem_euclid(360.0) < (end - start).rem_euclid(360.0)
}

#[test]
fn test_exactly_one_house_matches() {
    for cusps in [wrap_cusps(), placidus_like_cusps(), near_seam_cusps()] {
        for tenth in 0..3600 {
            let longitude = tenth as f64 / 10.0;
            if cusps.as_array().iter().any(|c| (c - longitude).abs() < 1e-9) {
                continue;
            }
            let matching: Vec<u8> = (1..=12)
                .filter(|h| {
                    let (start, end) = cusps.span(*h).unwrap();
                    arc_contains(start, end, longitude)
                })
                .collect();
            assert_eq!(matching.len(), 1, "{longitude} matched {matching:?}");
            assert_eq!(locate(longitude, &cusps), HousePlacement::House(matching[0]));
        }
    }
}

#[test]
fn test_cusp_belongs_to_the_house_it_starts() {
    for cusps in [wrap_cusps(), placidus_like_cusps(), near_seam_cusps()] {
        for house in 1..=12u8 {
            let cusp = cusps.cusp(house).unwrap();
            assert_eq!(locate(cusp, &cusps), HousePlacement::House(house));
        }
    }
    let cusps = wrap_cusps();
    assert_eq!(locate(cusps.cusp(3).unwrap(), &cusps), HousePlacement::House(3));
}

#[test]
fn test_first_house_across_the_seam() {
    let cusps = wrap_cusps();
    assert_eq!(locate(355.0, &cusps), HousePlacement::House(1));
    assert_eq!(locate(5.0, &cusps), HousePlacement::House(1));
    assert_eq!(locate(-5.0, &cusps), HousePlacement::House(1));
    assert_eq!(locate(725.0, &cusps), HousePlacement::House(1));

    let cusps = near_seam_cusps();
    assert_eq!(locate(359.95, &cusps), HousePlacement::House(1));
    assert_eq!(locate(0.0, &cusps), HousePlacement::House(1));
    assert_eq!(locate(29.8, &cusps), HousePlacement::House(1));
    assert_eq!(locate(359.8, &cusps), HousePlacement::House(12));
}

#[test]
fn test_degenerate_cusps_are_unresolved() {
    let cusps = HouseCusps::new([0.0; 12]).unwrap();
    assert_eq!(locate(123.0, &cusps), HousePlacement::Unresolved);
    assert_eq!(locate(123.0, &cusps).number(), None);
}

#[test]
fn test_cusps_from_json_must_have_twelve_entries() {
    let ok: HouseCusps = serde_json::from_str("[0,30,60,90,120,150,180,210,240,270,300,330]").unwrap();
    assert_eq!(ok.ascendant(), 0.0);
    assert!(serde_json::from_str::<HouseCusps>("[0,30,60]").is_err());
}
