use urania::ephemeris::normalize_birth_time;
use urania::houses::house_for_longitude;
use urania::{AstroError, BirthData, HouseCalculator, HouseSystem, TimeZoneSpec};

const ALL_SYSTEMS: [HouseSystem; 11] = [
    HouseSystem::Placidus,
    HouseSystem::Koch,
    HouseSystem::Porphyry,
    HouseSystem::Regiomontanus,
    HouseSystem::Campanus,
    HouseSystem::Alcabitius,
    HouseSystem::Topocentric,
    HouseSystem::Morinus,
    HouseSystem::Equal,
    HouseSystem::WholeSign,
    HouseSystem::VehlowEqual,
];

fn forward(from: f64, to: f64) -> f64 {
    (to - from).rem_euclid(360.0)
}

#[test]
fn test_placidus_angles_1990_greenwich_equator() {
    let birth = BirthData {
        year: 1990,
        month: 1,
        day: 1,
        hour: 0,
        minute: 0,
        second: 0,
        latitude: 0.0,
        longitude: 0.0,
        timezone: TimeZoneSpec::Utc,
    };
    let civil = normalize_birth_time(&birth).unwrap();
    let houses = HouseCalculator::new()
        .compute(0.0, 0.0, &civil.instant, HouseSystem::Placidus)
        .unwrap();

    assert!((houses.armc - 100.3836).abs() < 1e-3, "armc {}", houses.armc);
    assert!((houses.ascendant - 191.2946).abs() < 1e-3, "asc {}", houses.ascendant);
    assert!((houses.midheaven - 99.5431).abs() < 1e-3, "mc {}", houses.midheaven);
    assert_eq!(houses.cusps[0], houses.ascendant);
    assert_eq!(houses.cusps[9], houses.midheaven);
    assert!((houses.cusps[10] - 127.9677).abs() < 1e-3);
    assert!((houses.cusps[1] - 222.8331).abs() < 1e-3);

    let again = HouseCalculator::new()
        .compute(0.0, 0.0, &civil.instant, HouseSystem::Placidus)
        .unwrap();
    assert_eq!(houses, again);
}

#[test]
fn test_cusps_are_ordered_outside_polar_regions() {
    let calc = HouseCalculator::new();
    for system in ALL_SYSTEMS {
        for latitude in [-55.0, -33.9, 0.0, 12.5, 40.7, 51.5, 60.0] {
            for step in 0..24 {
                let armc = step as f64 * 15.0 + 0.3;
                let houses = calc
                    .compute_from_armc(latitude, armc, 23.44, system)
                    .unwrap();
                let total: f64 = (0..12)
                    .map(|i| forward(houses.cusps[i], houses.cusps[(i + 1) % 12]))
                    .sum();
                assert!(
                    (total - 360.0).abs() < 1e-6,
                    "{} at lat {} armc {}",
                    system,
                    latitude,
                    armc
                );
                for cusp in houses.cusps {
                    assert!((0.0..360.0).contains(&cusp));
                }
            }
        }
    }
}

#[test]
fn test_quadrant_systems_share_angles() {
    let calc = HouseCalculator::new();
    for system in [
        HouseSystem::Placidus,
        HouseSystem::Koch,
        HouseSystem::Porphyry,
        HouseSystem::Regiomontanus,
        HouseSystem::Campanus,
        HouseSystem::Alcabitius,
        HouseSystem::Topocentric,
    ] {
        let houses = calc.compute_from_armc(48.85, 211.0, 23.44, system).unwrap();
        assert!((houses.cusps[0] - houses.ascendant).abs() < 1e-9, "{}", system);
        assert!((houses.cusps[9] - houses.midheaven).abs() < 1e-9, "{}", system);
        assert!((forward(houses.cusps[3], houses.imum_coeli)).abs() < 1e-9);
    }
}

#[test]
fn test_polar_latitudes() {
    let calc = HouseCalculator::new();
    for system in [HouseSystem::Placidus, HouseSystem::Koch, HouseSystem::Topocentric] {
        assert!(matches!(
            calc.compute_from_armc(69.65, 10.0, 23.44, system),
            Err(AstroError::PolarCircleUndefined { .. })
        ));
    }
    assert!(calc
        .compute_from_armc(69.65, 10.0, 23.44, HouseSystem::WholeSign)
        .is_ok());
    for system in ALL_SYSTEMS {
        assert!(calc.compute_from_armc(-90.0, 10.0, 23.44, system).is_err());
    }
}

#[test]
fn test_every_longitude_gets_exactly_one_house() {
    let houses = HouseCalculator::new()
        .compute_from_armc(40.7, 300.0, 23.44, HouseSystem::Placidus)
        .unwrap();
    let mut lon = 0.0;
    while lon < 360.0 {
        let house = house_for_longitude(lon, &houses.cusps);
        assert!((1..=12).contains(&house));
        let start = houses.cusps[(house - 1) as usize];
        let end = houses.cusps[house as usize % 12];
        assert!(forward(start, lon) < forward(start, end));
        lon += 0.25;
    }
    for (i, cusp) in houses.cusps.iter().enumerate() {
        assert_eq!(house_for_longitude(*cusp, &houses.cusps), i as u8 + 1);
    }
}
