mod common;

use common::{birth_1990, linear_adapter};
use urania::subject::{LunarPhaseName, SubjectSettings};
use urania::{
    AstroError, Ayanamsa, HouseSystem, Point, SubjectBuilder, SubjectKind, TimeZoneSpec,
    ZodiacType,
};

fn builder() -> SubjectBuilder {
    SubjectBuilder::new(linear_adapter(), SubjectSettings::default())
}

#[test]
fn test_build_default_subject() {
    let subject = builder().build("Alice", &birth_1990()).unwrap();

    assert_eq!(subject.name, "Alice");
    assert_eq!(subject.kind, SubjectKind::Natal);
    assert_eq!(subject.points.len(), Point::DEFAULT_ACTIVE.len());
    assert_eq!(subject.houses.len(), 12);
    assert!(subject
        .points
        .windows(2)
        .all(|pair| pair[0].point < pair[1].point));

    for point in &subject.points {
        assert!((0.0..360.0).contains(&point.longitude));
        assert!(point.sign_index <= 11);
        assert!((0.0..30.0).contains(&point.degree));
        assert_eq!(point.sign_index as f64 * 30.0 + point.degree, point.longitude);
        assert!((1..=12).contains(&point.house));
        assert_eq!(point.retrograde, point.speed < 0.0);
    }

    let asc = subject.point(Point::Ascendant).unwrap();
    assert!((asc.longitude - 191.2946).abs() < 1e-3);
    assert_eq!(asc.house, 1);
    let mc = subject.point(Point::Midheaven).unwrap();
    assert_eq!(mc.house, 10);
    let node = subject.point(Point::MeanNode).unwrap();
    let south = subject.point(Point::MeanSouthNode).unwrap();
    assert!(((south.longitude - node.longitude).rem_euclid(360.0) - 180.0).abs() < 1e-9);
    assert!(node.retrograde);
    assert!(subject.lunar_phase.is_some());
}

#[test]
fn test_build_is_bit_for_bit_reproducible() {
    let b = builder();
    let first = b.build("Alice", &birth_1990()).unwrap();
    let second = b.build("Alice", &birth_1990()).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_invalid_location_fails_whole_build() {
    let mut birth = birth_1990();
    birth.latitude = 91.0;
    assert!(matches!(
        builder().build("Bad", &birth),
        Err(AstroError::InvalidLocation { .. })
    ));
    birth.latitude = f64::NAN;
    assert!(matches!(
        builder().build("Bad", &birth),
        Err(AstroError::InvalidLocation { .. })
    ));
}

#[test]
fn test_invalid_time_fails_whole_build() {
    let mut birth = birth_1990();
    birth.hour = 24;
    assert!(matches!(
        builder().build("Bad", &birth),
        Err(AstroError::InvalidTimestamp { .. })
    ));
}

#[test]
fn test_polar_placidus_fails_but_whole_sign_succeeds() {
    let mut birth = birth_1990();
    birth.latitude = 78.2;
    assert!(matches!(
        builder().build("Svalbard", &birth),
        Err(AstroError::PolarCircleUndefined { .. })
    ));

    let settings = SubjectSettings {
        house_system: HouseSystem::WholeSign,
        ..SubjectSettings::default()
    };
    let subject = SubjectBuilder::new(linear_adapter(), settings)
        .build("Svalbard", &birth)
        .unwrap();
    assert_eq!(subject.houses[0].cusp % 30.0, 0.0);
}

#[test]
fn test_sidereal_shifts_points_and_cusps_alike() {
    let tropical = builder().build("Alice", &birth_1990()).unwrap();
    let settings = SubjectSettings {
        zodiac: ZodiacType::Sidereal {
            ayanamsa: Ayanamsa::FaganBradley,
        },
        ..SubjectSettings::default()
    };
    let sidereal = SubjectBuilder::new(linear_adapter(), settings)
        .build("Alice", &birth_1990())
        .unwrap();

    let offset = sidereal.zodiac.offset(sidereal.birth.instant.julian_day_tt);
    for (t, s) in tropical.points.iter().zip(&sidereal.points) {
        assert_eq!(t.point, s.point);
        assert!(((t.longitude - s.longitude).rem_euclid(360.0) - offset).abs() < 1e-9);
        assert_eq!(t.house, s.house);
    }
    for (t, s) in tropical.houses.iter().zip(&sidereal.houses) {
        assert!(((t.cusp - s.cusp).rem_euclid(360.0) - offset).abs() < 1e-9);
    }
}

#[test]
fn test_timezone_metadata_is_recorded() {
    let mut birth = birth_1990();
    birth.month = 7;
    birth.latitude = 41.9;
    birth.longitude = 12.5;
    birth.timezone = TimeZoneSpec::Iana {
        name: "Europe/Rome".to_string(),
    };
    let subject = builder().build("Roma", &birth).unwrap();
    assert_eq!(subject.birth.utc_offset_seconds, 7200);
    assert_eq!(subject.birth.zone.as_deref(), Some("Europe/Rome"));
    assert_eq!(subject.birth.instant.utc.to_rfc3339(), "1990-06-30T22:00:00+00:00");
}

#[test]
fn test_custom_point_set_and_lunar_phase() {
    let settings = SubjectSettings {
        active_points: vec![Point::Moon, Point::Sun, Point::Moon],
        ..SubjectSettings::default()
    };
    let subject = SubjectBuilder::new(linear_adapter(), settings)
        .build("Two", &birth_1990())
        .unwrap();
    assert_eq!(subject.points.len(), 2);
    assert_eq!(subject.points[0].point, Point::Sun);

    let phase = subject.lunar_phase.unwrap();
    let sun = subject.point(Point::Sun).unwrap().longitude;
    let moon = subject.point(Point::Moon).unwrap().longitude;
    assert_eq!(phase.angle, (moon - sun).rem_euclid(360.0));
    // the linear oracle puts the Moon about 51 degrees ahead of the Sun
    assert_eq!(phase.day, 4);
    assert_eq!(phase.name, LunarPhaseName::WaxingCrescent);
}
