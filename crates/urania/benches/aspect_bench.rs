use criterion::{black_box, criterion_group, criterion_main, Criterion};
use urania::subject::{BirthMetadata, SubjectKind, SubjectModel};
use urania::{
    AspectDetector, GeoLocation, HouseSystem, Instant, Point, RelationshipScorer, ZodiacType,
};

fn spread_subject(name: &str, offset: f64) -> SubjectModel {
    let mut cusps = [0.0; 12];
    for (i, cusp) in cusps.iter_mut().enumerate() {
        *cusp = i as f64 * 30.0;
    }
    let positions = Point::DEFAULT_ACTIVE
        .iter()
        .enumerate()
        .map(|(i, point)| (*point, (offset + i as f64 * 47.3) % 360.0, 0.0, 1.0 - i as f64 * 0.1))
        .collect();
    SubjectModel::assemble(
        name.to_string(),
        SubjectKind::Natal,
        BirthMetadata {
            instant: Instant::from_julian_day_ut(2_451_545.0).unwrap(),
            location: GeoLocation::new(0.0, 0.0).unwrap(),
            utc_offset_seconds: 0,
            zone: None,
        },
        ZodiacType::Tropical,
        HouseSystem::Equal,
        cusps,
        positions,
    )
}

fn bench_detect_natal(c: &mut Criterion) {
    let detector = AspectDetector::default();
    let subject = spread_subject("natal", 3.0);

    c.bench_function("detect_natal", |b| {
        b.iter(|| detector.detect_natal(black_box(&subject.points)))
    });
}

fn bench_synastry_score(c: &mut Criterion) {
    let detector = AspectDetector::default();
    let scorer = RelationshipScorer::new();
    let a = spread_subject("a", 3.0);
    let b = spread_subject("b", 101.0);

    c.bench_function("synastry_score", |bench| {
        bench.iter(|| {
            let aspects = detector.detect(black_box(&a.points), black_box(&b.points));
            scorer.score(&aspects, &a, &b)
        })
    });
}

criterion_group!(benches, bench_detect_natal, bench_synastry_score);
criterion_main!(benches);
