mod common;

use common::subject;
use urania::relationship::SignRelation;
use urania::{AspectDetector, AspectKind, Point, RelationshipScorer, ScoreBand, ScoreFactor};

#[test]
fn test_self_synastry_score() {
    // Chosen so that no two different points aspect each other under the
    // default orbs; only the five same-identity conjunctions count.
    let s = subject(
        "Self",
        &[
            (Point::Sun, 0.0, 1.0),
            (Point::Moon, 30.0, 13.0),
            (Point::Mars, 323.0, 0.5),
            (Point::Venus, 349.0, 1.2),
            (Point::Ascendant, 100.0, 0.0),
        ],
    );
    let aspects = AspectDetector::default().detect(&s.points, &s.points);
    assert_eq!(aspects.len(), 5);
    assert!(aspects.iter().all(|a| a.p1 == a.p2 && a.kind == AspectKind::Conjunction));

    let result = RelationshipScorer::new().score(&aspects, &s, &s);

    // conjunctions: Sun 4 + Moon 4 + Ascendant 4 + Venus 2 + Mars 2 = 16
    // signs: Sun/Sun same 3 + Moon/Moon same 2 + Asc/Asc same 2 = 7
    // Sun in Aries and Moon in Taurus are adjacent, worth nothing
    assert_eq!(result.score, 23);
    assert_eq!(result.band, ScoreBand::Exceptional);
    assert_eq!(result.factors.len(), 8);
    assert_eq!(
        result.factors.iter().map(ScoreFactor::points).sum::<i32>(),
        result.score
    );
}

#[test]
fn test_sign_bonuses_between_two_subjects() {
    // Sun in Leo, Moon in Aries vs Sun in Aries, Moon in Sagittarius
    let a = subject("A", &[(Point::Sun, 125.0, 1.0), (Point::Moon, 15.0, 13.0)]);
    let b = subject("B", &[(Point::Sun, 5.0, 1.0), (Point::Moon, 245.0, 13.0)]);
    let result = RelationshipScorer::new().score(&[], &a, &b);

    let relation = |first, second| {
        result.factors.iter().find_map(|f| match f {
            ScoreFactor::SignRelation {
                first: f1,
                second: f2,
                relation,
                points,
            } if *f1 == first && *f2 == second => Some((*relation, *points)),
            _ => None,
        })
    };
    assert_eq!(relation(Point::Sun, Point::Sun), Some((SignRelation::SameElement, 2)));
    assert_eq!(relation(Point::Moon, Point::Moon), Some((SignRelation::SameElement, 2)));
    assert_eq!(relation(Point::Moon, Point::Sun), Some((SignRelation::Same, 3)));
    assert_eq!(relation(Point::Sun, Point::Moon), Some((SignRelation::SameElement, 2)));
    assert_eq!(result.score, 9);
    assert_eq!(result.band, ScoreBand::Medium);
}

#[test]
fn test_minor_aspects_only_count_with_sensitive_points() {
    let a = subject("A", &[(Point::Sun, 0.0, 1.0), (Point::Venus, 200.0, 1.2)]);
    let b = subject("B", &[(Point::Mars, 150.0, 0.5), (Point::Jupiter, 350.0, 0.1)]);
    let aspects = AspectDetector::new(
        urania::OrbConfig::new(vec![urania::OrbEntry {
            kind: AspectKind::Quincunx,
            orb: 2.0,
        }])
        .unwrap(),
    )
    .detect(&a.points, &b.points);
    // Sun-Mars and Venus-Jupiter are both quincunxes
    assert_eq!(aspects.len(), 2);
    let result = RelationshipScorer::new().score(&aspects, &a, &b);
    assert_eq!(result.score, 1);
    assert_eq!(result.band, ScoreBand::Minimal);
}
