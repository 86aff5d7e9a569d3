//! Zodiac signs, their classifications, rulers and the sidereal ayanamsa.
//!
//! Sign index 0 is Aries; every sign spans 30 degrees of ecliptic longitude.

use crate::points::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Cardinal,
    Fixed,
    Mutable,
}

/// Masculine (fire/air) or feminine (earth/water) signs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

// (sign, abbreviation, element, quality, traditional ruler, modern ruler)
const SIGN_TABLE: [(Sign, &str, Element, Quality, Point, Point); 12] = [
    (Sign::Aries, "Ari", Element::Fire, Quality::Cardinal, Point::Mars, Point::Mars),
    (Sign::Taurus, "Tau", Element::Earth, Quality::Fixed, Point::Venus, Point::Venus),
    (Sign::Gemini, "Gem", Element::Air, Quality::Mutable, Point::Mercury, Point::Mercury),
    (Sign::Cancer, "Can", Element::Water, Quality::Cardinal, Point::Moon, Point::Moon),
    (Sign::Leo, "Leo", Element::Fire, Quality::Fixed, Point::Sun, Point::Sun),
    (Sign::Virgo, "Vir", Element::Earth, Quality::Mutable, Point::Mercury, Point::Mercury),
    (Sign::Libra, "Lib", Element::Air, Quality::Cardinal, Point::Venus, Point::Venus),
    (Sign::Scorpio, "Sco", Element::Water, Quality::Fixed, Point::Mars, Point::Pluto),
    (Sign::Sagittarius, "Sag", Element::Fire, Quality::Mutable, Point::Jupiter, Point::Jupiter),
    (Sign::Capricorn, "Cap", Element::Earth, Quality::Cardinal, Point::Saturn, Point::Saturn),
    (Sign::Aquarius, "Aqu", Element::Air, Quality::Fixed, Point::Saturn, Point::Uranus),
    (Sign::Pisces, "Pis", Element::Water, Quality::Mutable, Point::Jupiter, Point::Neptune),
];

impl Sign {
    pub const ALL: [Sign; 12] = [
        Sign::Aries,
        Sign::Taurus,
        Sign::Gemini,
        Sign::Cancer,
        Sign::Leo,
        Sign::Virgo,
        Sign::Libra,
        Sign::Scorpio,
        Sign::Sagittarius,
        Sign::Capricorn,
        Sign::Aquarius,
        Sign::Pisces,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Sign> {
        Self::ALL.get(index as usize).copied()
    }

    /// Sign containing the given longitude (any real value, wrapped to the circle).
    pub fn from_longitude(longitude: f64) -> Sign {
        let (index, _) = sign_and_degree(longitude);
        Self::ALL[index as usize]
    }

    pub fn abbreviation(self) -> &'static str {
        SIGN_TABLE[self as usize].1
    }

    pub fn element(self) -> Element {
        SIGN_TABLE[self as usize].2
    }

    pub fn quality(self) -> Quality {
        SIGN_TABLE[self as usize].3
    }

    pub fn polarity(self) -> Polarity {
        match self.element() {
            Element::Fire | Element::Air => Polarity::Positive,
            Element::Earth | Element::Water => Polarity::Negative,
        }
    }

    /// Planetary ruler; `modern` swaps in the outer planets for Scorpio, Aquarius and Pisces.
    pub fn ruler(self, modern: bool) -> Point {
        let row = &SIGN_TABLE[self as usize];
        if modern {
            row.5
        } else {
            row.4
        }
    }

    /// Forward distance in signs from `self` to `other`, 0..=11.
    pub fn distance_to(self, other: Sign) -> u8 {
        (other.index() + 12 - self.index()) % 12
    }

    pub fn name(self) -> &'static str {
        match self {
            Sign::Aries => "aries",
            Sign::Taurus => "taurus",
            Sign::Gemini => "gemini",
            Sign::Cancer => "cancer",
            Sign::Leo => "leo",
            Sign::Virgo => "virgo",
            Sign::Libra => "libra",
            Sign::Scorpio => "scorpio",
            Sign::Sagittarius => "sagittarius",
            Sign::Capricorn => "capricorn",
            Sign::Aquarius => "aquarius",
            Sign::Pisces => "pisces",
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Normalize degrees to [0, 360).
pub fn normalize_degrees(value: f64) -> f64 {
    let normalized = value.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Split a longitude into (sign index, degree within sign).
///
/// `sign * 30 + degree` reproduces the normalized longitude exactly: the
/// degree is taken with `%`, which is exact in IEEE arithmetic, and the sign
/// from the remaining multiple of 30.
pub fn sign_and_degree(longitude: f64) -> (u8, f64) {
    let lon = normalize_degrees(longitude);
    let degree = lon % 30.0;
    let sign = ((lon - degree) / 30.0).round() as u8 % 12;
    (sign, degree)
}

/// Tropical or sidereal reference frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ZodiacType {
    #[default]
    Tropical,
    Sidereal { ayanamsa: Ayanamsa },
}

impl ZodiacType {
    /// Offset subtracted from tropical longitudes at the given JD(TT).
    pub fn offset(&self, julian_day_tt: f64) -> f64 {
        match self {
            ZodiacType::Tropical => 0.0,
            ZodiacType::Sidereal { ayanamsa } => ayanamsa.value(julian_day_tt),
        }
    }
}

/// Ayanamsa presets, or a custom offset, all referred to J2000.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ayanamsa {
    Lahiri,
    FaganBradley,
    DeLuce,
    Raman,
    Krishnamurti,
    Yukteshwar,
    DjwhalKhul,
    TrueCitra,
    /// Degrees at J2000.0, precessed like the presets.
    Custom(f64),
}

const J2000: f64 = 2_451_545.0;

// (name, value at J2000.0 in degrees)
const AYANAMSA_TABLE: &[(&str, f64)] = &[
    ("lahiri", 23.853_056),
    ("fagan_bradley", 24.740_300),
    ("de_luce", 27.815_753),
    ("raman", 22.410_791),
    ("krishnamurti", 23.757_924),
    ("yukteshwar", 22.478_803),
    ("djwhal_khul", 28.359_679),
    ("true_citra", 23.844_799),
];

impl Ayanamsa {
    fn reference_value(&self) -> f64 {
        match self {
            Ayanamsa::Custom(value) => *value,
            named => AYANAMSA_TABLE
                .iter()
                .find(|(name, _)| *name == named.name())
                .map(|(_, value)| *value)
                .unwrap_or(0.0),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Ayanamsa::Lahiri => "lahiri",
            Ayanamsa::FaganBradley => "fagan_bradley",
            Ayanamsa::DeLuce => "de_luce",
            Ayanamsa::Raman => "raman",
            Ayanamsa::Krishnamurti => "krishnamurti",
            Ayanamsa::Yukteshwar => "yukteshwar",
            Ayanamsa::DjwhalKhul => "djwhal_khul",
            Ayanamsa::TrueCitra => "true_citra",
            Ayanamsa::Custom(_) => "custom",
        }
    }

    /// Ayanamsa in degrees at the given JD(TT), precessed with the IAU 1976
    /// general precession in longitude.
    pub fn value(&self, julian_day_tt: f64) -> f64 {
        let t = (julian_day_tt - J2000) / 36_525.0;
        let precession_arcsec = 5029.0966 * t + 1.11113 * t * t;
        self.reference_value() + precession_arcsec / 3600.0
    }
}
