use anyhow::Context;
use chrono::FixedOffset;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use urania::subject::SubjectSettings;
use urania::{
    Ayanamsa, BirthData, HouseSystem, OrbConfig, OrbEntry, Point, TimeZoneSpec, ZodiacType,
};

/// Everything a run needs: how to cast subjects, which aspects to look for
/// and the birth records on file.
#[derive(Debug, Clone, Default)]
pub struct UraniaSettings {
    pub subject: SubjectSettings,
    pub orbs: OrbConfig,
    pub ephemeris_path: Option<PathBuf>,
    pub subjects: Vec<NamedBirth>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedBirth {
    pub name: String,
    pub birth: BirthData,
}

impl UraniaSettings {
    pub fn subject_named(&self, name: &str) -> anyhow::Result<&NamedBirth> {
        self.subjects
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No subject named '{}' in config (known: {:?})",
                    name,
                    self.subjects.iter().map(|s| &s.name).collect::<Vec<_>>()
                )
            })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ChartToml {
    #[serde(default)]
    zodiac: Option<String>,
    #[serde(default)]
    ayanamsa: Option<Ayanamsa>,
    #[serde(default)]
    house_system: Option<String>,
    #[serde(default)]
    active_points: Option<Vec<String>>,
    #[serde(default)]
    ephemeris_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
struct SubjectToml {
    name: String,
    year: i32,
    month: u32,
    day: u32,
    #[serde(default)]
    hour: u32,
    #[serde(default)]
    minute: u32,
    #[serde(default)]
    second: u32,
    latitude: f64,
    longitude: f64,
    #[serde(default = "default_timezone")]
    timezone: String,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    chart: Option<ChartToml>,
    #[serde(default)]
    aspects: Option<Vec<OrbEntry>>,
    #[serde(default)]
    subjects: Vec<SubjectToml>,
}

/// Try the common relative paths for `configs/urania.toml`.
pub fn read_config_toml_text() -> anyhow::Result<String> {
    let paths = ["configs/urania.toml", "../../configs/urania.toml"];
    for p in &paths {
        if let Ok(c) = fs::read_to_string(p) {
            return Ok(c);
        }
    }
    anyhow::bail!("Could not load urania.toml from {:?}", paths);
}

pub fn load_settings() -> anyhow::Result<UraniaSettings> {
    parse_settings(&read_config_toml_text()?)
}

pub fn load_settings_from(path: &Path) -> anyhow::Result<UraniaSettings> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    parse_settings(&text).with_context(|| format!("Invalid config file {}", path.display()))
}

pub fn parse_settings(text: &str) -> anyhow::Result<UraniaSettings> {
    let root: RootConfigToml =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse urania.toml: {e}"))?;
    let chart = root.chart.unwrap_or_default();

    let zodiac = match (chart.zodiac.as_deref().map(str::to_lowercase).as_deref(), chart.ayanamsa) {
        (None | Some("tropical"), None) => ZodiacType::Tropical,
        (None | Some("tropical"), Some(_)) => {
            anyhow::bail!("chart.ayanamsa is only meaningful with zodiac = \"sidereal\"")
        }
        (Some("sidereal"), ayanamsa) => ZodiacType::Sidereal {
            ayanamsa: ayanamsa.unwrap_or(Ayanamsa::Lahiri),
        },
        (Some(other), _) => anyhow::bail!(
            "chart.zodiac must be \"tropical\" or \"sidereal\", got \"{}\"",
            other
        ),
    };

    let house_system = match chart.house_system {
        Some(name) => name
            .parse::<HouseSystem>()
            .with_context(|| format!("chart.house_system = \"{}\"", name))?,
        None => HouseSystem::default(),
    };

    let active_points = match chart.active_points {
        Some(names) => names
            .iter()
            .map(|name| {
                name.parse::<Point>()
                    .with_context(|| format!("chart.active_points entry \"{}\"", name))
            })
            .collect::<anyhow::Result<Vec<_>>>()?,
        None => Point::DEFAULT_ACTIVE.to_vec(),
    };

    let orbs = match root.aspects {
        Some(entries) => OrbConfig::new(entries).context("[[aspects]] table")?,
        None => OrbConfig::default(),
    };

    let subjects = root
        .subjects
        .into_iter()
        .map(|s| NamedBirth {
            birth: BirthData {
                year: s.year,
                month: s.month,
                day: s.day,
                hour: s.hour,
                minute: s.minute,
                second: s.second,
                latitude: s.latitude,
                longitude: s.longitude,
                timezone: parse_timezone(&s.timezone),
            },
            name: s.name,
        })
        .collect();

    Ok(UraniaSettings {
        subject: SubjectSettings {
            zodiac,
            house_system,
            active_points,
        },
        orbs,
        ephemeris_path: chart.ephemeris_path,
        subjects,
    })
}

/// `UTC`/`Z`, a fixed offset such as `+05:30` or `-0800` (hours always take
/// two digits), or an IANA zone
/// name. Zone names are resolved when the subject is built.
pub fn parse_timezone(text: &str) -> TimeZoneSpec {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("utc") || trimmed == "Z" {
        return TimeZoneSpec::Utc;
    }
    parse_offset(trimmed)
        .map(|seconds| TimeZoneSpec::Offset { seconds })
        .unwrap_or_else(|| TimeZoneSpec::Iana {
            name: trimmed.to_string(),
        })
}

fn parse_offset(text: &str) -> Option<i32> {
    if !text.starts_with(|c: char| c == '+' || c == '-') {
        return None;
    }
    text.parse::<FixedOffset>()
        .ok()
        .map(|offset| offset.local_minus_utc())
}
