use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use urania::{
    AspectDetector, AspectMatch, CompositeSubjectFactory, EclipticPosition, EphemerisAdapter,
    EphemerisRange, Point, RelationshipScoreResult, RelationshipScorer, SubjectBuilder,
    SubjectModel, TransitTimeRange,
};
use urania_config::UraniaSettings;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Config file (default: configs/urania.toml, then ../../configs/urania.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding Swiss Ephemeris files. Overrides `chart.ephemeris_path`;
    /// without either the built-in analytical ephemeris is used.
    #[arg(long)]
    ephemeris_path: Option<PathBuf>,

    /// Compact JSON instead of pretty printed.
    #[arg(long, default_value_t = false)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Cast a subject and list its natal aspects.
    Natal { subject: String },
    /// Cross aspects and relationship score of two subjects.
    Synastry { first: String, second: String },
    /// Midpoint composite of two subjects and its aspects.
    Composite { first: String, second: String },
    /// Aspects from the moving sky to a subject, step by step.
    Transits {
        subject: String,
        /// RFC 3339 start, e.g. 2024-01-01T00:00:00Z.
        #[arg(long)]
        start: DateTime<Utc>,
        #[arg(long)]
        end: DateTime<Utc>,
        #[arg(long, default_value_t = 24)]
        step_hours: i64,
    },
    /// Raw positions of the configured points over a date range.
    Positions {
        #[arg(long)]
        start: DateTime<Utc>,
        #[arg(long)]
        end: DateTime<Utc>,
        #[arg(long, default_value_t = 24)]
        step_hours: i64,
        /// Points to look up (default: every non-angle active point).
        #[arg(long, value_delimiter = ',')]
        points: Vec<Point>,
    },
}

#[derive(Serialize)]
struct NatalReport<'a> {
    subject: &'a SubjectModel,
    aspects: Vec<AspectMatch>,
}

#[derive(Serialize)]
struct SynastryReport {
    first: String,
    second: String,
    aspects: Vec<AspectMatch>,
    score: RelationshipScoreResult,
}

#[derive(Serialize)]
struct PositionRow {
    utc: DateTime<Utc>,
    point: Point,
    #[serde(flatten)]
    position: EclipticPosition,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => urania_config::load_settings_from(path)?,
        None => urania_config::load_settings().unwrap_or_else(|e| {
            log::warn!("{}; using built-in defaults", e);
            UraniaSettings::default()
        }),
    };

    let ephemeris_path = args
        .ephemeris_path
        .clone()
        .or_else(|| settings.ephemeris_path.clone());
    let adapter =
        EphemerisAdapter::swiss(ephemeris_path).context("Failed to open the ephemeris")?;
    log::info!("Using ephemeris '{}'", adapter.oracle_name());

    let builder = SubjectBuilder::new(adapter.clone(), settings.subject.clone());
    let detector = AspectDetector::new(settings.orbs.clone());

    let cast = |name: &str| -> anyhow::Result<SubjectModel> {
        let record = settings.subject_named(name)?;
        builder
            .build(&record.name, &record.birth)
            .with_context(|| format!("Failed to cast subject '{}'", record.name))
    };

    let json = match args.command {
        Command::Natal { subject } => {
            let subject = cast(&subject)?;
            let report = NatalReport {
                aspects: detector.detect_natal(&subject.points),
                subject: &subject,
            };
            render(&report, args.compact)?
        }
        Command::Synastry { first, second } => {
            let first = cast(&first)?;
            let second = cast(&second)?;
            let aspects = detector.detect(&first.points, &second.points);
            let score = RelationshipScorer::new().score(&aspects, &first, &second);
            let report = SynastryReport {
                first: first.name,
                second: second.name,
                aspects,
                score,
            };
            render(&report, args.compact)?
        }
        Command::Composite { first, second } => {
            let first = cast(&first)?;
            let second = cast(&second)?;
            let composite = CompositeSubjectFactory::new().compose(&first, &second)?;
            let report = NatalReport {
                aspects: detector.detect_natal(&composite.points),
                subject: &composite,
            };
            render(&report, args.compact)?
        }
        Command::Transits {
            subject,
            start,
            end,
            step_hours,
        } => {
            let natal = cast(&subject)?;
            let moments = TransitTimeRange::new(builder.clone(), detector.clone())
                .compute(&natal, start, end, Duration::hours(step_hours))?;
            render(&moments, args.compact)?
        }
        Command::Positions {
            start,
            end,
            step_hours,
            points,
        } => {
            let points = if points.is_empty() {
                settings
                    .subject
                    .active_points
                    .iter()
                    .copied()
                    .filter(|p| !p.is_angle())
                    .collect()
            } else {
                points
            };
            let positions = EphemerisRange::new(Arc::new(adapter))
                .compute(
                    &points,
                    start,
                    end,
                    Duration::hours(step_hours),
                    settings.subject.zodiac,
                )
                .await?;
            let rows: Vec<PositionRow> = positions
                .into_iter()
                .map(|(key, position)| PositionRow {
                    utc: key.utc,
                    point: key.point,
                    position,
                })
                .collect();
            render(&rows, args.compact)?
        }
    };

    println!("{}", json);
    Ok(())
}

fn render<T: Serialize>(value: &T, compact: bool) -> anyhow::Result<String> {
    let text = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(text)
}
