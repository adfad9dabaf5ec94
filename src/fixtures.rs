//! Fixture files the demo agents serve, and a validation pass over them.
//!
//! Files are recognised by name prefix: `flights*.json` holds an array of
//! raw flights, `hotels*.json` a hotel search response, `activities*.json`
//! an array of activities and `budget*.json` one budget calculation.

use crate::{
    mapping::{budget_raw_to_normalized, normalize_activity, normalize_flight, normalize_hotel_search},
    schemas::Validator,
    types::{
        ActivityRaw, BudgetCalculationResponseRaw, BudgetStatus, FlightOptionRaw,
        HotelSearchResponseRaw, RawModel,
    },
    Result, TripError,
};
use serde_json::Value;
use std::{
    collections::BTreeSet,
    fmt, fs,
    path::{Path, PathBuf},
};
use tracing::{info, warn};

pub const DEFAULT_FIXTURES_DIR: &str = "fixtures";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureKind {
    Flights,
    Hotels,
    Activities,
    Budget,
}

impl FixtureKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            return None;
        }
        let stem = path.file_stem()?.to_str()?.to_ascii_lowercase();
        [
            ("flights", FixtureKind::Flights),
            ("hotels", FixtureKind::Hotels),
            ("activities", FixtureKind::Activities),
            ("budget", FixtureKind::Budget),
        ]
        .into_iter()
        .find(|(prefix, _)| stem.starts_with(prefix))
        .map(|(_, kind)| kind)
    }
}

fn read_json(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Load one raw entity from a JSON file.
pub fn load_one<T: RawModel>(path: &Path, validator: Validator) -> Result<T> {
    validator.parse(read_json(path)?)
}

/// Load a JSON array of raw entities; a single object loads as one item.
pub fn load_collection<T: RawModel>(path: &Path, validator: Validator) -> Result<Vec<T>> {
    match read_json(path)? {
        items @ Value::Array(_) => validator.parse_many(items),
        single => Ok(vec![validator.parse(single)?]),
    }
}

/// What a fixture file contained once normalized.
#[derive(Debug, Clone, PartialEq)]
pub enum FixtureSummary {
    Flights {
        total: usize,
        nonstop: usize,
        one_stop: usize,
        redeyes: usize,
        fallbacks: usize,
    },
    Hotels {
        total: usize,
        vibes: BTreeSet<String>,
    },
    Activities {
        total: usize,
        themes: BTreeSet<String>,
    },
    Budget {
        status: BudgetStatus,
        surplus_shortfall: f64,
        fallbacks: usize,
    },
}

impl fmt::Display for FixtureSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixtureSummary::Flights {
                total,
                nonstop,
                one_stop,
                redeyes,
                fallbacks,
            } => write!(
                f,
                "{total} flights ({nonstop} nonstop, {one_stop} one-stop, {redeyes} red-eye, {fallbacks} fallbacks)"
            ),
            FixtureSummary::Hotels { total, vibes } => write!(
                f,
                "{total} hotels (vibes: {})",
                vibes.iter().cloned().collect::<Vec<_>>().join(", ")
            ),
            FixtureSummary::Activities { total, themes } => write!(
                f,
                "{total} activities (themes: {})",
                themes.iter().cloned().collect::<Vec<_>>().join(", ")
            ),
            FixtureSummary::Budget {
                status,
                surplus_shortfall,
                fallbacks,
            } => write!(
                f,
                "budget {} ({surplus_shortfall:+.2}, {fallbacks} fallbacks)",
                status.as_str()
            ),
        }
    }
}

#[derive(Debug)]
pub struct FixtureFileReport {
    pub path: PathBuf,
    pub kind: FixtureKind,
    pub outcome: Result<FixtureSummary>,
}

#[derive(Debug, Default)]
pub struct FixtureReport {
    pub files: Vec<FixtureFileReport>,
    /// JSON files whose name matched no fixture kind
    pub skipped: Vec<PathBuf>,
}

impl FixtureReport {
    pub fn is_ok(&self) -> bool {
        self.files.iter().all(|file| file.outcome.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &FixtureFileReport> {
        self.files.iter().filter(|file| file.outcome.is_err())
    }
}

/// Parse and normalize one fixture file.
pub fn check_fixture(path: &Path, kind: FixtureKind, validator: Validator) -> Result<FixtureSummary> {
    match kind {
        FixtureKind::Flights => {
            let raw: Vec<FlightOptionRaw> = load_collection(path, validator)?;
            let mut summary = (0, 0, 0, 0);
            for flight in &raw {
                let mapped = normalize_flight(flight)?;
                summary.0 += usize::from(mapped.value.stops == 0);
                summary.1 += usize::from(mapped.value.stops == 1);
                summary.2 += usize::from(mapped.value.is_redeye);
                summary.3 += mapped.fallbacks.len();
            }
            Ok(FixtureSummary::Flights {
                total: raw.len(),
                nonstop: summary.0,
                one_stop: summary.1,
                redeyes: summary.2,
                fallbacks: summary.3,
            })
        }
        FixtureKind::Hotels => {
            let search: HotelSearchResponseRaw = load_one(path, validator)?;
            let hotels = normalize_hotel_search(&search)?;
            Ok(FixtureSummary::Hotels {
                total: hotels.len(),
                vibes: hotels.into_iter().filter_map(|hotel| hotel.vibe).collect(),
            })
        }
        FixtureKind::Activities => {
            let raw: Vec<ActivityRaw> = load_collection(path, validator)?;
            let themes = raw
                .iter()
                .map(normalize_activity)
                .flat_map(|activity| activity.themes)
                .collect();
            Ok(FixtureSummary::Activities {
                total: raw.len(),
                themes,
            })
        }
        FixtureKind::Budget => {
            let raw: BudgetCalculationResponseRaw = load_one(path, validator)?;
            let mapped = budget_raw_to_normalized(&raw)?;
            Ok(FixtureSummary::Budget {
                status: mapped.value.status,
                surplus_shortfall: mapped.value.surplus_shortfall,
                fallbacks: mapped.fallbacks.len(),
            })
        }
    }
}

/// Check every recognised fixture in `dir`, in file-name order.
///
/// Per-file failures are collected in the report; only an unreadable
/// directory is an error.
pub fn validate_dir(dir: &Path, validator: Validator) -> Result<FixtureReport> {
    if !dir.is_dir() {
        return Err(TripError::Config(format!(
            "fixtures directory {} does not exist",
            dir.display()
        )));
    }

    let mut paths = fs::read_dir(dir)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    paths.sort();

    let mut report = FixtureReport::default();
    for path in paths {
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        let Some(kind) = FixtureKind::from_path(&path) else {
            warn!(target: "trip_office::fixtures", path = %path.display(), "unrecognised fixture file");
            report.skipped.push(path);
            continue;
        };

        let outcome = check_fixture(&path, kind, validator);
        match &outcome {
            Ok(summary) => {
                info!(target: "trip_office::fixtures", path = %path.display(), "{summary}")
            }
            Err(err) => {
                warn!(target: "trip_office::fixtures", path = %path.display(), "fixture rejected: {err}")
            }
        }
        report.files.push(FixtureFileReport {
            path,
            kind,
            outcome,
        });
    }

    Ok(report)
}
