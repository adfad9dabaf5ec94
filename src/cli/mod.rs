use crate::{
    fixtures::{self, DEFAULT_FIXTURES_DIR},
    schemas::{catalog, Validator},
    tools::ToolRegistry,
};
use anyhow::{anyhow, bail, Context};
use clap::{builder::PossibleValuesParser, Arg, ArgAction, ArgMatches, Command};
use serde_json::{json, Value};
use std::{env, fs, path::PathBuf};
use tracing::{info, Level};

pub const FIXTURES_DIR_ENV: &str = "TRIP_OFFICE_FIXTURES_DIR";
pub const VALIDATION_ENV: &str = "TRIP_OFFICE_VALIDATION";

/// Entities the `normalize` subcommand accepts, with the tool and the
/// parameter key each document is passed under.
const NORMALIZE_TARGETS: &[(&str, &str, &str)] = &[
    ("flight", "normalize_flight", "flight"),
    ("hotel-search", "normalize_hotel_search", "search"),
    ("hotel-pricing", "normalize_hotel_pricing", "pricing"),
    ("activity", "normalize_activity", "activity"),
    ("budget", "normalize_budget", "budget"),
];

/// Settings resolved from arguments, then the environment, then defaults
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub fixtures_dir: PathBuf,
    pub validator: Validator,
}

impl Settings {
    pub fn resolve(
        fixtures_dir: Option<&str>,
        validation: Option<&str>,
        lookup_env: impl Fn(&str) -> Option<String>,
    ) -> crate::Result<Self> {
        let fixtures_dir = fixtures_dir
            .map(str::to_string)
            .or_else(|| lookup_env(FIXTURES_DIR_ENV))
            .unwrap_or_else(|| DEFAULT_FIXTURES_DIR.to_string());

        let validator = match validation
            .map(str::to_string)
            .or_else(|| lookup_env(VALIDATION_ENV))
        {
            Some(mode) => Validator::from_mode(&mode)?,
            None => Validator::default(),
        };

        Ok(Self {
            fixtures_dir: PathBuf::from(fixtures_dir),
            validator,
        })
    }
}

fn command() -> Command {
    Command::new("trip-office")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Normalize and validate the trip planning agents' data")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Increase log verbosity (-v debug, -vv trace)"),
        )
        .arg(
            Arg::new("validation")
                .long("validation")
                .value_name("MODE")
                .global(true)
                .help("Validation mode: serde or strict (or set TRIP_OFFICE_VALIDATION)"),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("normalize")
                .about("Normalize one raw document and print the result")
                .arg(
                    Arg::new("entity")
                        .required(true)
                        .index(1)
                        .value_parser(PossibleValuesParser::new(
                            NORMALIZE_TARGETS.iter().map(|(name, _, _)| *name),
                        ))
                        .help("Kind of raw document"),
                )
                .arg(
                    Arg::new("file")
                        .required(true)
                        .index(2)
                        .help("JSON file holding the raw document (an array normalizes each item)"),
                )
                .arg(
                    Arg::new("room-type")
                        .long("room-type")
                        .value_name("ROOM")
                        .help("Room type to price (hotel-pricing only)"),
                )
                .arg(
                    Arg::new("check-in")
                        .long("check-in")
                        .value_name("DATE")
                        .help("Stay start, YYYY-MM-DD (hotel-pricing only)"),
                )
                .arg(
                    Arg::new("check-out")
                        .long("check-out")
                        .value_name("DATE")
                        .help("Stay end, YYYY-MM-DD (hotel-pricing only)"),
                ),
        )
        .subcommand(
            Command::new("validate-fixtures")
                .about("Parse and normalize every fixture file in a directory")
                .arg(
                    Arg::new("dir")
                        .index(1)
                        .help("Fixtures directory (or set TRIP_OFFICE_FIXTURES_DIR)"),
                ),
        )
        .subcommand(
            Command::new("schema")
                .about("Print the JSON schema of an entity, or list entities")
                .arg(Arg::new("entity").index(1).help("Entity name, e.g. FlightOption")),
        )
        .subcommand(Command::new("tools").about("Print the normalizer tool definitions"))
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// CLI entry point for the trip-office tool
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let matches = command().get_matches();
    init_tracing(matches.get_count("verbose"));

    match matches.subcommand() {
        Some(("normalize", sub)) => normalize(sub).await,
        Some(("validate-fixtures", sub)) => validate_fixtures(sub),
        Some(("schema", sub)) => print_schema(sub),
        Some(("tools", _)) => {
            let definitions = ToolRegistry::with_normalizers().to_tool_definitions();
            println!("{}", serde_json::to_string_pretty(&definitions)?);
            Ok(())
        }
        _ => bail!("no subcommand given"),
    }
}

fn settings(matches: &ArgMatches, fixtures_dir: Option<&str>) -> anyhow::Result<Settings> {
    Settings::resolve(
        fixtures_dir,
        matches.get_one::<String>("validation").map(String::as_str),
        |key| env::var(key).ok(),
    )
    .context("invalid configuration")
}

async fn normalize(matches: &ArgMatches) -> anyhow::Result<()> {
    let settings = settings(matches, None)?;
    let entity = matches
        .get_one::<String>("entity")
        .ok_or_else(|| anyhow!("missing entity"))?;
    let file = matches
        .get_one::<String>("file")
        .ok_or_else(|| anyhow!("missing file"))?;
    let (_, tool, key) = NORMALIZE_TARGETS
        .iter()
        .find(|(name, _, _)| *name == entity.as_str())
        .ok_or_else(|| anyhow!("unknown entity `{entity}`"))?;

    let text = fs::read_to_string(file).with_context(|| format!("reading {file}"))?;
    let document: Value =
        serde_json::from_str(&text).with_context(|| format!("parsing {file} as JSON"))?;

    let mut extra = serde_json::Map::new();
    if *tool == "normalize_hotel_pricing" {
        for arg in ["room-type", "check-in", "check-out"] {
            let value = matches
                .get_one::<String>(arg)
                .ok_or_else(|| anyhow!("--{arg} is required for hotel-pricing"))?;
            extra.insert(arg.replace('-', "_"), json!(value));
        }
    }

    let registry = ToolRegistry::with_normalizers().with_validator(settings.validator);
    let documents = match document {
        Value::Array(items) => items,
        single => vec![single],
    };

    let mut results = Vec::with_capacity(documents.len());
    for (idx, document) in documents.into_iter().enumerate() {
        let mut params = extra.clone();
        params.insert(key.to_string(), document);
        let output = registry
            .execute(tool, Value::Object(params))
            .await
            .with_context(|| format!("normalizing item {idx} of {file}"))?;
        results.push(output);
    }

    let output = if results.len() == 1 {
        results.remove(0)
    } else {
        Value::Array(results)
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn validate_fixtures(matches: &ArgMatches) -> anyhow::Result<()> {
    let settings = settings(
        matches,
        matches.get_one::<String>("dir").map(String::as_str),
    )?;
    info!(
        dir = %settings.fixtures_dir.display(),
        validator = ?settings.validator,
        "validating fixtures"
    );

    let report = fixtures::validate_dir(&settings.fixtures_dir, settings.validator)?;
    for file in &report.files {
        match &file.outcome {
            Ok(summary) => println!("ok    {}: {summary}", file.path.display()),
            Err(err) => println!("FAIL  {}: {err}", file.path.display()),
        }
    }
    for path in &report.skipped {
        println!("skip  {}", path.display());
    }

    let failed = report.failures().count();
    if failed > 0 {
        bail!("{failed} fixture file(s) failed validation");
    }
    Ok(())
}

fn print_schema(matches: &ArgMatches) -> anyhow::Result<()> {
    match matches.get_one::<String>("entity") {
        Some(name) => {
            let handle = catalog::find(name).ok_or_else(|| anyhow!("no entity named `{name}`"))?;
            println!("{}", serde_json::to_string_pretty(handle.schema_json())?);
        }
        None => {
            for handle in catalog::all() {
                println!("{:<30} {}", handle.schema_name(), handle.kind().as_str());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_win_over_environment() {
        let env = |key: &str| match key {
            FIXTURES_DIR_ENV => Some("/srv/fixtures".to_string()),
            VALIDATION_ENV => Some("strict".to_string()),
            _ => None,
        };

        let from_env = Settings::resolve(None, None, env).unwrap();
        assert_eq!(from_env.fixtures_dir, PathBuf::from("/srv/fixtures"));
        assert_eq!(from_env.validator, Validator::Strict);

        let from_args = Settings::resolve(Some("data"), Some("serde"), env).unwrap();
        assert_eq!(from_args.fixtures_dir, PathBuf::from("data"));
        assert_eq!(from_args.validator, Validator::SerdeFirst);
    }

    #[test]
    fn defaults_and_bad_mode() {
        let defaults = Settings::resolve(None, None, |_| None).unwrap();
        assert_eq!(defaults.fixtures_dir, PathBuf::from(DEFAULT_FIXTURES_DIR));
        assert_eq!(defaults.validator, Validator::SerdeFirst);

        assert!(Settings::resolve(None, Some("lenient"), |_| None).is_err());
    }

    #[test]
    fn command_definition_is_consistent() {
        command().debug_assert();
    }
}
