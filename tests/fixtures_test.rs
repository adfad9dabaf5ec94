use std::{fs, path::PathBuf};
use tempfile::TempDir;
use trip_office::{
    fixtures::{self, FixtureKind, FixtureSummary},
    types::{BudgetStatus, FlightOptionRaw},
    Validator,
};

fn shipped_fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

#[test]
fn shipped_fixtures_validate() {
    let report = fixtures::validate_dir(&shipped_fixtures(), Validator::Strict).unwrap();
    assert!(report.is_ok(), "{:?}", report.failures().collect::<Vec<_>>());
    assert_eq!(report.files.len(), 4);

    for file in &report.files {
        match (file.kind, file.outcome.as_ref().unwrap()) {
            (
                FixtureKind::Flights,
                FixtureSummary::Flights {
                    total,
                    one_stop,
                    redeyes,
                    ..
                },
            ) => {
                assert_eq!(*total, 5);
                assert!(*one_stop >= 1);
                assert!(*redeyes >= 1);
            }
            (FixtureKind::Hotels, FixtureSummary::Hotels { total, vibes }) => {
                assert_eq!(*total, 5);
                assert!(vibes.contains("ryokan"));
            }
            (FixtureKind::Activities, FixtureSummary::Activities { total, themes }) => {
                assert_eq!(*total, 10);
                assert!(themes.contains("food"));
            }
            (
                FixtureKind::Budget,
                FixtureSummary::Budget {
                    status,
                    surplus_shortfall,
                    fallbacks,
                },
            ) => {
                assert_eq!(*status, BudgetStatus::OverBudget);
                assert_eq!(*surplus_shortfall, -450.0);
                assert_eq!(*fallbacks, 1);
            }
            (kind, summary) => panic!("{kind:?} produced {summary:?}"),
        }
    }
}

#[test]
fn broken_files_are_reported_not_fatal() {
    let dir = TempDir::new().unwrap();
    fs::copy(
        shipped_fixtures().join("budget_tokyo.json"),
        dir.path().join("budget_ok.json"),
    )
    .unwrap();
    fs::write(dir.path().join("flights_bad.json"), r#"[{"flight_id": "X"}]"#).unwrap();
    fs::write(dir.path().join("notes.json"), "{}").unwrap();
    fs::write(dir.path().join("README.txt"), "not a fixture").unwrap();

    let report = fixtures::validate_dir(dir.path(), Validator::SerdeFirst).unwrap();
    assert!(!report.is_ok());
    assert_eq!(report.files.len(), 2);
    assert_eq!(report.failures().count(), 1);
    assert_eq!(report.skipped.len(), 1);
}

#[test]
fn missing_directory_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    let err = fixtures::validate_dir(&dir.path().join("nope"), Validator::SerdeFirst).unwrap_err();
    assert_eq!(err.error_code(), "CONFIG_ERROR");
}

#[test]
fn single_object_loads_as_a_collection() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("one_flight.json");
    fs::write(
        &path,
        r#"{
            "flight_id": "B6415", "airline_code": "B6", "airline_name": "JetBlue",
            "departure_time": "2025-04-01T06:00:00", "arrival_time": "2025-04-01T14:30:00",
            "duration": "5h30m", "stops": 0, "price": 219.0,
            "departure_airport": "SFO", "arrival_airport": "JFK"
        }"#,
    )
    .unwrap();

    let flights: Vec<FlightOptionRaw> =
        fixtures::load_collection(&path, Validator::SerdeFirst).unwrap();
    assert_eq!(flights.len(), 1);
    assert_eq!(flights[0].airline_code, "B6");
}
