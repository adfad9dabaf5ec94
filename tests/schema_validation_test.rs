use serde_json::json;
use trip_office::{
    schemas::catalog,
    types::{FlightOptionRaw, HotelRaw, RawModel},
    EntitySchema, TripError, Validator,
};

fn flight() -> serde_json::Value {
    json!({
        "flight_id": "NH7",
        "airline_code": "NH",
        "airline_name": "All Nippon Airways",
        "departure_time": "2025-04-01T17:55:00",
        "arrival_time": "2025-04-02T21:35:00",
        "duration": "11h40m",
        "stops": 0,
        "price": 3420.0,
        "fare_class": "Business",
        "departure_airport": "SFO",
        "arrival_airport": "NRT"
    })
}

#[test]
fn raw_schema_lists_required_fields() {
    let required = FlightOptionRaw::schema().required_fields();
    for field in ["flight_id", "airline_code", "departure_time", "price"] {
        assert!(required.contains(&field), "missing {field}");
    }
    assert!(!required.contains(&"currency"));
    assert!(!required.contains(&"aircraft_type"));
}

#[test]
fn field_docs_reach_the_schema() {
    let schema = FlightOptionRaw::schema().schema_json();
    assert_eq!(
        schema["properties"]["departure_time"]["description"],
        "Local departure time at the origin airport"
    );
}

#[test]
fn both_validators_accept_a_good_flight() {
    for validator in [Validator::SerdeFirst, Validator::Strict] {
        let raw: FlightOptionRaw = validator.parse(flight()).unwrap();
        assert_eq!(raw.currency, "USD");
    }
}

#[test]
fn serde_first_reports_the_failing_path() {
    let mut payload = flight();
    payload["stops"] = json!("none");
    let err = Validator::SerdeFirst
        .parse::<FlightOptionRaw>(payload)
        .unwrap_err();
    assert!(matches!(err, TripError::Validation(ref msg) if msg.contains("stops")));
}

#[test]
fn strict_rejects_before_deserializing() {
    let mut payload = flight();
    payload["airline_code"] = json!("NHXX");
    let err = Validator::Strict
        .parse::<FlightOptionRaw>(payload)
        .unwrap_err();
    assert!(matches!(err, TripError::Validation(ref msg) if msg.contains("schema")));
}

#[test]
fn field_checks_run_after_deserializing() {
    let mut payload = flight();
    payload["price"] = json!(-1.0);
    assert!(FlightOptionRaw::from_value(payload).is_err());
}

#[test]
fn parse_many_prefixes_the_index() {
    let mut bad = flight();
    bad["departure_airport"] = json!("S F");
    let err = Validator::SerdeFirst
        .parse_many::<FlightOptionRaw>(json!([flight(), bad]))
        .unwrap_err();
    assert!(err.to_string().contains("[1]"));

    assert!(Validator::SerdeFirst
        .parse_many::<FlightOptionRaw>(flight())
        .is_err());
}

#[test]
fn hotel_amenities_accept_both_shapes() {
    let raw = HotelRaw::from_value(json!({
        "hotel_id": "h1",
        "name": "Trunk Hotel",
        "city": "Tokyo",
        "location": {"address": "5-31 Jingumae"},
        "amenities": ["Free WiFi", {"name": "Gym", "available": false}],
        "price_range": "$390-$560"
    }))
    .unwrap();
    let names: Vec<&str> = raw.amenities.iter().map(|amenity| amenity.name()).collect();
    assert_eq!(names, vec!["Free WiFi", "Gym"]);
}

#[test]
fn catalog_serves_every_schema_as_json() {
    for handle in catalog::all() {
        assert!(handle.schema_json().is_object(), "{}", handle.schema_name());
    }
    assert!(catalog::find("budgetresult").is_some());
    assert!(catalog::find("NoSuchEntity").is_none());
}
