use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use trip_office::{tools::Tool, EntityKind, EntitySchema};

#[derive(Debug, Deserialize, JsonSchema)]
struct FareParams {
    fare: f64,
    #[serde(default)]
    nights: Option<u32>,
}

trip_office::tool!(
    name = "scale_fare",
    description = "Multiply a nightly fare by a number of nights",
    params = FareParams,
    |params: FareParams| async move {
        let nights = params.nights.unwrap_or(1);
        Ok(json!({
            "total": params.fare * f64::from(nights),
            "nights": nights
        }))
    }
);

/// Fare quote as a legacy agent reports it
#[derive(Debug, Deserialize, JsonSchema)]
#[trip_office::entity_schema(kind = "raw", name = "LegacyFare")]
#[allow(dead_code)]
struct LegacyFareQuote {
    /// Quoted amount in USD
    amount: f64,
    carrier: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[trip_office::entity_schema(description = "Undocumented entity with an explicit description")]
#[allow(dead_code)]
struct PlainEntity {
    id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[trip_office::entity_schema(kind = "envelope")]
#[allow(dead_code)]
struct Handoff {
    trace_id: String,
}

#[tokio::test]
async fn tool_macro_generates_named_tool() {
    let tool = ScaleFareTool;

    assert_eq!(tool.name(), "scale_fare");
    assert_eq!(tool.description(), "Multiply a nightly fare by a number of nights");
    assert!(tool.parameters_schema().is_object());

    let result = tool
        .execute(json!({"fare": 140.0, "nights": 3}))
        .await
        .unwrap();
    assert_eq!(result["total"], 420.0);
    assert_eq!(result["nights"], 3);
}

#[tokio::test]
async fn tool_macro_applies_serde_defaults() {
    let result = ScaleFareTool.execute(json!({"fare": 99.5})).await.unwrap();
    assert_eq!(result["nights"], 1);
}

#[tokio::test]
async fn tool_macro_rejects_bad_params_with_path() {
    let err = ScaleFareTool
        .execute(json!({"fare": "cheap"}))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "TOOL_EXECUTION_ERROR");
    assert!(err.to_string().contains("scale_fare"));
    assert!(err.to_string().contains("fare"));
}

#[test]
fn entity_schema_uses_explicit_name_and_kind() {
    let handle = LegacyFareQuote::schema();
    assert_eq!(handle.schema_name(), "LegacyFare");
    assert_eq!(handle.type_name(), "LegacyFareQuote");
    assert_eq!(handle.kind(), EntityKind::Raw);

    let schema = handle.schema_json();
    assert_eq!(
        schema["description"],
        "Fare quote as a legacy agent reports it"
    );
    assert_eq!(
        schema["properties"]["amount"]["description"],
        "Quoted amount in USD"
    );
    assert!(handle.required_fields().contains(&"carrier"));
}

#[test]
fn entity_schema_defaults_to_normalized_and_is_cached() {
    let first = PlainEntity::schema();
    let second = PlainEntity::schema();
    assert!(std::ptr::eq(first, second));
    assert_eq!(first.kind(), EntityKind::Normalized);
    assert_eq!(first.schema_name(), "PlainEntity");
    assert_eq!(
        first.schema_json()["description"],
        "Undocumented entity with an explicit description"
    );
}

#[test]
fn tool_parameters_schema_is_stable_and_lists_required_fields() {
    let schema = ScaleFareTool.parameters_schema();
    assert_eq!(schema, ScaleFareTool.parameters_schema());
    assert_eq!(schema["required"], json!(["fare"]));
    assert!(schema["properties"]["nights"].is_object());
}

#[test]
fn entity_schema_maps_envelope_kind() {
    assert_eq!(Handoff::schema().kind(), EntityKind::Envelope);
    assert_eq!(Handoff::schema().kind().as_str(), "envelope");
}
