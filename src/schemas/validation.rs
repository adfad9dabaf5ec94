use crate::{error::TripError, schemas::SchemaHandle};
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;

const MAX_SCHEMA_ERRORS: usize = 3;

/// Validate a raw payload against an entity schema before deserializing it.
pub(crate) fn validate_against_schema(
    schema: &SchemaHandle,
    payload: &Value,
) -> std::result::Result<(), TripError> {
    validate_json(schema.schema_name(), schema.schema_json(), payload)
}

/// Draft-7 check of `payload` against a raw JSON schema document.
pub(crate) fn validate_json(
    schema_name: &str,
    schema: &Value,
    payload: &Value,
) -> std::result::Result<(), TripError> {
    let validator = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(schema)
        .map_err(|err| {
            TripError::Config(format!(
                "failed to prepare `{schema_name}` schema for validation: {err}"
            ))
        })?;

    if let Err(errors) = validator.validate(payload) {
        let mut details = Vec::new();
        let mut truncated = false;

        for (idx, error) in errors.enumerate() {
            if idx == MAX_SCHEMA_ERRORS {
                truncated = true;
                break;
            }
            let mut path = error.instance_path.to_string();
            if path.is_empty() {
                path = "<root>".to_string();
            }
            details.push(format!("{}: {}", path, error));
        }

        let mut detail_str = if details.is_empty() {
            "payload failed schema validation".to_string()
        } else {
            details.join("; ")
        };

        if truncated {
            detail_str.push_str("; additional errors truncated");
        }

        return Err(TripError::Validation(format!(
            "payload does not match `{schema_name}` schema: {detail_str}"
        )));
    }

    Ok(())
}
