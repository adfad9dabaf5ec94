use crate::{
    schemas::validation::validate_against_schema,
    types::raw::RawModel,
    Result, TripError,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Validation strategies for raw payloads arriving at the boundary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Validator {
    /// Serde deserialization followed by field-level checks
    #[default]
    SerdeFirst,
    /// JSON Schema check of the payload, then the serde-first path
    Strict,
}

impl Validator {
    /// Parse a validator mode from configuration (`serde` or `strict`)
    pub fn from_mode(mode: &str) -> Result<Self> {
        match mode.trim().to_ascii_lowercase().as_str() {
            "serde" | "serde_first" | "serde-first" => Ok(Validator::SerdeFirst),
            "strict" => Ok(Validator::Strict),
            other => Err(TripError::Config(format!(
                "unknown validation mode `{other}` (expected `serde` or `strict`)"
            ))),
        }
    }

    /// Deserialize and validate a raw entity
    pub fn parse<T: RawModel>(&self, payload: Value) -> Result<T> {
        if *self == Validator::Strict {
            validate_against_schema(T::schema(), &payload)?;
        }

        let raw: T = deserialize_located(T::schema().schema_name(), payload)?;
        raw.validate()?;
        debug!(
            target: "trip_office::schemas",
            entity = T::schema().schema_name(),
            "raw payload accepted"
        );
        Ok(raw)
    }

    /// Parse a JSON array of raw entities, reporting the failing index
    pub fn parse_many<T: RawModel>(&self, payload: Value) -> Result<Vec<T>> {
        let Value::Array(items) = payload else {
            return Err(TripError::validation(format!(
                "expected a JSON array of `{}`",
                T::schema().schema_name()
            )));
        };

        items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| {
                self.parse(item).map_err(|err| match err {
                    TripError::Validation(msg) => TripError::Validation(format!("[{idx}] {msg}")),
                    TripError::Consistency(msg) => {
                        TripError::Consistency(format!("[{idx}] {msg}"))
                    }
                    other => other,
                })
            })
            .collect()
    }
}

/// Deserialize tool parameters, reporting the failing path
pub fn deserialize_params<T: DeserializeOwned>(tool_name: &str, params: Value) -> Result<T> {
    serde_path_to_error::deserialize(params).map_err(|e| {
        TripError::ToolExecution(format!(
            "invalid parameters for {} at {}: {}",
            tool_name,
            e.path(),
            e.inner()
        ))
    })
}

fn deserialize_located<T: DeserializeOwned>(entity: &str, payload: Value) -> Result<T> {
    serde_path_to_error::deserialize(payload).map_err(|err| {
        let path = err.path().to_string();
        let location = if path.is_empty() || path == "." {
            "<root>".to_string()
        } else {
            path
        };
        TripError::Validation(format!(
            "failed to deserialize `{}` at {}: {}",
            entity,
            location,
            err.inner()
        ))
    })
}
