use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A documented default substituted for an unrecognised enumerated value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MappingFallback {
    /// Raw field the value came from
    pub field: String,
    pub raw_value: String,
    /// Canonical label used instead
    pub substituted: String,
}

impl MappingFallback {
    pub(crate) fn record(field: &str, raw_value: &str, substituted: &str) -> Self {
        warn!(
            target: "trip_office::mapping",
            field,
            raw_value,
            substituted,
            "unrecognised value, substituting default"
        );
        Self {
            field: field.to_string(),
            raw_value: raw_value.to_string(),
            substituted: substituted.to_string(),
        }
    }
}

/// A normalized value plus any fallbacks taken while producing it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mapped<T> {
    pub value: T,
    pub fallbacks: Vec<MappingFallback>,
}

impl<T> Mapped<T> {
    pub fn clean(value: T) -> Self {
        Self {
            value,
            fallbacks: Vec::new(),
        }
    }

    pub fn with_fallbacks(value: T, fallbacks: Vec<MappingFallback>) -> Self {
        Self { value, fallbacks }
    }

    pub fn is_clean(&self) -> bool {
        self.fallbacks.is_empty()
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Mapped<U> {
        Mapped {
            value: f(self.value),
            fallbacks: self.fallbacks,
        }
    }
}

impl<T> FromIterator<Mapped<T>> for Mapped<Vec<T>> {
    fn from_iter<I: IntoIterator<Item = Mapped<T>>>(iter: I) -> Self {
        let mut values = Vec::new();
        let mut fallbacks = Vec::new();
        for mapped in iter {
            values.push(mapped.value);
            fallbacks.extend(mapped.fallbacks);
        }
        Mapped::with_fallbacks(values, fallbacks)
    }
}
