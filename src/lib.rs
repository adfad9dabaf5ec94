//! trip-office: schema normalization between the trip planning agents
//!
//! The flight, hotel and budget agents each answer in their own shape. This
//! crate validates those raw payloads, maps them into one agent-agnostic
//! model and converts the results into priced trip components.
//!
//! # Quick Start
//!
//! ```rust
//! use trip_office::{mapping::normalize_flight, types::{FlightOptionRaw, RawModel}};
//!
//! let raw = FlightOptionRaw::from_json_str(r#"{
//!     "flight_id": "JL1", "airline_code": "JL", "airline_name": "Japan Airlines",
//!     "departure_time": "2025-04-01T23:10:00", "arrival_time": "2025-04-02T05:40:00",
//!     "duration": "6h30m", "stops": 0, "price": 980.0,
//!     "departure_airport": "SFO", "arrival_airport": "HND"
//! }"#)?;
//! let flight = normalize_flight(&raw)?.into_value();
//! assert!(flight.is_redeye);
//! # Ok::<(), trip_office::TripError>(())
//! ```

extern crate self as trip_office;

pub mod error;
pub mod fixtures;
pub mod mapping;
pub mod schemas;
pub mod tools;
pub mod types;

pub use error::{ErrorKind, Result, TripError};
pub use mapping::{Mapped, MappingFallback};
pub use schemas::validator::Validator;
pub use schemas::{EntityKind, EntitySchema, SchemaHandle};
pub use tools::{Tool, ToolRegistry};
pub use trip_office_macros::{entity_schema, tool};
pub use types::RawModel;

pub use schemas as schema;

#[cfg(feature = "cli")]
pub mod cli;
