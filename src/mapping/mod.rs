//! Raw → normalized mappers and component conversions.
//!
//! Every mapper is a pure function of its input. Enumerated labels that
//! cannot be read fall back to a documented default and are reported in
//! [`Mapped::fallbacks`]; anything else that does not hold is an error.

pub mod activity;
pub mod budget;
pub mod component;
pub mod flight;
pub mod hotel;
pub mod outcome;

pub use activity::normalize_activity;
pub use budget::budget_raw_to_normalized;
pub use component::{activity_to_component, flight_to_component, hotel_to_component};
pub use flight::{flight_satisfies, is_redeye, normalize_flight, normalize_flight_search};
pub use hotel::{normalize_hotel_from_pricing, normalize_hotel_from_search, normalize_hotel_search};
pub use outcome::{Mapped, MappingFallback};
