//! Request envelope the orchestrator sends to every agent.

use super::common::{HotelSortBy, TravelClass};
use super::raw::{check_airport_code, require_text, RawModel};
use crate::{entity_schema, Result, TripError};
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

fn default_adults() -> u8 {
    1
}

fn default_k() -> u8 {
    3
}

fn default_demo() -> bool {
    true
}

/// Who is travelling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Traveler {
    #[serde(default = "default_adults")]
    pub adults: u8,
    #[serde(default)]
    pub children: u8,
    #[serde(default)]
    pub infants: u8,
    #[serde(default)]
    pub profiles: Vec<String>,
}

impl Traveler {
    fn validate(&self) -> Result<()> {
        if !(1..=9).contains(&self.adults) {
            return Err(TripError::validation(format!(
                "adults must be between 1 and 9, got {}",
                self.adults
            )));
        }
        if self.children > 9 || self.infants > 9 {
            return Err(TripError::validation(
                "children and infants must each be at most 9",
            ));
        }
        Ok(())
    }

    pub fn party_size(&self) -> u32 {
        u32::from(self.adults) + u32::from(self.children) + u32::from(self.infants)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TripWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TripWindow {
    pub fn nights(&self) -> u32 {
        (self.end - self.start).num_days().max(0) as u32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Trip {
    /// Origin airport code
    pub origin: String,
    /// Destination airport or city codes; at least one
    pub destinations: Vec<String>,
    pub dates: TripWindow,
}

/// Hard limits every proposal must respect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Constraints {
    pub budget_usd: u32,
    #[serde(default)]
    pub no_redeyes: bool,
    #[serde(default)]
    pub nonstop_only: bool,
    #[serde(default)]
    pub walk_max_km_per_day: Option<f64>,
}

/// Soft preferences that steer selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Preferences {
    #[serde(default)]
    pub hotel_vibe: Option<String>,
    #[serde(default)]
    pub bed_type: Option<String>,
    #[serde(default)]
    pub diet: Option<String>,
    #[serde(default)]
    pub travel_class: TravelClass,
    #[serde(default)]
    pub hotel_sort: HotelSortBy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DeliverableKind {
    FlightOptions,
    LodgingOptions,
    Activities,
    Itinerary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DeliverableRequest {
    pub kind: DeliverableKind,
    /// How many options to return, 1-20
    #[serde(default = "default_k")]
    pub k: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    #[default]
    Queued,
    InProgress,
    Blocked,
    Done,
    NeedsApproval,
}

/// Request envelope shared across agents and the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[entity_schema(kind = "envelope")]
pub struct InterAgentMessage {
    pub trace_id: String,
    pub traveler: Traveler,
    pub trip: Trip,
    pub constraints: Constraints,
    #[serde(default)]
    pub preferences: Preferences,
    #[serde(default)]
    pub assumptions: Vec<String>,
    #[serde(default)]
    pub deliverables: Vec<DeliverableRequest>,
    #[serde(default)]
    pub status: MessageStatus,
    #[serde(default = "default_demo")]
    pub demo: bool,
}

impl RawModel for InterAgentMessage {
    fn validate(&self) -> Result<()> {
        require_text("InterAgentMessage", "trace_id", &self.trace_id)?;
        self.traveler.validate()?;

        check_airport_code("trip.origin", &self.trip.origin)?;
        if self.trip.destinations.is_empty() {
            return Err(TripError::MissingField {
                entity: "Trip",
                field: "destinations",
            });
        }
        let TripWindow { start, end } = self.trip.dates;
        if end < start {
            return Err(TripError::consistency(format!(
                "trip ends ({end}) before it starts ({start})"
            )));
        }

        if self.constraints.budget_usd == 0 {
            return Err(TripError::validation("budget_usd must be greater than 0"));
        }
        if let Some(km) = self.constraints.walk_max_km_per_day {
            if !km.is_finite() || km < 0.0 {
                return Err(TripError::validation(
                    "walk_max_km_per_day must be non-negative",
                ));
            }
        }

        if let Some(bad) = self
            .deliverables
            .iter()
            .find(|deliverable| !(1..=20).contains(&deliverable.k))
        {
            return Err(TripError::validation(format!(
                "deliverable k must be between 1 and 20, got {}",
                bad.k
            )));
        }
        Ok(())
    }
}
