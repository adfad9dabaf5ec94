//! Agent-agnostic shapes the orchestrator composes trips from.

use super::common::{BudgetStatus, Currency, TravelCategory, TravelClass};
use crate::{entity_schema, Result, TripError};
use chrono::{NaiveDate, NaiveDateTime};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Normalized flight option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[entity_schema]
pub struct FlightOption {
    pub id: String,
    /// Airline display name
    pub carrier: String,
    pub carrier_code: String,
    /// Flight number with the carrier prefix stripped
    pub number: String,
    pub origin: String,
    pub destination: String,
    pub departure_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
    pub duration: String,
    pub stops: u8,
    pub price_usd: f64,
    /// Departs at or after 22:00 or lands before 06:00, local time
    pub is_redeye: bool,
    pub fare_class: TravelClass,
    #[serde(default)]
    pub aircraft_type: Option<String>,
    #[serde(default)]
    pub booking_class: Option<String>,
}

impl FlightOption {
    pub fn is_nonstop(&self) -> bool {
        self.stops == 0
    }
}

/// Normalized hotel option with a single representative nightly price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[entity_schema]
pub struct HotelOption {
    pub id: String,
    pub name: String,
    pub city: String,
    pub address: String,
    #[serde(default)]
    pub stars: Option<u8>,
    /// Room type the price was taken from, when one was requested
    #[serde(default)]
    pub room_type: Option<String>,
    pub nightly_price_usd: f64,
    pub check_in: NaiveDate,
    /// End of the priced window; `None` when the nightly rate is open-ended
    #[serde(default)]
    pub check_out: Option<NaiveDate>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub vibe: Option<String>,
    #[serde(default)]
    pub near_transit_min: Option<u32>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl HotelOption {
    /// Nights covered by the priced window, if bounded.
    pub fn priced_nights(&self) -> Option<u32> {
        self.check_out
            .map(|check_out| (check_out - self.check_in).num_days().max(0) as u32)
    }
}

/// Normalized activity option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[entity_schema]
pub struct ActivityOption {
    pub id: String,
    pub name: String,
    pub city: String,
    pub themes: Vec<String>,
    pub price_usd: f64,
    pub duration_hours: f64,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// One line item of a trip, priced in USD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[entity_schema]
pub struct TripComponent {
    pub component_id: String,
    pub category: TravelCategory,
    pub name: String,
    /// Non-negative cost in `currency`
    pub cost: f64,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub description: Option<String>,
}

impl TripComponent {
    pub fn new(
        component_id: impl Into<String>,
        category: TravelCategory,
        name: impl Into<String>,
        cost: f64,
    ) -> Result<Self> {
        let component = Self {
            component_id: component_id.into(),
            category,
            name: name.into(),
            cost,
            currency: Currency::Usd,
            date: None,
            description: None,
        };
        component.validate()?;
        Ok(component)
    }

    pub fn with_date(mut self, date: Option<NaiveDate>) -> Self {
        self.date = date;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Re-check the invariants, e.g. after deserializing a component.
    pub fn validate(&self) -> Result<()> {
        if self.component_id.trim().is_empty() {
            return Err(TripError::MissingField {
                entity: "TripComponent",
                field: "component_id",
            });
        }
        if !self.cost.is_finite() || self.cost < 0.0 {
            return Err(TripError::validation(format!(
                "component `{}` cost must be non-negative, got {}",
                self.component_id, self.cost
            )));
        }
        Ok(())
    }
}

/// One category's share of the trip budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CategoryShare {
    pub category: TravelCategory,
    pub cost: f64,
    /// Share of `total_budget`, clamped to 0-100
    pub percentage_of_budget: f64,
    /// The category alone costs more than the whole budget
    pub over_allocated: bool,
}

/// Normalized budget calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[entity_schema]
pub struct BudgetResult {
    pub trip_id: String,
    pub total_budget: f64,
    pub estimated_total: f64,
    /// `total_budget - estimated_total`; negative means a shortfall
    pub surplus_shortfall: f64,
    pub status: BudgetStatus,
    pub categories: Vec<CategoryShare>,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub notes: Vec<String>,
}

impl BudgetResult {
    pub fn category(&self, category: TravelCategory) -> Option<&CategoryShare> {
        self.categories.iter().find(|share| share.category == category)
    }

    /// Categories whose cost alone exceeds the budget.
    pub fn over_allocated(&self) -> impl Iterator<Item = &CategoryShare> {
        self.categories.iter().filter(|share| share.over_allocated)
    }
}

/// A single day's activities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DailyPlan {
    pub date: NaiveDate,
    pub items: Vec<String>,
    /// 1 (restful) to 10 (exhausting)
    pub fatigue_score: u8,
}

impl DailyPlan {
    pub fn new(date: NaiveDate, items: Vec<String>, fatigue_score: u8) -> Result<Self> {
        if items.is_empty() {
            return Err(TripError::MissingField {
                entity: "DailyPlan",
                field: "items",
            });
        }
        if !(1..=10).contains(&fatigue_score) {
            return Err(TripError::validation(format!(
                "fatigue_score must be between 1 and 10, got {fatigue_score}"
            )));
        }
        Ok(Self {
            date,
            items,
            fatigue_score,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    #[default]
    Medium,
    High,
}

/// One complete proposed trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[entity_schema]
pub struct ItineraryCandidate {
    pub id: String,
    #[serde(default)]
    pub flights: Vec<FlightOption>,
    #[serde(default)]
    pub hotels: Vec<HotelOption>,
    #[serde(default)]
    pub activities: Vec<ActivityOption>,
    pub budget: BudgetResult,
    #[serde(default)]
    pub daily: Vec<DailyPlan>,
    #[serde(default)]
    pub tradeoffs: Vec<String>,
    #[serde(default)]
    pub confidence: Confidence,
}

impl ItineraryCandidate {
    pub fn new(id: impl Into<String>, budget: BudgetResult) -> Self {
        Self {
            id: id.into(),
            flights: Vec::new(),
            hotels: Vec::new(),
            activities: Vec::new(),
            budget,
            daily: Vec::new(),
            tradeoffs: Vec::new(),
            confidence: Confidence::default(),
        }
    }

    pub fn with_flight(mut self, flight: FlightOption) -> Self {
        self.flights.push(flight);
        self
    }

    pub fn with_hotel(mut self, hotel: HotelOption) -> Self {
        self.hotels.push(hotel);
        self
    }

    pub fn with_activity(mut self, activity: ActivityOption) -> Self {
        self.activities.push(activity);
        self
    }

    pub fn with_tradeoff(mut self, tradeoff: impl Into<String>) -> Self {
        self.tradeoffs.push(tradeoff.into());
        self
    }

    pub fn with_confidence(mut self, confidence: Confidence) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn has_redeye(&self) -> bool {
        self.flights.iter().any(|flight| flight.is_redeye)
    }

    /// Human-readable summary for logs and the CLI
    pub fn describe(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("=== Itinerary {} ===", self.id));
        for flight in &self.flights {
            lines.push(format!(
                "Flight {} {}: {} -> {} ${:.2}{}",
                flight.carrier_code,
                flight.number,
                flight.origin,
                flight.destination,
                flight.price_usd,
                if flight.is_redeye { " (red-eye)" } else { "" }
            ));
        }
        for hotel in &self.hotels {
            lines.push(format!(
                "Hotel {} ({}) ${:.2}/night",
                hotel.name, hotel.city, hotel.nightly_price_usd
            ));
        }
        for activity in &self.activities {
            lines.push(format!(
                "Activity {} {:.1}h ${:.2}",
                activity.name, activity.duration_hours, activity.price_usd
            ));
        }
        lines.push(format!(
            "Budget: {} (surplus/shortfall {:+.2})",
            self.budget.status.as_str(),
            self.budget.surplus_shortfall
        ));
        for tradeoff in &self.tradeoffs {
            lines.push(format!("Tradeoff: {tradeoff}"));
        }

        lines.join("\n")
    }
}
