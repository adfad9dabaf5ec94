//! Tool-call wrappers around the mappers.
//!
//! Every tool answers `{ "result": ..., "fallbacks": [...] }`. Raw entities in
//! the parameters are validated exactly as at any other JSON boundary.

use super::ToolRegistry;
use crate::{
    mapping::{
        budget_raw_to_normalized, normalize_activity, normalize_flight,
        normalize_hotel_from_pricing, normalize_hotel_search, Mapped,
    },
    types::{
        ActivityRaw, BudgetCalculationResponseRaw, FlightOptionRaw, HotelPricingResponseRaw,
        HotelSearchResponseRaw, RawModel,
    },
    Result,
};
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct NormalizeFlightParams {
    /// Flight option exactly as the flight agent returned it
    pub flight: FlightOptionRaw,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct NormalizeHotelSearchParams {
    /// Response of the hotel agent's `search_hotels` tool
    pub search: HotelSearchResponseRaw,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct NormalizeHotelPricingParams {
    /// Response of the hotel agent's `get_hotel_pricing` tool
    pub pricing: HotelPricingResponseRaw,
    /// Room type to price
    pub room_type: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct NormalizeActivityParams {
    pub activity: ActivityRaw,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct NormalizeBudgetParams {
    /// Response of the budgeteer's `calculate_trip_budget` tool
    pub budget: BudgetCalculationResponseRaw,
}

fn respond<T: Serialize>(mapped: Mapped<T>) -> Result<Value> {
    Ok(json!({
        "result": serde_json::to_value(&mapped.value)?,
        "fallbacks": serde_json::to_value(&mapped.fallbacks)?,
    }))
}

fn run_normalize_flight(params: NormalizeFlightParams) -> Result<Value> {
    params.flight.validate()?;
    respond(normalize_flight(&params.flight)?)
}

fn run_normalize_hotel_search(params: NormalizeHotelSearchParams) -> Result<Value> {
    params.search.validate()?;
    respond(Mapped::clean(normalize_hotel_search(&params.search)?))
}

fn run_normalize_hotel_pricing(params: NormalizeHotelPricingParams) -> Result<Value> {
    params.pricing.validate()?;
    let hotel = normalize_hotel_from_pricing(
        &params.pricing,
        &params.room_type,
        params.check_in,
        params.check_out,
    )?;
    respond(Mapped::clean(hotel))
}

fn run_normalize_activity(params: NormalizeActivityParams) -> Result<Value> {
    params.activity.validate()?;
    respond(Mapped::clean(normalize_activity(&params.activity)))
}

fn run_normalize_budget(params: NormalizeBudgetParams) -> Result<Value> {
    params.budget.validate()?;
    respond(budget_raw_to_normalized(&params.budget)?)
}

crate::tool!(
    name = "normalize_flight",
    description = "Normalize a raw flight option into the shared flight shape, flagging red-eyes and mapping the fare class",
    params = NormalizeFlightParams,
    |params: NormalizeFlightParams| async move { run_normalize_flight(params) }
);

crate::tool!(
    name = "normalize_hotel_search",
    description = "Normalize every hotel of a search response, pricing each over the searched dates",
    params = NormalizeHotelSearchParams,
    |params: NormalizeHotelSearchParams| async move { run_normalize_hotel_search(params) }
);

crate::tool!(
    name = "normalize_hotel_pricing",
    description = "Normalize a hotel pricing quote for one room type and stay window",
    params = NormalizeHotelPricingParams,
    |params: NormalizeHotelPricingParams| async move { run_normalize_hotel_pricing(params) }
);

crate::tool!(
    name = "normalize_activity",
    description = "Normalize a raw activity record",
    params = NormalizeActivityParams,
    |params: NormalizeActivityParams| async move { run_normalize_activity(params) }
);

crate::tool!(
    name = "normalize_budget",
    description = "Normalize a budget calculation: recompute the surplus, category shares and status",
    params = NormalizeBudgetParams,
    |params: NormalizeBudgetParams| async move { run_normalize_budget(params) }
);

pub(crate) fn register_all(registry: &mut ToolRegistry) {
    registry.register(NormalizeFlightTool);
    registry.register(NormalizeHotelSearchTool);
    registry.register(NormalizeHotelPricingTool);
    registry.register(NormalizeActivityTool);
    registry.register(NormalizeBudgetTool);
}
