//! Agent-native shapes, field for field as the flight, hotel and budget
//! agents emit them.
//!
//! Raw entities are only trusted after [`RawModel::validate`] has run; the
//! [`Validator`](crate::schemas::Validator) boundary does that on every parse.

use crate::{
    entity_schema,
    schemas::{EntitySchema, Validator},
    Result, TripError,
};
use chrono::{NaiveDate, NaiveDateTime};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Absolute tolerance for comparing monetary sums.
pub const MONEY_TOLERANCE: f64 = 1e-6;

/// A raw entity that checks its own field constraints at construction.
pub trait RawModel: EntitySchema {
    /// Field-level and intra-record checks
    fn validate(&self) -> Result<()>;

    /// Deserialize and validate a JSON value
    fn from_value(value: Value) -> Result<Self> {
        Validator::SerdeFirst.parse(value)
    }

    /// Deserialize and validate a JSON document
    fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }
}

fn default_currency_code() -> String {
    "USD".to_string()
}

fn default_fare_class() -> String {
    "ECONOMY".to_string()
}

fn default_review_source() -> String {
    "Demo".to_string()
}

fn default_true() -> bool {
    true
}

// --- Flight agent -----------------------------------------------------------

/// Raw flight option as returned by the flight agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[entity_schema(kind = "raw")]
pub struct FlightOptionRaw {
    /// Agent flight identifier, usually prefixed with the airline code
    pub flight_id: String,
    /// IATA/ICAO airline designator (2-3 characters)
    #[schemars(length(min = 2, max = 3))]
    pub airline_code: String,
    pub airline_name: String,
    /// Local departure time at the origin airport
    pub departure_time: NaiveDateTime,
    /// Local arrival time at the destination airport
    pub arrival_time: NaiveDateTime,
    /// Display duration such as "11h50m"
    pub duration: String,
    #[schemars(range(min = 0, max = 3))]
    pub stops: u8,
    /// Ticket price, strictly positive
    pub price: f64,
    #[serde(default = "default_currency_code")]
    pub currency: String,
    /// Free-form fare class label from the upstream API
    #[serde(default = "default_fare_class")]
    pub fare_class: String,
    #[schemars(length(equal = 3))]
    pub departure_airport: String,
    #[schemars(length(equal = 3))]
    pub arrival_airport: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aircraft_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_class: Option<String>,
}

impl RawModel for FlightOptionRaw {
    fn validate(&self) -> Result<()> {
        const ENTITY: &str = "FlightOptionRaw";
        require_text(ENTITY, "flight_id", &self.flight_id)?;
        require_text(ENTITY, "airline_name", &self.airline_name)?;
        check_airline_code(&self.airline_code)?;
        check_airport_code("departure_airport", &self.departure_airport)?;
        check_airport_code("arrival_airport", &self.arrival_airport)?;
        if self.stops > 3 {
            return Err(TripError::validation(format!(
                "stops must be between 0 and 3, got {}",
                self.stops
            )));
        }
        require_positive(ENTITY, "price", self.price)?;
        require_text(ENTITY, "currency", &self.currency)
    }
}

/// Raw response from the flight agent's `search_flights` tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[entity_schema(kind = "raw")]
pub struct FlightSearchResponseRaw {
    pub flights: Vec<FlightOptionRaw>,
    pub search_id: String,
    pub total_results: u32,
}

impl RawModel for FlightSearchResponseRaw {
    fn validate(&self) -> Result<()> {
        require_text("FlightSearchResponseRaw", "search_id", &self.search_id)?;
        check_result_count(self.total_results, self.flights.len())?;
        validate_each(&self.flights)
    }
}

// --- Hotel agent ------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HotelLocationRaw {
    /// Street address; required
    pub address: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub distance_to_center: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HotelReviewRaw {
    #[schemars(range(min = 0, max = 5))]
    pub rating: f64,
    pub total_reviews: u32,
    #[serde(default = "default_review_source")]
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HotelAmenityRaw {
    pub name: String,
    #[serde(default = "default_true")]
    pub available: bool,
}

/// Amenities arrive either as bare names or as objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum AmenityRaw {
    Named(String),
    Detailed(HotelAmenityRaw),
}

impl AmenityRaw {
    pub fn name(&self) -> &str {
        match self {
            AmenityRaw::Named(name) => name,
            AmenityRaw::Detailed(amenity) => &amenity.name,
        }
    }
}

/// One bookable room type with its nightly rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RoomTypeRaw {
    #[serde(default)]
    pub room_id: Option<String>,
    pub room_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub max_occupancy: Option<u8>,
    #[serde(default)]
    pub bed_info: Option<String>,
    pub price_per_night: f64,
    #[serde(default)]
    pub total_price: Option<f64>,
    #[serde(default = "default_currency_code")]
    pub currency: String,
    #[serde(default)]
    pub breakfast_included: bool,
}

impl RoomTypeRaw {
    /// Exact match against the room name or id.
    pub fn answers_to(&self, room_type: &str) -> bool {
        self.room_name == room_type || self.room_id.as_deref() == Some(room_type)
    }

    fn validate(&self) -> Result<()> {
        require_text("RoomTypeRaw", "room_name", &self.room_name)?;
        require_positive("RoomTypeRaw", "price_per_night", self.price_per_night)?;
        if let Some(total) = self.total_price {
            require_positive("RoomTypeRaw", "total_price", total)?;
        }
        Ok(())
    }
}

/// Raw hotel as returned by the hotel agent's search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[entity_schema(kind = "raw")]
pub struct HotelRaw {
    pub hotel_id: String,
    pub name: String,
    /// City the hotel is in; absence is a data error
    pub city: String,
    pub location: HotelLocationRaw,
    #[serde(default)]
    pub star_rating: Option<u8>,
    #[serde(default)]
    pub review: Option<HotelReviewRaw>,
    #[serde(default)]
    pub amenities: Vec<AmenityRaw>,
    #[serde(default)]
    pub images: Vec<String>,
    /// Room types with nightly prices
    #[serde(default)]
    pub rooms: Vec<RoomTypeRaw>,
    /// Display range such as "$150-$220", used when no rooms are listed
    #[serde(default)]
    pub price_range: Option<String>,
    /// Room type the caller asked to be priced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_room_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Demo-only mood tag
    #[serde(default)]
    pub vibe: Option<String>,
    /// Demo-only walking minutes to transit
    #[serde(default)]
    pub near_transit_min: Option<u32>,
}

impl HotelRaw {
    /// Lower and upper bound of `price_range`, if one is given.
    pub fn price_range_bounds(&self) -> Result<Option<(f64, f64)>> {
        self.price_range.as_deref().map(parse_price_range).transpose()
    }
}

impl RawModel for HotelRaw {
    fn validate(&self) -> Result<()> {
        const ENTITY: &str = "HotelRaw";
        require_text(ENTITY, "hotel_id", &self.hotel_id)?;
        require_text(ENTITY, "name", &self.name)?;
        require_text(ENTITY, "city", &self.city)?;
        require_text(ENTITY, "location.address", &self.location.address)?;
        check_star_rating(self.star_rating)?;
        if let Some(review) = &self.review {
            if !(0.0..=5.0).contains(&review.rating) {
                return Err(TripError::validation(format!(
                    "review rating must be between 0 and 5, got {}",
                    review.rating
                )));
            }
        }
        for room in &self.rooms {
            room.validate()?;
        }
        self.price_range_bounds()?;
        Ok(())
    }
}

/// Raw response from the hotel agent's `search_hotels` tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[entity_schema(kind = "raw")]
pub struct HotelSearchResponseRaw {
    pub hotels: Vec<HotelRaw>,
    pub search_id: String,
    pub total_results: u32,
    pub city: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
}

impl RawModel for HotelSearchResponseRaw {
    fn validate(&self) -> Result<()> {
        require_text("HotelSearchResponseRaw", "search_id", &self.search_id)?;
        require_text("HotelSearchResponseRaw", "city", &self.city)?;
        check_date_order(self.check_in_date, self.check_out_date)?;
        check_result_count(self.total_results, self.hotels.len())?;
        validate_each(&self.hotels)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PricingDetailsRaw {
    pub base_price: f64,
    pub taxes_and_fees: f64,
    pub total_price: f64,
    #[serde(default = "default_currency_code")]
    pub currency: String,
    #[serde(default)]
    pub price_per_night: Option<f64>,
    #[serde(default)]
    pub total_nights: Option<u32>,
}

impl PricingDetailsRaw {
    fn validate(&self) -> Result<()> {
        const ENTITY: &str = "PricingDetailsRaw";
        require_positive(ENTITY, "base_price", self.base_price)?;
        require_non_negative(ENTITY, "taxes_and_fees", self.taxes_and_fees)?;
        require_positive(ENTITY, "total_price", self.total_price)?;
        if let Some(nightly) = self.price_per_night {
            require_positive(ENTITY, "price_per_night", nightly)?;
        }
        if self.total_nights == Some(0) {
            return Err(TripError::validation("total_nights must be positive"));
        }
        let expected = self.base_price + self.taxes_and_fees;
        if (expected - self.total_price).abs() > MONEY_TOLERANCE {
            return Err(TripError::consistency(format!(
                "base_price + taxes_and_fees = {expected} but total_price = {}",
                self.total_price
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CancellationPolicyRaw {
    #[serde(default)]
    pub is_refundable: Option<bool>,
    #[serde(default)]
    pub cancellation_deadline: Option<NaiveDate>,
    #[serde(default)]
    pub penalty_amount: Option<f64>,
    #[serde(default)]
    pub policy_description: Option<String>,
}

/// Raw response from the hotel agent's `get_hotel_pricing` tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[entity_schema(kind = "raw")]
pub struct HotelPricingResponseRaw {
    pub hotel_id: String,
    pub hotel_name: String,
    pub city: String,
    pub address: String,
    #[serde(default)]
    pub star_rating: Option<u8>,
    /// Room type the pricing block was quoted for
    #[serde(default)]
    pub room_type: Option<String>,
    pub pricing: PricingDetailsRaw,
    /// Nightly rates for other room types, when the agent lists them
    #[serde(default)]
    pub room_rates: Vec<RoomTypeRaw>,
    #[serde(default)]
    pub cancellation_policy: Option<CancellationPolicyRaw>,
    #[serde(default)]
    pub booking_conditions: Vec<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

impl RawModel for HotelPricingResponseRaw {
    fn validate(&self) -> Result<()> {
        const ENTITY: &str = "HotelPricingResponseRaw";
        require_text(ENTITY, "hotel_id", &self.hotel_id)?;
        require_text(ENTITY, "hotel_name", &self.hotel_name)?;
        require_text(ENTITY, "city", &self.city)?;
        require_text(ENTITY, "address", &self.address)?;
        check_star_rating(self.star_rating)?;
        self.pricing.validate()?;
        for room in &self.room_rates {
            room.validate()?;
        }
        if let Some(penalty) = self
            .cancellation_policy
            .as_ref()
            .and_then(|policy| policy.penalty_amount)
        {
            require_non_negative(ENTITY, "cancellation_policy.penalty_amount", penalty)?;
        }
        Ok(())
    }
}

// --- Budgeteer agent --------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BudgetCategoryBreakdownRaw {
    /// Category label; see `TravelCategory` for the accepted table
    pub category: String,
    #[serde(default)]
    pub planned_cost: Option<f64>,
    #[serde(default)]
    pub estimated_daily_cost: Option<f64>,
    #[serde(default)]
    pub total_category_cost: Option<f64>,
    /// Ignored on input; recomputed during normalization
    #[serde(default)]
    pub percentage_of_budget: Option<f64>,
}

impl BudgetCategoryBreakdownRaw {
    /// `total_category_cost`, else the sum of the parts that are present.
    pub fn category_cost(&self) -> Option<f64> {
        self.total_category_cost.or(
            match (self.planned_cost, self.estimated_daily_cost) {
                (None, None) => None,
                (planned, daily) => Some(planned.unwrap_or(0.0) + daily.unwrap_or(0.0)),
            },
        )
    }

    fn validate(&self) -> Result<()> {
        const ENTITY: &str = "BudgetCategoryBreakdownRaw";
        require_text(ENTITY, "category", &self.category)?;
        for (field, value) in [
            ("planned_cost", self.planned_cost),
            ("estimated_daily_cost", self.estimated_daily_cost),
            ("total_category_cost", self.total_category_cost),
            ("percentage_of_budget", self.percentage_of_budget),
        ] {
            if let Some(value) = value {
                require_non_negative(ENTITY, field, value)?;
            }
        }
        if self.category_cost().is_none() {
            return Err(TripError::MissingField {
                entity: ENTITY,
                field: "total_category_cost",
            });
        }
        if let (Some(total), Some(planned), Some(daily)) = (
            self.total_category_cost,
            self.planned_cost,
            self.estimated_daily_cost,
        ) {
            if (planned + daily - total).abs() > MONEY_TOLERANCE {
                return Err(TripError::consistency(format!(
                    "category `{}`: planned {planned} + daily {daily} != total {total}",
                    self.category
                )));
            }
        }
        Ok(())
    }
}

/// Raw response from the budgeteer's `calculate_trip_budget` tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[entity_schema(kind = "raw")]
pub struct BudgetCalculationResponseRaw {
    pub trip_id: String,
    /// Sum of booked component costs
    #[serde(default)]
    pub total_planned_cost: Option<f64>,
    /// Sum of projected daily spend
    #[serde(default)]
    pub total_estimated_cost: Option<f64>,
    pub total_budget: f64,
    /// Declared surplus (positive) or shortfall (negative)
    #[serde(default)]
    pub surplus_shortfall: Option<f64>,
    /// Free-form status label
    #[serde(default)]
    pub budget_status: Option<String>,
    #[serde(default)]
    pub breakdown_by_category: Vec<BudgetCategoryBreakdownRaw>,
    #[serde(default = "default_currency_code")]
    pub currency: String,
    #[serde(default)]
    pub calculation_timestamp: Option<NaiveDateTime>,
}

impl BudgetCalculationResponseRaw {
    /// Declared grand total: planned plus estimated spend.
    pub fn estimated_total(&self) -> f64 {
        self.total_planned_cost.unwrap_or(0.0) + self.total_estimated_cost.unwrap_or(0.0)
    }
}

impl RawModel for BudgetCalculationResponseRaw {
    fn validate(&self) -> Result<()> {
        const ENTITY: &str = "BudgetCalculationResponseRaw";
        require_text(ENTITY, "trip_id", &self.trip_id)?;
        require_positive(ENTITY, "total_budget", self.total_budget)?;
        if self.total_planned_cost.is_none() && self.total_estimated_cost.is_none() {
            return Err(TripError::MissingField {
                entity: ENTITY,
                field: "total_planned_cost",
            });
        }
        for (field, value) in [
            ("total_planned_cost", self.total_planned_cost),
            ("total_estimated_cost", self.total_estimated_cost),
        ] {
            if let Some(value) = value {
                require_non_negative(ENTITY, field, value)?;
            }
        }
        if let Some(declared) = self.surplus_shortfall {
            if !declared.is_finite() {
                return Err(TripError::validation("surplus_shortfall must be finite"));
            }
        }
        for entry in &self.breakdown_by_category {
            entry.validate()?;
        }
        Ok(())
    }
}

// --- Activities -------------------------------------------------------------

/// Raw activity record from the fixtures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[entity_schema(kind = "raw")]
pub struct ActivityRaw {
    pub id: String,
    pub name: String,
    pub city: String,
    /// Theme tags; at least one
    pub theme: Vec<String>,
    pub price_usd: f64,
    /// Duration in hours, strictly positive
    pub duration_hr: f64,
    #[serde(default)]
    pub image: String,
}

impl RawModel for ActivityRaw {
    fn validate(&self) -> Result<()> {
        const ENTITY: &str = "ActivityRaw";
        require_text(ENTITY, "id", &self.id)?;
        require_text(ENTITY, "name", &self.name)?;
        require_text(ENTITY, "city", &self.city)?;
        if self.theme.iter().all(|theme| theme.trim().is_empty()) {
            return Err(TripError::MissingField {
                entity: ENTITY,
                field: "theme",
            });
        }
        require_non_negative(ENTITY, "price_usd", self.price_usd)?;
        require_positive(ENTITY, "duration_hr", self.duration_hr)
    }
}

// --- shared checks ----------------------------------------------------------

pub(crate) fn require_text(entity: &'static str, field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(TripError::MissingField { entity, field })
    } else {
        Ok(())
    }
}

pub(crate) fn require_positive(entity: &str, field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TripError::validation(format!(
            "{entity}.{field} must be greater than 0, got {value}"
        )))
    }
}

pub(crate) fn require_non_negative(entity: &str, field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TripError::validation(format!(
            "{entity}.{field} must be non-negative, got {value}"
        )))
    }
}

pub(crate) fn check_airport_code(field: &str, code: &str) -> Result<()> {
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(())
    } else {
        Err(TripError::validation(format!(
            "{field} must be a 3-letter airport code, got `{code}`"
        )))
    }
}

/// Airline designators are 2-3 characters; IATA codes may carry a digit (`B6`).
fn check_airline_code(code: &str) -> Result<()> {
    let well_formed = (2..=3).contains(&code.len())
        && code.chars().all(|c| c.is_ascii_alphanumeric())
        && code.chars().any(|c| c.is_ascii_alphabetic());
    if well_formed {
        Ok(())
    } else {
        Err(TripError::validation(format!(
            "airline_code must be 2-3 characters, got `{code}`"
        )))
    }
}

fn check_star_rating(stars: Option<u8>) -> Result<()> {
    match stars {
        Some(stars) if !(1..=5).contains(&stars) => Err(TripError::validation(format!(
            "star_rating must be between 1 and 5, got {stars}"
        ))),
        _ => Ok(()),
    }
}

pub(crate) fn check_date_order(start: NaiveDate, end: NaiveDate) -> Result<()> {
    if end > start {
        Ok(())
    } else {
        Err(TripError::consistency(format!(
            "date range inverted or empty: {start} .. {end}"
        )))
    }
}

fn check_result_count(declared: u32, returned: usize) -> Result<()> {
    if (declared as usize) < returned {
        Err(TripError::consistency(format!(
            "total_results = {declared} but {returned} results were returned"
        )))
    } else {
        Ok(())
    }
}

fn validate_each<T: RawModel>(items: &[T]) -> Result<()> {
    items.iter().try_for_each(RawModel::validate)
}

/// Parses "$150-$220", "$150–$220", "$150 to $220", "$299 - $499 per night" or "$180".
///
/// Every bound must hold exactly one number.
fn parse_price_range(text: &str) -> Result<(f64, f64)> {
    let malformed = || TripError::validation(format!("unparseable price_range `{text}`"));

    let bounds = text
        .to_ascii_lowercase()
        .replace(" to ", "-")
        .split(['-', '\u{2013}', '\u{2014}'])
        .map(|part| {
            let numbers: Vec<&str> = part
                .split(|c: char| !(c.is_ascii_digit() || c == '.' || c == ','))
                .filter(|run| run.chars().any(|c| c.is_ascii_digit()))
                .collect();
            match numbers.as_slice() {
                [number] => number.replace(',', "").parse::<f64>().map_err(|_| malformed()),
                _ => Err(malformed()),
            }
        })
        .collect::<Result<Vec<f64>>>()?;

    let (low, high) = match bounds.as_slice() {
        [only] => (*only, *only),
        [low, high] => (*low, *high),
        _ => return Err(malformed()),
    };

    if low <= 0.0 || high < low {
        return Err(malformed());
    }
    Ok((low, high))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn flight_json() -> Value {
        json!({
            "flight_id": "UA837",
            "airline_code": "UA",
            "airline_name": "United Airlines",
            "departure_time": "2025-04-01T11:05:00",
            "arrival_time": "2025-04-02T14:25:00",
            "duration": "11h20m",
            "stops": 0,
            "price": 1180.0,
            "departure_airport": "SFO",
            "arrival_airport": "NRT"
        })
    }

    #[test]
    fn flight_defaults_fill_currency_and_fare_class() {
        let raw = FlightOptionRaw::from_value(flight_json()).unwrap();
        assert_eq!(raw.currency, "USD");
        assert_eq!(raw.fare_class, "ECONOMY");
    }

    #[test]
    fn flight_rejects_bad_airport_code() {
        let mut payload = flight_json();
        payload["arrival_airport"] = json!("NRTX");
        let err = FlightOptionRaw::from_value(payload).unwrap_err();
        assert!(matches!(err, TripError::Validation(ref msg) if msg.contains("arrival_airport")));
    }

    #[test]
    fn flight_rejects_zero_price_and_four_stops() {
        let mut payload = flight_json();
        payload["price"] = json!(0.0);
        assert!(FlightOptionRaw::from_value(payload).is_err());

        let mut payload = flight_json();
        payload["stops"] = json!(4);
        assert!(FlightOptionRaw::from_value(payload).is_err());
    }

    #[test]
    fn airline_code_accepts_digit_designators() {
        assert!(check_airline_code("B6").is_ok());
        assert!(check_airline_code("JAL").is_ok());
        assert!(check_airline_code("U").is_err());
        assert!(check_airline_code("1234").is_err());
        assert!(check_airline_code("12").is_err());
    }

    #[test]
    fn missing_city_is_a_data_error() {
        let payload = json!({
            "hotel_id": "h1",
            "name": "Somewhere",
            "location": {"address": "1 Main St"}
        });
        let err = HotelRaw::from_value(payload).unwrap_err();
        assert!(err.to_string().contains("city"));

        let payload = json!({
            "hotel_id": "h1",
            "name": "Somewhere",
            "city": " ",
            "location": {"address": "1 Main St"}
        });
        assert!(matches!(
            HotelRaw::from_value(payload),
            Err(TripError::MissingField { field: "city", .. })
        ));
    }

    #[test]
    fn price_range_formats() {
        assert_eq!(parse_price_range("$150-$220").unwrap(), (150.0, 220.0));
        assert_eq!(
            parse_price_range("$299 - $499 per night").unwrap(),
            (299.0, 499.0)
        );
        assert_eq!(parse_price_range("$180").unwrap(), (180.0, 180.0));
        assert!(parse_price_range("call for rates").is_err());
        assert!(parse_price_range("$300-$200").is_err());
    }

    #[test]
    fn price_range_dash_and_word_separators() {
        assert_eq!(parse_price_range("$150–$220").unwrap(), (150.0, 220.0));
        assert_eq!(parse_price_range("$150—$220").unwrap(), (150.0, 220.0));
        assert_eq!(parse_price_range("$150 to $220").unwrap(), (150.0, 220.0));
        assert_eq!(parse_price_range("$1,200 - $1,450").unwrap(), (1200.0, 1450.0));
    }

    #[test]
    fn price_range_rejects_several_numbers_in_one_bound() {
        assert!(parse_price_range("$150 / $220").is_err());
        assert!(parse_price_range("$150 $220 - $300").is_err());
        assert!(parse_price_range("$150-$220-$300").is_err());
    }

    #[test]
    fn pricing_totals_must_add_up() {
        let pricing = PricingDetailsRaw {
            base_price: 800.0,
            taxes_and_fees: 160.0,
            total_price: 990.0,
            currency: "USD".to_string(),
            price_per_night: None,
            total_nights: None,
        };
        assert!(pricing.validate().unwrap_err().is_consistency());
    }

    #[test]
    fn budget_requires_some_declared_total() {
        let payload = json!({"trip_id": "t", "total_budget": 1000.0});
        assert!(matches!(
            BudgetCalculationResponseRaw::from_value(payload),
            Err(TripError::MissingField { .. })
        ));
    }

    #[test]
    fn category_cost_prefers_total() {
        let entry = BudgetCategoryBreakdownRaw {
            category: "food".to_string(),
            planned_cost: Some(10.0),
            estimated_daily_cost: Some(5.0),
            total_category_cost: None,
            percentage_of_budget: None,
        };
        assert_eq!(entry.category_cost(), Some(15.0));
    }

    #[test]
    fn activity_needs_theme_and_duration() {
        let payload = json!({
            "id": "a1", "name": "Sushi class", "city": "Tokyo",
            "theme": [], "price_usd": 90.0, "duration_hr": 2.0, "image": ""
        });
        assert!(ActivityRaw::from_value(payload).is_err());

        let payload = json!({
            "id": "a1", "name": "Sushi class", "city": "Tokyo",
            "theme": ["food"], "price_usd": 90.0, "duration_hr": 0.0, "image": ""
        });
        assert!(ActivityRaw::from_value(payload).is_err());
    }
}
