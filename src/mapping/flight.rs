use crate::{
    mapping::outcome::{Mapped, MappingFallback},
    types::{
        Constraints, Currency, FlightOption, FlightOptionRaw, FlightSearchResponseRaw,
        TravelClass,
    },
    Result,
};
use chrono::{NaiveDateTime, Timelike};
use tracing::debug;

/// First local hour counted as a late-night departure.
const REDEYE_DEPARTURE_HOUR: u32 = 22;
/// Local arrivals before this hour count as pre-dawn.
const REDEYE_ARRIVAL_HOUR: u32 = 6;

/// Red-eye rule on local wall-clock times.
pub fn is_redeye(departure: NaiveDateTime, arrival: NaiveDateTime) -> bool {
    departure.hour() >= REDEYE_DEPARTURE_HOUR || arrival.hour() < REDEYE_ARRIVAL_HOUR
}

/// Map a validated raw flight into a [`FlightOption`].
///
/// Unknown fare classes fall back to `ECONOMY` and are reported in the
/// returned fallbacks. A currency other than USD is an error.
pub fn normalize_flight(raw: &FlightOptionRaw) -> Result<Mapped<FlightOption>> {
    Currency::parse(&raw.currency)?;

    let mut fallbacks = Vec::new();
    let fare_class = TravelClass::from_label(&raw.fare_class).unwrap_or_else(|| {
        fallbacks.push(MappingFallback::record(
            "fare_class",
            &raw.fare_class,
            TravelClass::Economy.as_str(),
        ));
        TravelClass::Economy
    });

    let number = raw
        .flight_id
        .strip_prefix(raw.airline_code.as_str())
        .filter(|rest| !rest.is_empty())
        .unwrap_or(&raw.flight_id)
        .to_string();

    let flight = FlightOption {
        id: raw.flight_id.clone(),
        carrier: raw.airline_name.clone(),
        carrier_code: raw.airline_code.clone(),
        number,
        origin: raw.departure_airport.clone(),
        destination: raw.arrival_airport.clone(),
        departure_time: raw.departure_time,
        arrival_time: raw.arrival_time,
        duration: raw.duration.clone(),
        stops: raw.stops,
        price_usd: raw.price,
        is_redeye: is_redeye(raw.departure_time, raw.arrival_time),
        fare_class,
        aircraft_type: raw.aircraft_type.clone(),
        booking_class: raw.booking_class.clone(),
    };

    debug!(
        target: "trip_office::mapping",
        flight_id = %flight.id,
        redeye = flight.is_redeye,
        fare_class = flight.fare_class.as_str(),
        "normalized flight"
    );

    Ok(Mapped::with_fallbacks(flight, fallbacks))
}

/// Normalize every flight of a search response, collecting all fallbacks.
pub fn normalize_flight_search(raw: &FlightSearchResponseRaw) -> Result<Mapped<Vec<FlightOption>>> {
    raw.flights
        .iter()
        .map(normalize_flight)
        .collect::<Result<Vec<_>>>()
        .map(|mapped| mapped.into_iter().collect())
}

/// Whether a flight honours the hard constraints of a trip request.
pub fn flight_satisfies(flight: &FlightOption, constraints: &Constraints) -> bool {
    if constraints.no_redeyes && flight.is_redeye {
        return false;
    }
    if constraints.nonstop_only && !flight.is_nonstop() {
        return false;
    }
    flight.price_usd <= f64::from(constraints.budget_usd)
}

impl FlightOption {
    /// Coerce back into the flight agent's raw shape.
    pub fn to_raw(&self) -> FlightOptionRaw {
        FlightOptionRaw {
            flight_id: self.id.clone(),
            airline_code: self.carrier_code.clone(),
            airline_name: self.carrier.clone(),
            departure_time: self.departure_time,
            arrival_time: self.arrival_time,
            duration: self.duration.clone(),
            stops: self.stops,
            price: self.price_usd,
            currency: Currency::Usd.as_str().to_string(),
            fare_class: self.fare_class.as_str().to_string(),
            departure_airport: self.origin.clone(),
            arrival_airport: self.destination.clone(),
            aircraft_type: self.aircraft_type.clone(),
            booking_class: self.booking_class.clone(),
        }
    }
}
