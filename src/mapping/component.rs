//! Conversions from normalized options into priced trip line items.

use crate::{
    types::{ActivityOption, FlightOption, HotelOption, TravelCategory, TripComponent},
    Result, TripError,
};
use chrono::{Days, NaiveDate};

pub fn flight_to_component(flight: &FlightOption) -> Result<TripComponent> {
    let stops = match flight.stops {
        0 => "nonstop".to_string(),
        1 => "1 stop".to_string(),
        n => format!("{n} stops"),
    };
    Ok(TripComponent::new(
        flight.id.clone(),
        TravelCategory::Flights,
        format!("{} {}{}", flight.carrier, flight.carrier_code, flight.number),
        flight.price_usd,
    )?
    .with_date(Some(flight.departure_time.date()))
    .with_description(format!(
        "{} -> {}, {stops}, {}",
        flight.origin,
        flight.destination,
        flight.fare_class.as_str()
    )))
}

/// Price a stay of `nights` starting on `check_in`.
///
/// The stay must sit inside the hotel's priced window; nights outside it are
/// rejected rather than extrapolated.
pub fn hotel_to_component(
    hotel: &HotelOption,
    check_in: NaiveDate,
    nights: u32,
) -> Result<TripComponent> {
    if nights == 0 {
        return Err(TripError::validation(format!(
            "stay at {} must be at least one night",
            hotel.id
        )));
    }
    if check_in < hotel.check_in {
        return Err(TripError::consistency(format!(
            "stay at {} starts {check_in}, before the rate begins on {}",
            hotel.id, hotel.check_in
        )));
    }
    let check_out = check_in
        .checked_add_days(Days::new(u64::from(nights)))
        .ok_or_else(|| TripError::validation(format!("{nights} nights from {check_in} overflows")))?;
    if let Some(priced_until) = hotel.check_out {
        if check_out > priced_until {
            return Err(TripError::consistency(format!(
                "stay at {} runs to {check_out}, past the priced window ending {priced_until}",
                hotel.id
            )));
        }
    }

    Ok(TripComponent::new(
        format!("{}-{check_in}", hotel.id),
        TravelCategory::Hotels,
        hotel.name.clone(),
        hotel.nightly_price_usd * f64::from(nights),
    )?
    .with_date(Some(check_in))
    .with_description(format!(
        "{nights} night(s) in {} at ${:.2}/night",
        hotel.city, hotel.nightly_price_usd
    )))
}

pub fn activity_to_component(activity: &ActivityOption) -> Result<TripComponent> {
    Ok(TripComponent::new(
        activity.id.clone(),
        TravelCategory::Activities,
        activity.name.clone(),
        activity.price_usd,
    )?
    .with_description(format!(
        "{} ({:.1}h, {})",
        activity.city,
        activity.duration_hours,
        activity.themes.join(", ")
    )))
}
