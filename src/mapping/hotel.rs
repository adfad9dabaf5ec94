use crate::{
    types::{
        raw::check_date_order, Currency, HotelOption, HotelPricingResponseRaw, HotelRaw,
        HotelLocationRaw, HotelReviewRaw, HotelSearchResponseRaw, RoomTypeRaw,
    },
    Result, TripError,
};
use chrono::NaiveDate;
use tracing::debug;

/// Room name used when coercing an option priced without a room type.
const DEFAULT_ROOM_NAME: &str = "Standard";

/// Where a search result's nightly price came from.
#[derive(Debug, Clone, PartialEq)]
enum NightlyPrice<'a> {
    RequestedRoom(&'a RoomTypeRaw),
    CheapestRoom(&'a RoomTypeRaw),
    RangeFloor(f64),
}

impl NightlyPrice<'_> {
    fn amount(&self) -> f64 {
        match self {
            NightlyPrice::RequestedRoom(room) | NightlyPrice::CheapestRoom(room) => {
                room.price_per_night
            }
            NightlyPrice::RangeFloor(low) => *low,
        }
    }
}

/// Pick the nightly price for a search result: the requested room, else the
/// cheapest listed room, else the low end of `price_range`.
fn select_nightly_price(raw: &HotelRaw) -> Result<NightlyPrice<'_>> {
    if let Some(requested) = raw.requested_room_type.as_deref() {
        let room = raw
            .rooms
            .iter()
            .find(|room| room.answers_to(requested))
            .ok_or_else(|| {
                TripError::validation(format!(
                    "hotel {} does not offer room type `{requested}`",
                    raw.hotel_id
                ))
            })?;
        Currency::parse(&room.currency)?;
        return Ok(NightlyPrice::RequestedRoom(room));
    }

    if let Some(room) = raw
        .rooms
        .iter()
        .min_by(|a, b| a.price_per_night.total_cmp(&b.price_per_night))
    {
        Currency::parse(&room.currency)?;
        return Ok(NightlyPrice::CheapestRoom(room));
    }

    match raw.price_range_bounds()? {
        Some((low, _)) => Ok(NightlyPrice::RangeFloor(low)),
        None => Err(TripError::validation(format!(
            "hotel {} lists neither rooms nor a price range",
            raw.hotel_id
        ))),
    }
}

/// Map a hotel search result into a [`HotelOption`] whose rate starts on
/// `check_in` with an open-ended window.
pub fn normalize_hotel_from_search(raw: &HotelRaw, check_in: NaiveDate) -> Result<HotelOption> {
    if raw.city.trim().is_empty() {
        return Err(TripError::MissingField {
            entity: "HotelRaw",
            field: "city",
        });
    }
    if raw.location.address.trim().is_empty() {
        return Err(TripError::MissingField {
            entity: "HotelRaw",
            field: "location.address",
        });
    }

    let price = select_nightly_price(raw)?;
    let room_type = match &price {
        NightlyPrice::RequestedRoom(room) => Some(room.room_name.clone()),
        _ => None,
    };

    let hotel = HotelOption {
        id: raw.hotel_id.clone(),
        name: raw.name.clone(),
        city: raw.city.clone(),
        address: raw.location.address.clone(),
        stars: raw.star_rating,
        room_type,
        nightly_price_usd: price.amount(),
        check_in,
        check_out: None,
        rating: raw.review.as_ref().map(|review| review.rating),
        vibe: raw.vibe.clone(),
        near_transit_min: raw.near_transit_min,
        images: raw.images.clone(),
    };

    debug!(
        target: "trip_office::mapping",
        hotel_id = %hotel.id,
        nightly = hotel.nightly_price_usd,
        source = ?price,
        "normalized hotel from search"
    );

    Ok(hotel)
}

/// Map a pricing quote for `room_type` over `check_in..check_out`.
pub fn normalize_hotel_from_pricing(
    raw: &HotelPricingResponseRaw,
    room_type: &str,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> Result<HotelOption> {
    Currency::parse(&raw.pricing.currency)?;
    check_date_order(check_in, check_out)?;
    let nights = (check_out - check_in).num_days();

    if let Some(quoted) = raw.pricing.total_nights {
        if i64::from(quoted) != nights {
            return Err(TripError::consistency(format!(
                "pricing quotes {quoted} nights but {check_in} .. {check_out} is {nights}"
            )));
        }
    }

    let nightly = if let Some(room) = raw.room_rates.iter().find(|room| room.answers_to(room_type))
    {
        Currency::parse(&room.currency)?;
        room.price_per_night
    } else if raw.room_type.as_deref() == Some(room_type) {
        raw.pricing
            .price_per_night
            .unwrap_or(raw.pricing.total_price / nights as f64)
    } else {
        return Err(TripError::validation(format!(
            "no price quoted for room type `{room_type}` at hotel {}",
            raw.hotel_id
        )));
    };

    let hotel = HotelOption {
        id: raw.hotel_id.clone(),
        name: raw.hotel_name.clone(),
        city: raw.city.clone(),
        address: raw.address.clone(),
        stars: raw.star_rating,
        room_type: Some(room_type.to_string()),
        nightly_price_usd: nightly,
        check_in,
        check_out: Some(check_out),
        rating: None,
        vibe: None,
        near_transit_min: None,
        images: Vec::new(),
    };

    debug!(
        target: "trip_office::mapping",
        hotel_id = %hotel.id,
        room_type,
        nights,
        nightly = hotel.nightly_price_usd,
        "normalized hotel from pricing"
    );

    Ok(hotel)
}

/// Normalize every hotel of a search, priced over the searched window.
pub fn normalize_hotel_search(raw: &HotelSearchResponseRaw) -> Result<Vec<HotelOption>> {
    raw.hotels
        .iter()
        .map(|hotel| {
            normalize_hotel_from_search(hotel, raw.check_in_date).map(|option| HotelOption {
                check_out: Some(raw.check_out_date),
                ..option
            })
        })
        .collect()
}

impl HotelOption {
    /// Coerce back into the hotel agent's search shape.
    ///
    /// The nightly rate becomes a single room so that re-normalizing with
    /// the same `check_in` selects the same price.
    pub fn to_raw(&self) -> HotelRaw {
        let room = RoomTypeRaw {
            room_id: None,
            room_name: self
                .room_type
                .clone()
                .unwrap_or_else(|| DEFAULT_ROOM_NAME.to_string()),
            description: None,
            max_occupancy: None,
            bed_info: None,
            price_per_night: self.nightly_price_usd,
            total_price: None,
            currency: Currency::Usd.as_str().to_string(),
            breakfast_included: false,
        };

        HotelRaw {
            hotel_id: self.id.clone(),
            name: self.name.clone(),
            city: self.city.clone(),
            location: HotelLocationRaw {
                address: self.address.clone(),
                latitude: None,
                longitude: None,
                distance_to_center: None,
            },
            star_rating: self.stars,
            review: self.rating.map(|rating| HotelReviewRaw {
                rating,
                total_reviews: 0,
                source: "Demo".to_string(),
            }),
            amenities: Vec::new(),
            images: self.images.clone(),
            rooms: vec![room],
            price_range: None,
            requested_room_type: self.room_type.clone(),
            description: None,
            vibe: self.vibe.clone(),
            near_transit_min: self.near_transit_min,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PricingDetailsRaw, RawModel};
    use serde_json::json;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, day).unwrap()
    }

    fn room(name: &str, price: f64) -> RoomTypeRaw {
        RoomTypeRaw {
            room_id: None,
            room_name: name.to_string(),
            description: None,
            max_occupancy: None,
            bed_info: None,
            price_per_night: price,
            total_price: None,
            currency: "USD".to_string(),
            breakfast_included: false,
        }
    }

    fn hotel(rooms: Vec<RoomTypeRaw>) -> HotelRaw {
        HotelRaw::from_value(json!({
            "hotel_id": "h-shinjuku",
            "name": "Shinjuku Granbell",
            "city": "Tokyo",
            "location": {"address": "2-14-5 Kabukicho"},
            "star_rating": 4,
            "review": {"rating": 4.4, "total_reviews": 812},
            "price_range": "$150-$220",
            "vibe": "nightlife"
        }))
        .map(|raw| HotelRaw { rooms, ..raw })
        .unwrap()
    }

    fn pricing(room_type: Option<&str>) -> HotelPricingResponseRaw {
        HotelPricingResponseRaw {
            hotel_id: "h-shinjuku".to_string(),
            hotel_name: "Shinjuku Granbell".to_string(),
            city: "Tokyo".to_string(),
            address: "2-14-5 Kabukicho".to_string(),
            star_rating: Some(4),
            room_type: room_type.map(str::to_string),
            pricing: PricingDetailsRaw {
                base_price: 600.0,
                taxes_and_fees: 90.0,
                total_price: 690.0,
                currency: "USD".to_string(),
                price_per_night: None,
                total_nights: Some(3),
            },
            room_rates: vec![room("suite", 410.0)],
            cancellation_policy: None,
            booking_conditions: Vec::new(),
            last_updated: None,
        }
    }

    #[test]
    fn cheapest_room_when_none_requested() {
        let raw = hotel(vec![room("standard", 140.0), room("deluxe", 220.0)]);
        let option = normalize_hotel_from_search(&raw, date(1)).unwrap();
        assert_eq!(option.nightly_price_usd, 140.0);
        assert_eq!(option.room_type, None);
        assert_eq!(option.check_out, None);
        assert_eq!(option.rating, Some(4.4));
    }

    #[test]
    fn requested_room_wins() {
        let mut raw = hotel(vec![room("standard", 140.0), room("deluxe", 220.0)]);
        raw.requested_room_type = Some("deluxe".to_string());
        let option = normalize_hotel_from_search(&raw, date(1)).unwrap();
        assert_eq!(option.nightly_price_usd, 220.0);
        assert_eq!(option.room_type.as_deref(), Some("deluxe"));
    }

    #[test]
    fn requested_room_must_exist() {
        let mut raw = hotel(vec![room("standard", 140.0)]);
        raw.requested_room_type = Some("penthouse".to_string());
        assert!(matches!(
            normalize_hotel_from_search(&raw, date(1)),
            Err(TripError::Validation(_))
        ));
    }

    #[test]
    fn falls_back_to_price_range_floor() {
        let raw = hotel(Vec::new());
        let option = normalize_hotel_from_search(&raw, date(1)).unwrap();
        assert_eq!(option.nightly_price_usd, 150.0);
    }

    #[test]
    fn no_price_at_all_is_an_error() {
        let mut raw = hotel(Vec::new());
        raw.price_range = None;
        assert!(normalize_hotel_from_search(&raw, date(1)).is_err());
    }

    #[test]
    fn pricing_uses_room_rates_then_quote() {
        let raw = pricing(Some("double"));
        let suite = normalize_hotel_from_pricing(&raw, "suite", date(1), date(4)).unwrap();
        assert_eq!(suite.nightly_price_usd, 410.0);
        assert_eq!(suite.check_out, Some(date(4)));

        let double = normalize_hotel_from_pricing(&raw, "double", date(1), date(4)).unwrap();
        assert!((double.nightly_price_usd - 230.0).abs() < 1e-9);
        assert_eq!(double.priced_nights(), Some(3));
    }

    #[test]
    fn pricing_unknown_room_is_validation_error() {
        let raw = pricing(Some("double"));
        assert!(matches!(
            normalize_hotel_from_pricing(&raw, "twin", date(1), date(4)),
            Err(TripError::Validation(_))
        ));
    }

    #[test]
    fn pricing_non_usd_fails() {
        let mut raw = pricing(Some("double"));
        raw.pricing.currency = "JPY".to_string();
        raw.room_rates = vec![room("suite", 41_000.0)];

        for room_type in ["suite", "double"] {
            assert!(matches!(
                normalize_hotel_from_pricing(&raw, room_type, date(1), date(4)),
                Err(TripError::UnsupportedCurrency(ref code)) if code == "JPY"
            ));
        }
    }

    #[test]
    fn pricing_room_rate_in_other_currency_fails() {
        let mut raw = pricing(Some("double"));
        raw.room_rates[0].currency = "EUR".to_string();
        assert!(matches!(
            normalize_hotel_from_pricing(&raw, "suite", date(1), date(4)),
            Err(TripError::UnsupportedCurrency(_))
        ));
    }

    #[test]
    fn range_floor_reads_each_bound_separately() {
        for range in ["$150–$220", "$150 to $220"] {
            let mut raw = hotel(Vec::new());
            raw.price_range = Some(range.to_string());
            let option = normalize_hotel_from_search(&raw, date(1)).unwrap();
            assert_eq!(option.nightly_price_usd, 150.0);
        }

        let mut raw = hotel(Vec::new());
        raw.price_range = Some("$150 $220".to_string());
        assert!(normalize_hotel_from_search(&raw, date(1)).is_err());
    }

    #[test]
    fn pricing_window_must_match_quote() {
        let raw = pricing(Some("double"));
        let err = normalize_hotel_from_pricing(&raw, "double", date(1), date(3)).unwrap_err();
        assert!(err.is_consistency());

        let err = normalize_hotel_from_pricing(&raw, "double", date(4), date(1)).unwrap_err();
        assert!(err.is_consistency());
    }

    #[test]
    fn to_raw_renormalizes_identically() {
        let mut raw = hotel(vec![room("standard", 140.0), room("deluxe", 220.0)]);
        raw.requested_room_type = Some("deluxe".to_string());
        let option = normalize_hotel_from_search(&raw, date(1)).unwrap();
        let again = normalize_hotel_from_search(&option.to_raw(), date(1)).unwrap();
        assert_eq!(option, again);

        let cheapest = normalize_hotel_from_search(&hotel(vec![room("standard", 140.0)]), date(1))
            .unwrap();
        let again = normalize_hotel_from_search(&cheapest.to_raw(), date(1)).unwrap();
        assert_eq!(cheapest, again);
    }
}
