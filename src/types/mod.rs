pub mod common;
pub mod envelope;
pub mod normalized;
pub mod raw;

pub use common::{BudgetStatus, Currency, HotelSortBy, TravelCategory, TravelClass};
pub use envelope::{
    Constraints, DeliverableKind, DeliverableRequest, InterAgentMessage, MessageStatus,
    Preferences, Traveler, Trip, TripWindow,
};
pub use normalized::{
    ActivityOption, BudgetResult, CategoryShare, Confidence, DailyPlan, FlightOption, HotelOption,
    ItineraryCandidate, TripComponent,
};
pub use raw::{
    ActivityRaw, AmenityRaw, BudgetCalculationResponseRaw, BudgetCategoryBreakdownRaw,
    CancellationPolicyRaw, FlightOptionRaw, FlightSearchResponseRaw, HotelAmenityRaw,
    HotelLocationRaw, HotelPricingResponseRaw, HotelRaw, HotelReviewRaw, HotelSearchResponseRaw,
    PricingDetailsRaw, RawModel, RoomTypeRaw, MONEY_TOLERANCE,
};
