use crate::{
    schemas::{EntityKind, EntitySchema, SchemaHandle},
    types::{
        ActivityOption, ActivityRaw, BudgetCalculationResponseRaw, BudgetResult, FlightOption,
        FlightOptionRaw, FlightSearchResponseRaw, HotelOption, HotelPricingResponseRaw, HotelRaw,
        HotelSearchResponseRaw, InterAgentMessage, ItineraryCandidate, TripComponent,
    },
};

/// Every entity with a published schema, raw shapes first.
pub fn all() -> Vec<&'static SchemaHandle> {
    vec![
        FlightOptionRaw::schema(),
        FlightSearchResponseRaw::schema(),
        HotelRaw::schema(),
        HotelSearchResponseRaw::schema(),
        HotelPricingResponseRaw::schema(),
        BudgetCalculationResponseRaw::schema(),
        ActivityRaw::schema(),
        FlightOption::schema(),
        HotelOption::schema(),
        ActivityOption::schema(),
        TripComponent::schema(),
        BudgetResult::schema(),
        ItineraryCandidate::schema(),
        InterAgentMessage::schema(),
    ]
}

/// Look up a schema by entity name, ignoring case.
pub fn find(name: &str) -> Option<&'static SchemaHandle> {
    all()
        .into_iter()
        .find(|handle| handle.schema_name().eq_ignore_ascii_case(name.trim()))
}

pub fn of_kind(kind: EntityKind) -> impl Iterator<Item = &'static SchemaHandle> {
    all().into_iter().filter(move |handle| handle.kind() == kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique_and_findable() {
        let handles = all();
        for handle in &handles {
            let found = find(&handle.schema_name().to_lowercase()).unwrap();
            assert_eq!(found.type_id(), handle.type_id());
        }
    }

    #[test]
    fn kinds_partition_the_catalog() {
        let raw = of_kind(EntityKind::Raw).count();
        let normalized = of_kind(EntityKind::Normalized).count();
        let envelope = of_kind(EntityKind::Envelope).count();
        assert_eq!(raw, 7);
        assert_eq!(envelope, 1);
        assert_eq!(raw + normalized + envelope, all().len());
    }
}
