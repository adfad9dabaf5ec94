use crate::{
    mapping::outcome::{Mapped, MappingFallback},
    types::{
        BudgetCalculationResponseRaw, BudgetCategoryBreakdownRaw, BudgetResult, BudgetStatus,
        CategoryShare, Currency, TravelCategory, MONEY_TOLERANCE,
    },
    Result, TripError,
};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Map a budgeteer response into a [`BudgetResult`].
///
/// The surplus is always recomputed from `total_budget` and the declared
/// totals. Category costs must add up to the declared total; a status label
/// that cannot be read is replaced by the surplus-derived status.
///
/// An empty `breakdown_by_category` is treated as nothing to reconcile: the
/// sum check is skipped and the result carries a note saying so, even when
/// the declared total is non-zero.
pub fn budget_raw_to_normalized(raw: &BudgetCalculationResponseRaw) -> Result<Mapped<BudgetResult>> {
    let currency = Currency::parse(&raw.currency)?;
    if !raw.total_budget.is_finite() || raw.total_budget <= 0.0 {
        return Err(TripError::validation(format!(
            "total_budget must be greater than 0, got {}",
            raw.total_budget
        )));
    }

    let mut fallbacks = Vec::new();
    let mut notes = Vec::new();

    let costs = merge_categories(&raw.breakdown_by_category, &mut fallbacks)?;
    let estimated_total = raw.estimated_total();

    if costs.is_empty() {
        notes.push("no category breakdown supplied".to_string());
    } else {
        let category_sum: f64 = costs.values().sum();
        if (category_sum - estimated_total).abs() > MONEY_TOLERANCE {
            return Err(TripError::consistency(format!(
                "category costs sum to {category_sum} but estimated total is {estimated_total}"
            )));
        }
    }

    let surplus_shortfall = raw.total_budget - estimated_total;
    if let Some(declared) = raw.surplus_shortfall {
        if (declared - surplus_shortfall).abs() > MONEY_TOLERANCE {
            return Err(TripError::consistency(format!(
                "declared surplus_shortfall {declared} but total_budget - estimated_total = {surplus_shortfall}"
            )));
        }
    }

    let categories = costs
        .into_iter()
        .map(|(category, cost)| {
            let share = cost / raw.total_budget * 100.0;
            let over_allocated = share > 100.0;
            if over_allocated {
                warn!(
                    target: "trip_office::mapping",
                    trip_id = %raw.trip_id,
                    category = category.as_str(),
                    share,
                    "category exceeds the whole budget"
                );
                notes.push(format!(
                    "{} alone is {share:.1}% of the budget",
                    category.as_str()
                ));
            }
            CategoryShare {
                category,
                cost,
                percentage_of_budget: share.clamp(0.0, 100.0),
                over_allocated,
            }
        })
        .collect();

    let derived = BudgetStatus::from_surplus(surplus_shortfall);
    let status = match raw.budget_status.as_deref() {
        None => derived,
        Some(label) => match BudgetStatus::from_label(label) {
            Some(stated) => {
                if stated != derived {
                    notes.push(format!(
                        "reported status {} but surplus {surplus_shortfall:+.2} implies {}",
                        stated.as_str(),
                        derived.as_str()
                    ));
                }
                stated
            }
            None => {
                fallbacks.push(MappingFallback::record(
                    "budget_status",
                    label,
                    derived.as_str(),
                ));
                derived
            }
        },
    };

    let result = BudgetResult {
        trip_id: raw.trip_id.clone(),
        total_budget: raw.total_budget,
        estimated_total,
        surplus_shortfall,
        status,
        categories,
        currency,
        notes,
    };

    debug!(
        target: "trip_office::mapping",
        trip_id = %result.trip_id,
        surplus_shortfall = result.surplus_shortfall,
        status = result.status.as_str(),
        "normalized budget"
    );

    Ok(Mapped::with_fallbacks(result, fallbacks))
}

/// Resolve labels and sum repeated categories, in canonical category order.
fn merge_categories(
    entries: &[BudgetCategoryBreakdownRaw],
    fallbacks: &mut Vec<MappingFallback>,
) -> Result<BTreeMap<TravelCategory, f64>> {
    let mut costs = BTreeMap::new();
    for entry in entries {
        let category = TravelCategory::from_label(&entry.category).unwrap_or_else(|| {
            fallbacks.push(MappingFallback::record(
                "category",
                &entry.category,
                TravelCategory::Misc.as_str(),
            ));
            TravelCategory::Misc
        });
        let cost = entry.category_cost().ok_or(TripError::MissingField {
            entity: "BudgetCategoryBreakdownRaw",
            field: "total_category_cost",
        })?;
        if !cost.is_finite() || cost < 0.0 {
            return Err(TripError::validation(format!(
                "category `{}` cost must be non-negative, got {cost}",
                entry.category
            )));
        }
        *costs.entry(category).or_insert(0.0) += cost;
    }
    Ok(costs)
}

impl BudgetResult {
    /// Coerce back into the budgeteer's raw shape.
    pub fn to_raw(&self) -> BudgetCalculationResponseRaw {
        BudgetCalculationResponseRaw {
            trip_id: self.trip_id.clone(),
            total_planned_cost: Some(self.estimated_total),
            total_estimated_cost: None,
            total_budget: self.total_budget,
            surplus_shortfall: Some(self.surplus_shortfall),
            budget_status: Some(self.status.as_str().to_string()),
            breakdown_by_category: self
                .categories
                .iter()
                .map(|share| BudgetCategoryBreakdownRaw {
                    category: share.category.as_str().to_string(),
                    planned_cost: None,
                    estimated_daily_cost: None,
                    total_category_cost: Some(share.cost),
                    percentage_of_budget: None,
                })
                .collect(),
            currency: self.currency.as_str().to_string(),
            calculation_timestamp: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(category: &str, total: f64) -> BudgetCategoryBreakdownRaw {
        BudgetCategoryBreakdownRaw {
            category: category.to_string(),
            planned_cost: None,
            estimated_daily_cost: None,
            total_category_cost: Some(total),
            percentage_of_budget: None,
        }
    }

    fn raw(total_budget: f64, breakdown: Vec<BudgetCategoryBreakdownRaw>) -> BudgetCalculationResponseRaw {
        let planned = breakdown
            .iter()
            .filter_map(BudgetCategoryBreakdownRaw::category_cost)
            .sum();
        BudgetCalculationResponseRaw {
            trip_id: "trip-london".to_string(),
            total_planned_cost: Some(planned),
            total_estimated_cost: None,
            total_budget,
            surplus_shortfall: None,
            budget_status: None,
            breakdown_by_category: breakdown,
            currency: "USD".to_string(),
            calculation_timestamp: None,
        }
    }

    #[test]
    fn empty_breakdown_has_nothing_to_reconcile() {
        let mut raw = raw(5000.0, Vec::new());
        raw.total_planned_cost = Some(4000.0);
        let mapped = budget_raw_to_normalized(&raw).unwrap();
        let budget = mapped.value;
        assert!(budget.categories.is_empty());
        assert_eq!(budget.estimated_total, 4000.0);
        assert_eq!(budget.status, BudgetStatus::UnderBudget);
        assert!(budget
            .notes
            .iter()
            .any(|note| note == "no category breakdown supplied"));
    }

    #[test]
    fn over_budget_by_450() {
        let raw = raw(
            4000.0,
            vec![entry("flights", 1450.0), entry("hotels", 2200.0), entry("food", 800.0)],
        );
        let mapped = budget_raw_to_normalized(&raw).unwrap();
        assert!(mapped.is_clean());
        let budget = mapped.value;
        assert_eq!(budget.estimated_total, 4450.0);
        assert_eq!(budget.surplus_shortfall, -450.0);
        assert_eq!(budget.status, BudgetStatus::OverBudget);
        let hotels = budget.category(TravelCategory::Hotels).unwrap();
        assert!((hotels.percentage_of_budget - 55.0).abs() < 1e-9);
    }

    #[test]
    fn categories_must_sum_to_estimated_total() {
        let mut raw = raw(5000.0, vec![entry("flights", 1980.0), entry("hotels", 2000.0)]);
        raw.total_planned_cost = Some(4000.0);
        let err = budget_raw_to_normalized(&raw).unwrap_err();
        assert!(err.is_consistency());
    }

    #[test]
    fn declared_surplus_must_match() {
        let mut raw = raw(3000.0, vec![entry("flights", 1000.0)]);
        raw.surplus_shortfall = Some(1500.0);
        assert!(budget_raw_to_normalized(&raw).unwrap_err().is_consistency());

        raw.surplus_shortfall = Some(2000.0);
        assert!(budget_raw_to_normalized(&raw).is_ok());
    }

    #[test]
    fn aliases_merge_and_unknown_goes_to_misc() {
        let raw = raw(
            3000.0,
            vec![
                entry("lodging", 600.0),
                entry("Accommodation", 400.0),
                entry("souvenirs", 50.0),
            ],
        );
        let mapped = budget_raw_to_normalized(&raw).unwrap();
        assert_eq!(mapped.value.categories.len(), 2);
        assert_eq!(mapped.value.category(TravelCategory::Hotels).unwrap().cost, 1000.0);
        assert_eq!(mapped.value.category(TravelCategory::Misc).unwrap().cost, 50.0);
        assert_eq!(mapped.fallbacks.len(), 1);
        assert_eq!(mapped.fallbacks[0].substituted, "misc");
    }

    #[test]
    fn single_category_over_budget_is_clamped_and_flagged() {
        let raw = raw(1000.0, vec![entry("flights", 1200.0)]);
        let budget = budget_raw_to_normalized(&raw).unwrap().into_value();
        let flights = budget.category(TravelCategory::Flights).unwrap();
        assert_eq!(flights.percentage_of_budget, 100.0);
        assert!(flights.over_allocated);
        assert_eq!(budget.over_allocated().count(), 1);
        assert_eq!(budget.status, BudgetStatus::OverBudget);
    }

    #[test]
    fn unreadable_status_label_is_recomputed() {
        let mut raw = raw(4000.0, vec![entry("food", 3000.0)]);
        raw.budget_status = Some("looking good!".to_string());
        let mapped = budget_raw_to_normalized(&raw).unwrap();
        assert_eq!(mapped.value.status, BudgetStatus::UnderBudget);
        assert_eq!(mapped.fallbacks[0].field, "budget_status");
    }

    #[test]
    fn legacy_status_label_is_kept_and_noted() {
        let mut raw = raw(4000.0, vec![entry("food", 3000.0)]);
        raw.budget_status = Some("warning".to_string());
        let mapped = budget_raw_to_normalized(&raw).unwrap();
        assert!(mapped.is_clean());
        assert_eq!(mapped.value.status, BudgetStatus::OverBudget);
        assert_eq!(mapped.value.notes.len(), 1);
    }

    #[test]
    fn to_raw_renormalizes_identically() {
        let mut raw = raw(
            2500.0,
            vec![entry("dining", 300.0), entry("flights", 1900.0), entry("transport", 120.5)],
        );
        raw.budget_status = Some("on_budget".to_string());
        let first = budget_raw_to_normalized(&raw).unwrap().into_value();
        let second = budget_raw_to_normalized(&first.to_raw()).unwrap().into_value();
        assert_eq!(first, second);
    }
}
