//! Enumerations shared by raw and normalized entities, with the lookup
//! tables that turn agent-supplied labels into them.
//!
//! Every table is matched exactly after trimming and case-folding the label.
//! A miss returns `None`; callers decide the documented default.

use crate::{Result, TripError};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Supported currencies - USD only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
pub enum Currency {
    #[default]
    #[serde(rename = "USD")]
    Usd,
}

impl Currency {
    pub fn as_str(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
        }
    }

    /// Accepts only `USD`; anything else is a validation error.
    pub fn parse(code: &str) -> Result<Self> {
        if code.trim() == "USD" {
            Ok(Currency::Usd)
        } else {
            Err(TripError::UnsupportedCurrency(code.to_string()))
        }
    }
}

/// Flight cabin classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelClass {
    #[default]
    Economy,
    PremiumEconomy,
    Business,
    First,
}

const FARE_CLASS_TABLE: &[(&str, TravelClass)] = &[
    ("ECONOMY", TravelClass::Economy),
    ("COACH", TravelClass::Economy),
    ("MAIN CABIN", TravelClass::Economy),
    ("PREMIUM_ECONOMY", TravelClass::PremiumEconomy),
    ("PREMIUM ECONOMY", TravelClass::PremiumEconomy),
    ("BUSINESS", TravelClass::Business),
    ("FIRST", TravelClass::First),
];

impl TravelClass {
    pub fn as_str(self) -> &'static str {
        match self {
            TravelClass::Economy => "ECONOMY",
            TravelClass::PremiumEconomy => "PREMIUM_ECONOMY",
            TravelClass::Business => "BUSINESS",
            TravelClass::First => "FIRST",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let key = label.trim().to_ascii_uppercase();
        lookup(FARE_CLASS_TABLE, &key)
    }
}

/// Budget health, ordered from least to most severe
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    UnderBudget,
    OnBudget,
    OverBudget,
    Critical,
}

/// Surplus above which a trip counts as comfortably under budget,
/// and shortfall beyond which it is critical.
pub const BUDGET_STATUS_BAND_USD: f64 = 500.0;

const BUDGET_STATUS_TABLE: &[(&str, BudgetStatus)] = &[
    ("under_budget", BudgetStatus::UnderBudget),
    ("on_budget", BudgetStatus::OnBudget),
    ("over_budget", BudgetStatus::OverBudget),
    ("critical", BudgetStatus::Critical),
    // legacy budgeteer labels
    ("warning", BudgetStatus::OverBudget),
    ("near_limit", BudgetStatus::OnBudget),
];

impl BudgetStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BudgetStatus::UnderBudget => "under_budget",
            BudgetStatus::OnBudget => "on_budget",
            BudgetStatus::OverBudget => "over_budget",
            BudgetStatus::Critical => "critical",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let key = label.trim().to_ascii_lowercase();
        lookup(BUDGET_STATUS_TABLE, &key)
    }

    /// Threshold rule. Both band edges resolve toward the milder side of the
    /// outer band: +500 is `on_budget`, -500 is `over_budget`.
    pub fn from_surplus(surplus_shortfall: f64) -> Self {
        if surplus_shortfall > BUDGET_STATUS_BAND_USD {
            BudgetStatus::UnderBudget
        } else if surplus_shortfall >= 0.0 {
            BudgetStatus::OnBudget
        } else if surplus_shortfall >= -BUDGET_STATUS_BAND_USD {
            BudgetStatus::OverBudget
        } else {
            BudgetStatus::Critical
        }
    }
}

/// Expense categories used by trip components and budget breakdowns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TravelCategory {
    Flights,
    Hotels,
    Transportation,
    Food,
    Activities,
    Shopping,
    Misc,
}

const CATEGORY_TABLE: &[(&str, TravelCategory)] = &[
    ("flights", TravelCategory::Flights),
    ("hotels", TravelCategory::Hotels),
    ("lodging", TravelCategory::Hotels),
    ("accommodation", TravelCategory::Hotels),
    ("transportation", TravelCategory::Transportation),
    ("transport", TravelCategory::Transportation),
    ("food", TravelCategory::Food),
    ("dining", TravelCategory::Food),
    ("meals", TravelCategory::Food),
    ("activities", TravelCategory::Activities),
    ("shopping", TravelCategory::Shopping),
    ("misc", TravelCategory::Misc),
    ("other", TravelCategory::Misc),
];

impl TravelCategory {
    pub const ALL: [TravelCategory; 7] = [
        TravelCategory::Flights,
        TravelCategory::Hotels,
        TravelCategory::Transportation,
        TravelCategory::Food,
        TravelCategory::Activities,
        TravelCategory::Shopping,
        TravelCategory::Misc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TravelCategory::Flights => "flights",
            TravelCategory::Hotels => "hotels",
            TravelCategory::Transportation => "transportation",
            TravelCategory::Food => "food",
            TravelCategory::Activities => "activities",
            TravelCategory::Shopping => "shopping",
            TravelCategory::Misc => "misc",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let key = label.trim().to_ascii_lowercase();
        lookup(CATEGORY_TABLE, &key)
    }
}

/// Hotel search ordering requested by the orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum HotelSortBy {
    #[default]
    Price,
    Rating,
    Distance,
}

fn lookup<T: Copy>(table: &[(&str, T)], key: &str) -> Option<T> {
    table
        .iter()
        .find(|(label, _)| *label == key)
        .map(|(_, value)| *value)
}
