use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest discount a sales rep may apply, in percent
pub const MAX_DISCOUNT_PERCENTAGE: f64 = 50.0;

/// Implements `Display`/`FromStr` over the serde wire names. `FromStr` is
/// case-insensitive and also accepts `-` in place of `_`.
macro_rules! wire_enum {
    ($name:ident, $label:literal, { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
                match normalized.as_str() {
                    $($wire => Ok($name::$variant),)+
                    _ => Err(AppError::InvalidInput(format!(
                        "unknown {} '{}' (expected one of: {})",
                        $label,
                        s,
                        [$($wire),+].join(", ")
                    ))),
                }
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    House,
    Apartment,
    Condo,
    Office,
}

wire_enum!(PropertyType, "property type", {
    House => "house",
    Apartment => "apartment",
    Condo => "condo",
    Office => "office",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Weekly,
    BiWeekly,
    Monthly,
    OneTime,
}

wire_enum!(Frequency, "frequency", {
    Weekly => "weekly",
    BiWeekly => "bi_weekly",
    Monthly => "monthly",
    OneTime => "one_time",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    RegularCleaning,
    DeepCleanBlue,
    DeepCleanShine,
    DeepCleanCombo,
    MoveInOut,
    OneTime,
}

wire_enum!(ServiceType, "service type", {
    RegularCleaning => "regular_cleaning",
    DeepCleanBlue => "deep_clean_blue",
    DeepCleanShine => "deep_clean_shine",
    DeepCleanCombo => "deep_clean_combo",
    MoveInOut => "move_in_out",
    OneTime => "one_time",
});

impl ServiceType {
    /// Deep-clean variants that carry the Turn-1 premium
    pub fn is_turn_one(&self) -> bool {
        matches!(self, Self::DeepCleanBlue | Self::DeepCleanShine)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pets {
    #[serde(default)]
    pub dogs: u32,
    #[serde(default)]
    pub cats: u32,
}

impl Pets {
    /// Combined head count, saturating at `u32::MAX`
    pub fn total(&self) -> u32 {
        self.dogs.saturating_add(self.cats)
    }

    /// Human-readable pet list as sent to the backend, zero counts omitted
    pub fn labels(&self) -> Vec<String> {
        let mut labels = Vec::new();
        if self.dogs > 0 {
            labels.push(format!("{} {}", self.dogs, if self.dogs == 1 { "dog" } else { "dogs" }));
        }
        if self.cats > 0 {
            labels.push(format!("{} {}", self.cats, if self.cats == 1 { "cat" } else { "cats" }));
        }
        labels
    }
}

/// Attributes describing a prospective cleaning job
///
/// `square_footage == 0` means the form is incomplete; pricing then yields
/// the zeroed [`PricingBreakdown`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobEstimateInput {
    #[serde(default)]
    pub square_footage: u32,
    pub property_type: PropertyType,
    pub frequency: Frequency,
    pub service_type: ServiceType,
    #[serde(default)]
    pub pets: Pets,
    #[serde(default)]
    pub is_realtor: bool,
    #[serde(default)]
    pub discount_percentage: f64,
    #[serde(default)]
    pub manual_sales_rep_price: Option<f64>,
}

impl Default for JobEstimateInput {
    fn default() -> Self {
        Self {
            square_footage: 0,
            property_type: PropertyType::House,
            frequency: Frequency::BiWeekly,
            service_type: ServiceType::RegularCleaning,
            pets: Pets::default(),
            is_realtor: false,
            discount_percentage: 0.0,
            manual_sales_rep_price: None,
        }
    }
}

impl JobEstimateInput {
    /// Whether enough has been entered to price the job
    pub fn is_priceable(&self) -> bool {
        self.square_footage > 0
    }

    /// Advisory checks that gate submission. Pricing itself never calls this.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.square_footage == 0 {
            return Err(AppError::InvalidInput(
                "square footage must be greater than zero".to_string(),
            ));
        }

        let discount = self.discount_percentage;
        if !discount.is_finite() || !(0.0..=MAX_DISCOUNT_PERCENTAGE).contains(&discount) {
            return Err(AppError::InvalidInput(format!(
                "discount percentage must be between 0 and {}, got {}",
                MAX_DISCOUNT_PERCENTAGE, discount
            )));
        }

        if let Some(price) = self.manual_sales_rep_price {
            if !price.is_finite() || price < 0.0 {
                return Err(AppError::InvalidInput(format!(
                    "manual sales rep price must be a non-negative amount, got {}",
                    price
                )));
            }
        }

        Ok(())
    }
}

/// One additive contribution to the price buildup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeLineItem {
    pub code: String,
    pub description: String,
    /// Hours
    pub time: f64,
    pub dollars: f64,
}

/// Post-discount price and profitability figures
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub price: f64,
    pub best_deal_price: f64,
    pub gross_profit_percent: f64,
    pub costing_rate: f64,
    pub realtor_commission: f64,
    pub contractor_cost: f64,
    pub supplies_cost: f64,
    pub transportation_cost: f64,
    #[serde(rename = "projectedCOGS")]
    pub projected_cogs: f64,
    pub gross_profit_dollars: f64,
}

/// Fully derived pricing output. Recomputed from scratch for every input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingBreakdown {
    pub charge_items: Vec<ChargeLineItem>,
    pub baseline_price: f64,
    pub market_recommended_price: f64,
    pub recommended_commission: f64,
    pub annual_commission: f64,
    #[serde(rename = "per100Customers")]
    pub per_100_customers: f64,
    pub sales_rep_price: f64,
    pub sales_rep_commission: f64,
    pub sales_rep_annual_commission: f64,
    #[serde(rename = "salesRepPer100")]
    pub sales_rep_per_100: f64,
    pub total_time: f64,
    pub total_minutes: f64,
    pub cost_breakdown: CostBreakdown,
}

impl PricingBreakdown {
    /// Create a zeroed breakdown (incomplete form)
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_zero(&self) -> bool {
        self.charge_items.is_empty() && self.baseline_price == 0.0
    }
}
