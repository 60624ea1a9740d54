pub mod calculator;
pub mod charge_codes;
pub mod commission;
pub mod costs;
pub mod models;

pub use calculator::estimate;
pub use charge_codes::{evaluate_charge_codes, ChargeCode, ChargeSheet, BASE_HOURLY_RATE};
pub use commission::{CommissionTrack, MarketPrice};
pub use models::{
    ChargeLineItem, CostBreakdown, Frequency, JobEstimateInput, Pets, PricingBreakdown,
    PropertyType, ServiceType,
};
