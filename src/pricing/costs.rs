use crate::pricing::models::CostBreakdown;

/// Contractor cost per labor hour, before the loaded multiplier
pub const COSTING_RATE: f64 = 22.5;
pub const CONTRACTOR_MULTIPLIER: f64 = 3.2;
pub const SUPPLIES_RATE: f64 = 0.04;
pub const TRANSPORTATION_RATE: f64 = 0.06;
pub const REALTOR_COMMISSION_RATE: f64 = 0.03;

/// Apply the discount to the quoted price. Non-positive discounts leave it as is.
pub fn discounted_price(sales_rep_price: f64, discount_percentage: f64) -> f64 {
    if discount_percentage > 0.0 {
        sales_rep_price * (1.0 - discount_percentage / 100.0)
    } else {
        sales_rep_price
    }
}

/// Compute the post-discount price and full cost/profitability breakdown
pub fn analyze_costs(
    sales_rep_price: f64,
    total_time: f64,
    discount_percentage: f64,
    is_realtor: bool,
) -> CostBreakdown {
    let price = discounted_price(sales_rep_price, discount_percentage);

    let supplies_cost = price * SUPPLIES_RATE;
    let transportation_cost = price * TRANSPORTATION_RATE;
    let contractor_cost = total_time * COSTING_RATE * CONTRACTOR_MULTIPLIER;
    let projected_cogs = contractor_cost + supplies_cost + transportation_cost;
    let gross_profit_dollars = price - projected_cogs;

    let gross_profit_percent = if price == 0.0 {
        0.0
    } else {
        gross_profit_dollars / price * 100.0
    };

    let realtor_commission = if is_realtor {
        price * REALTOR_COMMISSION_RATE
    } else {
        0.0
    };

    CostBreakdown {
        price,
        best_deal_price: price,
        gross_profit_percent,
        costing_rate: COSTING_RATE,
        realtor_commission,
        contractor_cost,
        supplies_cost,
        transportation_cost,
        projected_cogs,
        gross_profit_dollars,
    }
}
