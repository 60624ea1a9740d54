use crate::pricing::charge_codes::evaluate_charge_codes;
use crate::pricing::commission::{aggregate, recommended_track, sales_rep_track};
use crate::pricing::costs::analyze_costs;
use crate::pricing::models::{JobEstimateInput, PricingBreakdown};
use tracing::debug;

/// Run the full pricing pipeline for one job
///
/// Charge codes → baseline/market price → both commission tracks → cost
/// analysis. Returns the zeroed breakdown when no square footage has been
/// entered yet.
pub fn estimate(input: &JobEstimateInput) -> PricingBreakdown {
    if !input.is_priceable() {
        debug!("Square footage missing, returning zeroed breakdown");
        return PricingBreakdown::zero();
    }

    let sheet = evaluate_charge_codes(input);
    let market = aggregate(sheet.total_dollars);
    let recommended = recommended_track(market.recommended);
    let sales_rep = sales_rep_track(market.recommended, input.manual_sales_rep_price);
    let cost_breakdown = analyze_costs(
        sales_rep.price,
        sheet.total_time,
        input.discount_percentage,
        input.is_realtor,
    );

    debug!(
        square_footage = input.square_footage,
        items = sheet.items.len(),
        baseline = market.baseline,
        sales_rep_price = sales_rep.price,
        final_price = cost_breakdown.price,
        "Computed pricing breakdown"
    );

    PricingBreakdown {
        charge_items: sheet.items,
        baseline_price: market.baseline,
        market_recommended_price: market.recommended,
        recommended_commission: recommended.commission,
        annual_commission: recommended.annual,
        per_100_customers: recommended.per_100,
        sales_rep_price: sales_rep.price,
        sales_rep_commission: sales_rep.commission,
        sales_rep_annual_commission: sales_rep.annual,
        sales_rep_per_100: sales_rep.per_100,
        total_time: sheet.total_time,
        total_minutes: sheet.total_time * 60.0,
        cost_breakdown,
    }
}
