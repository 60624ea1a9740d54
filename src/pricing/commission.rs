use serde::{Deserialize, Serialize};

/// Markup from baseline to the market recommended price
pub const MARKET_MARKUP: f64 = 1.07;
/// Extra markup applied to the market price for the sales rep quote
pub const SALES_REP_MARKUP: f64 = 1.037;
pub const RECOMMENDED_COMMISSION_RATE: f64 = 0.065;
pub const SALES_REP_COMMISSION_RATE: f64 = 0.0982;
/// Annualization always assumes a weekly cadence, whatever the frequency
pub const WEEKS_PER_YEAR: f64 = 52.0;
pub const CUSTOMER_BOOK_SIZE: f64 = 100.0;

/// Baseline and market recommended price derived from the charge total
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MarketPrice {
    pub baseline: f64,
    pub recommended: f64,
}

pub fn aggregate(total_dollars: f64) -> MarketPrice {
    MarketPrice {
        baseline: total_dollars,
        recommended: total_dollars * MARKET_MARKUP,
    }
}

/// One commission track: the price it is based on and what it earns
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionTrack {
    pub price: f64,
    pub commission: f64,
    pub annual: f64,
    pub per_100: f64,
}

impl CommissionTrack {
    fn at_rate(price: f64, rate: f64) -> Self {
        let commission = price * rate;
        let annual = commission * WEEKS_PER_YEAR;
        Self {
            price,
            commission,
            annual,
            per_100: annual * CUSTOMER_BOOK_SIZE,
        }
    }
}

/// Company-suggested track, based on the market recommended price
pub fn recommended_track(market_recommended_price: f64) -> CommissionTrack {
    CommissionTrack::at_rate(market_recommended_price, RECOMMENDED_COMMISSION_RATE)
}

/// Quoted-price track. A positive manual price wins over the computed quote.
pub fn sales_rep_track(market_recommended_price: f64, manual_price: Option<f64>) -> CommissionTrack {
    let price = match manual_price {
        Some(manual) if manual > 0.0 => manual,
        _ => market_recommended_price * SALES_REP_MARKUP,
    };
    CommissionTrack::at_rate(price, SALES_REP_COMMISSION_RATE)
}
