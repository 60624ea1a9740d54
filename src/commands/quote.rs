use crate::cli::QuoteArgs;
use anyhow::Result;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Color, ContentArrangement, Table};
use sales_estimator::pricing::{self, JobEstimateInput, PricingBreakdown};
use sales_estimator::submission::EstimateDraft;
use tracing::info;

/// Execute the quote command
///
/// Prices the job given on the command line (or in a draft file) and prints
/// the breakdown. Advisory validation problems are shown as warnings; the
/// price is still computed.
pub fn execute(args: QuoteArgs) -> Result<()> {
    let input = match &args.file {
        Some(path) => EstimateDraft::from_path(path)?.job,
        None => args.job.to_input(),
    };

    let breakdown = pricing::estimate(&input);
    info!(
        square_footage = input.square_footage,
        final_price = breakdown.cost_breakdown.price,
        "Quote computed"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
        return Ok(());
    }

    if !input.is_priceable() {
        println!("{}", "Enter the square footage (--sqft) to see pricing.".yellow());
        return Ok(());
    }

    if let Err(e) = input.validate() {
        println!("{} {}", "Warning:".yellow().bold(), e);
        println!();
    }

    print_breakdown(&input, &breakdown);
    Ok(())
}

/// Render a breakdown the way staff read it: charge items, both commission
/// tracks, then costs and margin
pub fn print_breakdown(input: &JobEstimateInput, breakdown: &PricingBreakdown) {
    println!(
        "{} {} sq ft {}, {}, {}",
        "Job:".bold(),
        input.square_footage,
        input.property_type,
        input.frequency,
        input.service_type
    );
    println!();

    println!("{}", "Charge Items:".cyan().bold());
    println!("{}", charge_table(breakdown));
    println!(
        "  Total time: {:.3} h ({:.0} min)",
        breakdown.total_time, breakdown.total_minutes
    );
    println!();

    println!("{}", "Pricing:".cyan().bold());
    println!("  Baseline price:            {}", money(breakdown.baseline_price));
    println!("  Market recommended price:  {}", money(breakdown.market_recommended_price));
    println!("  Sales rep price:           {}", money(breakdown.sales_rep_price));
    println!();

    println!("{}", "Commission:".cyan().bold());
    println!("{}", commission_table(breakdown));
    println!();

    let costs = &breakdown.cost_breakdown;
    println!("{}", "Costs:".cyan().bold());
    println!("  Price (after discount):    {}", money(costs.price).green().bold());
    println!("  Contractor cost:           {}", money(costs.contractor_cost));
    println!("  Supplies:                  {}", money(costs.supplies_cost));
    println!("  Transportation:            {}", money(costs.transportation_cost));
    println!("  Projected COGS:            {}", money(costs.projected_cogs));
    if costs.realtor_commission > 0.0 {
        println!("  Realtor commission:        {}", money(costs.realtor_commission));
    }
    let margin = format!(
        "{} ({:.1}%)",
        money(costs.gross_profit_dollars),
        costs.gross_profit_percent
    );
    if costs.gross_profit_dollars < 0.0 {
        println!("  Gross profit:              {}", margin.red());
    } else {
        println!("  Gross profit:              {}", margin);
    }
}

fn charge_table(breakdown: &PricingBreakdown) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("CODE").fg(Color::Cyan),
        Cell::new("DESCRIPTION").fg(Color::Cyan),
        Cell::new("HOURS").fg(Color::Cyan),
        Cell::new("DOLLARS").fg(Color::Cyan),
    ]);

    for item in &breakdown.charge_items {
        table.add_row(vec![
            Cell::new(&item.code),
            Cell::new(&item.description),
            Cell::new(format!("{:.3}", item.time)).set_alignment(CellAlignment::Right),
            Cell::new(money(item.dollars)).set_alignment(CellAlignment::Right),
        ]);
    }

    table
}

fn commission_table(breakdown: &PricingBreakdown) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("TRACK").fg(Color::Cyan),
        Cell::new("PRICE").fg(Color::Cyan),
        Cell::new("PER VISIT").fg(Color::Cyan),
        Cell::new("ANNUAL").fg(Color::Cyan),
        Cell::new("PER 100 CUSTOMERS").fg(Color::Cyan),
    ]);

    table.add_row(vec![
        Cell::new("Recommended"),
        Cell::new(money(breakdown.market_recommended_price)),
        Cell::new(money(breakdown.recommended_commission)),
        Cell::new(money(breakdown.annual_commission)),
        Cell::new(money(breakdown.per_100_customers)),
    ]);
    table.add_row(vec![
        Cell::new("Sales rep"),
        Cell::new(money(breakdown.sales_rep_price)),
        Cell::new(money(breakdown.sales_rep_commission)),
        Cell::new(money(breakdown.sales_rep_annual_commission)),
        Cell::new(money(breakdown.sales_rep_per_100)),
    ]);

    table
}

/// Dollar amount rounded to cents for display only
pub fn money(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", amount.abs())
    } else {
        format!("${:.2}", amount)
    }
}
