use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use sales_estimator::pricing::{ChargeCode, Frequency, PropertyType, ServiceType, BASE_HOURLY_RATE};

/// Execute the codes command
///
/// Prints the charge-code table in evaluation order plus the accepted input values
pub fn execute() {
    println!(
        "{} (base hourly rate ${:.2})",
        "Charge Codes".cyan().bold(),
        BASE_HOURLY_RATE
    );
    println!("{}", catalog_table());
    println!();

    println!("{}", "Accepted values:".cyan().bold());
    println!("  property type: {}", join(PropertyType::ALL));
    println!("  frequency:     {}", join(Frequency::ALL));
    println!("  service type:  {}", join(ServiceType::ALL));
}

fn catalog_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("CODE").fg(Color::Cyan),
        Cell::new("DESCRIPTION").fg(Color::Cyan),
        Cell::new("HOURS").fg(Color::Cyan),
        Cell::new("DOLLARS").fg(Color::Cyan),
        Cell::new("APPLIES WHEN").fg(Color::Cyan),
    ]);

    for code in ChargeCode::ORDER {
        table.add_row(vec![
            Cell::new(code.code()),
            Cell::new(code.description()),
            Cell::new(format!("{}", code.hours())),
            Cell::new(code.formula()),
            Cell::new(code.condition()),
        ]);
    }

    table
}

fn join<T: std::fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
