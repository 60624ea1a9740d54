use crate::commands::quote::{money, print_breakdown};
use anyhow::{Context, Result};
use colored::Colorize;
use sales_estimator::client::HttpEstimateClient;
use sales_estimator::config::Config;
use sales_estimator::error::AppError;
use sales_estimator::pricing;
use sales_estimator::submission::{prepare_request, submit_estimate, EstimateDraft};
use std::path::Path;
use tracing::info;

/// Execute the submit command
///
/// Loads the draft, shows the priced breakdown and either prints the request
/// body (dry run) or creates the estimate on the backend. A failed submission
/// is reported and the command exits with an error; nothing is retried.
pub async fn execute(file: &Path, dry_run: bool, config: Result<Config>) -> Result<()> {
    let draft = EstimateDraft::from_path(file)
        .with_context(|| format!("Failed to read draft {}", file.display()))?;
    info!(draft = %file.display(), dry_run, "Loaded estimate draft");

    draft.validate().context("Draft is incomplete")?;

    let breakdown = pricing::estimate(&draft.job);
    print_breakdown(&draft.job, &breakdown);
    println!();

    if dry_run {
        let request = prepare_request(&draft)?;
        println!("{}", "Request (not sent):".yellow().bold());
        println!("{}", serde_json::to_string_pretty(&request)?);
        return Ok(());
    }

    let config = config.context("Cannot submit without a valid configuration")?;
    let client = HttpEstimateClient::new(&config.api)?;

    println!(
        "Submitting estimate for {} ({})...",
        draft.customer.name.trim().bold(),
        money(breakdown.cost_breakdown.price)
    );

    match submit_estimate(&client, &draft).await {
        Ok(receipt) => {
            match receipt.reference() {
                Some(reference) => println!(
                    "{} {}",
                    "✓ Estimate created:".green().bold(),
                    reference
                ),
                None => println!("{}", "✓ Estimate created".green().bold()),
            }
            Ok(())
        }
        Err(e) => {
            println!("{}", "✗ Failed to create estimate".red().bold());
            println!("{}", resubmit_hint(&e).yellow());
            Err(e.into())
        }
    }
}

/// What staff should do next; the error itself is reported by `main`
fn resubmit_hint(err: &AppError) -> &'static str {
    if err.is_transient() {
        "  The backend looks unavailable; resubmit once it is back."
    } else {
        "  Fix the draft or configuration and resubmit."
    }
}
