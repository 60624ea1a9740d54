use anyhow::Result;
use colored::Colorize;
use sales_estimator::config::Config;
use sales_estimator::logging::mask_token;
use tracing::info;

/// Execute the config show command
///
/// Displays the effective configuration with the API token masked
pub fn show(config: Result<Config>) -> Result<()> {
    println!("{}", "Loading configuration...".yellow());
    let cfg = config?;
    let sanitized = sanitize_secrets(&cfg);

    println!("{}", "Current Configuration:".green().bold());
    println!();
    println!("{}", toml::to_string_pretty(&sanitized)?);

    info!("Configuration displayed successfully");
    Ok(())
}

/// Execute the config validate command
pub fn validate(config: Result<Config>) -> Result<()> {
    println!("{}", "Validating configuration...".yellow());

    let cfg = match config {
        Ok(cfg) => cfg,
        Err(e) => {
            println!("{} {:#}", "✗ Configuration is invalid:".red().bold(), e);
            return Err(e);
        }
    };

    println!("{}", "✓ Configuration is valid".green());
    println!();
    println!("{}", "Summary:".bold());
    println!("  API: {}", cfg.api.base_url);
    println!("  Timeout: {}s", cfg.api.timeout_seconds);
    println!(
        "  Token: {}",
        if cfg.api.token.is_some() {
            "configured".green()
        } else {
            "not set".yellow()
        }
    );
    println!("  Logging: {} ({})", cfg.logging.level, cfg.logging.format);

    info!("Configuration validation successful");
    Ok(())
}

fn sanitize_secrets(cfg: &Config) -> Config {
    let mut sanitized = cfg.clone();
    sanitized.api.token = mask_token(cfg.api.token.as_deref());
    sanitized
}
