use clap::{Args, Parser, Subcommand};
use sales_estimator::pricing::{Frequency, JobEstimateInput, Pets, PropertyType, ServiceType};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "estimator", version, about = "Cleaning job sales estimator")]
pub struct Cli {
    /// Configuration file path (default: ./estimator.toml, then the user config dir)
    #[arg(short, long, global = true, env = "ESTIMATOR_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Price a job and show charge items, commissions and costs
    Quote(QuoteArgs),

    /// Price a draft estimate and send it to the backend
    Submit {
        /// Draft file (.toml or .json)
        #[arg(short, long)]
        file: PathBuf,

        /// Print the request instead of sending it
        #[arg(long)]
        dry_run: bool,
    },

    /// List the charge-code table
    Codes,

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Args, Debug, Clone)]
pub struct QuoteArgs {
    /// Read the job from a draft file (.toml or .json) instead of flags
    #[arg(short, long, conflicts_with = "job_flags")]
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub job: JobArgs,

    /// Print the breakdown as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
#[group(id = "job_flags", multiple = true)]
pub struct JobArgs {
    /// Square footage of the property
    #[arg(short, long)]
    pub sqft: Option<u32>,

    /// house, apartment, condo or office
    #[arg(short, long, default_value = "house")]
    pub property_type: PropertyType,

    /// weekly, bi_weekly, monthly or one_time
    #[arg(long, default_value = "bi_weekly")]
    pub frequency: Frequency,

    /// regular_cleaning, deep_clean_blue, deep_clean_shine, deep_clean_combo, move_in_out or one_time
    #[arg(long, default_value = "regular_cleaning")]
    pub service_type: ServiceType,

    #[arg(long, default_value = "0")]
    pub dogs: u32,

    #[arg(long, default_value = "0")]
    pub cats: u32,

    /// Referral came from a realtor
    #[arg(long)]
    pub realtor: bool,

    /// Discount in percent (0-50)
    #[arg(short, long, default_value = "0")]
    pub discount: f64,

    /// Override the computed sales rep price
    #[arg(long)]
    pub sales_rep_price: Option<f64>,
}

impl JobArgs {
    pub fn to_input(&self) -> JobEstimateInput {
        JobEstimateInput {
            square_footage: self.sqft.unwrap_or(0),
            property_type: self.property_type,
            frequency: self.frequency,
            service_type: self.service_type,
            pets: Pets {
                dogs: self.dogs,
                cats: self.cats,
            },
            is_realtor: self.realtor,
            discount_percentage: self.discount,
            manual_sales_rep_price: self.sales_rep_price,
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display current configuration (with the API token masked)
    Show,

    /// Validate configuration file
    Validate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_quote_defaults() {
        let args = vec!["estimator", "quote", "--sqft", "1447"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Quote(quote) => {
                let input = quote.job.to_input();
                assert_eq!(input.square_footage, 1447);
                assert_eq!(input.property_type, PropertyType::House);
                assert_eq!(input.frequency, Frequency::BiWeekly);
                assert_eq!(input.service_type, ServiceType::RegularCleaning);
                assert_eq!(input.manual_sales_rep_price, None);
                assert!(!quote.json);
            }
            _ => panic!("Expected Quote command"),
        }
    }

    #[test]
    fn test_cli_parsing_quote_flags() {
        let args = vec![
            "estimator",
            "quote",
            "--sqft",
            "2100",
            "--property-type",
            "condo",
            "--frequency",
            "weekly",
            "--service-type",
            "deep-clean-shine",
            "--dogs",
            "1",
            "--cats",
            "2",
            "--realtor",
            "--discount",
            "15",
            "--sales-rep-price",
            "310.5",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Quote(quote) => {
                let input = quote.job.to_input();
                assert_eq!(input.property_type, PropertyType::Condo);
                assert_eq!(input.frequency, Frequency::Weekly);
                assert_eq!(input.service_type, ServiceType::DeepCleanShine);
                assert_eq!(input.pets, Pets { dogs: 1, cats: 2 });
                assert!(input.is_realtor);
                assert_eq!(input.discount_percentage, 15.0);
                assert_eq!(input.manual_sales_rep_price, Some(310.5));
            }
            _ => panic!("Expected Quote command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_property_type() {
        let args = vec!["estimator", "quote", "--sqft", "900", "--property-type", "castle"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_cli_file_conflicts_with_sqft() {
        let args = vec!["estimator", "quote", "--file", "draft.toml", "--sqft", "900"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_cli_file_conflicts_with_every_job_flag() {
        for flag in [
            vec!["--dogs", "2"],
            vec!["--cats", "1"],
            vec!["--discount", "10"],
            vec!["--sales-rep-price", "250"],
            vec!["--realtor"],
            vec!["--frequency", "weekly"],
            vec!["--property-type", "condo"],
            vec!["--service-type", "move_in_out"],
        ] {
            let mut args = vec!["estimator", "quote", "--file", "draft.toml"];
            args.extend(flag.iter().copied());
            assert!(Cli::try_parse_from(args).is_err(), "{:?} should conflict", flag);
        }
    }

    #[test]
    fn test_cli_file_alone_keeps_job_defaults() {
        let cli = Cli::try_parse_from(["estimator", "quote", "--file", "draft.toml"]).unwrap();
        match cli.command {
            Commands::Quote(args) => {
                assert!(args.file.is_some());
                assert_eq!(args.job.dogs, 0);
                assert_eq!(args.job.frequency, Frequency::BiWeekly);
            }
            _ => panic!("Expected Quote command"),
        }
    }

    #[test]
    fn test_cli_parsing_submit_dry_run() {
        let args = vec!["estimator", "submit", "--file", "draft.toml", "--dry-run"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Submit { file, dry_run } => {
                assert_eq!(file, PathBuf::from("draft.toml"));
                assert!(dry_run);
            }
            _ => panic!("Expected Submit command"),
        }
    }

    #[test]
    fn test_cli_parsing_config_show() {
        let args = vec!["estimator", "config", "show"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Config { action } => {
                assert!(matches!(action, ConfigCommands::Show));
            }
            _ => panic!("Expected Config command"),
        }
    }
}
