mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::amortization::{AmortizeArgs, YearlyArgs};
use commands::analysis::{CompareArgs, ExtraPaymentArgs, RefinanceArgs};
use commands::mortgage::{AffordabilityArgs, HousingCostArgs};
use commands::payment::PaymentArgs;

/// Amortizing loan calculations
#[derive(Parser)]
#[command(
    name = "loancalc",
    version,
    about = "Amortizing loan, refinance and mortgage calculations",
    long_about = "A CLI for fixed-rate loan calculations with decimal precision. \
                  Supports monthly payments, amortization schedules, refinance \
                  break-even, loan offer comparison, extra-payment payoff and \
                  mortgage housing cost / affordability."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Fixed monthly payment for an amortizing loan
    Payment(PaymentArgs),
    /// Period-by-period amortization schedule
    Amortize(AmortizeArgs),
    /// Amortization schedule rolled up by loan year
    Yearly(YearlyArgs),
    /// Refinance savings and break-even month
    Refinance(RefinanceArgs),
    /// Rank loan offers by total cost (JSON/YAML input)
    Compare(CompareArgs),
    /// Payoff acceleration from a constant extra monthly payment
    ExtraPayment(ExtraPaymentArgs),
    /// Monthly housing cost (principal, interest, taxes, insurance, PMI, HOA)
    HousingCost(HousingCostArgs),
    /// Maximum loan and home price under a debt-to-income cap
    Affordability(AffordabilityArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Payment(args) => commands::payment::run_payment(args),
        Commands::Amortize(args) => commands::amortization::run_amortize(args),
        Commands::Yearly(args) => commands::amortization::run_yearly(args),
        Commands::Refinance(args) => commands::analysis::run_refinance(args),
        Commands::Compare(args) => commands::analysis::run_compare(args),
        Commands::ExtraPayment(args) => commands::analysis::run_extra_payment(args),
        Commands::HousingCost(args) => commands::mortgage::run_housing_cost(args),
        Commands::Affordability(args) => commands::mortgage::run_affordability(args),
        Commands::Version => {
            println!("loancalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
