//! # Calculily CLI Application
//!
//! Command-line front end for the Calculily calculators.
//!
//! ```text
//! calculily list
//! calculily info wire-gauge
//! calculily calc tip bill_amount=85 tip_percent=20 people=4
//! calculily calc loan principal=25000 annual_rate_percent=6 term_years=5 --schedule
//! calculily convert 10 ft m
//! calculily units
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use calculily_core::calculations::loan::{amortization_schedule, AmortizationRow, LoanInput};
use calculily_core::catalog::{Calculator, CalculatorCategory, ALL_CALCULATORS};
use calculily_core::format::{format_currency, SummaryLine};
use calculily_core::units::{self, ConversionCategory, ConversionInput, Unit};
use calculily_core::{CalcError, CalculationItem, RawInput, Settings};

#[derive(Parser)]
#[command(name = "calculily")]
#[command(about = "Everyday calculators: finance, construction, electrical, HVAC, automotive, kitchen", long_about = None)]
struct Cli {
    /// Settings file (TOML)
    #[arg(long, global = true, env = "CALCULILY_CONFIG")]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every calculator by category
    List,

    /// Show a calculator's formula, reference and fields
    Info {
        /// Calculator slug (e.g. "wire-gauge")
        calculator: String,
    },

    /// Run a calculator
    Calc {
        /// Calculator slug (e.g. "tip")
        calculator: String,

        /// Inputs as key=value pairs
        fields: Vec<String>,

        /// Also print the month-by-month schedule (loan only)
        #[arg(long)]
        schedule: bool,
    },

    /// Convert a value between units
    Convert {
        #[arg(allow_negative_numbers = true)]
        value: f64,
        from: String,
        to: String,
    },

    /// List known units by category
    Units,

    /// Print the effective settings as TOML
    Settings,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(path: Option<&PathBuf>) -> Result<Settings> {
    match path {
        Some(path) => {
            Settings::load(path).with_context(|| format!("could not load settings from {}", path.display()))
        }
        None => Ok(Settings::default()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

fn report(error: &anyhow::Error) {
    match error.downcast_ref::<CalcError>() {
        Some(calc) if calc.is_user_error() => {
            for message in calc.messages() {
                eprintln!("Error: {}", message);
            }
        }
        _ => eprintln!("Error: {:#}", error),
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = load_settings(cli.config.as_ref())?;

    match cli.command {
        Commands::List => list_calculators(cli.json),
        Commands::Info { calculator } => show_info(&calculator, cli.json),
        Commands::Calc {
            calculator,
            fields,
            schedule,
        } => run_calculator(&calculator, &fields, schedule, &settings, cli.json),
        Commands::Convert { value, from, to } => convert_units(value, &from, &to, &settings, cli.json),
        Commands::Units => list_units(cli.json),
        Commands::Settings => {
            print!("{}", settings.to_toml_string()?);
            Ok(())
        }
    }
}

fn print_lines(lines: &[SummaryLine]) {
    let width = lines.iter().map(|l| l.label.chars().count()).max().unwrap_or(0);
    for line in lines {
        println!("  {:<width$}  {}", line.label, line.value, width = width);
    }
}

fn list_calculators(json: bool) -> Result<()> {
    if json {
        let all: Vec<_> = ALL_CALCULATORS.iter().map(|c| c.metadata()).collect();
        println!("{}", serde_json::to_string_pretty(&all)?);
        return Ok(());
    }

    for category in CalculatorCategory::ALL {
        println!("{}", category.display_name());
        for calculator in Calculator::in_category(category) {
            let meta = calculator.metadata();
            println!("  {:<16} {}", meta.slug, meta.description);
        }
        println!();
    }
    Ok(())
}

fn show_info(slug: &str, json: bool) -> Result<()> {
    let meta = Calculator::from_slug(slug)?.metadata();
    if json {
        println!("{}", serde_json::to_string_pretty(&meta)?);
        return Ok(());
    }

    println!("{} ({})", meta.name, meta.category);
    println!("{}", meta.description);
    println!();
    println!("Formula:   {}", meta.formula);
    println!("Reference: {}", meta.reference.citation());
    println!();
    println!("Fields:");
    for field in &meta.fields {
        let marker = if field.required { "*" } else { " " };
        let units = if field.units.is_empty() {
            String::new()
        } else {
            format!(" [{}]", field.units)
        };
        println!("  {}{:<22} {}{}", marker, field.name, field.description, units);
    }
    Ok(())
}

fn run_calculator(slug: &str, fields: &[String], schedule: bool, settings: &Settings, json: bool) -> Result<()> {
    let calculator = Calculator::from_slug(slug)?;
    let raw = RawInput::parse_pairs(fields)?;
    tracing::debug!(calculator = calculator.slug(), fields = fields.len(), "parsed input");

    let item = CalculationItem::from_raw(calculator, &raw, settings)?;
    let output = item.calculate()?;

    let rows = schedule_rows(calculator, &raw, settings, schedule)?;

    if json {
        let value = match &rows {
            Some(rows) => serde_json::json!({ "output": output, "schedule": rows }),
            None => serde_json::to_value(&output)?,
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", calculator.metadata().name);
    print_lines(&output.summary(settings));

    if let Some(rows) = rows {
        println!();
        println!("{:>5}  {:>14}  {:>14}  {:>14}  {:>14}", "Month", "Payment", "Principal", "Interest", "Balance");
        for row in rows {
            println!(
                "{:>5}  {:>14}  {:>14}  {:>14}  {:>14}",
                row.month,
                format_currency(row.payment, settings),
                format_currency(row.principal, settings),
                format_currency(row.interest, settings),
                format_currency(row.balance, settings),
            );
        }
    }
    Ok(())
}

fn schedule_rows(
    calculator: Calculator,
    raw: &RawInput,
    settings: &Settings,
    schedule: bool,
) -> Result<Option<Vec<AmortizationRow>>> {
    match (schedule, calculator) {
        (false, _) => Ok(None),
        (true, Calculator::Loan) => {
            let input = LoanInput::from_raw(raw, settings)?;
            Ok(Some(amortization_schedule(&input)?))
        }
        (true, _) => anyhow::bail!("--schedule only applies to the loan calculator"),
    }
}

fn convert_units(value: f64, from: &str, to: &str, settings: &Settings, json: bool) -> Result<()> {
    let input = ConversionInput {
        value,
        from: from.parse::<Unit>()?,
        to: to.parse::<Unit>()?,
    };
    let result = units::calculate(&input)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_lines(&result.summary(settings));
    }
    Ok(())
}

fn list_units(json: bool) -> Result<()> {
    if json {
        let all: Vec<_> = ConversionCategory::ALL
            .iter()
            .map(|category| {
                let symbols: Vec<&str> = category.units().iter().map(|u| u.symbol()).collect();
                serde_json::json!({ "category": category.display_name(), "units": symbols })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&all)?);
        return Ok(());
    }

    for category in ConversionCategory::ALL {
        println!("{}", category.display_name());
        for unit in category.units() {
            println!("  {:<8} {}", unit.symbol(), unit.display_name());
        }
        println!();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loan_fields() -> RawInput {
        RawInput::parse_pairs(["principal=25000", "annual_rate_percent=6", "term_years=5"]).unwrap()
    }

    #[test]
    fn test_loan_schedule_rows() {
        let rows = schedule_rows(Calculator::Loan, &loan_fields(), &Settings::default(), true)
            .unwrap()
            .unwrap();
        assert_eq!(rows.len(), 60);
        assert_eq!(rows[0].month, 1);
        assert!(rows[59].balance.abs() < 0.01);
    }

    #[test]
    fn test_schedule_off_by_default() {
        let rows = schedule_rows(Calculator::Loan, &loan_fields(), &Settings::default(), false).unwrap();
        assert!(rows.is_none());
    }

    #[test]
    fn test_schedule_rejected_for_other_calculators() {
        let raw = RawInput::new().with("bill_amount", "85").with("tip_percent", "20");
        let err = schedule_rows(Calculator::Tip, &raw, &Settings::default(), true).unwrap_err();
        assert_eq!(err.to_string(), "--schedule only applies to the loan calculator");
    }

    #[test]
    fn test_cli_parses_schedule_flag() {
        let cli = Cli::try_parse_from([
            "calculily",
            "calc",
            "loan",
            "principal=25000",
            "annual_rate_percent=6",
            "term_years=5",
            "--schedule",
        ])
        .unwrap();
        match cli.command {
            Commands::Calc {
                calculator,
                fields,
                schedule,
            } => {
                assert_eq!(calculator, "loan");
                assert_eq!(fields.len(), 3);
                assert!(schedule);
            }
            _ => panic!("expected calc subcommand"),
        }
    }
}
