use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use rentbuy::{ParameterOverrides, Report, init_logging, render_parameters, render_table};
use rentbuy_core::{MonteCarloConfig, monte_carlo_simulate};

#[derive(Parser, Debug)]
#[command(name = "rentbuy")]
#[command(about = "Monte Carlo comparison of buying a home versus renting and investing")]
struct Args {
    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the simulation and print the cost and wealth series
    Run {
        /// YAML or JSON scenario file with parameter values
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        #[command(flatten)]
        overrides: ParameterOverrides,

        /// Number of simulated paths
        #[arg(short, long, default_value_t = rentbuy_core::simulation::DEFAULT_ITERATIONS)]
        iterations: usize,

        /// Seed for reproducible results
        #[arg(long)]
        seed: Option<u64>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Show every Nth year in table output
        #[arg(long, default_value_t = 5)]
        every: usize,
    },
    /// List the adjustable parameters with their ranges and values
    Params {
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        #[command(flatten)]
        overrides: ParameterOverrides,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(&args.log_level)?;

    match args.command {
        Command::Run {
            scenario,
            overrides,
            iterations,
            seed,
            format,
            every,
        } => {
            let params = rentbuy::resolve_parameters(scenario.as_deref(), &overrides)?;
            let config = MonteCarloConfig { iterations, seed };

            tracing::info!(iterations, ?seed, "running simulation");
            let summary = monte_carlo_simulate(&params, &config)?;

            match format {
                OutputFormat::Table => print!("{}", render_table(&summary, every)),
                OutputFormat::Json => {
                    let report = Report {
                        parameters: &params,
                        seed,
                        summary: &summary,
                    };
                    println!("{}", report.to_json()?);
                }
            }
        }
        Command::Params {
            scenario,
            overrides,
        } => {
            let params = rentbuy::resolve_parameters(scenario.as_deref(), &overrides)?;
            print!("{}", render_parameters(&params));
        }
    }

    Ok(())
}
