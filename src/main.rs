use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use population_box_analyzer::{
    analysis::{Analyzer, DrivingForecast, ExtrapolationStrategy},
    io::{self, parse_strategy, ScenarioConfig, TextEncoding},
    models::DemographicTable,
    visualization::{
        format_count, print_comparison_chart, print_error_table, print_forecast_table,
        print_metrics_table, print_series_panel, print_summary_table, ChartConfig,
    },
};

#[derive(Parser)]
#[command(
    name = "population-analyzer",
    about = "City population estimation with a 1D box (mass-balance) model",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the box model over the observed years and compare against the
    /// reconstructed reference population
    Analyze {
        /// Path to input file (CSV or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Text encoding of a CSV input: utf-8 or euc-kr
        #[arg(short, long, default_value = "utf-8")]
        encoding: String,

        /// First year for CSV rows without a year column [default: 2012]
        #[arg(long)]
        start_year: Option<i32>,

        /// Initial population, overriding the value derived from the data
        #[arg(long)]
        initial: Option<f64>,

        /// Integration step in years
        #[arg(long)]
        dt: Option<f64>,

        /// Restrict the analysis to years >= this year
        #[arg(long)]
        from_year: Option<i32>,

        /// Restrict the analysis to years <= this year
        #[arg(long)]
        to_year: Option<i32>,

        /// Also chart each driving series as its own panel
        #[arg(long)]
        panels: bool,

        /// Skip the comparison chart
        #[arg(long)]
        no_chart: bool,

        /// Optional TOML scenario file with run tunables
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Extend the driving series into future years and predict population
    Forecast {
        /// Path to input file (CSV or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Text encoding of a CSV input: utf-8 or euc-kr
        #[arg(short, long, default_value = "utf-8")]
        encoding: String,

        /// First year for CSV rows without a year column [default: 2012]
        #[arg(long)]
        start_year: Option<i32>,

        /// Initial population, overriding the value derived from the data
        #[arg(long)]
        initial: Option<f64>,

        /// Integration step in years
        #[arg(long)]
        dt: Option<f64>,

        /// Number of future years to forecast
        #[arg(short, long)]
        years: Option<usize>,

        /// Extrapolation strategy: linear or average
        #[arg(long)]
        strategy: Option<String>,

        /// Trailing window for the average strategy
        #[arg(short, long)]
        window: Option<usize>,

        /// Skip the comparison chart
        #[arg(long)]
        no_chart: bool,

        /// Optional TOML scenario file with run tunables
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Display a quick summary of the dataset
    Summary {
        /// Path to input file (CSV or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Text encoding of a CSV input: utf-8 or euc-kr
        #[arg(short, long, default_value = "utf-8")]
        encoding: String,

        /// First year for CSV rows without a year column
        #[arg(long, default_value = "2012")]
        start_year: i32,
    },

    /// Convert demographic data between formats (CSV output is UTF-8)
    Convert {
        /// Input file path
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Text encoding of a CSV input: utf-8 or euc-kr
        #[arg(short, long, default_value = "utf-8")]
        encoding: String,

        /// First year for CSV rows without a year column
        #[arg(long, default_value = "2012")]
        start_year: i32,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

fn load_table(path: &PathBuf, encoding: &str, start_year: i32) -> Result<DemographicTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "csv" => {
            let encoding: TextEncoding = encoding.parse()?;
            Ok(io::read_csv(path, encoding, start_year)?)
        }
        "json" => Ok(io::read_json(path)?),
        _ => anyhow::bail!("Unsupported file format: .{ext}. Use .csv or .json"),
    }
}

fn load_scenario(path: &Option<PathBuf>) -> Result<ScenarioConfig> {
    match path {
        Some(path) => Ok(ScenarioConfig::from_path(path)?),
        None => Ok(ScenarioConfig::default()),
    }
}

fn print_driving_panels(table: &DemographicTable, chart: &ChartConfig) {
    print_series_panel("In-migration (Qin)", &table.in_migration(), true, chart);
    print_series_panel("Out-migration (Qout)", &table.out_migration(), true, chart);
    print_series_panel("Births", &table.births(), true, chart);
    print_series_panel("Deaths", &table.deaths(), true, chart);
    if let Some(series) = table.marriage_rate_husband() {
        print_series_panel("Marriage rate (husband)", &series, false, chart);
    }
    if let Some(series) = table.marriage_rate_wife() {
        print_series_panel("Marriage rate (wife)", &series, false, chart);
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            encoding,
            start_year,
            initial,
            dt,
            from_year,
            to_year,
            panels,
            no_chart,
            config,
        } => {
            println!(
                "\n{}",
                format!("Population Box Model Analysis: {}", input.display())
                    .bold()
                    .cyan()
            );

            let scenario = load_scenario(&config)?;
            let start_year = start_year.or(scenario.start_year).unwrap_or(2012);
            let mut table = load_table(&input, &encoding, start_year)?;
            info!(records = table.num_years(), name = %table.name, "loaded dataset");

            let from_year = from_year.or(scenario.from_year);
            let to_year = to_year.or(scenario.to_year);
            if from_year.is_some() || to_year.is_some() {
                let from = from_year.or(table.start_year()).unwrap_or(0);
                let to = to_year.or(table.end_year()).unwrap_or(0);
                table = table.window(from, to)?;
                info!(from, to, "restricted analysis window");
            }

            println!(
                "  Loaded {} years ({}-{})",
                table.num_years(),
                table.start_year().unwrap_or(0),
                table.end_year().unwrap_or(0)
            );

            let analyzer = Analyzer::new(&table);
            let initial = initial.or(scenario.initial_population);
            let dt = dt.or(scenario.time_step).unwrap_or(1.0);
            let state = analyzer.simulate(initial, dt)?;
            let report = analyzer.evaluate(&state)?;

            print_error_table(&report);
            print_metrics_table(&report);

            let chart = ChartConfig::default();
            if !no_chart {
                print_comparison_chart(&state.population, &analyzer.reference(), &chart);
            }
            if panels {
                print_driving_panels(&table, &chart);
            }
        }

        Commands::Forecast {
            input,
            encoding,
            start_year,
            initial,
            dt,
            years,
            strategy,
            window,
            no_chart,
            config,
        } => {
            let scenario = load_scenario(&config)?;
            let start_year = start_year.or(scenario.start_year).unwrap_or(2012);
            let table = load_table(&input, &encoding, start_year)?;
            info!(records = table.num_years(), name = %table.name, "loaded dataset");

            let years = years.or(scenario.forecast_years).unwrap_or(2);
            let forecast = match &strategy {
                Some(name) => {
                    DrivingForecast::uniform(parse_strategy(name, window.or(scenario.window))?)
                }
                None => scenario
                    .resolve_forecast()?
                    .unwrap_or_else(|| DrivingForecast::uniform(ExtrapolationStrategy::LinearTrend)),
            };

            println!(
                "\n{}",
                format!("Population Forecast: {years} future year(s)")
                    .bold()
                    .cyan()
            );

            let analyzer = Analyzer::new(&table);
            let initial = initial.or(scenario.initial_population);
            let dt = dt.or(scenario.time_step).unwrap_or(1.0);
            let state = analyzer.simulate_extended(initial, dt, &forecast, years)?;
            let report = analyzer.evaluate(&state)?;

            let first_forecast_year = table.end_year().map(|y| y + 1).unwrap_or(0);
            for (year, value) in state.population.iter() {
                if year >= first_forecast_year {
                    println!(
                        "  {} {} persons",
                        format!("Predicted population for {year}:").bold(),
                        format_count(value)
                    );
                }
            }

            print_forecast_table(&state, first_forecast_year);
            print_error_table(&report);
            print_metrics_table(&report);

            if !no_chart {
                let chart = ChartConfig::default();
                print_comparison_chart(&state.population, &analyzer.reference(), &chart);
            }
        }

        Commands::Summary {
            input,
            encoding,
            start_year,
        } => {
            let table = load_table(&input, &encoding, start_year)?;
            print_summary_table(&table);
        }

        Commands::Convert {
            input,
            output,
            encoding,
            start_year,
            pretty,
        } => {
            let table = load_table(&input, &encoding, start_year)?;

            let out_ext = output
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("")
                .to_lowercase();

            match out_ext.as_str() {
                "csv" => io::write_csv(&table, &output)?,
                "json" => io::write_json(&table, &output, pretty)?,
                _ => anyhow::bail!("Unsupported output format: .{out_ext}"),
            }

            println!(
                "{} Converted {} -> {}",
                "Success:".green().bold(),
                input.display(),
                output.display()
            );
        }
    }

    Ok(())
}
