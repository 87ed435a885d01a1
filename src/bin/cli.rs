use clap::{Parser, Subcommand, ValueEnum};
use claimboard::config::catalog_path;
use claimboard::present::{render_catalog, render_json, render_rules, render_table};
use claimboard::{
    CatalogLoader, ClaimboardError, GatewayConfig, PostgresGateway, QueryCatalog, Result, Runner,
    VisualizationSelector,
};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "claimboard")]
#[command(about = "Run predefined food-wastage claim queries and pick a chart for the result")]
#[command(version)]
struct Cli {
    /// YAML catalog replacing the built-in queries (also CLAIMBOARD_CATALOG)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List available queries in display order
    List,
    /// Print the SQL behind a query
    Show { label: String },
    /// Print the chart selection rules in evaluation order
    Rules,
    /// Execute a query and print its result
    Run {
        label: String,

        /// Postgres URL (overrides CLAIMBOARD_DATABASE_URL / DATABASE_URL)
        #[arg(long)]
        database_url: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Write the selected chart as Vega-Lite JSON
        #[arg(long)]
        chart_out: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "claimboard=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_catalog(explicit: Option<PathBuf>) -> Result<QueryCatalog> {
    match catalog_path(explicit)? {
        Some(path) => CatalogLoader::load_file(path),
        None => QueryCatalog::food_wastage(),
    }
}

async fn run_query(
    catalog: QueryCatalog,
    label: &str,
    database_url: Option<String>,
    format: OutputFormat,
    chart_out: Option<PathBuf>,
) -> Result<()> {
    let config = GatewayConfig::resolve(database_url)?;
    let gateway = PostgresGateway::new(&config)?;
    let runner = Runner::new(catalog, gateway.clone());
    let outcome = runner.run(label).await;
    gateway.close().await;
    let outcome = outcome?;

    let chart = outcome.chart();
    match format {
        OutputFormat::Json => println!("{}", render_json(&outcome)?),
        OutputFormat::Table => {
            println!("{}", format!("Results: {}", outcome.label).bold());
            println!("{}", render_table(&outcome.result));
            match &chart {
                Some(chart) => println!(
                    "{} {} ({})",
                    "Chart:".cyan(),
                    chart.kind.as_str(),
                    chart.encoding.title
                ),
                None => println!("{}", "No chart for this result shape".dimmed()),
            }
        }
    }

    if let Some(path) = chart_out {
        match &chart {
            Some(chart) => {
                let document = serde_json::to_string_pretty(&chart.to_vega_lite())?;
                std::fs::write(&path, document)?;
                eprintln!("Chart written to {}", path.display());
            }
            None => eprintln!(
                "{} no chart matches this result, {} not written",
                "warning:".yellow(),
                path.display()
            ),
        }
    }

    Ok(())
}

async fn dispatch(cli: Cli) -> Result<()> {
    let catalog = load_catalog(cli.catalog)?;

    match cli.command {
        Command::List => println!("{}", render_catalog(&catalog)),
        Command::Show { label } => {
            let definition = catalog.get(&label)?;
            if let Some(description) = &definition.description {
                println!("{}", format!("-- {}", description).dimmed());
            }
            println!("{}", definition.text);
        }
        Command::Rules => println!("{}", render_rules(VisualizationSelector::default().rules())),
        Command::Run {
            label,
            database_url,
            format,
            chart_out,
        } => run_query(catalog, &label, database_url, format, chart_out).await?,
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let running_query = matches!(cli.command, Command::Run { .. });
    match dispatch(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let prefix = if running_query {
                "Error running query:"
            } else {
                "Error:"
            };
            eprintln!("{} {}", prefix.red().bold(), err);
            if let ClaimboardError::UnknownQuery(_) = err {
                eprintln!("Run `claimboard list` to see available queries.");
            }
            ExitCode::FAILURE
        }
    }
}
