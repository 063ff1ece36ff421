//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use log::{debug, info};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use crate::adapters::console_report;
use crate::adapters::csv_adapter::CsvExportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::text_ledger_adapter::TextLedgerAdapter;
use crate::domain::config_validation::validate_app_config;
use crate::domain::error::PortfolioError;
use crate::domain::holding::Holding;
use crate::domain::ledger::Ledger;
use crate::domain::sample::add_sample_data;
use crate::domain::security::Security;
use crate::domain::simulation::{PriceSimulator, SimulationConfig};
use crate::interactive::Menu;
use crate::ports::config_port::ConfigPort;
use crate::ports::ledger_store::LedgerStore;
use crate::ports::report_port::ExportPort;

pub const DEFAULT_LEDGER_PATH: &str = "portfolio.txt";
pub const DEFAULT_PORTFOLIO_NAME: &str = "My Investment Portfolio";

#[derive(Parser, Debug)]
#[command(name = "stockfolio", about = "Stock portfolio tracker")]
pub struct Cli {
    /// INI configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Ledger file, overriding [ledger] path
    #[arg(short, long, global = true)]
    pub ledger: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    /// By current value, largest first
    Value {
        #[arg(long)]
        ascending: bool,
    },
    /// Alphabetically by symbol
    Symbol,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an empty ledger file
    Init {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        force: bool,
    },
    /// Buy shares, merging into an existing holding for the same symbol
    Add {
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        shares: u64,
        /// Purchase price per share
        #[arg(long, allow_negative_numbers = true)]
        price: f64,
        /// Current market price; defaults to the purchase price
        #[arg(long, allow_negative_numbers = true)]
        current_price: Option<f64>,
    },
    /// Remove a holding
    Remove {
        #[arg(long)]
        symbol: String,
    },
    /// Set the current price of a holding's security
    UpdatePrice {
        #[arg(long)]
        symbol: String,
        #[arg(long, allow_negative_numbers = true)]
        price: f64,
    },
    /// Print the holdings table, or one holding in detail
    Show {
        #[arg(long)]
        symbol: Option<String>,
    },
    /// Print price and price change for one holding's security
    Quote {
        #[arg(long)]
        symbol: String,
    },
    /// Print the portfolio summary
    Summary,
    /// Print summary, holdings and performance analysis
    Report,
    /// Reorder holdings and save the new order
    Sort {
        #[command(subcommand)]
        by: SortBy,
    },
    /// List the best performing holdings
    Top {
        #[arg(long)]
        count: Option<usize>,
    },
    /// List holdings with a loss
    Losers,
    /// Randomly move prices for a number of rounds
    Simulate {
        #[arg(long)]
        rounds: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Export holdings to CSV
    Export {
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Merge the built-in sample holdings into the ledger
    Sample,
    /// Menu-driven session
    Interactive,
}

/// Effective settings after config file and CLI overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    pub ledger_path: PathBuf,
    pub ledger_name: String,
    pub simulation: SimulationConfig,
    pub top_count: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            ledger_path: PathBuf::from(DEFAULT_LEDGER_PATH),
            ledger_name: DEFAULT_PORTFOLIO_NAME.to_string(),
            simulation: SimulationConfig::default(),
            top_count: 5,
        }
    }
}

pub fn build_settings(config: &dyn ConfigPort) -> Result<AppSettings, PortfolioError> {
    let defaults = AppSettings::default();
    let sim_defaults = &defaults.simulation;

    let seed: Option<u64> = match config.get_string("simulation", "seed") {
        Some(s) if !s.trim().is_empty() => {
            Some(s.trim().parse().map_err(|_| PortfolioError::ConfigInvalid {
                section: "simulation".into(),
                key: "seed".into(),
                reason: "seed must be a non-negative integer".into(),
            })?)
        }
        _ => None,
    };

    Ok(AppSettings {
        ledger_path: config
            .get_string("ledger", "path")
            .map(PathBuf::from)
            .unwrap_or(defaults.ledger_path),
        ledger_name: config
            .get_string("ledger", "name")
            .unwrap_or(defaults.ledger_name),
        simulation: SimulationConfig {
            rounds: config.get_int("simulation", "rounds", sim_defaults.rounds as i64).max(1)
                as usize,
            volatility: config.get_double("simulation", "volatility", sim_defaults.volatility),
            interval_ms: config
                .get_int("simulation", "interval_ms", sim_defaults.interval_ms as i64)
                .max(0) as u64,
            seed,
        },
        top_count: config
            .get_int("display", "top_count", defaults.top_count as i64)
            .max(1) as usize,
    })
}

pub fn load_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, PortfolioError> {
    match path {
        Some(p) => {
            info!("loading config from {}", p.display());
            FileConfigAdapter::from_file(p)
        }
        None => Ok(FileConfigAdapter::empty()),
    }
}

pub fn resolve_settings(cli: &Cli) -> Result<AppSettings, PortfolioError> {
    let config = load_config(cli.config.as_ref())?;
    validate_app_config(&config)?;
    let mut settings = build_settings(&config)?;
    if let Some(path) = &cli.ledger {
        settings.ledger_path = path.clone();
    }
    debug!("effective settings: {:?}", settings);
    Ok(settings)
}

pub fn run(cli: Cli) -> ExitCode {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result =
        resolve_settings(&cli).and_then(|settings| execute(cli.command, &settings, &mut out));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn execute<W: Write>(
    command: Command,
    settings: &AppSettings,
    out: &mut W,
) -> Result<(), PortfolioError> {
    let store = TextLedgerAdapter::new();
    let path = settings.ledger_path.as_path();

    match command {
        Command::Init { name, force } => {
            if path.exists() && !force {
                return Err(PortfolioError::validation(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )));
            }
            let ledger = Ledger::new(name.unwrap_or_else(|| settings.ledger_name.clone()));
            store.save(&ledger, path)?;
            writeln!(out, "Created portfolio '{}' at {}", ledger.name(), path.display())?;
        }
        Command::Add {
            symbol,
            name,
            shares,
            price,
            current_price,
        } => {
            let mut ledger = load_or_create(&store, settings)?;
            let security = Security::new(symbol, name, current_price.unwrap_or(price))?;
            ledger.add(Holding::new(security, shares, price)?)?;
            store.save(&ledger, path)?;
            writeln!(out, "Investment added successfully!")?;
        }
        Command::Remove { symbol } => {
            let mut ledger = store.load(path)?;
            ledger.remove(&symbol)?;
            store.save(&ledger, path)?;
            writeln!(out, "Investment removed successfully!")?;
        }
        Command::UpdatePrice { symbol, price } => {
            let mut ledger = store.load(path)?;
            ledger.update_price(&symbol, price)?;
            store.save(&ledger, path)?;
            writeln!(out, "Stock price updated successfully!")?;
        }
        Command::Show { symbol: None } => {
            write!(out, "{}", console_report::render_table(&store.load(path)?))?;
        }
        Command::Show {
            symbol: Some(symbol),
        } => {
            let ledger = store.load(path)?;
            write!(out, "{}", console_report::render_holding(find(&ledger, &symbol)?))?;
        }
        Command::Quote { symbol } => {
            let ledger = store.load(path)?;
            let holding = find(&ledger, &symbol)?;
            write!(out, "{}", console_report::render_security(holding.security()))?;
        }
        Command::Summary => {
            write!(out, "{}", console_report::render_summary(&store.load(path)?))?;
        }
        Command::Report => {
            write!(out, "{}", console_report::render_detailed_report(&store.load(path)?))?;
        }
        Command::Sort { by } => {
            let mut ledger = store.load(path)?;
            apply_sort(&mut ledger, by);
            store.save(&ledger, path)?;
            writeln!(out, "Investments sorted by {}.", sort_label(by))?;
        }
        Command::Top { count } => {
            let ledger = store.load(path)?;
            let count = count.unwrap_or(settings.top_count);
            write!(out, "{}", console_report::render_top_performers(&ledger, count))?;
        }
        Command::Losers => {
            write!(out, "{}", console_report::render_losers(&store.load(path)?))?;
        }
        Command::Simulate { rounds, seed } => {
            let mut ledger = store.load(path)?;
            let mut sim_config = settings.simulation.clone();
            if let Some(r) = rounds {
                sim_config.rounds = r;
            }
            if seed.is_some() {
                sim_config.seed = seed;
            }
            run_simulation(&mut ledger, &sim_config, out)?;
            store.save(&ledger, path)?;
        }
        Command::Export { output } => {
            let ledger = store.load(path)?;
            CsvExportAdapter::new().export(&ledger, &output)?;
            writeln!(out, "Portfolio exported to {}", output.display())?;
        }
        Command::Sample => {
            let mut ledger = load_or_create(&store, settings)?;
            add_sample_data(&mut ledger)?;
            store.save(&ledger, path)?;
            writeln!(out, "Sample data loaded successfully!")?;
        }
        Command::Interactive => {
            let ledger = load_or_create(&store, settings)?;
            let exporter = CsvExportAdapter::new();
            let stdin = io::stdin();
            Menu::new(ledger, settings, &store, &exporter, stdin.lock(), out).run()?;
        }
    }
    Ok(())
}

/// Loads the ledger file, or starts an empty ledger when there is none yet.
pub fn load_or_create(
    store: &dyn LedgerStore,
    settings: &AppSettings,
) -> Result<Ledger, PortfolioError> {
    if settings.ledger_path.exists() {
        store.load(&settings.ledger_path)
    } else {
        info!(
            "{} not found, starting new portfolio '{}'",
            settings.ledger_path.display(),
            settings.ledger_name
        );
        Ok(Ledger::new(settings.ledger_name.clone()))
    }
}

fn find<'a>(ledger: &'a Ledger, symbol: &str) -> Result<&'a Holding, PortfolioError> {
    ledger.get(symbol).ok_or_else(|| PortfolioError::NotFound {
        symbol: symbol.to_string(),
    })
}

pub fn apply_sort(ledger: &mut Ledger, by: SortBy) {
    match by {
        SortBy::Value { ascending } => ledger.sort_by_value(ascending),
        SortBy::Symbol => ledger.sort_by_symbol(),
    }
}

fn sort_label(by: SortBy) -> &'static str {
    match by {
        SortBy::Value { .. } => "value",
        SortBy::Symbol => "symbol",
    }
}

/// Runs `config.rounds` simulator ticks, pausing `interval_ms` after each.
pub fn run_simulation<W: Write>(
    ledger: &mut Ledger,
    config: &SimulationConfig,
    out: &mut W,
) -> Result<(), PortfolioError> {
    let mut simulator = PriceSimulator::from_config(config)?;
    writeln!(out, "Simulating real-time price updates...")?;
    for round in 1..=config.rounds {
        simulator.tick(ledger)?;
        if config.interval_ms > 0 {
            thread::sleep(Duration::from_millis(config.interval_ms));
        }
        writeln!(out, "Update {}/{} completed...", round, config.rounds)?;
    }
    writeln!(out, "Real-time updates completed!")?;
    Ok(())
}

/// Default path for a prompt answer that was left blank.
pub(crate) fn path_or_default(answer: &str, default: &Path) -> PathBuf {
    let trimmed = answer.trim();
    if trimmed.is_empty() {
        default.to_path_buf()
    } else {
        PathBuf::from(trimmed)
    }
}
