//! Vacancies CLI
//!
//! Search HeadHunter, keep the results in a local file and browse them.

use std::io;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use clap::{Parser, Subcommand};
use vacancies::{
    error::{AppError, Result},
    interaction::ConsoleSession,
    models::{Config, StorageFormat, Vacancy},
    query::{self, Criteria},
    services::{HeadHunterApi, JobPlatformApi},
    storage::{VacancyStorage, open_storage},
};

/// Vacancies - HeadHunter search with local storage
#[derive(Parser, Debug)]
#[command(
    name = "vacancies",
    version,
    about = "Search job vacancies and keep them in JSON, CSV or XLSX"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Override the storage directory
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Override the storage format
    #[arg(short, long, value_enum)]
    format: Option<StorageFormat>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive menu (search, filter, select, delete)
    Interactive {
        /// Skip the first prompt and search for this profession
        #[arg(long)]
        query: Option<String>,
    },

    /// Search vacancies and store them
    Search {
        /// Free-text query, e.g. "Rust developer"
        query: String,

        /// Append to existing results instead of replacing them
        #[arg(long)]
        keep: bool,
    },

    /// List stored vacancies matching all given filters
    List {
        #[arg(long)]
        city: Option<String>,

        #[arg(long)]
        region: Option<String>,

        #[arg(long)]
        experience: Option<String>,

        /// Lower salary bound (inclusive)
        #[arg(long, requires = "salary_max")]
        salary_min: Option<f64>,

        /// Upper salary bound (inclusive)
        #[arg(long, requires = "salary_min")]
        salary_max: Option<f64>,

        /// Highest salary first, vacancies without salary last
        #[arg(long)]
        sort_salary: bool,
    },

    /// Delete every stored vacancy with this title and link
    Delete { title: String, link: String },

    /// Remove all stored vacancies
    Clear,

    /// Validate configuration
    Validate,

    /// Show storage info
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = dir;
    }
    if let Some(format) = cli.format {
        config.storage.format = format;
    }

    let storage = open_storage(&config.storage);
    log::debug!("Using storage file {}", config.storage.path().display());

    match cli.command {
        Command::Interactive { query } => {
            let api = HeadHunterApi::new(&config.api)?;
            let stdin = io::stdin();
            let mut session =
                ConsoleSession::new(&api, storage.as_ref(), stdin.lock(), io::stdout());
            session.run(query.as_deref())?;
        }

        Command::Search { query, keep } => {
            let api = HeadHunterApi::new(&config.api)?;
            let items = api.get_vacancies(&query)?;
            let vacancies = Vacancy::cast_to_vacancies(&items);

            if !keep {
                storage.clear()?;
            }
            storage.add_all(&vacancies)?;
            log::info!(
                "Stored {} of {} vacancies in {}",
                vacancies.len(),
                items.len(),
                config.storage.path().display()
            );
        }

        Command::List {
            city,
            region,
            experience,
            salary_min,
            salary_max,
            sort_salary,
        } => {
            let mut criteria = Criteria::new();
            if let (Some(low), Some(high)) = (salary_min, salary_max) {
                criteria = criteria.salary(low, high);
            }
            if let Some(region) = region {
                criteria = criteria.region(region);
            }
            if let Some(experience) = experience {
                criteria = criteria.experience(experience);
            }
            if let Some(city) = city {
                criteria = criteria.city(city);
            }

            let mut records = storage.query(Some(&criteria))?;
            if sort_salary {
                query::sort_by_salary_desc(&mut records);
            }

            let json = serde_json::to_string_pretty(&records)?;
            println!("{json}");
            log::info!("{} vacancies matched", records.len());
        }

        Command::Delete { title, link } => {
            let removed = storage.delete(&Vacancy::identity(title, link))?;
            log::info!("Removed {} vacancy record(s)", removed);
        }

        Command::Clear => {
            storage.clear()?;
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
        }

        Command::Info => print_info(&config, storage.as_ref())?,
    }

    Ok(())
}

fn print_info(config: &Config, storage: &dyn VacancyStorage) -> Result<()> {
    let path = config.storage.path();
    log::info!("API endpoint root: {}", config.api.base_url);
    log::info!("Storage format: {}", config.storage.format);
    log::info!("Storage file: {}", path.display());

    match std::fs::metadata(&path) {
        Ok(meta) => {
            let modified: DateTime<Local> = meta.modified()?.into();
            log::info!("Last updated: {}", modified.format("%Y-%m-%d %H:%M:%S"));
            log::info!("Stored vacancies: {}", storage.query(None)?.len());
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::info!("No vacancies stored yet.");
        }
        Err(e) => return Err(AppError::Io(e)),
    }
    Ok(())
}
