use chrono::Utc;
use clap::Parser;
use fintrack::args::{Args, Command};
use fintrack::{commands, Config, Mode, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().fintrack_home().path();

    // This allows for running the program without contacting the text-generation service. When
    // FINTRACK_IN_TEST_MODE is set and non-zero in length, then the mode will be Mode::Testing,
    // otherwise it will be Mode::Live.
    let mode = Mode::from_env();

    // Days are UTC calendar days, matching how entry dates are stored.
    let today = Utc::now().date_naive();

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Init => commands::init(home).await?.print(),

        Command::Add(add_args) => {
            let config = Config::load(home).await?;
            commands::add(config, add_args.clone()).await?.print()
        }

        Command::Delete(delete_args) => {
            let config = Config::load(home).await?;
            commands::delete(config, delete_args.clone(), commands::prompt_confirmation)
                .await?
                .print()
        }

        Command::List(list_args) => {
            let config = Config::load(home).await?;
            commands::list(config, list_args.clone()).await?.print()
        }

        Command::Summary => commands::summary(Config::load(home).await?)
            .await?
            .print(),

        Command::Breakdown(breakdown_args) => {
            let config = Config::load(home).await?;
            commands::breakdown(config, breakdown_args.clone())
                .await?
                .print()
        }

        Command::Trend => commands::trend(Config::load(home).await?, today)
            .await?
            .print(),

        Command::Dashboard => commands::dashboard(Config::load(home).await?, today)
            .await?
            .print(),

        Command::Categories(categories_args) => {
            let config = Config::load(home).await?;
            commands::categories(config, categories_args.clone())
                .await?
                .print()
        }

        Command::Export(export_args) => {
            let config = Config::load(home).await?;
            commands::export(config, export_args.clone(), today)
                .await?
                .print()
        }

        Command::Analyze(analyze_args) => {
            let config = Config::load(home).await?;
            commands::analyze(config, mode, analyze_args.clone())
                .await?
                .print()
        }
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
