//! These structs provide the CLI interface for the fintrack CLI.

use crate::model::{Amount, TransactionType};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// fintrack: A command-line tool for tracking income and expenses.
///
/// Record income and expense entries per business unit, review totals, category breakdowns and
/// the trend of the last seven days, export everything to CSV, and ask a language model for a
/// short analysis of your finances (in Indonesian).
///
/// Start with `fintrack init`, which creates the data directory and a default configuration.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and a default configuration file.
    ///
    /// This is the first command you should run. The data directory is taken from
    /// --fintrack-home and defaults to $HOME/fintrack. Running it again keeps an existing
    /// config.json. Edit config.json to change the categories offered for each transaction type.
    Init,
    /// Record an income or expense entry.
    Add(AddArgs),
    /// Delete a transaction by its ID, after confirmation.
    Delete(DeleteArgs),
    /// List transactions, newest first.
    List(ListArgs),
    /// Show total income, total expense and the balance.
    Summary,
    /// Show the totals per category for one transaction type, largest first.
    Breakdown(BreakdownArgs),
    /// Show income and expense for each of the last seven days.
    Trend,
    /// Show the summary, both breakdowns, the weekly trend and the latest transactions.
    Dashboard,
    /// Show the categories allowed for each transaction type.
    Categories(CategoriesArgs),
    /// Export all transactions to a CSV file.
    Export(ExportArgs),
    /// Ask the language model for an analysis of your finances.
    Analyze(AnalyzeArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. See the tracing-subscriber crate for instructions.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where fintrack data and configuration is held. Defaults to ~/fintrack
    #[arg(long, env = "FINTRACK_HOME", default_value_t = default_fintrack_home())]
    fintrack_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, fintrack_home: PathBuf) -> Self {
        Self {
            log_level,
            fintrack_home: fintrack_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn fintrack_home(&self) -> &DisplayPath {
        &self.fintrack_home
    }
}

/// Args for the `fintrack add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    /// Whether the entry is income or an expense.
    #[arg(long = "type", value_enum)]
    transaction_type: TransactionType,

    /// The amount, a non-negative decimal number such as 50000 or 12500.50.
    #[arg(long)]
    amount: Amount,

    /// The category. It must be one of the categories configured for the transaction type.
    #[arg(long)]
    category: String,

    /// The date of the entry as YYYY-MM-DD. Defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,

    /// An optional free-text note.
    #[arg(long, default_value = "")]
    description: String,
}

impl AddArgs {
    pub fn new(
        transaction_type: TransactionType,
        amount: Amount,
        category: impl Into<String>,
        date: Option<NaiveDate>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            transaction_type,
            amount,
            category: category.into(),
            date,
            description: description.into(),
        }
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Args for the `fintrack delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    /// The ID of the transaction to delete, as shown by `fintrack list`.
    id: String,

    /// Skip the confirmation prompt.
    #[arg(long, short)]
    yes: bool,
}

impl DeleteArgs {
    pub fn new(id: impl Into<String>, yes: bool) -> Self {
        Self { id: id.into(), yes }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn yes(&self) -> bool {
        self.yes
    }
}

/// Args for the `fintrack list` command.
#[derive(Debug, Parser, Clone)]
pub struct ListArgs {
    /// Show at most this many transactions.
    #[arg(long)]
    limit: Option<usize>,
}

impl ListArgs {
    pub fn new(limit: Option<usize>) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}

/// Args for the `fintrack breakdown` command.
#[derive(Debug, Parser, Clone)]
pub struct BreakdownArgs {
    /// The transaction type to break down.
    #[arg(long = "type", value_enum)]
    transaction_type: TransactionType,
}

impl BreakdownArgs {
    pub fn new(transaction_type: TransactionType) -> Self {
        Self { transaction_type }
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }
}

/// Args for the `fintrack categories` command.
#[derive(Debug, Parser, Clone)]
pub struct CategoriesArgs {
    /// Only show the categories of this transaction type.
    #[arg(long = "type", value_enum)]
    transaction_type: Option<TransactionType>,
}

impl CategoriesArgs {
    pub fn new(transaction_type: Option<TransactionType>) -> Self {
        Self { transaction_type }
    }

    pub fn transaction_type(&self) -> Option<TransactionType> {
        self.transaction_type
    }
}

/// Args for the `fintrack export` command.
#[derive(Debug, Parser, Clone)]
pub struct ExportArgs {
    /// The directory to write the CSV file to. Defaults to $FINTRACK_HOME/exports.
    #[arg(long)]
    dir: Option<PathBuf>,
}

impl ExportArgs {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }
}

/// Args for the `fintrack analyze` command.
#[derive(Debug, Parser, Clone)]
pub struct AnalyzeArgs {
    /// The API key of the text-generation service.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

impl AnalyzeArgs {
    pub fn new(api_key: Option<String>) -> Self {
        Self { api_key }
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}

fn default_fintrack_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("fintrack"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --fintrack-home or FINTRACK_HOME instead of relying on the \
                default fintrack home directory. If you continue using the program right now, \
                you may have problems!",
            );
            PathBuf::from("fintrack")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl From<String> for DisplayPath {
    fn from(value: String) -> Self {
        DisplayPath(PathBuf::from(value))
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}
