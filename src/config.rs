//! Configuration file handling for fintrack.
//!
//! The configuration file is stored at `$FINTRACK_HOME/config.json`. Next to it live the `store`
//! directory, which holds the persisted ledger, and the `exports` directory, which is the default
//! destination of CSV exports.

use crate::model::{Categories, TransactionType};
use crate::store::{self, FileStorage, Ledger, DEFAULT_STORAGE_KEY};
use crate::{utils, Result};
use anyhow::{bail, ensure, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

const APP_NAME: &str = "fintrack";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const STORE: &str = "store";
const EXPORTS: &str = "exports";
const EXPORT_PREFIX: &str = "Laporan_Keuangan";
const ANALYSIS_MODEL: &str = "gemini-2.5-flash";
const ANALYSIS_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$FINTRACK_HOME` and from there it loads `$FINTRACK_HOME/config.json`. It provides
/// the paths of the other items expected within the home directory.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    store: PathBuf,
    exports: PathBuf,
    config_file: ConfigFile,
    analysis_endpoint: Url,
}

impl Config {
    /// Creates the home directory, its subdirectories and an initial `config.json` with default
    /// settings. An existing `config.json` is kept as it is.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the root of the home directory, e.g. `$HOME/fintrack`
    ///
    /// # Errors
    /// - Returns an error if any file operations fail or an existing config file is invalid.
    pub async fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the fintrack home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let store = root.join(STORE);
        utils::make_dir(&store).await?;
        let exports = root.join(EXPORTS);
        utils::make_dir(&exports).await?;

        let config_path = root.join(CONFIG_JSON);
        let config_file = if config_path.is_file() {
            ConfigFile::load(&config_path).await?
        } else {
            let config_file = ConfigFile::default();
            config_file.save(&config_path).await?;
            config_file
        };
        let analysis_endpoint = config_file.analysis.endpoint()?;

        Ok(Self {
            root,
            config_path,
            store,
            exports,
            config_file,
            analysis_endpoint,
        })
    }

    /// This will
    /// - validate that `fintrack_home` exists and that the config file exists
    /// - load the config file
    /// - validate that the store and exports directories exist
    /// - return the loaded configuration object
    pub async fn load(fintrack_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = fintrack_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("The fintrack home is missing, run 'fintrack init' first")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!(
                "The config file is missing '{}', run 'fintrack init' first",
                config_path.display()
            )
        }
        let config_file = ConfigFile::load(&config_path).await?;
        let analysis_endpoint = config_file.analysis.endpoint()?;

        let config = Self {
            store: root.join(STORE),
            exports: root.join(EXPORTS),
            root,
            config_path,
            config_file,
            analysis_endpoint,
        };
        if !config.store.is_dir() {
            bail!("The store directory is missing '{}'", config.store.display())
        }
        if !config.exports.is_dir() {
            bail!(
                "The exports directory is missing '{}'",
                config.exports.display()
            )
        }
        Ok(config)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn store(&self) -> &Path {
        &self.store
    }

    pub fn exports(&self) -> &Path {
        &self.exports
    }

    pub fn storage_key(&self) -> &str {
        &self.config_file.storage_key
    }

    pub fn categories(&self) -> &Categories {
        &self.config_file.categories
    }

    pub fn export_prefix(&self) -> &str {
        &self.config_file.export_prefix
    }

    pub fn analysis_model(&self) -> &str {
        &self.config_file.analysis.model
    }

    /// The base URL of the analysis service, e.g.
    /// `https://generativelanguage.googleapis.com/v1beta`.
    pub fn analysis_endpoint(&self) -> &Url {
        &self.analysis_endpoint
    }

    /// Loads the ledger persisted in the store directory.
    pub fn ledger(&self) -> Result<Ledger<FileStorage>> {
        let storage = FileStorage::new(&self.store)?;
        Ok(Ledger::load(storage, self.storage_key()))
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "fintrack",
///   "config_version": 1,
///   "storage_key": "fintrack_data_v1",
///   "categories": {
///     "INCOME": ["Bakery", "Kost", "Las"],
///     "EXPENSE": ["Bakery", "Kost", "Las"]
///   },
///   "export_prefix": "Laporan_Keuangan",
///   "analysis": {
///     "model": "gemini-2.5-flash",
///     "endpoint": "https://generativelanguage.googleapis.com/v1beta"
///   }
/// }
/// ```
/// Every field other than `app_name` and `config_version` may be omitted, in which case the
/// default is used.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "fintrack"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// The storage key under which the ledger is persisted
    #[serde(default = "default_storage_key")]
    storage_key: String,

    /// The categories offered for each transaction type
    #[serde(default)]
    categories: Categories,

    /// The file name prefix of CSV exports
    #[serde(default = "default_export_prefix")]
    export_prefix: String,

    /// Settings of the generative analysis service
    #[serde(default)]
    analysis: AnalysisSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct AnalysisSettings {
    #[serde(default = "default_analysis_model")]
    model: String,
    #[serde(default = "default_analysis_endpoint")]
    endpoint: String,
}

impl AnalysisSettings {
    fn endpoint(&self) -> Result<Url> {
        Url::parse(&self.endpoint)
            .with_context(|| format!("Invalid analysis endpoint '{}'", self.endpoint))
    }
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_export_prefix() -> String {
    EXPORT_PREFIX.to_string()
}

fn default_analysis_model() -> String {
    ANALYSIS_MODEL.to_string()
}

fn default_analysis_endpoint() -> String {
    ANALYSIS_ENDPOINT.to_string()
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            model: default_analysis_model(),
            endpoint: default_analysis_endpoint(),
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            storage_key: default_storage_key(),
            categories: Categories::default(),
            export_prefix: default_export_prefix(),
            analysis: AnalysisSettings::default(),
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile asynchronously from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or holds invalid settings
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let config: ConfigFile = utils::deserialize(path.as_ref())
            .await
            .context("Failed to load config file")?;

        ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        store::check_key(&config.storage_key)
            .context("The storage_key in the config file is not usable")?;
        ensure!(
            !config.categories.for_type(TransactionType::Income).is_empty()
                && !config.categories.for_type(TransactionType::Expense).is_empty(),
            "The config file must list at least one category per transaction type"
        );
        config.analysis.endpoint()?;

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }
}
