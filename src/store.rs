//! The ledger and the key-value storage it persists to.
//!
//! The whole transaction collection lives under one storage key as JSON text. It is read once
//! when the `Ledger` is loaded and overwritten in full after every mutation.

use crate::model::{NewTransaction, Transaction};
use crate::{fs, Result};
use anyhow::{bail, Context};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

/// The key under which the ledger is stored unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "fintrack_data_v1";

/// A persistent string key-value facility.
pub trait Storage {
    /// Returns the value stored under `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrites the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Stores each key as a `<key>.json` file in a directory.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates `dir` if needed and returns a storage rooted there.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> Result<PathBuf> {
        check_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

/// Fails unless `key` is non-empty, made of `[A-Za-z0-9_.-]` and does not start with a dot.
pub fn check_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
        && !key.starts_with('.');
    if !valid {
        bail!("Invalid storage key '{key}'");
    }
    Ok(())
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        fs::read_optional(self.path(key)?)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::write_replace(self.path(key)?, value.as_bytes())
    }
}

/// Holds values in memory. Nothing survives the process.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct MemoryStorage {
    data: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.data.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The single source of truth for the transaction collection.
///
/// Transactions are never mutated in place: `add` prepends a new entry and `remove` filters one
/// out by id. Each mutation is written through to the storage before returning.
#[derive(Debug)]
pub struct Ledger<S: Storage> {
    storage: S,
    key: String,
    transactions: Vec<Transaction>,
}

impl<S: Storage> Ledger<S> {
    /// Loads the collection stored under `key`. Missing or malformed data yields an empty ledger;
    /// the failure is logged and not returned.
    pub fn load(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let transactions = match read_transactions(&storage, &key) {
            Ok(transactions) => transactions,
            Err(e) => {
                warn!("Failed to load transactions, starting with an empty ledger: {e:#}");
                Vec::new()
            }
        };
        debug!("Loaded {} transactions from '{key}'", transactions.len());
        Self {
            storage,
            key,
            transactions,
        }
    }

    /// The transactions in insertion-visible-first order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id() == id)
    }

    /// Assigns a fresh id to `entry`, prepends it, and persists the ledger.
    pub fn add(&mut self, entry: NewTransaction) -> Result<&Transaction> {
        let id = self.fresh_id();
        self.transactions
            .insert(0, Transaction::from_new(id.clone(), entry));
        if let Err(e) = self.save() {
            self.transactions.remove(0);
            return Err(e);
        }
        debug!("Added transaction {id}");
        Ok(&self.transactions[0])
    }

    /// Removes the transaction with `id` and persists the ledger. Removing an id that is not
    /// present changes nothing and returns `None`.
    pub fn remove(&mut self, id: &str) -> Result<Option<Transaction>> {
        let Some(ix) = self.transactions.iter().position(|t| t.id() == id) else {
            debug!("No transaction with id {id}, nothing removed");
            return Ok(None);
        };
        let removed = self.transactions.remove(ix);
        if let Err(e) = self.save() {
            self.transactions.insert(ix, removed);
            return Err(e);
        }
        debug!("Removed transaction {id}");
        Ok(Some(removed))
    }

    /// Overwrites the stored collection with the in-memory one.
    pub fn save(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.transactions)
            .context("Unable to serialize transactions")?;
        self.storage
            .set(&self.key, &json)
            .with_context(|| format!("Unable to save transactions under '{}'", self.key))
    }

    /// Gives back the storage, e.g. to reload it.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

fn read_transactions(storage: &impl Storage, key: &str) -> Result<Vec<Transaction>> {
    let Some(json) = storage.get(key)? else {
        return Ok(Vec::new());
    };
    let stored: Vec<Transaction> = serde_json::from_str(&json)
        .with_context(|| format!("Malformed transaction data under '{key}'"))?;

    // Ids must be unique; keep the first occurrence.
    let mut seen = HashSet::new();
    let mut transactions = Vec::with_capacity(stored.len());
    for t in stored {
        if seen.insert(t.id().to_string()) {
            transactions.push(t);
        } else {
            warn!("Dropping transaction with duplicate id {}", t.id());
        }
    }
    Ok(transactions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{parse_entry_date, Amount, Categories, TransactionType};
    use std::str::FromStr;

    fn entry(t: TransactionType, amount: &str, category: &str, date: &str) -> NewTransaction {
        NewTransaction::new(
            t,
            Amount::from_str(amount).unwrap(),
            category,
            parse_entry_date(date).unwrap(),
            "",
            &Categories::default(),
        )
        .unwrap()
    }

    /// Reads like a `MemoryStorage` but fails every write.
    #[derive(Debug, Default)]
    struct ReadOnlyStorage {
        inner: MemoryStorage,
    }

    impl Storage for ReadOnlyStorage {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            bail!("disk full")
        }
    }

    fn memory_ledger() -> Ledger<MemoryStorage> {
        Ledger::load(MemoryStorage::new(), DEFAULT_STORAGE_KEY)
    }

    #[test]
    fn test_load_absent_is_empty() {
        let ledger = memory_ledger();
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_load_malformed_is_empty() {
        let mut storage = MemoryStorage::new();
        storage.set(DEFAULT_STORAGE_KEY, "{not json").unwrap();
        let ledger = Ledger::load(storage, DEFAULT_STORAGE_KEY);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_load_negative_amount_is_empty() {
        let mut storage = MemoryStorage::new();
        let json = r#"[{"id":"a","date":"2024-01-01T00:00:00Z","amount":-5,"category":"Las","description":"","type":"EXPENSE"}]"#;
        storage.set(DEFAULT_STORAGE_KEY, json).unwrap();
        let ledger = Ledger::load(storage, DEFAULT_STORAGE_KEY);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_load_drops_duplicate_ids() {
        let mut storage = MemoryStorage::new();
        let json = r#"[
            {"id":"a","date":"2024-01-02T00:00:00Z","amount":1,"category":"Las","description":"first","type":"EXPENSE"},
            {"id":"a","date":"2024-01-01T00:00:00Z","amount":2,"category":"Las","description":"second","type":"EXPENSE"}
        ]"#;
        storage.set(DEFAULT_STORAGE_KEY, json).unwrap();
        let ledger = Ledger::load(storage, DEFAULT_STORAGE_KEY);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.transactions()[0].description(), "first");
    }

    #[test]
    fn test_add_prepends_and_assigns_unique_ids() {
        let mut ledger = memory_ledger();
        let first = ledger
            .add(entry(TransactionType::Income, "100", "Bakery", "2024-01-01"))
            .unwrap()
            .id()
            .to_string();
        let second = ledger
            .add(entry(TransactionType::Expense, "40", "Bakery", "2024-01-01"))
            .unwrap()
            .id()
            .to_string();
        assert_ne!(first, second);
        assert_eq!(ledger.transactions()[0].id(), second);
        assert_eq!(ledger.transactions()[1].id(), first);
    }

    #[test]
    fn test_add_persists() {
        let mut ledger = memory_ledger();
        let id = ledger
            .add(entry(TransactionType::Income, "100", "Bakery", "2024-01-01"))
            .unwrap()
            .id()
            .to_string();
        let reloaded = Ledger::load(ledger.into_storage(), DEFAULT_STORAGE_KEY);
        assert_eq!(reloaded.len(), 1);
        assert!(reloaded.get(&id).is_some());
    }

    #[test]
    fn test_remove_nonexistent_is_noop() {
        let mut ledger = memory_ledger();
        ledger
            .add(entry(TransactionType::Income, "100", "Bakery", "2024-01-01"))
            .unwrap();
        let before = ledger.transactions().to_vec();
        let removed = ledger.remove("does-not-exist").unwrap();
        assert!(removed.is_none());
        assert_eq!(ledger.transactions(), before.as_slice());
        // Removing twice is the same as removing once.
        assert!(ledger.remove("does-not-exist").unwrap().is_none());
        assert_eq!(ledger.transactions(), before.as_slice());
    }

    #[test]
    fn test_add_then_remove_restores_prior_state() {
        let mut ledger = memory_ledger();
        ledger
            .add(entry(TransactionType::Income, "100", "Bakery", "2024-01-01"))
            .unwrap();
        ledger
            .add(entry(TransactionType::Expense, "25", "Las", "2024-01-03"))
            .unwrap();
        let before = ledger.transactions().to_vec();

        let id = ledger
            .add(entry(TransactionType::Expense, "10", "Kantor", "2024-01-05"))
            .unwrap()
            .id()
            .to_string();
        let removed = ledger.remove(&id).unwrap().unwrap();
        assert_eq!(removed.id(), id);
        assert_eq!(ledger.transactions(), before.as_slice());

        let reloaded = Ledger::load(ledger.into_storage(), DEFAULT_STORAGE_KEY);
        assert_eq!(reloaded.transactions(), before.as_slice());
    }

    #[test]
    fn test_failed_save_rolls_back_add_and_remove() {
        let mut ledger = memory_ledger();
        ledger
            .add(entry(TransactionType::Income, "100", "Bakery", "2024-01-01"))
            .unwrap();
        let id = ledger.transactions()[0].id().to_string();
        let before = ledger.transactions().to_vec();

        let mut inner = ledger.into_storage();
        let stored = inner.get(DEFAULT_STORAGE_KEY).unwrap();
        let mut ledger = Ledger::load(ReadOnlyStorage { inner }, DEFAULT_STORAGE_KEY);
        assert_eq!(ledger.transactions(), before.as_slice());

        let err = ledger
            .add(entry(TransactionType::Expense, "40", "Las", "2024-01-02"))
            .unwrap_err();
        assert!(format!("{err:#}").contains("disk full"));
        assert_eq!(ledger.transactions(), before.as_slice());

        assert!(ledger.remove(&id).is_err());
        assert_eq!(ledger.transactions(), before.as_slice());

        // Nothing reached the stored value either.
        let storage = ledger.into_storage();
        assert_eq!(storage.get(DEFAULT_STORAGE_KEY).unwrap(), stored);
    }

    #[test]
    fn test_amounts_survive_save_and_reload_exactly() {
        let mut ledger = memory_ledger();
        for amount in [
            "50000",
            "0.1234567890123456789",
            "79228162514264337593543950335",
        ] {
            ledger
                .add(entry(TransactionType::Income, amount, "Bakery", "2024-01-01"))
                .unwrap();
        }
        let before = ledger.transactions().to_vec();

        let reloaded = Ledger::load(ledger.into_storage(), DEFAULT_STORAGE_KEY);
        assert_eq!(reloaded.len(), 3);
        assert_eq!(reloaded.transactions(), before.as_slice());
        assert_eq!(
            reloaded.transactions()[1].amount().to_string(),
            "0.1234567890123456789"
        );
        assert_eq!(
            reloaded.transactions()[0].amount().to_string(),
            "79228162514264337593543950335"
        );
    }

    #[test]
    fn test_check_key() {
        assert!(check_key("fintrack_data_v1").is_ok());
        assert!(check_key("ledger-2.old").is_ok());
        assert!(check_key("my/key").is_err());
        assert!(check_key("").is_err());
        assert!(check_key(".hidden").is_err());
    }

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("store")).unwrap();
        let mut ledger = Ledger::load(storage, DEFAULT_STORAGE_KEY);
        ledger
            .add(entry(TransactionType::Income, "50000", "Menjahit", "2024-01-02"))
            .unwrap();

        let storage = FileStorage::new(dir.path().join("store")).unwrap();
        assert!(dir
            .path()
            .join("store")
            .join("fintrack_data_v1.json")
            .is_file());
        let reloaded = Ledger::load(storage, DEFAULT_STORAGE_KEY);
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.transactions()[0].category(), "Menjahit");
    }

    #[test]
    fn test_file_storage_rejects_bad_keys() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut storage = FileStorage::new(dir.path()).unwrap();
        assert!(storage.set("../escape", "x").is_err());
        assert!(storage.get("").is_err());
        assert!(storage.set(".hidden", "x").is_err());
    }
}
