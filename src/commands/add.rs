use crate::args::AddArgs;
use crate::commands::Out;
use crate::model::{day_start, NewTransaction, Transaction};
use crate::{Config, Result};
use chrono::Utc;
use tracing::info;

/// Validates the entry described by `args` and adds it to the ledger. The date defaults to today
/// (UTC).
///
/// # Errors
/// - Returns an error if the category is empty or not configured for the transaction type, in
///   which case the ledger is unchanged.
/// - Returns an error if the ledger cannot be persisted.
pub async fn add(config: Config, args: AddArgs) -> Result<Out<Transaction>> {
    let day = args.date().unwrap_or_else(|| Utc::now().date_naive());
    let entry = NewTransaction::new(
        args.transaction_type(),
        args.amount(),
        args.category(),
        day_start(day),
        args.description(),
        config.categories(),
    )?;

    let mut ledger = config.ledger()?;
    let added = ledger.add(entry)?.clone();
    info!("Added transaction {}", added.id());

    let message = format!(
        "{} sebesar {} untuk {} pada {} berhasil ditambahkan (ID {})",
        added.transaction_type().label(),
        added.amount().to_currency(),
        added.category(),
        added.day().format("%Y-%m-%d"),
        added.id()
    );
    Ok(Out::new(message, added))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Amount, TransactionType};
    use crate::test::TestEnv;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn args(category: &str, date: Option<NaiveDate>) -> AddArgs {
        AddArgs::new(
            TransactionType::Income,
            Amount::from_str("50000").unwrap(),
            category,
            date,
            "roti",
        )
    }

    #[tokio::test]
    async fn test_add_persists_entry() {
        let env = TestEnv::new().await;
        let out = add(env.config(), args("Bakery", NaiveDate::from_ymd_opt(2024, 1, 2)))
            .await
            .unwrap();
        assert!(out.message().contains("Rp 50.000"));
        let added = out.structure().unwrap();

        let ledger = env.config().ledger().unwrap();
        assert_eq!(ledger.len(), 1);
        let stored = ledger.get(added.id()).unwrap();
        assert_eq!(stored, added);
        assert_eq!(stored.day(), NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(stored.description(), "roti");
    }

    #[tokio::test]
    async fn test_add_defaults_to_today() {
        let env = TestEnv::new().await;
        let out = add(env.config(), args("Bakery", None)).await.unwrap();
        assert_eq!(out.structure().unwrap().day(), Utc::now().date_naive());
    }

    #[tokio::test]
    async fn test_add_rejects_unknown_category() {
        let env = TestEnv::new().await;
        let result = add(env.config(), args("Kasino", None)).await;
        assert!(result.is_err());
        assert!(env.config().ledger().unwrap().is_empty());
    }
}
