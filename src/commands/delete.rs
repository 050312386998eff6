use crate::args::DeleteArgs;
use crate::commands::{transaction_line, Out};
use crate::model::Transaction;
use crate::{Config, Result};
use anyhow::Context;
use serde::Serialize;
use std::io::{BufRead, Write};
use tracing::info;

/// The question asked before a transaction is deleted.
pub const CONFIRM_DELETE: &str = "Apakah Anda yakin ingin menghapus transaksi ini?";

/// What `delete` did.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteOutcome {
    Deleted(Transaction),
    /// No transaction has the requested id. Nothing changed.
    NotFound,
    /// The user declined the confirmation. Nothing changed.
    Cancelled,
}

/// Deletes the transaction with the id in `args`. Unless `args.yes()` is set, `confirm` is asked
/// first and the ledger is left untouched if it answers `false`. There is no undo.
pub async fn delete<F>(config: Config, args: DeleteArgs, confirm: F) -> Result<Out<DeleteOutcome>>
where
    F: FnOnce(&Transaction) -> Result<bool>,
{
    let mut ledger = config.ledger()?;
    let Some(existing) = ledger.get(args.id()) else {
        return Ok(Out::new(
            format!("Tidak ada transaksi dengan ID {}", args.id()),
            DeleteOutcome::NotFound,
        ));
    };

    if !args.yes() && !confirm(existing)? {
        return Ok(Out::new("Penghapusan dibatalkan", DeleteOutcome::Cancelled));
    }

    match ledger.remove(args.id())? {
        Some(removed) => {
            info!("Deleted transaction {}", removed.id());
            Ok(Out::new(
                format!("Transaksi {} berhasil dihapus", removed.id()),
                DeleteOutcome::Deleted(removed),
            ))
        }
        None => Ok(Out::new(
            format!("Tidak ada transaksi dengan ID {}", args.id()),
            DeleteOutcome::NotFound,
        )),
    }
}

/// Shows `transaction` and asks `CONFIRM_DELETE` on the terminal. Answers starting with `y`
/// (`y`, `ya`, `yes`) confirm; anything else declines.
pub fn prompt_confirmation(transaction: &Transaction) -> Result<bool> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", transaction_line(transaction)).context("Unable to write prompt")?;
    write!(stdout, "{CONFIRM_DELETE} [y/N] ").context("Unable to write prompt")?;
    stdout.flush().context("Unable to write prompt")?;

    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Unable to read the confirmation")?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    answer.trim().to_lowercase().starts_with('y')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TransactionType;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_delete_confirmed() {
        let env = TestEnv::new().await;
        let id = env.add_transaction(TransactionType::Expense, "20000", "Las", "2024-01-01");
        let keep = env.add_transaction(TransactionType::Income, "50000", "Las", "2024-01-02");

        let mut asked = false;
        let out = delete(env.config(), DeleteArgs::new(&id, false), |t| {
            asked = true;
            assert_eq!(t.id(), id);
            Ok(true)
        })
        .await
        .unwrap();

        assert!(asked);
        assert!(matches!(out.structure(), Some(DeleteOutcome::Deleted(t)) if t.id() == id));
        let ledger = env.config().ledger().unwrap();
        assert_eq!(ledger.len(), 1);
        assert!(ledger.get(&keep).is_some());
    }

    #[tokio::test]
    async fn test_delete_declined_leaves_ledger() {
        let env = TestEnv::new().await;
        let id = env.add_transaction(TransactionType::Expense, "20000", "Las", "2024-01-01");

        let out = delete(env.config(), DeleteArgs::new(&id, false), |_| Ok(false))
            .await
            .unwrap();

        assert_eq!(out.structure(), Some(&DeleteOutcome::Cancelled));
        assert!(env.config().ledger().unwrap().get(&id).is_some());
    }

    #[tokio::test]
    async fn test_delete_with_yes_skips_confirmation() {
        let env = TestEnv::new().await;
        let id = env.add_transaction(TransactionType::Expense, "1", "Las", "2024-01-01");

        let out = delete(env.config(), DeleteArgs::new(&id, true), |_| {
            panic!("confirmation must not be asked")
        })
        .await
        .unwrap();

        assert!(matches!(out.structure(), Some(DeleteOutcome::Deleted(_))));
        assert!(env.config().ledger().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_noop() {
        let env = TestEnv::new().await;
        env.add_transaction(TransactionType::Expense, "1", "Las", "2024-01-01");

        let out = delete(env.config(), DeleteArgs::new("missing", true), |_| Ok(true))
            .await
            .unwrap();

        assert_eq!(out.structure(), Some(&DeleteOutcome::NotFound));
        assert_eq!(env.config().ledger().unwrap().len(), 1);
    }

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" Ya "));
        assert!(is_yes("YES"));
        assert!(!is_yes("\n"));
        assert!(!is_yes("n"));
        assert!(!is_yes("tidak"));
    }
}
