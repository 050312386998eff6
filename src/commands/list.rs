use crate::args::ListArgs;
use crate::commands::{transaction_line, Out};
use crate::model::Transaction;
use crate::report::sort_by_date_desc;
use crate::{Config, Result};

/// Lists the transactions newest first, at most `args.limit()` of them.
pub async fn list(config: Config, args: ListArgs) -> Result<Out<Vec<Transaction>>> {
    let ledger = config.ledger()?;
    if ledger.is_empty() {
        return Ok(Out::new("Belum ada transaksi.", Vec::new()));
    }

    let limit = args.limit().unwrap_or(usize::MAX);
    let shown: Vec<Transaction> = sort_by_date_desc(ledger.transactions())
        .into_iter()
        .take(limit)
        .cloned()
        .collect();

    let mut message = format!(
        "Menampilkan {} dari {} transaksi:",
        shown.len(),
        ledger.len()
    );
    for t in &shown {
        message.push('\n');
        message.push_str(&transaction_line(t));
    }
    Ok(Out::new(message, shown))
}
