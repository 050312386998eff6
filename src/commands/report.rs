//! Read-only views of the ledger.

use crate::args::{BreakdownArgs, CategoriesArgs};
use crate::commands::{transaction_line, Out};
use crate::model::{format_currency, Categories, Transaction, TransactionType};
use crate::report::{
    category_breakdown, sort_by_date_desc, summarize, weekly_trend, CategoryTotal,
    FinancialSummary, TrendPoint,
};
use crate::{Config, Result};
use chrono::NaiveDate;
use serde::Serialize;

/// The number of transactions shown on the dashboard.
const RECENT_LIMIT: usize = 5;

/// Everything the dashboard shows.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub summary: FinancialSummary,
    pub income_by_category: Vec<CategoryTotal>,
    pub expense_by_category: Vec<CategoryTotal>,
    pub trend: Vec<TrendPoint>,
    pub recent: Vec<Transaction>,
}

/// Total income, total expense and the balance.
pub async fn summary(config: Config) -> Result<Out<FinancialSummary>> {
    let ledger = config.ledger()?;
    let summary = summarize(ledger.transactions());
    Ok(Out::new(summary.to_string(), summary))
}

/// The per-category totals of one transaction type, largest first.
pub async fn breakdown(config: Config, args: BreakdownArgs) -> Result<Out<Vec<CategoryTotal>>> {
    let ledger = config.ledger()?;
    let totals = category_breakdown(ledger.transactions(), args.transaction_type());
    Ok(Out::new(
        breakdown_text(args.transaction_type(), &totals),
        totals,
    ))
}

/// Income and expense for each of the seven days ending at `today`.
pub async fn trend(config: Config, today: NaiveDate) -> Result<Out<Vec<TrendPoint>>> {
    let ledger = config.ledger()?;
    let points = weekly_trend(ledger.transactions(), today);
    Ok(Out::new(trend_text(&points), points))
}

/// The summary, both breakdowns, the weekly trend ending at `today` and the latest transactions.
pub async fn dashboard(config: Config, today: NaiveDate) -> Result<Out<Dashboard>> {
    let ledger = config.ledger()?;
    let transactions = ledger.transactions();
    let dashboard = Dashboard {
        summary: summarize(transactions),
        income_by_category: category_breakdown(transactions, TransactionType::Income),
        expense_by_category: category_breakdown(transactions, TransactionType::Expense),
        trend: weekly_trend(transactions, today),
        recent: sort_by_date_desc(transactions)
            .into_iter()
            .take(RECENT_LIMIT)
            .cloned()
            .collect(),
    };

    let mut sections = vec![
        dashboard.summary.to_string(),
        breakdown_text(TransactionType::Income, &dashboard.income_by_category),
        breakdown_text(TransactionType::Expense, &dashboard.expense_by_category),
        trend_text(&dashboard.trend),
    ];
    let mut recent = String::from("Transaksi terakhir:");
    if dashboard.recent.is_empty() {
        recent.push_str("\n  Belum ada transaksi.");
    }
    for t in &dashboard.recent {
        recent.push_str("\n  ");
        recent.push_str(&transaction_line(t));
    }
    sections.push(recent);

    Ok(Out::new(sections.join("\n\n"), dashboard))
}

/// The configured categories, for one or both transaction types.
pub async fn categories(config: Config, args: CategoriesArgs) -> Result<Out<Categories>> {
    let all = config.categories();
    let types = match args.transaction_type() {
        Some(t) => vec![t],
        None => vec![TransactionType::Income, TransactionType::Expense],
    };
    let message = types
        .iter()
        .map(|&t| format!("{}: {}", t.label(), all.for_type(t).join(", ")))
        .collect::<Vec<_>>()
        .join("\n");
    Ok(Out::new(message, all.clone()))
}

fn breakdown_text(transaction_type: TransactionType, totals: &[CategoryTotal]) -> String {
    let mut text = format!("{} per kategori:", transaction_type.label());
    if totals.is_empty() {
        text.push_str("\n  Belum ada data.");
    }
    for total in totals {
        text.push_str(&format!(
            "\n  {}: {}",
            total.name,
            format_currency(total.value)
        ));
    }
    text
}

fn trend_text(points: &[TrendPoint]) -> String {
    let mut text = String::from("Tren 7 hari terakhir:");
    for p in points {
        text.push_str(&format!(
            "\n  {:>6}  Pemasukan {}  Pengeluaran {}",
            p.label,
            format_currency(p.income),
            format_currency(p.expense)
        ));
    }
    text
}
