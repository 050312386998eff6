//! CSV export of the ledger.
//!
//! One header row is followed by one row per transaction, newest first:
//! ```text
//! Tanggal,Tipe,Kategori,Jumlah,Keterangan
//! 2024-01-02,Pemasukan,"Gaji",50000,"Gaji ""Januari"""
//! ```
//! The category and description are always quoted, with embedded double quotes doubled. The
//! date, type label and amount are written bare.

use crate::model::Transaction;
use crate::report::sort_by_date_desc;
use crate::Result;
use anyhow::{ensure, Context};
use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};

/// The column titles of the export.
pub const HEADERS: [&str; 5] = ["Tanggal", "Tipe", "Kategori", "Jumlah", "Keterangan"];

/// Shown instead of producing a file when there is nothing to export.
pub const EMPTY_EXPORT_NOTICE: &str = "Tidak ada data untuk diekspor.";

/// Renders `transactions` as CSV text.
///
/// # Errors
/// - Returns an error if `transactions` is empty; an empty ledger never produces a file.
pub fn to_csv(transactions: &[Transaction]) -> Result<String> {
    ensure!(!transactions.is_empty(), EMPTY_EXPORT_NOTICE);

    // Quoting is decided per column, so fields are quoted here and written verbatim.
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer
        .write_record(HEADERS)
        .context("Unable to write CSV header")?;
    for t in sort_by_date_desc(transactions) {
        let date = t.day().format("%Y-%m-%d").to_string();
        let category = quote(t.category());
        let amount = t.amount().to_string();
        let description = quote(t.description());
        writer
            .write_record([
                date.as_str(),
                t.transaction_type().label(),
                category.as_str(),
                amount.as_str(),
                description.as_str(),
            ])
            .with_context(|| format!("Unable to write CSV row for transaction {}", t.id()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Unable to flush CSV data: {e}"))?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

/// The export file name for `date`, e.g. `Laporan_Keuangan_2024-01-02.csv`.
pub fn file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{prefix}_{}.csv", date.format("%Y-%m-%d"))
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
