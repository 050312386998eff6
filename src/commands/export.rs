use crate::args::ExportArgs;
use crate::commands::Out;
use crate::export::{file_name, to_csv, EMPTY_EXPORT_NOTICE};
use crate::{utils, Config, Result};
use anyhow::Context;
use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::info;

/// Writes the ledger as CSV to `<dir>/<export_prefix>_<today>.csv`, where `dir` defaults to the
/// exports directory of the home. An empty ledger writes nothing and returns a notice.
pub async fn export(config: Config, args: ExportArgs, today: NaiveDate) -> Result<Out<PathBuf>> {
    let ledger = config.ledger()?;
    if ledger.is_empty() {
        return Ok(EMPTY_EXPORT_NOTICE.into());
    }

    let csv_data = to_csv(ledger.transactions())?;
    let dir = match args.dir() {
        Some(dir) => dir.to_path_buf(),
        None => config.exports().to_path_buf(),
    };
    utils::make_dir(&dir)
        .await
        .context("Unable to create the export directory")?;
    let path = dir.join(file_name(config.export_prefix(), today));
    utils::write(&path, csv_data).await?;
    info!("Exported {} transactions", ledger.len());

    Ok(Out::new(
        format!(
            "{} transaksi diekspor ke {}",
            ledger.len(),
            path.display()
        ),
        path,
    ))
}
