use crate::analysis::{self, Analysis, DISCLAIMER, NO_DATA_MESSAGE};
use crate::api::{self, Mode};
use crate::args::AnalyzeArgs;
use crate::commands::Out;
use crate::{Config, Result};

/// Asks the text-generation service for an analysis of the ledger and returns its Markdown.
///
/// Only a missing API key is an error. An empty ledger, an empty response and a failed request
/// all produce a fixed message instead.
pub async fn analyze(config: Config, mode: Mode, args: AnalyzeArgs) -> Result<Out<Analysis>> {
    let ledger = config.ledger()?;
    if ledger.is_empty() {
        return Ok(Out::new(NO_DATA_MESSAGE, Analysis::NoData));
    }

    let mut analyst = api::analyst(&config, mode, args.api_key())?;
    let analysis =
        analysis::analyze(analyst.as_mut(), config.analysis_model(), ledger.transactions()).await;

    let message = if analysis.is_generated() {
        format!("{}\n\n_{DISCLAIMER}_", analysis.text())
    } else {
        analysis.text().to_string()
    };
    Ok(Out::new(message, analysis))
}
