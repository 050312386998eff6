//! Natural-language analysis of the ledger by an external text-generation service.
//!
//! The ledger is reduced to a compact projection, embedded as JSON in an Indonesian prompt and
//! submitted once. There are no retries. Whatever happens, the caller gets an `Analysis` whose
//! `text()` can be shown to the user.

use crate::api::Analyst;
use crate::model::{Amount, Transaction};
use crate::Result;
use anyhow::Context;
use serde::Serialize;
use tracing::{debug, error};

/// Fixes the persona and response language of the service.
pub const SYSTEM_INSTRUCTION: &str =
    "You are a helpful financial advisor utilizing Indonesian language.";

pub const NO_DATA_MESSAGE: &str = "Belum ada data transaksi untuk dianalisis. Silakan tambahkan \
pemasukan dan pengeluaran Anda terlebih dahulu.";

pub const EMPTY_RESPONSE_MESSAGE: &str = "Maaf, saya tidak dapat menghasilkan analisis saat ini.";

pub const FAILURE_MESSAGE: &str = "Terjadi kesalahan saat menghubungi layanan AI. Pastikan kunci \
API Anda valid atau coba lagi nanti.";

/// Shown after a generated analysis.
pub const DISCLAIMER: &str = "Analisis ini dihasilkan oleh AI dan hanya bersifat saran. Selalu \
konsultasikan keputusan finansial penting dengan profesional.";

/// The outcome of an analysis request.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "text", rename_all = "snake_case")]
pub enum Analysis {
    /// The ledger was empty; the service was not contacted.
    NoData,
    /// The text returned by the service, verbatim.
    Generated(String),
    /// The service answered without any text.
    Empty,
    /// The request failed. Holds the reason for diagnostics, never shown as the analysis.
    Failed(String),
}

impl Analysis {
    /// The text to present to the user.
    pub fn text(&self) -> &str {
        match self {
            Analysis::NoData => NO_DATA_MESSAGE,
            Analysis::Generated(text) => text,
            Analysis::Empty => EMPTY_RESPONSE_MESSAGE,
            Analysis::Failed(_) => FAILURE_MESSAGE,
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, Analysis::Generated(_))
    }
}

/// Everything the service needs for one request.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct AnalysisRequest {
    pub model: String,
    pub system_instruction: String,
    pub prompt: String,
}

/// The compact projection of one transaction sent to the service.
#[derive(Debug, Clone, Serialize)]
struct CompactTransaction<'a> {
    /// Date only, `YYYY-MM-DD`.
    d: String,
    /// `IN` or `OUT`.
    t: &'static str,
    a: Amount,
    c: &'a str,
    desc: &'a str,
}

impl<'a> From<&'a Transaction> for CompactTransaction<'a> {
    fn from(t: &'a Transaction) -> Self {
        Self {
            d: t.day().format("%Y-%m-%d").to_string(),
            t: t.transaction_type().code(),
            a: t.amount(),
            c: t.category(),
            desc: t.description(),
        }
    }
}

/// Builds the prompt embedding the compact projection of `transactions` as JSON.
pub fn build_prompt(transactions: &[Transaction]) -> Result<String> {
    let compact: Vec<CompactTransaction<'_>> = transactions.iter().map(Into::into).collect();
    let data = serde_json::to_string(&compact).context("Unable to serialize transactions")?;
    Ok(format!(
        "Anda adalah asisten keuangan pribadi yang cerdas. Berikut adalah data transaksi keuangan \
saya dalam format JSON (d=date, t=type (IN/OUT), a=amount, c=category, desc=description):

{data}

Tolong berikan analisis singkat dan bermanfaat dalam Bahasa Indonesia mengenai:
1. Pola pengeluaran saya.
2. Kategori mana yang paling boros.
3. Saran praktis untuk berhemat atau memperbaiki kesehatan keuangan saya.
4. Nada bicara harus suportif, profesional, tapi santai.

Gunakan format Markdown untuk outputnya. Buat poin-poin agar mudah dibaca."
    ))
}

/// Requests an analysis of `transactions` from `analyst` using `model`.
///
/// An empty ledger yields `Analysis::NoData` without contacting the service. Failures are
/// logged and yield `Analysis::Failed`.
pub async fn analyze(
    analyst: &mut (dyn Analyst + Send),
    model: &str,
    transactions: &[Transaction],
) -> Analysis {
    if transactions.is_empty() {
        debug!("No transactions, skipping the analysis request");
        return Analysis::NoData;
    }

    let prompt = match build_prompt(transactions) {
        Ok(prompt) => prompt,
        Err(e) => {
            error!("Error building the analysis prompt: {e:#}");
            return Analysis::Failed(format!("{e:#}"));
        }
    };
    let request = AnalysisRequest {
        model: model.to_string(),
        system_instruction: SYSTEM_INSTRUCTION.to_string(),
        prompt,
    };
    debug!(
        "Requesting analysis of {} transactions from {model}",
        transactions.len()
    );

    match analyst.generate(&request).await {
        Ok(text) if text.trim().is_empty() => Analysis::Empty,
        Ok(text) => Analysis::Generated(text),
        Err(e) => {
            error!("Error generating analysis: {e:#}");
            Analysis::Failed(format!("{e:#}"))
        }
    }
}
