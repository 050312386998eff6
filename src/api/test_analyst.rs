//! Implements the `Analyst` trait with a canned response for testing purposes.
//!
//! Note: this is compiled even in the "production" version of this app so that we can run the whole
//! app, top-to-bottom, without contacting the text-generation service.

use crate::analysis::AnalysisRequest;
use crate::api::Analyst;
use crate::Result;
use anyhow::anyhow;

/// The Markdown returned by a default `TestAnalyst`.
const CANNED_ANALYSIS: &str = "## Ringkasan Keuangan

- **Pola pengeluaran:** pengeluaran Anda cukup stabil dari hari ke hari.
- **Kategori paling boros:** periksa kategori dengan total pengeluaran terbesar.
- **Saran:** sisihkan sebagian pemasukan untuk tabungan di awal bulan.";

/// An implementation of `Analyst` that never leaves the process. It answers every request with
/// the same response and remembers the requests it received.
pub struct TestAnalyst {
    response: std::result::Result<String, String>,
    requests: Vec<AnalysisRequest>,
}

impl TestAnalyst {
    /// Answers with `Ok(text)`, or fails with the message in `Err`.
    pub fn new(response: std::result::Result<String, String>) -> Self {
        Self {
            response,
            requests: Vec::new(),
        }
    }

    /// The requests received so far, oldest first.
    pub fn requests(&self) -> &[AnalysisRequest] {
        &self.requests
    }
}

impl Default for TestAnalyst {
    fn default() -> Self {
        Self::new(Ok(CANNED_ANALYSIS.to_string()))
    }
}

#[async_trait::async_trait]
impl Analyst for TestAnalyst {
    async fn generate(&mut self, request: &AnalysisRequest) -> Result<String> {
        self.requests.push(request.clone());
        self.response.clone().map_err(|message| anyhow!(message))
    }
}
