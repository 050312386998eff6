//! The seam between fintrack and the external text-generation service.
//!
//! `Analyst` is implemented by `GeminiAnalyst`, which talks to the Gemini REST API, and by
//! `TestAnalyst`, which answers from memory. `Mode` decides which one the program uses.

mod gemini;
mod test_analyst;

use crate::analysis::AnalysisRequest;
use crate::{Config, Result};
use anyhow::{ensure, Context};
use tracing::debug;

pub use gemini::GeminiAnalyst;
pub use test_analyst::TestAnalyst;

/// The environment variable that, when non-empty, switches the program to `Mode::Testing`.
pub const TEST_MODE_ENV: &str = "FINTRACK_IN_TEST_MODE";

/// Generates free-form text for an `AnalysisRequest`.
#[async_trait::async_trait]
pub trait Analyst {
    /// Sends `request` and returns the generated text, which may be empty.
    async fn generate(&mut self, request: &AnalysisRequest) -> Result<String>;
}

/// Whether the program talks to the real service or to an in-memory stand-in.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub enum Mode {
    #[default]
    Live,
    Testing,
}

impl Mode {
    /// `Mode::Testing` if `FINTRACK_IN_TEST_MODE` is set and non-empty, otherwise `Mode::Live`.
    pub fn from_env() -> Self {
        match std::env::var(TEST_MODE_ENV) {
            Ok(value) if !value.is_empty() => Mode::Testing,
            _ => Mode::Live,
        }
    }
}

/// Creates the `Analyst` for `mode`. The live analyst requires an API key.
pub fn analyst(
    config: &Config,
    mode: Mode,
    api_key: Option<&str>,
) -> Result<Box<dyn Analyst + Send>> {
    match mode {
        Mode::Testing => {
            debug!("Using the in-memory analyst");
            Ok(Box::new(TestAnalyst::default()))
        }
        Mode::Live => {
            let api_key = api_key
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .context("An API key is required, pass --api-key or set GEMINI_API_KEY")?;
            ensure!(
                !config.analysis_model().trim().is_empty(),
                "No analysis model is configured"
            );
            Ok(Box::new(GeminiAnalyst::new(
                config.analysis_endpoint().clone(),
                api_key,
            )?))
        }
    }
}
