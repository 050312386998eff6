pub mod analysis;
mod api;
pub mod args;
pub mod commands;
mod config;
mod error;
pub mod export;
mod fs;
pub mod model;
pub mod report;
pub mod store;
mod utils;


pub use api::{Analyst, GeminiAnalyst, Mode, TestAnalyst};
pub use config::Config;
pub use error::Error;
pub use error::Result;
