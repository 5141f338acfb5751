//! Profile analyzer library

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;

pub use analysis::engine::{AnalysisEngine, AnalysisReport};
pub use config::AnalyzerConfig;
pub use error::{ProfileAnalyzerError, Result};
