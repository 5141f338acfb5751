//! CLI interface for the profile analyzer

use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "profile-analyzer")]
#[command(about = "Deterministic, explainable quality analysis for professional profiles")]
#[command(
    long_about = "Score a professional profile across six categories (picture, about, \
experience, skills, activity, certifications) and produce a ranked list of improvements"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a profile and print the scored report
    Analyze {
        /// Path to a profile JSON export (canonical fields)
        #[arg(short, long, conflicts_with_all = ["manual", "url"])]
        profile: Option<PathBuf>,

        /// Path to a TOML file with manually entered free-text fields
        #[arg(short, long, conflicts_with = "url")]
        manual: Option<PathBuf>,

        /// Public profile URL (requires a configured fetcher backend)
        #[arg(short, long)]
        url: Option<String>,

        /// Output format: console, json, markdown
        #[arg(short, long, default_value = "console")]
        output: String,

        /// Save the rendered report to a file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Cap the ranked improvement list
        #[arg(long)]
        max_suggestions: Option<usize>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "about.ideal_min_words")
        key: String,

        /// Configuration value
        value: String,
    },

    /// Print the configuration file path
    Path,
}

/// Manually entered profile fields, as read from a TOML file. Free-text
/// experience and skills are parsed by the normalizer.
#[derive(Debug, Default, Deserialize)]
pub struct ManualProfileFile {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub headline: String,

    #[serde(default)]
    pub about: String,

    #[serde(default)]
    pub experience: String,

    #[serde(default)]
    pub skills: String,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}
