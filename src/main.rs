//! Profile analyzer: deterministic profile quality scoring CLI

use clap::Parser;
use log::{error, info};
use profile_analyzer::analysis::engine::AnalysisEngine;
use profile_analyzer::analysis::profile::Profile;
use profile_analyzer::cli::{self, Cli, Commands, ConfigAction, ManualProfileFile};
use profile_analyzer::config::AnalyzerConfig;
use profile_analyzer::error::{ProfileAnalyzerError, Result};
use profile_analyzer::input::collaborators::ProfilePayload;
use profile_analyzer::input::normalizer::{self, ProfileNormalizer, RawInput};
use profile_analyzer::output::formatter::ReportGenerator;
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .init();

    // Load configuration
    let config = match AnalyzerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: AnalyzerConfig) -> Result<()> {
    match command {
        Commands::Analyze {
            profile,
            manual,
            url,
            output,
            save,
            max_suggestions,
        } => {
            info!("Starting profile analysis");

            let output_format =
                cli::parse_output_format(&output).map_err(ProfileAnalyzerError::InvalidInput)?;

            if let Some(max_items) = max_suggestions {
                config.suggestions.max_items = max_items;
            }

            println!("🔍 Profile quality analysis");
            println!("🔧 Output Format: {:?}", output_format);

            let record = load_profile(profile, manual, url).await?;
            println!("👤 Profile: {}", display_name(&record));

            // Configuration errors surface here, before any scoring
            let engine = AnalysisEngine::new(config.clone())?;
            let report = engine.analyze(&record);

            let generator = ReportGenerator::new(config.output.color_output);
            let rendered = generator.format(output_format, &report)?;
            println!("\n{}", rendered);

            if let Some(path) = save {
                tokio::fs::write(&path, rendered.as_bytes()).await?;
                println!("💾 Report saved to {}", path.display());
            }

            println!(
                "✅ Analysis complete! Overall profile score: {}/100",
                report.overall_score
            );
        }

        Commands::Config { action } => match action {
            None | Some(ConfigAction::Show) => {
                let rendered = toml::to_string_pretty(&config).map_err(|e| {
                    ProfileAnalyzerError::Configuration(format!(
                        "Failed to serialize config: {}",
                        e
                    ))
                })?;
                println!("{}", rendered);
            }
            Some(ConfigAction::Reset) => {
                AnalyzerConfig::default().save()?;
                println!("✅ Configuration reset to defaults");
            }
            Some(ConfigAction::Set { key, value }) => {
                let updated = config.with_value(&key, &value)?;
                updated.validate()?;
                updated.save()?;
                println!("🔧 Set {} = {}", key, value);
            }
            Some(ConfigAction::Path) => {
                println!("{}", AnalyzerConfig::config_path().display());
            }
        },
    }

    Ok(())
}

/// Resolve the selected input shape into a canonical profile record.
async fn load_profile(
    profile: Option<PathBuf>,
    manual: Option<PathBuf>,
    url: Option<String>,
) -> Result<Profile> {
    let normalizer = ProfileNormalizer::unconfigured();

    if let Some(path) = profile {
        println!("📄 Profile export: {}", path.display());
        let text = tokio::fs::read_to_string(&path).await?;
        let payload: ProfilePayload = serde_json::from_str(&text)?;
        return Ok(normalizer::canonicalize(payload));
    }

    if let Some(path) = manual {
        println!("📝 Manual profile: {}", path.display());
        let text = tokio::fs::read_to_string(&path).await?;
        let fields: ManualProfileFile = toml::from_str(&text).map_err(|e| {
            ProfileAnalyzerError::InvalidInput(format!("Failed to parse manual profile: {}", e))
        })?;
        let record = normalizer
            .normalize(RawInput::ManualFields {
                name: fields.name,
                headline: fields.headline,
                about: fields.about,
                experience_text: fields.experience,
                skills_text: fields.skills,
            })
            .await?;
        return Ok(record);
    }

    if let Some(url) = url {
        println!("🌐 Profile URL: {}", url);
        let record = normalizer.normalize(RawInput::UrlRef { url }).await?;
        return Ok(record);
    }

    Err(ProfileAnalyzerError::InvalidInput(
        "provide a profile input: --profile, --manual, or --url".to_string(),
    ))
}

fn display_name(profile: &Profile) -> &str {
    if profile.name.is_empty() {
        "(unnamed)"
    } else {
        &profile.name
    }
}
