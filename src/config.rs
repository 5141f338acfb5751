//! Configuration management for the profile analyzer

use crate::analysis::aggregator::ScoreAggregator;
use crate::analysis::scorers::Category;
use crate::error::{ConfigurationError, ProfileAnalyzerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Full configuration surface of the engine. Every scoring threshold lives
/// here rather than in scorer bodies, so all of them can be overridden
/// without code changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Category weight table; must cover all six categories and sum to 1.0.
    pub weights: BTreeMap<Category, f64>,
    pub picture: PictureThresholds,
    pub about: AboutThresholds,
    pub experience: ExperienceThresholds,
    pub skills: SkillsThresholds,
    pub activity: ActivityThresholds,
    pub certifications: CertificationThresholds,
    pub suggestions: SuggestionConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PictureThresholds {
    /// Minimum acceptable length of the photo's shorter edge, in pixels.
    pub min_edge_px: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AboutThresholds {
    pub ideal_min_words: usize,
    pub ideal_max_words: usize,
    /// Unit tokens that turn a number into a quantified achievement marker.
    pub marker_units: Vec<String>,
    /// Generic filler phrases penalized when they appear in the about text.
    pub filler_phrases: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceThresholds {
    pub ideal_entries: usize,
    /// A most recent role that ended longer ago than this is stale.
    pub staleness_months: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillsThresholds {
    pub min_skills: usize,
    pub max_skills: usize,
    /// Endorsement coverage ratio below which an outreach suggestion fires.
    pub coverage_target: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityThresholds {
    pub target_posts: u32,
    pub target_comments: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificationThresholds {
    pub target_count: usize,
    pub freshness_years: i32,
    /// Relative weight of certifications older than the freshness window.
    pub stale_weight: f64,
    /// Fixed reference year for freshness checks; current UTC year if unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_year: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionConfig {
    /// Categories scoring below this contribute to the ranked improvements.
    pub needs_improvement_threshold: u8,
    pub max_items: usize,
    /// Headlines shorter than this trigger a cross-category improvement.
    pub min_headline_words: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            weights: BTreeMap::from([
                (Category::ProfilePicture, 0.10),
                (Category::AboutSection, 0.25),
                (Category::Experience, 0.25),
                (Category::Skills, 0.20),
                (Category::Activity, 0.15),
                (Category::Certifications, 0.05),
            ]),
            picture: PictureThresholds { min_edge_px: 400 },
            about: AboutThresholds {
                ideal_min_words: 80,
                ideal_max_words: 300,
                marker_units: vec![
                    "%", "percent", "users", "customers", "people", "team",
                    "engineers", "projects", "years", "x", "k", "m", "million",
                ]
                .into_iter()
                .map(String::from)
                .collect(),
                filler_phrases: vec![
                    "results-driven",
                    "hard-working",
                    "team player",
                    "go-getter",
                    "think outside the box",
                    "self-starter",
                    "detail-oriented",
                    "synergy",
                    "guru",
                    "ninja",
                    "rockstar",
                ]
                .into_iter()
                .map(String::from)
                .collect(),
            },
            experience: ExperienceThresholds {
                ideal_entries: 3,
                staleness_months: 24,
            },
            skills: SkillsThresholds {
                min_skills: 5,
                max_skills: 30,
                coverage_target: 0.5,
            },
            activity: ActivityThresholds {
                target_posts: 10,
                target_comments: 20,
            },
            certifications: CertificationThresholds {
                target_count: 3,
                freshness_years: 5,
                stale_weight: 0.5,
                reference_year: None,
            },
            suggestions: SuggestionConfig {
                needs_improvement_threshold: 80,
                max_items: 6,
                min_headline_words: 4,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
            },
        }
    }
}

impl AnalyzerConfig {
    /// Fail-fast configuration checks, run at engine construction so a bad
    /// weight table is caught before any profile is processed.
    pub fn validate(&self) -> std::result::Result<(), ConfigurationError> {
        ScoreAggregator::validate_weights(&self.weights)
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: AnalyzerConfig = toml::from_str(&content).map_err(|e| {
                ProfileAnalyzerError::Configuration(format!("Failed to parse config: {}", e))
            })?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            ProfileAnalyzerError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("profile-analyzer")
            .join("config.toml")
    }

    /// Return a copy with the dotted `key` (e.g. `about.ideal_min_words`)
    /// set to `value`, parsed to the type of the existing entry. Unknown
    /// keys and non-scalar targets are rejected rather than inserted.
    pub fn with_value(&self, key: &str, value: &str) -> Result<Self> {
        let mut root = toml::Value::try_from(self).map_err(|e| {
            ProfileAnalyzerError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        let parts: Vec<&str> = key.split('.').collect();
        let (last, prefix) = parts.split_last().ok_or_else(|| unknown_key(key))?;
        let mut cursor = &mut root;
        for part in prefix {
            let table = cursor.as_table_mut().ok_or_else(|| unknown_key(key))?;
            cursor = table.get_mut(*part).ok_or_else(|| unknown_key(key))?;
        }
        let table = cursor.as_table_mut().ok_or_else(|| unknown_key(key))?;
        let entry = table.get_mut(*last).ok_or_else(|| unknown_key(key))?;
        *entry = parse_scalar(value, entry, key)?;

        root.try_into().map_err(|e| {
            ProfileAnalyzerError::InvalidInput(format!("invalid value for {}: {}", key, e))
        })
    }
}

fn unknown_key(key: &str) -> ProfileAnalyzerError {
    ProfileAnalyzerError::InvalidInput(format!("unknown configuration key: {}", key))
}

fn parse_scalar(raw: &str, existing: &toml::Value, key: &str) -> Result<toml::Value> {
    let parsed = match existing {
        toml::Value::Integer(_) => raw.parse::<i64>().ok().map(toml::Value::Integer),
        toml::Value::Float(_) => raw.parse::<f64>().ok().map(toml::Value::Float),
        toml::Value::Boolean(_) => raw.parse::<bool>().ok().map(toml::Value::Boolean),
        toml::Value::String(_) => Some(toml::Value::String(raw.to_string())),
        _ => None,
    };

    parsed.ok_or_else(|| {
        ProfileAnalyzerError::InvalidInput(format!(
            "cannot set {} to '{}': type mismatch",
            key, raw
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        assert!(AnalyzerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_bad_weight_sum_is_rejected() {
        let mut config = AnalyzerConfig::default();
        config.weights.insert(Category::AboutSection, 0.15);

        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::WeightsDoNotSumToOne { .. })
        ));
    }

    #[test]
    fn test_missing_weight_is_rejected() {
        let mut config = AnalyzerConfig::default();
        config.weights.remove(&Category::Skills);

        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::MissingCategoryWeight(Category::Skills))
        ));
    }

    #[test]
    fn test_with_value_updates_nested_threshold() {
        let config = AnalyzerConfig::default();

        let updated = config.with_value("about.ideal_min_words", "120").unwrap();
        assert_eq!(updated.about.ideal_min_words, 120);

        let updated = config.with_value("skills.coverage_target", "0.75").unwrap();
        assert!((updated.skills.coverage_target - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_with_value_rejects_unknown_keys_and_bad_values() {
        let config = AnalyzerConfig::default();

        assert!(config.with_value("skills.nonexistent", "1").is_err());
        assert!(config.with_value("nonsense", "1").is_err());
        assert!(config
            .with_value("about.ideal_min_words", "not-a-number")
            .is_err());
    }

    #[test]
    fn test_with_value_weight_change_is_caught_by_validate() {
        let updated = AnalyzerConfig::default()
            .with_value("weights.about_section", "0.15")
            .unwrap();

        assert!(matches!(
            updated.validate(),
            Err(ConfigurationError::WeightsDoNotSumToOne { .. })
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AnalyzerConfig::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let restored: AnalyzerConfig = toml::from_str(&serialized).unwrap();

        assert_eq!(restored.weights, config.weights);
        assert_eq!(restored.about.ideal_min_words, config.about.ideal_min_words);
        assert_eq!(
            restored.suggestions.needs_improvement_threshold,
            config.suggestions.needs_improvement_threshold
        );
    }
}
