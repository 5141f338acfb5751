//! Analysis engine assembling the final report

use crate::analysis::aggregator::ScoreAggregator;
use crate::analysis::profile::Profile;
use crate::analysis::ranker::SuggestionRanker;
use crate::analysis::scorers::{Category, CategoryScore, ProfileScorer};
use crate::config::AnalyzerConfig;
use crate::error::ConfigurationError;
use chrono::Datelike;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use unicode_segmentation::UnicodeSegmentation;

/// The immutable result of one analysis run. A new run produces a new
/// report; nothing is mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub overall_score: u8,

    /// Always contains all six categories.
    pub categories: BTreeMap<Category, CategoryScore>,

    /// Ranked highest-impact first, capped at the configured maximum.
    pub improvements: Vec<String>,
}

/// Coordinates the scorers, aggregator and ranker over one validated
/// configuration.
///
/// `analyze` is a pure function of the profile: repeated calls on the same
/// engine return identical reports, and distinct profiles can be analyzed
/// concurrently because the engine holds no mutable state.
pub struct AnalysisEngine {
    scorer: ProfileScorer,
    aggregator: ScoreAggregator,
    ranker: SuggestionRanker,
    config: AnalyzerConfig,
}

impl AnalysisEngine {
    /// Validates the configuration and resolves the certification
    /// reference year once, so misconfiguration fails here rather than
    /// during analysis.
    pub fn new(config: AnalyzerConfig) -> std::result::Result<Self, ConfigurationError> {
        let aggregator = ScoreAggregator::new(config.weights.clone())?;
        let reference_year = config
            .certifications
            .reference_year
            .unwrap_or_else(|| chrono::Utc::now().year());
        let scorer = ProfileScorer::new(&config, reference_year);
        let ranker = SuggestionRanker::new(
            config.suggestions.needs_improvement_threshold,
            config.suggestions.max_items,
        );

        Ok(Self {
            scorer,
            aggregator,
            ranker,
            config,
        })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Score every category, aggregate the overall score, and rank the
    /// improvement list.
    pub fn analyze(&self, profile: &Profile) -> AnalysisReport {
        let categories = self.scorer.score_all(profile);
        debug!(
            "scored {} categories for '{}'",
            categories.len(),
            profile.name
        );

        let overall_score = self
            .aggregator
            .aggregate(&categories)
            .expect("score_all covers every category");

        let cross_category = self.cross_category_improvements(profile);
        let improvements = self.ranker.rank(&categories, &cross_category);
        debug!(
            "overall score {} with {} ranked improvements",
            overall_score,
            improvements.len()
        );

        AnalysisReport {
            overall_score,
            categories,
            improvements,
        }
    }

    /// Improvement items derived from profile-level signals no single
    /// category scorer owns.
    fn cross_category_improvements(&self, profile: &Profile) -> Vec<String> {
        let mut items = Vec::new();

        let headline_words = profile.headline.unicode_words().count();
        if headline_words < self.config.suggestions.min_headline_words {
            items.push(
                "Optimize your headline with keywords for your target role".to_string(),
            );
        }

        let quantified_anywhere = self.scorer.has_quantified_marker(&profile.about)
            || profile
                .experience
                .iter()
                .any(|entry| self.scorer.has_quantified_marker(&entry.description));
        if !quantified_anywhere {
            items.push("Add quantified achievements across your profile".to_string());
        }

        if !profile.experience.is_empty()
            && !profile.endorsements.values().any(|&count| count > 0)
        {
            items.push(
                "Ask former colleagues for recommendations and endorsements".to_string(),
            );
        }

        items
    }
}
