//! Weighted aggregation of category scores into the overall score

use crate::analysis::scorers::{Category, CategoryScore};
use crate::error::ConfigurationError;
use std::collections::BTreeMap;

/// Tolerance for the weight-sum invariant check.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Combines the six category scores using a validated weight table.
///
/// Construction fails on a bad weight table, so misconfiguration is caught
/// before any profile is processed.
pub struct ScoreAggregator {
    weights: BTreeMap<Category, f64>,
}

impl ScoreAggregator {
    pub fn new(
        weights: BTreeMap<Category, f64>,
    ) -> std::result::Result<Self, ConfigurationError> {
        Self::validate_weights(&weights)?;
        Ok(Self { weights })
    }

    /// Checks that every category has a weight and that the weights sum to
    /// 1.0 within tolerance.
    pub fn validate_weights(
        weights: &BTreeMap<Category, f64>,
    ) -> std::result::Result<(), ConfigurationError> {
        for category in Category::ALL {
            if !weights.contains_key(&category) {
                return Err(ConfigurationError::MissingCategoryWeight(category));
            }
        }

        let sum: f64 = weights.values().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigurationError::WeightsDoNotSumToOne { sum });
        }

        Ok(())
    }

    /// Overall score = round(Σ weight·score). Fails fast when a category is
    /// missing from the input mapping rather than defaulting it.
    pub fn aggregate(
        &self,
        categories: &BTreeMap<Category, CategoryScore>,
    ) -> std::result::Result<u8, ConfigurationError> {
        let mut total = 0.0;

        for (&category, &weight) in &self.weights {
            let score = categories
                .get(&category)
                .ok_or(ConfigurationError::MissingCategoryScore(category))?;
            total += weight * f64::from(score.score);
        }

        Ok(total.round().clamp(0.0, 100.0) as u8)
    }
}
