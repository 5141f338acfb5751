//! Ranking of improvement suggestions by expected score impact

use crate::analysis::scorers::{Category, CategoryScore};
use std::collections::{BTreeMap, HashSet};

/// Sort key assigned to cross-category improvement items so they rank after
/// every sub-threshold category suggestion.
const CROSS_CATEGORY_RANK: u8 = 100;

/// Builds the ranked improvement list: suggestions from the weakest
/// categories surface first, because acting on them yields the largest
/// expected score lift.
pub struct SuggestionRanker {
    needs_improvement_threshold: u8,
    max_items: usize,
}

impl SuggestionRanker {
    pub fn new(needs_improvement_threshold: u8, max_items: usize) -> Self {
        Self {
            needs_improvement_threshold,
            max_items,
        }
    }

    /// Collect suggestions from every category scoring below the threshold,
    /// append the cross-category items, deduplicate by exact string match
    /// keeping the first occurrence, stable-sort ascending by source
    /// category score, and truncate.
    pub fn rank(
        &self,
        categories: &BTreeMap<Category, CategoryScore>,
        cross_category: &[String],
    ) -> Vec<String> {
        let mut tagged: Vec<(u8, String)> = Vec::new();

        for category in Category::ALL {
            if let Some(result) = categories.get(&category) {
                if result.score < self.needs_improvement_threshold {
                    for suggestion in &result.suggestions {
                        tagged.push((result.score, suggestion.clone()));
                    }
                }
            }
        }

        for item in cross_category {
            tagged.push((CROSS_CATEGORY_RANK, item.clone()));
        }

        let mut seen = HashSet::new();
        tagged.retain(|(_, suggestion)| seen.insert(suggestion.clone()));

        // sort_by_key is stable: declaration order and within-category
        // order survive ties
        tagged.sort_by_key(|&(score, _)| score);
        tagged.truncate(self.max_items);

        tagged.into_iter().map(|(_, suggestion)| suggestion).collect()
    }
}
