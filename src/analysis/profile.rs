//! Canonical profile record shared by all scorers

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The canonical, normalized representation of a professional profile.
///
/// Immutable once produced by normalization. Every field has a defined
/// default, so an all-default record (`Profile::empty()`) is valid input
/// for every scorer and no scorer needs to null-check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub headline: String,

    #[serde(default)]
    pub about: String,

    /// Work history ordered most recent first.
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,

    /// Deduplicated case-insensitively; original casing of the first
    /// occurrence is retained for display.
    #[serde(default)]
    pub skills: Vec<String>,

    /// Endorsement counts keyed by case-folded skill name.
    #[serde(default)]
    pub endorsements: BTreeMap<String, u32>,

    #[serde(default)]
    pub activity: ActivitySignals,

    /// Ordered most recent first.
    #[serde(default)]
    pub certifications: Vec<Certification>,

    #[serde(default)]
    pub picture: PictureMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub company: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub duration_months: u32,

    /// Months elapsed since the role ended; 0 means a current role.
    #[serde(default)]
    pub months_since_end: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivitySignals {
    #[serde(default)]
    pub posts_last_90_days: u32,

    #[serde(default)]
    pub comments_last_90_days: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub issuer: String,

    #[serde(default)]
    pub year_obtained: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PictureMeta {
    #[serde(default)]
    pub present: bool,

    /// (width, height) in pixels when known.
    #[serde(default)]
    pub resolution_px: Option<(u32, u32)>,
}

impl Profile {
    /// The all-default profile: every scorer must return its documented
    /// floor for this record.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Endorsement count for a skill, matched case-insensitively.
    pub fn endorsement_count(&self, skill: &str) -> u32 {
        self.endorsements
            .get(&skill.to_lowercase())
            .copied()
            .unwrap_or(0)
    }

    /// Append skills, deduplicating case-insensitively while keeping the
    /// casing of the first occurrence.
    pub fn dedup_skills(raw: impl IntoIterator<Item = String>) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        let mut skills = Vec::new();
        for skill in raw {
            let trimmed = skill.trim();
            if trimmed.is_empty() {
                continue;
            }
            if seen.insert(trimmed.to_lowercase()) {
                skills.push(trimmed.to_string());
            }
        }
        skills
    }
}
