//! Per-category scoring of a canonical profile
//!
//! Every scorer is a total function: any profile, including the all-empty
//! one, produces a score in 0..=100 with non-empty feedback. A score of 0
//! is returned only when the category has no usable signal at all, and the
//! floor case always carries at least one suggestion.

use crate::analysis::profile::Profile;
use crate::config::AnalyzerConfig;
use aho_corasick::AhoCorasick;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use unicode_segmentation::UnicodeSegmentation;

/// The closed set of assessment categories. Declaration order is the
/// tie-break order used when ranking suggestions, and the `Ord` derive
/// makes `BTreeMap<Category, _>` iterate in that same order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    ProfilePicture,
    AboutSection,
    Experience,
    Skills,
    Activity,
    Certifications,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::ProfilePicture,
        Category::AboutSection,
        Category::Experience,
        Category::Skills,
        Category::Activity,
        Category::Certifications,
    ];

    /// Stable identifier, matching the serialized report keys.
    pub fn as_key(&self) -> &'static str {
        match self {
            Category::ProfilePicture => "profile_picture",
            Category::AboutSection => "about_section",
            Category::Experience => "experience",
            Category::Skills => "skills",
            Category::Activity => "activity",
            Category::Certifications => "certifications",
        }
    }

    /// Human-readable label for rendered reports.
    pub fn label(&self) -> &'static str {
        match self {
            Category::ProfilePicture => "Profile Picture",
            Category::AboutSection => "About Section",
            Category::Experience => "Experience",
            Category::Skills => "Skills",
            Category::Activity => "Activity",
            Category::Certifications => "Certifications",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

/// Assessment of a single category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub score: u8,
    pub feedback: String,
    pub suggestions: Vec<String>,
}

/// Scores profiles against the configured thresholds.
///
/// The marker regex and filler matcher are compiled once at construction,
/// so scoring itself allocates only for feedback and suggestion strings.
pub struct ProfileScorer {
    config: AnalyzerConfig,
    marker_regex: Regex,
    filler_matcher: AhoCorasick,
    reference_year: i32,
}

impl ProfileScorer {
    pub fn new(config: &AnalyzerConfig, reference_year: i32) -> Self {
        let marker_regex = build_marker_regex(&config.about.marker_units);
        let filler_matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&config.about.filler_phrases)
            .expect("filler phrase patterns are plain literals");

        Self {
            config: config.clone(),
            marker_regex,
            filler_matcher,
            reference_year,
        }
    }

    /// Run every scorer over the profile. The result always contains all
    /// six categories.
    pub fn score_all(&self, profile: &Profile) -> BTreeMap<Category, CategoryScore> {
        Category::ALL
            .iter()
            .map(|&category| (category, self.score(category, profile)))
            .collect()
    }

    /// Fixed category-to-scorer dispatch; adding a category is a
    /// compile-time-checked change.
    pub fn score(&self, category: Category, profile: &Profile) -> CategoryScore {
        match category {
            Category::ProfilePicture => self.score_picture(profile),
            Category::AboutSection => self.score_about(profile),
            Category::Experience => self.score_experience(profile),
            Category::Skills => self.score_skills(profile),
            Category::Activity => self.score_activity(profile),
            Category::Certifications => self.score_certifications(profile),
        }
    }

    /// True when the text contains a quantified achievement marker, i.e. a
    /// number followed by one of the configured unit tokens.
    pub fn has_quantified_marker(&self, text: &str) -> bool {
        self.marker_regex.is_match(text)
    }

    /// Floor: 0 when no photo is present.
    fn score_picture(&self, profile: &Profile) -> CategoryScore {
        let min_edge = self.config.picture.min_edge_px;

        match (profile.picture.present, profile.picture.resolution_px) {
            (false, _) => CategoryScore {
                score: 0,
                feedback: "No profile photo is set.".to_string(),
                suggestions: vec!["Add a professional profile photo".to_string()],
            },
            (true, Some((w, h))) if w.min(h) < min_edge => CategoryScore {
                score: 55,
                feedback: format!("Profile photo present but small ({}x{}).", w, h),
                suggestions: vec![format!(
                    "Upload a higher-resolution photo (at least {0}x{0} pixels)",
                    min_edge
                )],
            },
            (true, Some((w, h))) => CategoryScore {
                score: 95,
                feedback: format!("Profile photo present at {}x{}.", w, h),
                suggestions: vec![],
            },
            (true, None) => CategoryScore {
                score: 70,
                feedback: "Profile photo present but its resolution is unknown.".to_string(),
                suggestions: vec![format!(
                    "Verify your photo is at least {0}x{0} pixels",
                    min_edge
                )],
            },
        }
    }

    /// Floor: 0 when the about text is empty. Components: length in words
    /// (40), quantified achievement markers (35), absence of filler (25).
    fn score_about(&self, profile: &Profile) -> CategoryScore {
        let thresholds = &self.config.about;
        let text = profile.about.trim();

        if text.is_empty() {
            return CategoryScore {
                score: 0,
                feedback: "The about section is empty.".to_string(),
                suggestions: vec![
                    "Write an about section summarizing your experience and goals".to_string(),
                    "Include quantified achievements to make the summary concrete".to_string(),
                ],
            };
        }

        let words = text.unicode_words().count();
        let mut suggestions = Vec::new();

        let length_points = if words < thresholds.ideal_min_words {
            suggestions.push(format!(
                "Expand your about section to at least {} words",
                thresholds.ideal_min_words
            ));
            (40.0 * words as f64 / thresholds.ideal_min_words as f64).round() as u32
        } else if words > thresholds.ideal_max_words {
            suggestions.push(format!(
                "Tighten your about section to under {} words",
                thresholds.ideal_max_words
            ));
            25
        } else {
            40
        };

        let has_markers = self.marker_regex.is_match(text);
        let marker_points = if has_markers {
            35
        } else {
            suggestions.push(
                "Add quantified achievements (numbers, percentages, team sizes)".to_string(),
            );
            0
        };

        let filler_hits = self.distinct_filler_phrases(text);
        let filler_points = 25u32.saturating_sub(8 * filler_hits.len() as u32);
        if let Some(first) = filler_hits.first() {
            suggestions.push(format!(
                "Replace generic phrases like \"{}\" with concrete accomplishments",
                first
            ));
        }

        let feedback = format!(
            "About section has {} words{}{}.",
            words,
            if has_markers {
                " with quantified achievements"
            } else {
                ", no quantified achievements"
            },
            if filler_hits.is_empty() {
                ""
            } else {
                " and some generic filler"
            },
        );

        CategoryScore {
            score: clamp_score(length_points + marker_points + filler_points),
            feedback,
            suggestions,
        }
    }

    /// Floor: 0 when no entries. Components: entry count (40), quantified
    /// results per entry (40), recency of the most recent role (20).
    fn score_experience(&self, profile: &Profile) -> CategoryScore {
        let thresholds = &self.config.experience;

        if profile.experience.is_empty() {
            return CategoryScore {
                score: 0,
                feedback: "No work experience listed.".to_string(),
                suggestions: vec![
                    "Add your work history with measurable results".to_string(),
                ],
            };
        }

        let entries = profile.experience.len();
        let mut suggestions = Vec::new();

        let count_points = if entries >= thresholds.ideal_entries {
            40
        } else {
            suggestions.push(format!(
                "List at least {} roles to show career progression",
                thresholds.ideal_entries
            ));
            (40.0 * entries as f64 / thresholds.ideal_entries as f64).round() as u32
        };

        let quantified = profile
            .experience
            .iter()
            .filter(|entry| self.marker_regex.is_match(&entry.description))
            .count();
        let quantified_points = (40.0 * quantified as f64 / entries as f64).round() as u32;
        if quantified < entries {
            suggestions.push("Add a quantified result to every role description".to_string());
        }

        // experience is ordered most recent first
        let gap_months = profile.experience[0].months_since_end;
        let recency_points = if gap_months <= thresholds.staleness_months {
            20
        } else {
            suggestions.push("Add your current or most recent position".to_string());
            8
        };

        CategoryScore {
            score: clamp_score(count_points + quantified_points + recency_points),
            feedback: format!(
                "{} roles listed; {} of {} include quantified results.",
                entries, quantified, entries
            ),
            suggestions,
        }
    }

    /// Floor: 0 when no skills. Components: skill count against the target
    /// band (50), endorsement coverage ratio (50). Monotonic non-decreasing
    /// in endorsement counts.
    fn score_skills(&self, profile: &Profile) -> CategoryScore {
        let thresholds = &self.config.skills;

        if profile.skills.is_empty() {
            return CategoryScore {
                score: 0,
                feedback: "No skills listed.".to_string(),
                suggestions: vec![
                    "Add your core skills so connections can endorse them".to_string(),
                ],
            };
        }

        let total = profile.skills.len();
        let mut suggestions = Vec::new();

        let count_points = if total < thresholds.min_skills {
            suggestions.push(format!(
                "Add more skills (aim for {} to {})",
                thresholds.min_skills, thresholds.max_skills
            ));
            (50.0 * total as f64 / thresholds.min_skills as f64).round() as u32
        } else if total > thresholds.max_skills {
            suggestions.push(format!(
                "Prune your skill list to the {} most relevant",
                thresholds.max_skills
            ));
            40
        } else {
            50
        };

        let endorsed = profile
            .skills
            .iter()
            .filter(|skill| profile.endorsement_count(skill) > 0)
            .count();
        let coverage = endorsed as f64 / total as f64;
        let coverage_points = (50.0 * coverage).round() as u32;
        if coverage < thresholds.coverage_target {
            suggestions.push("Ask colleagues to endorse your key skills".to_string());
        }

        CategoryScore {
            score: clamp_score(count_points + coverage_points),
            feedback: format!("{} skills listed, {} endorsed.", total, endorsed),
            suggestions,
        }
    }

    /// Floor: 0 when both activity signals are zero. Monotonic
    /// non-decreasing in posts and comments.
    fn score_activity(&self, profile: &Profile) -> CategoryScore {
        let thresholds = &self.config.activity;
        let posts = profile.activity.posts_last_90_days;
        let comments = profile.activity.comments_last_90_days;

        if posts == 0 && comments == 0 {
            return CategoryScore {
                score: 0,
                feedback: "No posts or comments in the last 90 days.".to_string(),
                suggestions: vec![
                    "Share a post to start building visibility".to_string(),
                    "Comment on posts in your field".to_string(),
                ],
            };
        }

        let mut suggestions = Vec::new();

        let post_points = capped_ratio_points(posts, thresholds.target_posts, 60.0);
        if posts < thresholds.target_posts {
            suggestions.push(format!(
                "Post more consistently (aim for {} posts per quarter)",
                thresholds.target_posts
            ));
        }

        let comment_points = capped_ratio_points(comments, thresholds.target_comments, 40.0);
        if comments < thresholds.target_comments {
            suggestions.push("Engage with others' content through comments".to_string());
        }

        CategoryScore {
            score: clamp_score(post_points + comment_points),
            feedback: format!(
                "{} posts and {} comments in the last 90 days.",
                posts, comments
            ),
            suggestions,
        }
    }

    /// Floor: 0 when no certifications. Fresh certifications count fully,
    /// older ones at the configured reduced weight.
    fn score_certifications(&self, profile: &Profile) -> CategoryScore {
        let thresholds = &self.config.certifications;

        if profile.certifications.is_empty() {
            return CategoryScore {
                score: 0,
                feedback: "No certifications listed.".to_string(),
                suggestions: vec![
                    "Add certifications that back up your core skills".to_string(),
                ],
            };
        }

        let cutoff = self.reference_year - thresholds.freshness_years;
        let fresh = profile
            .certifications
            .iter()
            .filter(|cert| cert.year_obtained >= cutoff)
            .count();
        let stale = profile.certifications.len() - fresh;
        let effective = fresh as f64 + stale as f64 * thresholds.stale_weight;

        let score = if thresholds.target_count == 0 {
            100
        } else {
            (100.0 * (effective / thresholds.target_count as f64).min(1.0)).round() as u32
        };

        let mut suggestions = Vec::new();
        if effective < thresholds.target_count as f64 {
            suggestions.push(format!(
                "Work toward {} current certifications",
                thresholds.target_count
            ));
        }
        if stale > 0 {
            suggestions.push(format!(
                "Renew or replace certifications older than {} years",
                thresholds.freshness_years
            ));
        }

        CategoryScore {
            score: clamp_score(score),
            feedback: format!(
                "{} certifications, {} obtained in the last {} years.",
                profile.certifications.len(),
                fresh,
                thresholds.freshness_years
            ),
            suggestions,
        }
    }

    /// Distinct filler phrases found in the text, in pattern order.
    fn distinct_filler_phrases(&self, text: &str) -> Vec<String> {
        let hits: BTreeSet<usize> = self
            .filler_matcher
            .find_iter(text)
            .map(|m| m.pattern().as_usize())
            .collect();

        hits.into_iter()
            .map(|id| self.config.about.filler_phrases[id].clone())
            .collect()
    }
}

fn clamp_score(points: u32) -> u8 {
    points.min(100) as u8
}

/// `max_points * min(value, target) / target`, full points when the target
/// is zero. Monotonic non-decreasing in `value`.
fn capped_ratio_points(value: u32, target: u32, max_points: f64) -> u32 {
    if target == 0 {
        return max_points.round() as u32;
    }
    (max_points * value.min(target) as f64 / target as f64).round() as u32
}

/// Compile the quantified-marker regex from the configured unit tokens:
/// a currency-prefixed number, or a number followed by a unit.
fn build_marker_regex(units: &[String]) -> Regex {
    let alternatives: Vec<String> = units
        .iter()
        .map(|unit| {
            let escaped = regex::escape(unit);
            if unit
                .chars()
                .last()
                .map(|c| c.is_alphanumeric())
                .unwrap_or(false)
            {
                format!("{}\\b", escaped)
            } else {
                escaped
            }
        })
        .collect();

    let pattern = format!(
        r"(?i)(?:[$€£]\s*\d+(?:[.,]\d+)?|\b\d+(?:[.,]\d+)?\+?\s*(?:{}))",
        alternatives.join("|")
    );

    Regex::new(&pattern).expect("marker units are escaped literals")
}
