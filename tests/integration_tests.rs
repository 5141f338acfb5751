//! Integration tests for the profile analyzer

use profile_analyzer::analysis::engine::AnalysisEngine;
use profile_analyzer::analysis::profile::{
    ActivitySignals, Certification, ExperienceEntry, PictureMeta, Profile,
};
use profile_analyzer::analysis::ranker::SuggestionRanker;
use profile_analyzer::analysis::scorers::{Category, CategoryScore};
use profile_analyzer::config::AnalyzerConfig;
use profile_analyzer::error::{ConfigurationError, NormalizationError};
use profile_analyzer::input::collaborators::{
    ProfileFetcher, ProfilePayload, SourceResult, UnconfiguredParser,
};
use profile_analyzer::input::normalizer::{ProfileNormalizer, RawInput};
use std::collections::BTreeMap;
use std::time::Duration;

fn fixed_year_config() -> AnalyzerConfig {
    let mut config = AnalyzerConfig::default();
    config.certifications.reference_year = Some(2025);
    config
}

fn strong_profile() -> Profile {
    let mut profile = Profile::empty();
    profile.name = "Ada Lovelace".to_string();
    profile.headline = "Staff Engineer building payment infrastructure".to_string();
    profile.about = "I lead distributed payments teams across three regions. \
        Cut processing costs by 30% and grew throughput to 2 million transactions \
        per day while keeping the on-call rotation sane. "
        .repeat(4);
    profile.experience = (0..5)
        .map(|i| ExperienceEntry {
            title: format!("Engineer {}", i + 1),
            company: "Acme".to_string(),
            description: format!("Improved pipeline throughput by {}%.", 10 * (i + 1)),
            duration_months: 24,
            months_since_end: i * 12,
        })
        .collect();
    profile.skills = (0..10).map(|i| format!("Skill{}", i)).collect();
    for skill in &profile.skills {
        profile.endorsements.insert(skill.to_lowercase(), 5);
    }
    profile.activity = ActivitySignals {
        posts_last_90_days: 20,
        comments_last_90_days: 20,
    };
    profile.certifications = (0..3)
        .map(|i| Certification {
            name: format!("Cert {}", i + 1),
            issuer: "Vendor".to_string(),
            year_obtained: 2024,
        })
        .collect();
    profile.picture = PictureMeta {
        present: true,
        resolution_px: Some((800, 800)),
    };
    profile
}

#[test]
fn test_analysis_is_deterministic() {
    let engine = AnalysisEngine::new(fixed_year_config()).unwrap();
    let profile = strong_profile();

    let first = engine.analyze(&profile);
    let second = engine.analyze(&profile);

    // full structural equality covers scores, feedback, and suggestion order
    assert_eq!(first, second);
}

#[test]
fn test_scores_stay_in_bounds_on_extreme_input() {
    let engine = AnalysisEngine::new(fixed_year_config()).unwrap();

    let mut profile = strong_profile();
    profile.skills = (0..500).map(|i| format!("s{}", i)).collect();
    for skill in &profile.skills {
        profile.endorsements.insert(skill.clone(), u32::MAX);
    }
    profile.activity = ActivitySignals {
        posts_last_90_days: u32::MAX,
        comments_last_90_days: u32::MAX,
    };

    let report = engine.analyze(&profile);

    assert!(report.overall_score <= 100);
    for (category, result) in &report.categories {
        assert!(result.score <= 100, "{} out of bounds", category);
    }
}

#[test]
fn test_empty_profile_floors_every_category() {
    let engine = AnalysisEngine::new(fixed_year_config()).unwrap();

    let report = engine.analyze(&Profile::empty());

    assert_eq!(report.overall_score, 0);
    assert_eq!(report.categories.len(), 6);
    for (category, result) in &report.categories {
        assert_eq!(result.score, 0, "floor for {}", category);
        assert!(!result.feedback.is_empty());
        assert!(
            !result.suggestions.is_empty(),
            "floor suggestions for {}",
            category
        );
    }
    assert!(!report.improvements.is_empty());
    assert!(report.improvements.len() <= 6);
}

#[test]
fn test_more_endorsements_never_lower_the_skills_score() {
    let engine = AnalysisEngine::new(fixed_year_config()).unwrap();
    let mut profile = strong_profile();
    profile.endorsements.clear();

    let mut last = engine.analyze(&profile).categories[&Category::Skills].score;
    for (i, skill) in profile.skills.clone().iter().enumerate() {
        profile
            .endorsements
            .insert(skill.to_lowercase(), (i as u32 + 1) * 7);
        let score = engine.analyze(&profile).categories[&Category::Skills].score;
        assert!(score >= last, "skills score dropped after endorsing {}", skill);
        last = score;
    }
}

#[test]
fn test_weights_summing_below_one_fail_at_construction() {
    let mut config = AnalyzerConfig::default();
    config.weights.insert(Category::AboutSection, 0.15);

    let err = AnalysisEngine::new(config).err().unwrap();

    assert!(matches!(
        err,
        ConfigurationError::WeightsDoNotSumToOne { sum } if (sum - 0.9).abs() < 1e-9
    ));
}

#[test]
fn test_ranking_surfaces_weakest_category_first() {
    let categories = BTreeMap::from([
        (
            Category::AboutSection,
            CategoryScore {
                score: 60,
                feedback: "thin".to_string(),
                suggestions: vec!["expand the about section".to_string()],
            },
        ),
        (
            Category::Skills,
            CategoryScore {
                score: 90,
                feedback: "strong".to_string(),
                suggestions: vec!["prune niche skills".to_string()],
            },
        ),
        (
            Category::Experience,
            CategoryScore {
                score: 40,
                feedback: "sparse".to_string(),
                suggestions: vec![
                    "add measurable results".to_string(),
                    "list your current role".to_string(),
                ],
            },
        ),
    ]);

    let ranked = SuggestionRanker::new(80, 6).rank(&categories, &[]);

    assert_eq!(
        ranked,
        vec![
            "add measurable results",
            "list your current role",
            "expand the about section",
        ]
    );
}

#[test]
fn test_empty_about_scores_zero_with_suggestions() {
    let engine = AnalysisEngine::new(fixed_year_config()).unwrap();
    let mut profile = strong_profile();
    profile.about = String::new();

    let report = engine.analyze(&profile);
    let about = &report.categories[&Category::AboutSection];

    assert_eq!(about.score, 0);
    assert!(about.feedback.contains("empty"));
    assert!(!about.suggestions.is_empty());
}

#[test]
fn test_strong_profile_lands_in_strong_band() {
    let engine = AnalysisEngine::new(fixed_year_config()).unwrap();

    let report = engine.analyze(&strong_profile());

    assert!(
        report.overall_score >= 80,
        "expected a strong overall score, got {}",
        report.overall_score
    );
}

#[test]
fn test_concurrent_analysis_matches_sequential() {
    let engine = AnalysisEngine::new(fixed_year_config()).unwrap();
    let profile = strong_profile();
    let sequential = engine.analyze(&profile);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| engine.analyze(&profile)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), sequential);
        }
    });
}

#[tokio::test]
async fn test_manual_input_flows_through_to_a_report() {
    let normalizer = ProfileNormalizer::unconfigured();
    let profile = normalizer
        .normalize(RawInput::ManualFields {
            name: "Ada".to_string(),
            headline: "Engineer".to_string(),
            about: "Shipped a billing platform serving 40000 users.".to_string(),
            experience_text: "Senior Engineer at Initech\nLed the billing rewrite, \
                              cutting invoice latency by 60%.\n\n\
                              Engineer at Initrode\nBuilt the reporting stack."
                .to_string(),
            skills_text: "Rust, SQL, rust, Kafka".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(profile.experience.len(), 2);
    assert_eq!(profile.experience[0].company, "Initech");
    assert_eq!(profile.skills, vec!["Rust", "SQL", "Kafka"]);

    let engine = AnalysisEngine::new(fixed_year_config()).unwrap();
    let report = engine.analyze(&profile);

    assert_eq!(report.categories.len(), 6);
    assert!(report.overall_score > 0);
}

#[tokio::test]
async fn test_unconfigured_sources_fail_with_typed_errors() {
    let normalizer = ProfileNormalizer::unconfigured();

    let url_result = normalizer
        .normalize(RawInput::UrlRef {
            url: "https://example.com/in/ada".to_string(),
        })
        .await;
    assert!(matches!(
        url_result,
        Err(NormalizationError::UnreachableSource(_))
    ));

    let doc_result = normalizer
        .normalize(RawInput::DocumentRef {
            bytes: b"%PDF-1.4".to_vec(),
            mime_type: "application/pdf".to_string(),
        })
        .await;
    assert!(matches!(
        doc_result,
        Err(NormalizationError::UnsupportedFormat(_))
    ));
}

#[tokio::test]
async fn test_slow_collaborator_hits_the_timeout() {
    struct StalledFetcher;

    impl ProfileFetcher for StalledFetcher {
        async fn fetch(&self, _url: &str) -> SourceResult<ProfilePayload> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(ProfilePayload::default())
        }
    }

    let normalizer = ProfileNormalizer::new(
        StalledFetcher,
        UnconfiguredParser,
        Duration::from_millis(20),
    );
    let result = normalizer
        .normalize(RawInput::UrlRef {
            url: "https://example.com/in/ada".to_string(),
        })
        .await;

    assert!(matches!(result, Err(NormalizationError::Timeout(_))));
}

#[test]
fn test_config_round_trips_through_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = AnalyzerConfig::default();
    config.suggestions.max_items = 9;
    config.about.ideal_min_words = 120;
    config.save_to(&path).unwrap();

    let restored = AnalyzerConfig::load_from(&path).unwrap();

    assert_eq!(restored.suggestions.max_items, 9);
    assert_eq!(restored.about.ideal_min_words, 120);
    assert_eq!(restored.weights, config.weights);
    assert!(restored.validate().is_ok());
}
