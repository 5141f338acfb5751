//! Normalization of raw inputs into the canonical profile record

use crate::analysis::profile::{ExperienceEntry, Profile};
use crate::error::NormalizationError;
use crate::input::collaborators::{
    DocumentParser, ProfileFetcher, ProfilePayload, SourceError, UnconfiguredFetcher,
    UnconfiguredParser,
};
use log::info;
use std::collections::BTreeMap;
use std::time::Duration;

/// Default bound on collaborator calls.
pub const DEFAULT_SOURCE_TIMEOUT: Duration = Duration::from_secs(10);

/// The three accepted input shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInput {
    UrlRef {
        url: String,
    },
    DocumentRef {
        bytes: Vec<u8>,
        mime_type: String,
    },
    ManualFields {
        name: String,
        headline: String,
        about: String,
        experience_text: String,
        skills_text: String,
    },
}

/// Converts any accepted input shape into one canonical `Profile`.
///
/// Manual fields are parsed locally; URL and document inputs delegate to
/// the collaborator seams, bounded by the configured timeout. A failed
/// normalization is surfaced verbatim, never replaced with a default
/// profile.
pub struct ProfileNormalizer<F, P> {
    fetcher: F,
    parser: P,
    timeout: Duration,
}

impl ProfileNormalizer<UnconfiguredFetcher, UnconfiguredParser> {
    /// Normalizer with no collaborator backends: manual input works, URL
    /// and document inputs fail with their typed errors.
    pub fn unconfigured() -> Self {
        Self::new(UnconfiguredFetcher, UnconfiguredParser, DEFAULT_SOURCE_TIMEOUT)
    }
}

impl<F: ProfileFetcher, P: DocumentParser> ProfileNormalizer<F, P> {
    pub fn new(fetcher: F, parser: P, timeout: Duration) -> Self {
        Self {
            fetcher,
            parser,
            timeout,
        }
    }

    pub async fn normalize(
        &self,
        input: RawInput,
    ) -> std::result::Result<Profile, NormalizationError> {
        match input {
            RawInput::ManualFields {
                name,
                headline,
                about,
                experience_text,
                skills_text,
            } => normalize_manual(&name, &headline, &about, &experience_text, &skills_text),

            RawInput::UrlRef { url } => {
                info!("resolving profile url through fetcher: {}", url);
                let payload = tokio::time::timeout(self.timeout, self.fetcher.fetch(&url))
                    .await
                    .map_err(|_| NormalizationError::Timeout(self.timeout))?
                    .map_err(|e| match e {
                        SourceError::Unsupported(msg) => {
                            NormalizationError::UnsupportedFormat(msg)
                        }
                        other => NormalizationError::UnreachableSource(other.to_string()),
                    })?;
                Ok(canonicalize(payload))
            }

            RawInput::DocumentRef { bytes, mime_type } => {
                info!(
                    "parsing {} byte document ({}) through parser",
                    bytes.len(),
                    mime_type
                );
                let payload =
                    tokio::time::timeout(self.timeout, self.parser.parse(&bytes, &mime_type))
                        .await
                        .map_err(|_| NormalizationError::Timeout(self.timeout))?
                        .map_err(|e| match e {
                            SourceError::Unreachable(msg) => {
                                NormalizationError::UnreachableSource(msg)
                            }
                            other => NormalizationError::UnsupportedFormat(other.to_string()),
                        })?;
                Ok(canonicalize(payload))
            }
        }
    }
}

/// Validate a collaborator payload and pass it through into the canonical
/// record: skills deduplicated case-insensitively, endorsement keys folded.
pub fn canonicalize(payload: ProfilePayload) -> Profile {
    let mut endorsements: BTreeMap<String, u32> = BTreeMap::new();
    for (skill, count) in payload.endorsements {
        *endorsements.entry(skill.to_lowercase()).or_insert(0) += count;
    }

    Profile {
        name: payload.name.trim().to_string(),
        headline: payload.headline.trim().to_string(),
        about: payload.about.trim().to_string(),
        experience: payload.experience,
        skills: Profile::dedup_skills(payload.skills),
        endorsements,
        activity: payload.activity,
        certifications: payload.certifications,
        picture: payload.picture,
    }
}

/// Parse manually entered form fields. Fails only when every field is
/// blank; partial input is normalized with defaults filling the rest.
pub fn normalize_manual(
    name: &str,
    headline: &str,
    about: &str,
    experience_text: &str,
    skills_text: &str,
) -> std::result::Result<Profile, NormalizationError> {
    let all_blank = [name, headline, about, experience_text, skills_text]
        .iter()
        .all(|field| field.trim().is_empty());
    if all_blank {
        return Err(NormalizationError::MalformedManualInput(
            "all fields are empty".to_string(),
        ));
    }

    Ok(Profile {
        name: name.trim().to_string(),
        headline: headline.trim().to_string(),
        about: about.trim().to_string(),
        experience: parse_experience_text(experience_text),
        skills: Profile::dedup_skills(skills_text.split(',').map(String::from)),
        ..Profile::default()
    })
}

/// Split free-text work history into entries on blank-line boundaries.
/// The first line of each entry is `"title at company"` when it contains
/// `" at "`, otherwise the whole line is the title with an empty company;
/// remaining lines become the description.
fn parse_experience_text(text: &str) -> Vec<ExperienceEntry> {
    let mut entries = Vec::new();
    let mut block: Vec<&str> = Vec::new();

    for line in text.lines().chain(std::iter::once("")) {
        if line.trim().is_empty() {
            if !block.is_empty() {
                entries.push(parse_experience_block(&block));
                block.clear();
            }
        } else {
            block.push(line.trim());
        }
    }

    entries
}

fn parse_experience_block(lines: &[&str]) -> ExperienceEntry {
    let first = lines[0];
    let (title, company) = match first.split_once(" at ") {
        Some((title, company)) => (title.trim(), company.trim()),
        None => (first, ""),
    };

    ExperienceEntry {
        title: title.to_string(),
        company: company.to_string(),
        description: lines[1..].join("\n"),
        ..ExperienceEntry::default()
    }
}
