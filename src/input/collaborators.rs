//! Collaborator seams for external profile sources
//!
//! Fetching a profile page and parsing an uploaded export document are
//! outside the engine. The only contract with those collaborators is the
//! traits below: return a best-effort profile-shaped payload or a typed
//! error, within the normalizer's timeout.

use crate::analysis::profile::{
    ActivitySignals, Certification, ExperienceEntry, PictureMeta,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Profile-shaped payload returned by collaborators. Same fields as the
/// canonical record, but skills may still contain duplicates and
/// endorsement keys may carry arbitrary casing; the normalizer cleans both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfilePayload {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub headline: String,

    #[serde(default)]
    pub about: String,

    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,

    #[serde(default)]
    pub skills: Vec<String>,

    #[serde(default)]
    pub endorsements: BTreeMap<String, u32>,

    #[serde(default)]
    pub activity: ActivitySignals,

    #[serde(default)]
    pub certifications: Vec<Certification>,

    #[serde(default)]
    pub picture: PictureMeta,
}

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("source unreachable: {0}")]
    Unreachable(String),

    #[error("unsupported format: {0}")]
    Unsupported(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// Resolves a public profile URL into a payload.
pub trait ProfileFetcher {
    fn fetch(
        &self,
        url: &str,
    ) -> impl std::future::Future<Output = SourceResult<ProfilePayload>> + Send;
}

/// Parses an uploaded profile-export document into a payload.
pub trait DocumentParser {
    fn parse(
        &self,
        bytes: &[u8],
        mime_type: &str,
    ) -> impl std::future::Future<Output = SourceResult<ProfilePayload>> + Send;
}

/// Default fetcher used when no backend is wired in; always fails with a
/// typed unreachable error.
pub struct UnconfiguredFetcher;

impl ProfileFetcher for UnconfiguredFetcher {
    async fn fetch(&self, url: &str) -> SourceResult<ProfilePayload> {
        Err(SourceError::Unreachable(format!(
            "no profile fetcher configured for {}",
            url
        )))
    }
}

/// Default parser used when no backend is wired in; always fails with a
/// typed unsupported-format error.
pub struct UnconfiguredParser;

impl DocumentParser for UnconfiguredParser {
    async fn parse(&self, _bytes: &[u8], mime_type: &str) -> SourceResult<ProfilePayload> {
        Err(SourceError::Unsupported(format!(
            "no document parser configured for {}",
            mime_type
        )))
    }
}
