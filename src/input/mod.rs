//! Input boundary module
//! Handles raw input shapes, collaborator seams, and normalization into
//! the canonical profile record

pub mod collaborators;
pub mod normalizer;
