//! Error types for armature operations.
//!
//! This module provides the main error type [`ArmatureError`] which wraps the
//! structural model errors from `armature-core` together with the I/O,
//! decoding, and publishing failures of the surrounding pipeline.

use std::{io, path::PathBuf};

use thiserror::Error;

use armature_core::ModelError;

use crate::publish::PublishError;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {0}")]
    MissingFile(PathBuf),

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Manifest loading errors.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("manifest file not found: {0}")]
    MissingFile(PathBuf),

    #[error("invalid manifest: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("view {title:?} needs a scope element")]
    MissingScope { title: String },
}

/// The main error type for armature operations.
///
/// Structural errors (`Model`) are fatal to the assembly run: they indicate
/// an inconsistent model description and abort before anything is published.
/// `Publish` is the only externally-caused condition and is surfaced to the
/// caller for retry or inspection.
#[derive(Debug, Error)]
pub enum ArmatureError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("document serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("publish failed: {0}")]
    Publish(#[from] PublishError),
}
