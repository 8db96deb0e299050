//! Declarative model manifest.
//!
//! The manifest is the TOML front-end to the assembler: people, software
//! systems with their nested containers and components, relationships by
//! path id, style rules, and views. The assembler walks it in a fixed
//! top-down order, so a manifest-driven run and a programmatic run share one
//! code path.
//!
//! # Example
//!
//! ```toml
//! [[people]]
//! name = "User"
//! description = "A customer of the platform."
//!
//! [[systems]]
//! name = "Platform"
//! description = "The product."
//!
//! [[systems.containers]]
//! name = "API"
//! technology = "Rust"
//!
//! [[relationships]]
//! source = "User"
//! destination = "Platform::API"
//! description = "Uses"
//!
//! [[views]]
//! kind = "container"
//! scope = "Platform"
//! title = "Platform containers"
//! include_all = true
//! ```

use std::{fs, path::Path};

use serde::Deserialize;

use armature_core::{style::StyleAttributes, view::ViewKind};

use crate::error::{ArmatureError, ManifestError};

/// A complete declarative model description.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub people: Vec<PersonManifest>,

    #[serde(default)]
    pub systems: Vec<SystemManifest>,

    #[serde(default)]
    pub relationships: Vec<RelationshipManifest>,

    #[serde(default)]
    pub styles: Vec<StyleManifest>,

    /// System-wide fallback style for elements no rule matches.
    #[serde(default)]
    pub default_style: Option<StyleAttributes>,

    #[serde(default)]
    pub views: Vec<ViewManifest>,
}

impl Manifest {
    /// Load a manifest from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::MissingFile`] when the path does not exist
    /// and [`ManifestError::Parse`] when the file is not valid manifest TOML,
    /// both wrapped in [`ArmatureError::Manifest`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArmatureError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ArmatureError::Manifest(ManifestError::MissingFile(
                path.to_path_buf(),
            )));
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a manifest from TOML source.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Parse`] wrapped in
    /// [`ArmatureError::Manifest`] on malformed TOML.
    pub fn parse(source: &str) -> Result<Self, ArmatureError> {
        let manifest: Manifest = toml::from_str(source)
            .map_err(ManifestError::from)
            .map_err(ArmatureError::Manifest)?;
        Ok(manifest)
    }
}

/// A root person.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PersonManifest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A root software system and its containers.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SystemManifest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub containers: Vec<ContainerManifest>,
}

/// A container and its components.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContainerManifest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technology: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub components: Vec<ComponentManifest>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentManifest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technology: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A directed edge between two elements, referenced by path id.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelationshipManifest {
    pub source: String,
    pub destination: String,
    pub description: String,
    #[serde(default)]
    pub technology: Option<String>,
}

/// One tag-keyed style rule.
// No deny_unknown_fields here: serde does not allow it next to flatten.
#[derive(Debug, Deserialize)]
pub struct StyleManifest {
    pub tag: String,
    #[serde(flatten)]
    pub attributes: StyleAttributes,
}

/// One diagram view.
///
/// `include` lists explicit element ids; the `include_*` switches auto-add
/// scope children, root people, and root systems respectively.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewManifest {
    pub kind: ViewKind,
    /// Scope element id; required for container and component views.
    #[serde(default)]
    pub scope: Option<String>,
    pub title: String,
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub include_all: bool,
    #[serde(default)]
    pub include_people: bool,
    #[serde(default)]
    pub include_systems: bool,
}
