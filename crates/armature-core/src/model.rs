//! Architecture model registries.
//!
//! This module contains the two registries that own the model graph:
//!
//! - [`ElementRegistry`] owns every node (people, software systems,
//!   containers, components) and enforces identity and naming rules.
//! - [`RelationshipRegistry`] owns every directed, labeled edge and validates
//!   endpoints against the element registry.
//!
//! # Pipeline Position
//!
//! ```text
//! Manifest / programmatic calls
//!     ↓ registration (top-down)
//! ElementRegistry - nodes with stable path ids
//!     ↓ linking (any level)
//! RelationshipRegistry - validated, deduplicated edges
//!     ↓ styles + views
//! StyleResolver / ViewComposer
//!     ↓ serialization
//! Document
//! ```

mod element;
mod relationship;

pub use element::*;
pub use relationship::*;
