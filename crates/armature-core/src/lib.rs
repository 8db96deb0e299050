//! Armature Core Types and Registries
//!
//! This crate provides the foundational types for the armature
//! architecture-description model. It includes:
//!
//! - **Identifiers**: string-interned, path-qualified element ids ([`identifier::Id`])
//! - **Colors**: CSS color handling for style attributes ([`color::Color`])
//! - **Model**: element and relationship registries ([`model`] module)
//! - **Styles**: tag-keyed style rules and resolution ([`style`] module)
//! - **Views**: diagram view composition ([`view`] module)
//!
//! The registries are explicit objects with a lifecycle scoped to a single
//! assembly run. Construction is strictly sequential and top-down: elements
//! first, then relationships, then styles, then views. Once a run finishes,
//! the graph is never mutated again.

pub mod color;
pub mod error;
pub mod identifier;
pub mod model;
pub mod style;
pub mod view;

pub use error::ModelError;
