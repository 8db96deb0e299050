//! Structural error types for the model graph.
//!
//! Every variant here is fatal to the current assembly run: it signals an
//! inconsistent model description, and a partially wired graph would publish
//! a misleading diagram. Callers abort the run instead of recovering.

use thiserror::Error;

use crate::{identifier::Id, model::ElementKind, view::ViewKind};

/// Errors raised while building the model graph.
#[derive(Debug, Error)]
pub enum ModelError {
    /// An element with the same name already exists in the target scope.
    #[error("duplicate {kind} {name:?} {}", scope_phrase(.parent))]
    DuplicateName {
        kind: ElementKind,
        name: String,
        parent: Option<Id>,
    },

    /// The parent element cannot own a child of the requested kind.
    #[error("a {child} cannot be registered under a {parent}")]
    InvalidParent {
        parent: ElementKind,
        child: ElementKind,
    },

    /// An id does not resolve to a registered element.
    #[error("unknown element {id}")]
    UnknownElement { id: Id },

    /// The exact (source, destination, description) triple was linked before.
    #[error("duplicate relationship {source} -> {destination} ({description:?})")]
    DuplicateRelationship {
        source: Id,
        destination: Id,
        description: String,
    },

    /// No style rule matches the element and no default style is registered.
    #[error("no style rule matches {id} and no default style is registered")]
    NoDefaultStyle { id: Id },

    /// A view was scoped to an element of the wrong kind.
    #[error("a {view} view cannot be scoped to the {scope} {id}")]
    InvalidScope {
        view: ViewKind,
        scope: ElementKind,
        id: Id,
    },
}

fn scope_phrase(parent: &Option<Id>) -> String {
    match parent {
        Some(parent) => format!("under {parent}"),
        None => "at the root scope".to_string(),
    }
}
