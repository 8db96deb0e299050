//! The finished model graph.

use armature_core::{
    model::{ElementRegistry, RelationshipRegistry},
    style::StyleResolver,
    view::FinalizedView,
};

/// A fully assembled, immutable model graph.
///
/// Produced by one assembly pass; nothing mutates it afterwards, so the
/// registries are only reachable by reference. Publishing the same model
/// twice produces the same document.
#[derive(Debug)]
pub struct AssembledModel {
    elements: ElementRegistry,
    relationships: RelationshipRegistry,
    styles: StyleResolver,
    views: Vec<FinalizedView>,
}

impl AssembledModel {
    pub(crate) fn new(
        elements: ElementRegistry,
        relationships: RelationshipRegistry,
        styles: StyleResolver,
        views: Vec<FinalizedView>,
    ) -> Self {
        AssembledModel {
            elements,
            relationships,
            styles,
            views,
        }
    }

    pub fn elements(&self) -> &ElementRegistry {
        &self.elements
    }

    pub fn relationships(&self) -> &RelationshipRegistry {
        &self.relationships
    }

    pub fn styles(&self) -> &StyleResolver {
        &self.styles
    }

    /// Finalized views in creation order.
    pub fn views(&self) -> &[FinalizedView] {
        &self.views
    }
}
