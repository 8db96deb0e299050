//! Serialized document types.
//!
//! The document is the vendor-neutral wire form of a finished model: flat
//! element and relationship lists, the style rules, and the finalized views.
//! Field names follow the publishing service's camelCase convention and
//! round-trip through JSON.

use serde::Serialize;

use armature_core::{
    identifier::Id,
    model::ElementKind,
    style::StyleAttributes,
    view::ViewKind,
};

use crate::{assembled::AssembledModel, config::WorkspaceConfig};

/// The complete serialized model handed to the publisher.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub workspace: WorkspaceRecord,
    pub elements: Vec<ElementRecord>,
    pub relationships: Vec<RelationshipRecord>,
    pub styles: Vec<StyleRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_style: Option<StyleAttributes>,
    pub views: Vec<ViewRecord>,
}

/// Workspace identity header.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceRecord {
    pub id: u64,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementRecord {
    pub id: Id,
    pub kind: ElementKind,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technology: Option<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Id>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipRecord {
    pub id: usize,
    pub source_id: Id,
    pub destination_id: Id,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technology: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleRecord {
    pub tag: String,
    #[serde(flatten)]
    pub attributes: StyleAttributes,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewRecord {
    pub kind: ViewKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope_id: Option<Id>,
    pub title: String,
    pub element_ids: Vec<Id>,
    pub relationship_ids: Vec<usize>,
}

impl Document {
    /// Builds the wire form of a finished model.
    ///
    /// Every list preserves the model's registration order, so serializing
    /// the same model twice yields byte-identical output.
    pub fn new(config: &WorkspaceConfig, model: &AssembledModel) -> Self {
        let elements = model
            .elements()
            .iter()
            .map(|element| ElementRecord {
                id: element.id(),
                kind: element.kind(),
                name: element.name().to_string(),
                description: element.description().to_string(),
                technology: element.technology().map(str::to_string),
                tags: element.tags().to_vec(),
                parent_id: element.parent(),
            })
            .collect();

        let relationships = model
            .relationships()
            .iter()
            .map(|relationship| RelationshipRecord {
                id: relationship.id(),
                source_id: relationship.source(),
                destination_id: relationship.destination(),
                description: relationship.description().to_string(),
                technology: relationship.technology().map(str::to_string),
            })
            .collect();

        let styles = model
            .styles()
            .iter()
            .map(|(tag, attributes)| StyleRecord {
                tag: tag.to_string(),
                attributes: attributes.clone(),
            })
            .collect();

        let views = model
            .views()
            .iter()
            .map(|view| ViewRecord {
                kind: view.kind,
                scope_id: view.scope,
                title: view.title.clone(),
                element_ids: view.element_ids.clone(),
                relationship_ids: view.relationship_ids.clone(),
            })
            .collect();

        Document {
            workspace: WorkspaceRecord {
                id: config.workspace_id,
                name: config.workspace_name.clone(),
                description: config.workspace_description.clone(),
            },
            elements,
            relationships,
            styles,
            default_style: model.styles().default_style().cloned(),
            views,
        }
    }
}
