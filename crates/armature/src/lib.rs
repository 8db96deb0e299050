//! Armature - an architecture-description model builder and publisher.
//!
//! Armature assembles a C4-style model graph (people, software systems,
//! containers, components, relationships, styles, and diagram views) from a
//! declarative manifest, serializes it into a vendor-neutral document, and
//! hands it to a publishing adapter.

pub mod config;
pub mod document;
pub mod manifest;
pub mod publish;

mod assembled;
mod error;

pub use armature_core::{ModelError, color, identifier, model, style, view};

pub use assembled::AssembledModel;
pub use error::{ArmatureError, ConfigError, ManifestError};

use log::{debug, info};

use armature_core::{
    identifier::Id,
    model::{ElementRegistry, RelationshipRegistry},
    style::StyleResolver,
    view::{FinalizedView, ViewComposer, ViewId, ViewKind},
};

use config::WorkspaceConfig;
use document::Document;
use manifest::{Manifest, ViewManifest};
use publish::Publisher;

/// Drives model assembly in a fixed order and hands the result off.
///
/// The stages are strictly sequential: root elements, then containers, then
/// components, then relationships, then styles, then views. Any failure at
/// any stage aborts the whole run: assembly is cheap, deterministic, and
/// re-runnable, and a half-built architecture document is worse than none.
///
/// # Examples
///
/// ```rust,no_run
/// use armature::{Assembler, config::WorkspaceConfig, manifest::Manifest};
///
/// let manifest = Manifest::load("model.toml")
///     .expect("Failed to load manifest");
///
/// let assembler = Assembler::new(WorkspaceConfig::default());
/// let model = assembler.assemble(&manifest)
///     .expect("Failed to assemble");
///
/// let document = assembler.document(&model);
/// println!("{} elements", document.elements.len());
/// ```
#[derive(Debug, Default)]
pub struct Assembler {
    config: WorkspaceConfig,
}

impl Assembler {
    /// Create a new assembler with the given workspace configuration.
    pub fn new(config: WorkspaceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    /// Assemble the model graph described by `manifest`.
    ///
    /// # Errors
    ///
    /// Returns [`ArmatureError::Model`] for structural errors (duplicate
    /// names, invalid parents, unknown endpoints, duplicate relationships,
    /// missing default style) and [`ArmatureError::Manifest`] for views that
    /// lack a required scope. Nothing external is touched on failure; the
    /// partial graph is simply dropped.
    pub fn assemble(&self, manifest: &Manifest) -> Result<AssembledModel, ArmatureError> {
        info!("Assembling architecture model");

        let elements = self.register_elements(manifest)?;
        let relationships = self.link_relationships(manifest, &elements)?;
        let styles = self.register_styles(manifest, &elements)?;
        let views = self.compose_views(manifest, &elements, &relationships)?;

        info!(
            elements_count = elements.len(),
            relationships_count = relationships.len(),
            views_count = views.len();
            "Model assembled"
        );

        Ok(AssembledModel::new(elements, relationships, styles, views))
    }

    /// Serialize a finished model into the publishable document.
    pub fn document(&self, model: &AssembledModel) -> Document {
        Document::new(&self.config, model)
    }

    /// Publish a finished model through the given publisher.
    ///
    /// One blocking call, no retries; a failure is surfaced as
    /// [`ArmatureError::Publish`] for the caller to retry or inspect.
    ///
    /// # Errors
    ///
    /// Returns [`ArmatureError::Publish`] when the publisher rejects the
    /// document or the transport fails.
    pub fn publish(
        &self,
        model: &AssembledModel,
        publisher: &dyn Publisher,
    ) -> Result<(), ArmatureError> {
        let document = self.document(model);
        info!(workspace_id = self.config.workspace_id; "Publishing workspace");
        publisher.publish(self.config.workspace_id, &document)?;
        Ok(())
    }

    /// Stages 1-3: people and systems, then containers, then components.
    fn register_elements(&self, manifest: &Manifest) -> Result<ElementRegistry, ArmatureError> {
        let mut elements = ElementRegistry::new();

        debug!("Registering root elements");
        for person in &manifest.people {
            let id = elements.add_person(&person.name, &person.description)?;
            elements.add_tags(id, person.tags.iter().cloned())?;
        }
        for system in &manifest.systems {
            let id = elements.add_software_system(&system.name, &system.description)?;
            elements.add_tags(id, system.tags.iter().cloned())?;
        }

        debug!("Registering containers");
        for system in &manifest.systems {
            let system_id = Id::new(&system.name);
            for container in &system.containers {
                let id = elements.add_container(
                    system_id,
                    &container.name,
                    &container.description,
                    container.technology.as_deref(),
                )?;
                elements.add_tags(id, container.tags.iter().cloned())?;
            }
        }

        debug!("Registering components");
        for system in &manifest.systems {
            let system_id = Id::new(&system.name);
            for container in &system.containers {
                let container_id = system_id.nested(&container.name);
                for component in &container.components {
                    let id = elements.add_component(
                        container_id,
                        &component.name,
                        &component.description,
                        component.technology.as_deref(),
                    )?;
                    elements.add_tags(id, component.tags.iter().cloned())?;
                }
            }
        }

        Ok(elements)
    }

    /// Stage 4: wire relationships, which may cross any level.
    fn link_relationships(
        &self,
        manifest: &Manifest,
        elements: &ElementRegistry,
    ) -> Result<RelationshipRegistry, ArmatureError> {
        debug!("Linking relationships");
        let mut relationships = RelationshipRegistry::new();
        for relationship in &manifest.relationships {
            relationships.link(
                elements,
                Id::new(&relationship.source),
                Id::new(&relationship.destination),
                &relationship.description,
                relationship.technology.as_deref(),
            )?;
        }
        Ok(relationships)
    }

    /// Stage 5: style rules, then a resolution pass over every element so a
    /// model that cannot be styled fails here instead of at render time.
    fn register_styles(
        &self,
        manifest: &Manifest,
        elements: &ElementRegistry,
    ) -> Result<StyleResolver, ArmatureError> {
        debug!("Registering style rules");
        let mut styles = StyleResolver::new();
        if let Some(default) = &manifest.default_style {
            styles.set_default(default.clone());
        }
        for style in &manifest.styles {
            styles.register(&style.tag, style.attributes.clone());
        }

        for element in elements.iter() {
            styles.resolve(element)?;
        }

        Ok(styles)
    }

    /// Stage 6: compose and finalize every view.
    fn compose_views(
        &self,
        manifest: &Manifest,
        elements: &ElementRegistry,
        relationships: &RelationshipRegistry,
    ) -> Result<Vec<FinalizedView>, ArmatureError> {
        debug!("Composing views");
        let mut composer = ViewComposer::new(elements, relationships);

        for view in &manifest.views {
            let view_id = self.create_view(&mut composer, view)?;

            if view.include_people {
                composer.add_all_people(view_id);
            }
            if view.include_systems {
                composer.add_all_software_systems(view_id);
            }
            if view.include_all {
                composer.add_all_of_scope(view_id);
            }
            for id in &view.include {
                composer.add_element(view_id, Id::new(id))?;
            }
        }

        Ok(composer.finalize_all())
    }

    fn create_view(
        &self,
        composer: &mut ViewComposer<'_>,
        view: &ViewManifest,
    ) -> Result<ViewId, ArmatureError> {
        let view_id = match view.kind {
            ViewKind::Context => composer.create_context_view(&view.title),
            ViewKind::Container => {
                let scope = self.required_scope(view)?;
                composer.create_container_view(scope, &view.title)?
            }
            ViewKind::Component => {
                let scope = self.required_scope(view)?;
                composer.create_component_view(scope, &view.title)?
            }
        };
        Ok(view_id)
    }

    fn required_scope(&self, view: &ViewManifest) -> Result<Id, ArmatureError> {
        let scope = view.scope.as_deref().ok_or_else(|| {
            ArmatureError::Manifest(ManifestError::MissingScope {
                title: view.title.clone(),
            })
        })?;
        Ok(Id::new(scope))
    }
}
