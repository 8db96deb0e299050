//! Diagram view composition.
//!
//! Views are *derived*, not hand-maintained edge lists: a view records which
//! elements it includes, and the relationships it shows are recomputed from
//! the registry when the view is finalized. A view can therefore never show
//! an edge without both of its endpoints, by construction rather than by
//! caller discipline.

use std::fmt;

use indexmap::IndexSet;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    error::ModelError,
    identifier::Id,
    model::{Element, ElementKind, ElementRegistry, RelationshipRegistry},
};

/// The three diagram scopes of the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewKind {
    /// People and software systems, no scope element.
    Context,
    /// The containers of one software system.
    Container,
    /// The components of one container.
    Component,
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ViewKind::Context => "context",
            ViewKind::Container => "container",
            ViewKind::Component => "component",
        };
        f.write_str(label)
    }
}

/// Handle to a view owned by a [`ViewComposer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewId(usize);

/// A named diagram under composition.
#[derive(Debug)]
pub struct View {
    kind: ViewKind,
    scope: Option<Id>,
    title: String,
    included: IndexSet<Id>,
}

impl View {
    pub fn kind(&self) -> ViewKind {
        self.kind
    }

    /// The element this view is "about", `None` for context views.
    pub fn scope(&self) -> Option<Id> {
        self.scope
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Included element ids in insertion order.
    pub fn included(&self) -> impl Iterator<Item = Id> {
        self.included.iter().copied()
    }

    pub fn contains(&self, id: Id) -> bool {
        self.included.contains(&id)
    }
}

/// A finalized diagram: the element set plus every relationship it induces.
#[derive(Debug, Clone)]
pub struct FinalizedView {
    pub kind: ViewKind,
    pub scope: Option<Id>,
    pub title: String,
    pub element_ids: Vec<Id>,
    pub relationship_ids: Vec<usize>,
}

/// Composes named diagram views against the element and relationship registries.
///
/// The composer borrows both registries for its whole lifetime, so views are
/// always composed against the final element and relationship set.
#[derive(Debug)]
pub struct ViewComposer<'a> {
    elements: &'a ElementRegistry,
    relationships: &'a RelationshipRegistry,
    views: Vec<View>,
}

impl<'a> ViewComposer<'a> {
    /// Creates a composer over the finished registries.
    pub fn new(elements: &'a ElementRegistry, relationships: &'a RelationshipRegistry) -> Self {
        ViewComposer {
            elements,
            relationships,
            views: Vec::new(),
        }
    }

    /// Creates a system-context view with no scope element.
    pub fn create_context_view(&mut self, title: &str) -> ViewId {
        debug!(title; "Creating context view");
        self.push_view(ViewKind::Context, None, title)
    }

    /// Creates a container view scoped to a software system.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownElement`] if the scope is not registered
    /// and [`ModelError::InvalidScope`] if it is not a software system.
    pub fn create_container_view(&mut self, scope: Id, title: &str) -> Result<ViewId, ModelError> {
        self.create_scoped_view(ViewKind::Container, ElementKind::SoftwareSystem, scope, title)
    }

    /// Creates a component view scoped to a container.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownElement`] if the scope is not registered
    /// and [`ModelError::InvalidScope`] if it is not a container.
    pub fn create_component_view(&mut self, scope: Id, title: &str) -> Result<ViewId, ModelError> {
        self.create_scoped_view(ViewKind::Component, ElementKind::Container, scope, title)
    }

    /// Adds one element to the view.
    ///
    /// Adding an element twice is a no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownElement`] if the id is not registered.
    ///
    /// # Panics
    ///
    /// Panics if `view` does not belong to this composer.
    pub fn add_element(&mut self, view: ViewId, id: Id) -> Result<(), ModelError> {
        if !self.elements.contains(id) {
            return Err(ModelError::UnknownElement { id });
        }
        self.views[view.0].included.insert(id);
        Ok(())
    }

    /// Adds every element whose parent is the view's scope.
    ///
    /// For a context view (scope `None`) this is every root person and
    /// system; for a component view the scope container itself is included
    /// as well, since the diagram shows the container's interior.
    ///
    /// # Panics
    ///
    /// Panics if `view` does not belong to this composer.
    pub fn add_all_of_scope(&mut self, view: ViewId) {
        let scope = self.views[view.0].scope;
        let kind = self.views[view.0].kind;

        if kind == ViewKind::Component {
            if let Some(scope) = scope {
                self.views[view.0].included.insert(scope);
            }
        }

        let children: Vec<Id> = self
            .elements
            .children_of(scope)
            .map(Element::id)
            .collect();
        for id in children {
            self.views[view.0].included.insert(id);
        }
    }

    /// Adds every root person to the view.
    ///
    /// # Panics
    ///
    /// Panics if `view` does not belong to this composer.
    pub fn add_all_people(&mut self, view: ViewId) {
        self.add_all_roots_of_kind(view, ElementKind::Person);
    }

    /// Adds every root software system to the view.
    ///
    /// # Panics
    ///
    /// Panics if `view` does not belong to this composer.
    pub fn add_all_software_systems(&mut self, view: ViewId) {
        self.add_all_roots_of_kind(view, ElementKind::SoftwareSystem);
    }

    /// Returns the view under composition.
    ///
    /// # Panics
    ///
    /// Panics if `view` does not belong to this composer.
    pub fn view(&self, view: ViewId) -> &View {
        &self.views[view.0]
    }

    /// Finalizes one view.
    ///
    /// The included relationships are recomputed here, not incrementally:
    /// exactly those registry relationships with both endpoints in the
    /// included element set, in registry insertion order. Inclusion therefore
    /// always reflects the final element set regardless of add order.
    ///
    /// # Panics
    ///
    /// Panics if `view` does not belong to this composer.
    pub fn finalize(&self, view: ViewId) -> FinalizedView {
        let view = &self.views[view.0];
        let relationship_ids: Vec<usize> = self
            .relationships
            .iter()
            .filter(|relationship| {
                view.included.contains(&relationship.source())
                    && view.included.contains(&relationship.destination())
            })
            .map(|relationship| relationship.id())
            .collect();

        debug!(
            title = view.title,
            elements_count = view.included.len(),
            relationships_count = relationship_ids.len();
            "Finalized view"
        );

        FinalizedView {
            kind: view.kind,
            scope: view.scope,
            title: view.title.clone(),
            element_ids: view.included.iter().copied().collect(),
            relationship_ids,
        }
    }

    /// Finalizes every view in creation order.
    pub fn finalize_all(&self) -> Vec<FinalizedView> {
        (0..self.views.len())
            .map(|index| self.finalize(ViewId(index)))
            .collect()
    }

    fn create_scoped_view(
        &mut self,
        view_kind: ViewKind,
        scope_kind: ElementKind,
        scope: Id,
        title: &str,
    ) -> Result<ViewId, ModelError> {
        let element = self
            .elements
            .lookup(scope)
            .ok_or(ModelError::UnknownElement { id: scope })?;
        if element.kind() != scope_kind {
            return Err(ModelError::InvalidScope {
                view: view_kind,
                scope: element.kind(),
                id: scope,
            });
        }

        debug!(title, scope:% = scope; "Creating scoped view");
        Ok(self.push_view(view_kind, Some(scope), title))
    }

    fn push_view(&mut self, kind: ViewKind, scope: Option<Id>, title: &str) -> ViewId {
        self.views.push(View {
            kind,
            scope,
            title: title.to_string(),
            included: IndexSet::new(),
        });
        ViewId(self.views.len() - 1)
    }

    fn add_all_roots_of_kind(&mut self, view: ViewId, kind: ElementKind) {
        let roots: Vec<Id> = self
            .elements
            .children_of(None)
            .filter(|element| element.kind() == kind)
            .map(Element::id)
            .collect();
        for id in roots {
            self.views[view.0].included.insert(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A user, a platform with two containers (one holding two components),
    /// and an external payment provider.
    fn sample_model() -> (ElementRegistry, RelationshipRegistry) {
        let mut elements = ElementRegistry::new();
        let user = elements
            .add_person("User", "A customer.")
            .expect("person should register");
        let platform = elements
            .add_software_system("Platform", "The product.")
            .expect("system should register");
        let payments = elements
            .add_software_system("Payments", "External provider.")
            .expect("system should register");
        let web = elements
            .add_container(platform, "Web App", "", Some("Vue"))
            .expect("container should register");
        let api = elements
            .add_container(platform, "API", "", Some("Rust"))
            .expect("container should register");
        let orders = elements
            .add_component(api, "Orders", "", None)
            .expect("component should register");
        let catalog = elements
            .add_component(api, "Catalog", "", None)
            .expect("component should register");

        let mut relationships = RelationshipRegistry::new();
        relationships
            .link(&elements, user, web, "Uses", None)
            .expect("link should succeed");
        relationships
            .link(&elements, web, api, "Calls", Some("JSON/HTTPS"))
            .expect("link should succeed");
        relationships
            .link(&elements, orders, catalog, "Reads products from", None)
            .expect("link should succeed");
        relationships
            .link(&elements, orders, payments, "Charges via", Some("HTTPS"))
            .expect("link should succeed");

        (elements, relationships)
    }

    #[test]
    fn test_scoped_view_validation() {
        let (elements, relationships) = sample_model();
        let mut composer = ViewComposer::new(&elements, &relationships);

        let err = composer
            .create_container_view(Id::new("Platform::API"), "Wrong scope kind")
            .unwrap_err();
        assert!(matches!(
            err,
            ModelError::InvalidScope { view: ViewKind::Container, scope: ElementKind::Container, .. }
        ));

        let err = composer
            .create_component_view(Id::new("Ghost"), "Unknown scope")
            .unwrap_err();
        assert!(matches!(err, ModelError::UnknownElement { .. }));

        assert!(
            composer
                .create_container_view(Id::new("Platform"), "Platform containers")
                .is_ok()
        );
    }

    #[test]
    fn test_add_element_is_idempotent() {
        let (elements, relationships) = sample_model();
        let mut composer = ViewComposer::new(&elements, &relationships);
        let view = composer.create_context_view("Context");

        composer
            .add_element(view, Id::new("User"))
            .expect("add should succeed");
        composer
            .add_element(view, Id::new("User"))
            .expect("second add is a no-op");

        assert_eq!(composer.view(view).included().count(), 1);
    }

    #[test]
    fn test_add_unknown_element() {
        let (elements, relationships) = sample_model();
        let mut composer = ViewComposer::new(&elements, &relationships);
        let view = composer.create_context_view("Context");

        let err = composer.add_element(view, Id::new("Ghost")).unwrap_err();
        assert!(matches!(err, ModelError::UnknownElement { .. }));
        assert_eq!(composer.view(view).included().count(), 0);
    }

    #[test]
    fn test_context_scope_auto_population() {
        let (elements, relationships) = sample_model();
        let mut composer = ViewComposer::new(&elements, &relationships);
        let view = composer.create_context_view("Context");

        composer.add_all_of_scope(view);

        let included: Vec<Id> = composer.view(view).included().collect();
        assert_eq!(included, [Id::new("User"), Id::new("Platform"), Id::new("Payments")]);
    }

    #[test]
    fn test_container_scope_auto_population() {
        let (elements, relationships) = sample_model();
        let mut composer = ViewComposer::new(&elements, &relationships);
        let view = composer
            .create_container_view(Id::new("Platform"), "Containers")
            .expect("view should create");

        composer.add_all_of_scope(view);

        let included: Vec<Id> = composer.view(view).included().collect();
        assert_eq!(included, [Id::new("Platform::Web App"), Id::new("Platform::API")]);
    }

    #[test]
    fn test_component_scope_includes_the_container() {
        let (elements, relationships) = sample_model();
        let mut composer = ViewComposer::new(&elements, &relationships);
        let view = composer
            .create_component_view(Id::new("Platform::API"), "API components")
            .expect("view should create");

        composer.add_all_of_scope(view);

        let included: Vec<Id> = composer.view(view).included().collect();
        assert_eq!(
            included,
            [
                Id::new("Platform::API"),
                Id::new("Platform::API::Orders"),
                Id::new("Platform::API::Catalog"),
            ]
        );
    }

    #[test]
    fn test_add_all_people_and_systems() {
        let (elements, relationships) = sample_model();
        let mut composer = ViewComposer::new(&elements, &relationships);
        let view = composer.create_context_view("Context");

        composer.add_all_people(view);
        composer.add_all_software_systems(view);

        let included: Vec<Id> = composer.view(view).included().collect();
        assert_eq!(included, [Id::new("User"), Id::new("Platform"), Id::new("Payments")]);
    }

    #[test]
    fn test_finalize_recomputes_relationships() {
        let (elements, relationships) = sample_model();
        let mut composer = ViewComposer::new(&elements, &relationships);
        let view = composer
            .create_component_view(Id::new("Platform::API"), "API components")
            .expect("view should create");

        composer.add_all_of_scope(view);
        // Pull in the external provider after the components: finalize order
        // must not depend on add order.
        composer
            .add_element(view, Id::new("Payments"))
            .expect("add should succeed");

        let finalized = composer.finalize(view);
        // Orders -> Catalog and Orders -> Payments are induced; User -> Web
        // App and Web App -> API are not, since an endpoint is missing.
        assert_eq!(finalized.relationship_ids, [2, 3]);
    }

    #[test]
    fn test_finalize_never_shows_dangling_edges() {
        let (elements, relationships) = sample_model();
        let mut composer = ViewComposer::new(&elements, &relationships);
        let view = composer
            .create_container_view(Id::new("Platform"), "Containers")
            .expect("view should create");

        // Web App is included, its caller is not.
        composer
            .add_element(view, Id::new("Platform::Web App"))
            .expect("add should succeed");

        let finalized = composer.finalize(view);
        assert!(finalized.relationship_ids.is_empty());
        assert_eq!(finalized.element_ids, [Id::new("Platform::Web App")]);
    }

    #[test]
    fn test_finalize_all_preserves_creation_order() {
        let (elements, relationships) = sample_model();
        let mut composer = ViewComposer::new(&elements, &relationships);
        composer.create_context_view("Context");
        composer
            .create_container_view(Id::new("Platform"), "Containers")
            .expect("view should create");

        let finalized = composer.finalize_all();
        let titles: Vec<&str> = finalized.iter().map(|view| view.title.as_str()).collect();
        assert_eq!(titles, ["Context", "Containers"]);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// A finalized view includes exactly the registry relationships
            /// with both endpoints present, for any subset of elements.
            #[test]
            fn finalize_is_complete_and_dangling_free(mask in prop::collection::vec(any::<bool>(), 7)) {
                let (elements, relationships) = sample_model();
                let mut composer = ViewComposer::new(&elements, &relationships);
                let view = composer.create_context_view("Any subset");

                let ids: Vec<Id> = elements.iter().map(Element::id).collect();
                for (id, include) in ids.iter().zip(&mask) {
                    if *include {
                        composer.add_element(view, *id).expect("id comes from the registry");
                    }
                }

                let finalized = composer.finalize(view);
                let included: std::collections::HashSet<Id> =
                    finalized.element_ids.iter().copied().collect();

                for relationship in relationships.iter() {
                    let expected = included.contains(&relationship.source())
                        && included.contains(&relationship.destination());
                    let actual = finalized.relationship_ids.contains(&relationship.id());
                    prop_assert_eq!(expected, actual);
                }
            }
        }
    }
}
