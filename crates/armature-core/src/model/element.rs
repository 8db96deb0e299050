//! Element registration and lookup.

use std::fmt;

use indexmap::IndexMap;
use log::debug;
use serde::Serialize;

use crate::{error::ModelError, identifier::Id};

/// The four node kinds of the architecture model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementKind {
    Person,
    SoftwareSystem,
    Container,
    Component,
}

impl ElementKind {
    /// The child kind this kind may own, if any.
    ///
    /// Only software systems own containers and only containers own
    /// components; people and components are always leaves.
    pub fn child_kind(self) -> Option<ElementKind> {
        match self {
            ElementKind::SoftwareSystem => Some(ElementKind::Container),
            ElementKind::Container => Some(ElementKind::Component),
            ElementKind::Person | ElementKind::Component => None,
        }
    }

    /// The built-in tag attached to every element of this kind.
    pub fn tag(self) -> &'static str {
        match self {
            ElementKind::Person => "Person",
            ElementKind::SoftwareSystem => "Software System",
            ElementKind::Container => "Container",
            ElementKind::Component => "Component",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ElementKind::Person => "person",
            ElementKind::SoftwareSystem => "software system",
            ElementKind::Container => "container",
            ElementKind::Component => "component",
        };
        f.write_str(label)
    }
}

/// A node in the architecture graph.
///
/// Elements are immutable once registered, apart from tag attachment which
/// happens during the same assembly pass.
#[derive(Debug, Clone)]
pub struct Element {
    id: Id,
    kind: ElementKind,
    name: String,
    description: String,
    technology: Option<String>,
    tags: Vec<String>,
    parent: Option<Id>,
}

impl Element {
    fn new(
        id: Id,
        kind: ElementKind,
        name: &str,
        description: &str,
        technology: Option<&str>,
        parent: Option<Id>,
    ) -> Self {
        Element {
            id,
            kind,
            name: name.to_string(),
            description: description.to_string(),
            technology: technology.map(str::to_string),
            // Every element carries its kind tag so styles can target whole
            // kinds without the manifest listing each element.
            tags: vec![kind.tag().to_string()],
            parent,
        }
    }

    /// Stable path id, unique within the graph.
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Human-readable label, unique within the parent scope.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn technology(&self) -> Option<&str> {
        self.technology.as_deref()
    }

    /// Tags in attachment order, the kind tag first.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// The owning element, `None` for root people and systems.
    pub fn parent(&self) -> Option<Id> {
        self.parent
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|candidate| candidate == tag)
    }
}

/// Owns every node of the graph and enforces identity and naming rules.
///
/// Construction is strictly top-down: a child can only be registered once its
/// parent exists. Ids are name-qualified paths derived from registration
/// names, so they are deterministic across a run and can be referenced from
/// manifests before the element exists.
///
/// Registration order is preserved for reproducible serialization.
#[derive(Debug, Default)]
pub struct ElementRegistry {
    elements: IndexMap<Id, Element>,
}

impl ElementRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a person at the root scope.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateName`] if any root element already
    /// carries this name (ids are name-derived, so the name must be free
    /// across kinds).
    pub fn add_person(&mut self, name: &str, description: &str) -> Result<Id, ModelError> {
        self.register_root(ElementKind::Person, name, description)
    }

    /// Registers a software system at the root scope.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateName`] if any root element already
    /// carries this name.
    pub fn add_software_system(&mut self, name: &str, description: &str) -> Result<Id, ModelError> {
        self.register_root(ElementKind::SoftwareSystem, name, description)
    }

    /// Registers a container under a software system.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownElement`] if the parent id is not
    /// registered, [`ModelError::InvalidParent`] if the parent is not a
    /// software system, and [`ModelError::DuplicateName`] on a sibling name
    /// clash.
    pub fn add_container(
        &mut self,
        parent: Id,
        name: &str,
        description: &str,
        technology: Option<&str>,
    ) -> Result<Id, ModelError> {
        self.register_child(parent, ElementKind::Container, name, description, technology)
    }

    /// Registers a component under a container.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`ElementRegistry::add_container`], with the
    /// parent required to be a container.
    pub fn add_component(
        &mut self,
        parent: Id,
        name: &str,
        description: &str,
        technology: Option<&str>,
    ) -> Result<Id, ModelError> {
        self.register_child(parent, ElementKind::Component, name, description, technology)
    }

    /// Attaches tags to an already-registered element.
    ///
    /// Tags already present are skipped, preserving first-attachment order.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownElement`] if the id is not registered.
    pub fn add_tags<I, S>(&mut self, id: Id, tags: I) -> Result<(), ModelError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let element = self
            .elements
            .get_mut(&id)
            .ok_or(ModelError::UnknownElement { id })?;
        for tag in tags {
            let tag = tag.into();
            if !element.tags.contains(&tag) {
                element.tags.push(tag);
            }
        }
        Ok(())
    }

    /// Returns the element with the given id, if it exists.
    pub fn lookup(&self, id: Id) -> Option<&Element> {
        self.elements.get(&id)
    }

    /// Checks whether an element with the given id is registered.
    pub fn contains(&self, id: Id) -> bool {
        self.elements.contains_key(&id)
    }

    /// Iterates over all elements in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    /// Iterates over the direct children of `parent` in registration order.
    ///
    /// Passing `None` yields the root people and systems.
    pub fn children_of(&self, parent: Option<Id>) -> impl Iterator<Item = &Element> {
        self.elements
            .values()
            .filter(move |element| element.parent() == parent)
    }

    /// The total number of registered elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn register_root(
        &mut self,
        kind: ElementKind,
        name: &str,
        description: &str,
    ) -> Result<Id, ModelError> {
        let id = Id::new(name);
        if self.elements.contains_key(&id) {
            return Err(ModelError::DuplicateName {
                kind,
                name: name.to_string(),
                parent: None,
            });
        }

        debug!(id:% = id, kind:? = kind; "Registering root element");
        self.elements
            .insert(id, Element::new(id, kind, name, description, None, None));
        Ok(id)
    }

    fn register_child(
        &mut self,
        parent: Id,
        kind: ElementKind,
        name: &str,
        description: &str,
        technology: Option<&str>,
    ) -> Result<Id, ModelError> {
        let parent_element = self
            .elements
            .get(&parent)
            .ok_or(ModelError::UnknownElement { id: parent })?;
        if parent_element.kind().child_kind() != Some(kind) {
            return Err(ModelError::InvalidParent {
                parent: parent_element.kind(),
                child: kind,
            });
        }

        let id = parent.nested(name);
        if self.elements.contains_key(&id) {
            return Err(ModelError::DuplicateName {
                kind,
                name: name.to_string(),
                parent: Some(parent),
            });
        }

        debug!(id:% = id, kind:? = kind; "Registering child element");
        self.elements.insert(
            id,
            Element::new(id, kind, name, description, technology, Some(parent)),
        );
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with_system() -> (ElementRegistry, Id) {
        let mut registry = ElementRegistry::new();
        let system = registry
            .add_software_system("Platform", "An online print platform.")
            .expect("system should register");
        (registry, system)
    }

    #[test]
    fn test_register_roots() {
        let mut registry = ElementRegistry::new();

        let user = registry
            .add_person("User", "A customer of the platform.")
            .expect("person should register");
        let system = registry
            .add_software_system("Platform", "An online print platform.")
            .expect("system should register");

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.lookup(user).map(Element::kind), Some(ElementKind::Person));
        assert_eq!(
            registry.lookup(system).map(Element::kind),
            Some(ElementKind::SoftwareSystem)
        );
        assert_eq!(registry.lookup(user).map(Element::parent), Some(None));
    }

    #[test]
    fn test_duplicate_root_name_same_kind() {
        let (mut registry, _) = registry_with_system();

        let err = registry
            .add_software_system("Platform", "Again.")
            .unwrap_err();
        assert!(matches!(
            err,
            ModelError::DuplicateName { kind: ElementKind::SoftwareSystem, parent: None, .. }
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_root_name_across_kinds() {
        let (mut registry, _) = registry_with_system();

        // Ids are name-derived, so a person may not reuse a system name.
        let err = registry.add_person("Platform", "Not a system.").unwrap_err();
        assert!(matches!(err, ModelError::DuplicateName { .. }));
    }

    #[test]
    fn test_register_children_top_down() {
        let (mut registry, system) = registry_with_system();

        let api = registry
            .add_container(system, "API", "Business logic.", Some("Rust"))
            .expect("container should register");
        let component = registry
            .add_component(api, "Order Processing", "Checkout lifecycle.", Some("Rust"))
            .expect("component should register");

        assert_eq!(api, "Platform::API");
        assert_eq!(component, "Platform::API::Order Processing");
        assert_eq!(registry.lookup(component).and_then(Element::parent), Some(api));
        assert_eq!(
            registry.lookup(api).map(|e| e.technology()),
            Some(Some("Rust"))
        );
    }

    #[test]
    fn test_unknown_parent() {
        let mut registry = ElementRegistry::new();

        let err = registry
            .add_container(Id::new("Nowhere"), "API", "", None)
            .unwrap_err();
        assert!(matches!(err, ModelError::UnknownElement { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_invalid_parent_kind() {
        let (mut registry, system) = registry_with_system();
        let api = registry
            .add_container(system, "API", "", None)
            .expect("container should register");

        // A component's parent must be a container, not a system.
        let err = registry
            .add_component(system, "Order Processing", "", None)
            .unwrap_err();
        assert!(matches!(
            err,
            ModelError::InvalidParent {
                parent: ElementKind::SoftwareSystem,
                child: ElementKind::Component,
            }
        ));

        // And a container cannot nest under another container.
        let err = registry.add_container(api, "Nested", "", None).unwrap_err();
        assert!(matches!(
            err,
            ModelError::InvalidParent {
                parent: ElementKind::Container,
                child: ElementKind::Container,
            }
        ));
    }

    #[test]
    fn test_duplicate_sibling_name() {
        let (mut registry, system) = registry_with_system();
        registry
            .add_container(system, "API", "", None)
            .expect("container should register");

        let err = registry.add_container(system, "API", "", None).unwrap_err();
        assert!(matches!(
            err,
            ModelError::DuplicateName { kind: ElementKind::Container, parent: Some(_), .. }
        ));
    }

    #[test]
    fn test_same_name_under_different_parents() {
        let (mut registry, system) = registry_with_system();
        let other = registry
            .add_software_system("Warehouse", "")
            .expect("system should register");

        let first = registry
            .add_container(system, "API", "", None)
            .expect("container should register");
        let second = registry
            .add_container(other, "API", "", None)
            .expect("sibling scopes are independent");

        assert_ne!(first, second);
    }

    #[test]
    fn test_kind_tag_is_seeded() {
        let (mut registry, system) = registry_with_system();
        let api = registry
            .add_container(system, "API", "", None)
            .expect("container should register");

        let element = registry.lookup(api).expect("container should exist");
        assert_eq!(element.tags(), ["Container"]);
    }

    #[test]
    fn test_add_tags_dedupes() {
        let (mut registry, system) = registry_with_system();

        registry
            .add_tags(system, ["Internal", "Internal", "Software System"])
            .expect("tags should attach");

        let element = registry.lookup(system).expect("system should exist");
        assert_eq!(element.tags(), ["Software System", "Internal"]);
        assert!(element.has_tag("Internal"));
        assert!(!element.has_tag("External"));
    }

    #[test]
    fn test_add_tags_unknown_element() {
        let mut registry = ElementRegistry::new();
        let err = registry.add_tags(Id::new("Ghost"), ["x"]).unwrap_err();
        assert!(matches!(err, ModelError::UnknownElement { .. }));
    }

    #[test]
    fn test_children_of() {
        let (mut registry, system) = registry_with_system();
        registry.add_person("User", "").expect("person should register");
        let api = registry
            .add_container(system, "API", "", None)
            .expect("container should register");
        registry
            .add_container(system, "Web App", "", None)
            .expect("container should register");
        registry
            .add_component(api, "Orders", "", None)
            .expect("component should register");

        let children: Vec<&str> = registry
            .children_of(Some(system))
            .map(Element::name)
            .collect();
        assert_eq!(children, ["API", "Web App"]);

        let roots: Vec<&str> = registry.children_of(None).map(Element::name).collect();
        assert_eq!(roots, ["Platform", "User"]);
    }

    #[test]
    fn test_iteration_preserves_registration_order() {
        let mut registry = ElementRegistry::new();
        registry.add_person("User", "").expect("person should register");
        registry
            .add_software_system("Platform", "")
            .expect("system should register");
        registry
            .add_person("Designer", "")
            .expect("person should register");

        let names: Vec<&str> = registry.iter().map(Element::name).collect();
        assert_eq!(names, ["User", "Platform", "Designer"]);
    }
}
