//! Relationship linking and traversal.
//!
//! Relationships are stored in a flat insertion-ordered list, with per-node
//! indices of incoming and outgoing edges for traversal. Endpoints are
//! validated against the [`ElementRegistry`] at link time, so the registry
//! can never hold a dangling edge.

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::{
    error::ModelError,
    identifier::Id,
    model::ElementRegistry,
};

/// A directed, labeled edge between two elements.
#[derive(Debug, Clone)]
pub struct Relationship {
    id: usize,
    source: Id,
    destination: Id,
    description: String,
    technology: Option<String>,
}

impl Relationship {
    /// Registration ordinal, stable for the lifetime of the registry.
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn source(&self) -> Id {
        self.source
    }

    pub fn destination(&self) -> Id {
        self.destination
    }

    /// Edge label, e.g. a protocol or call description.
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn technology(&self) -> Option<&str> {
        self.technology.as_deref()
    }
}

/// Owns every edge of the graph and validates endpoints at link time.
///
/// Insertion order is preserved for reproducible serialization; no other
/// ordering is guaranteed.
#[derive(Debug, Default)]
pub struct RelationshipRegistry {
    relationships: Vec<Relationship>,
    outgoing: HashMap<Id, Vec<usize>>,
    incoming: HashMap<Id, Vec<usize>>,
    seen: HashSet<(Id, Id, String)>,
}

impl RelationshipRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Links `source` to `destination` with a descriptive label.
    ///
    /// Both endpoints must already exist in `elements`; relationships may
    /// cross hierarchy levels (a component may call an external system).
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownElement`] if either endpoint is absent,
    /// and [`ModelError::DuplicateRelationship`] on an exact
    /// `(source, destination, description)` repeat. Duplicates are a caller
    /// bug: the run aborts rather than publishing a half-built document.
    pub fn link(
        &mut self,
        elements: &ElementRegistry,
        source: Id,
        destination: Id,
        description: &str,
        technology: Option<&str>,
    ) -> Result<&Relationship, ModelError> {
        if !elements.contains(source) {
            return Err(ModelError::UnknownElement { id: source });
        }
        if !elements.contains(destination) {
            return Err(ModelError::UnknownElement { id: destination });
        }

        let key = (source, destination, description.to_string());
        if self.seen.contains(&key) {
            return Err(ModelError::DuplicateRelationship {
                source,
                destination,
                description: description.to_string(),
            });
        }
        self.seen.insert(key);

        let id = self.relationships.len();
        debug!(id = id, source:% = source, destination:% = destination; "Linking relationship");
        self.relationships.push(Relationship {
            id,
            source,
            destination,
            description: description.to_string(),
            technology: technology.map(str::to_string),
        });
        self.outgoing.entry(source).or_default().push(id);
        self.incoming.entry(destination).or_default().push(id);

        Ok(&self.relationships[id])
    }

    /// Iterates over every relationship touching `id`, outgoing first.
    ///
    /// The sequence is finite and restartable: calling this again yields the
    /// same relationships in the same order. A self-loop sits in both index
    /// lists but is reported once, from the outgoing side.
    pub fn relationships_of(&self, id: Id) -> impl Iterator<Item = &Relationship> {
        let outgoing = self.outgoing.get(&id).into_iter().flatten().copied();
        let incoming = self
            .incoming
            .get(&id)
            .into_iter()
            .flatten()
            .copied()
            .filter(|&index| {
                let relationship = &self.relationships[index];
                relationship.source() != relationship.destination()
            });
        outgoing
            .chain(incoming)
            .map(|index| &self.relationships[index])
    }

    /// Iterates over all relationships in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships.iter()
    }

    /// The total number of relationships.
    pub fn len(&self) -> usize {
        self.relationships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_containers() -> (ElementRegistry, Id, Id) {
        let mut elements = ElementRegistry::new();
        let system = elements
            .add_software_system("Platform", "")
            .expect("system should register");
        let a = elements
            .add_container(system, "A", "", None)
            .expect("container should register");
        let b = elements
            .add_container(system, "B", "", None)
            .expect("container should register");
        (elements, a, b)
    }

    #[test]
    fn test_link() {
        let (elements, a, b) = two_containers();
        let mut registry = RelationshipRegistry::new();

        let relationship = registry
            .link(&elements, a, b, "calls /x", Some("HTTPS"))
            .expect("link should succeed");

        assert_eq!(relationship.id(), 0);
        assert_eq!(relationship.source(), a);
        assert_eq!(relationship.destination(), b);
        assert_eq!(relationship.description(), "calls /x");
        assert_eq!(relationship.technology(), Some("HTTPS"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unknown_source_registers_nothing() {
        let (elements, _, b) = two_containers();
        let mut registry = RelationshipRegistry::new();

        let err = registry
            .link(&elements, Id::new("Ghost"), b, "calls", None)
            .unwrap_err();
        assert!(matches!(err, ModelError::UnknownElement { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unknown_destination_registers_nothing() {
        let (elements, a, _) = two_containers();
        let mut registry = RelationshipRegistry::new();

        let err = registry
            .link(&elements, a, Id::new("Ghost"), "calls", None)
            .unwrap_err();
        assert!(matches!(err, ModelError::UnknownElement { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_duplicate_triple_rejected() {
        let (elements, a, b) = two_containers();
        let mut registry = RelationshipRegistry::new();

        registry
            .link(&elements, a, b, "calls /x", None)
            .expect("first link should succeed");
        let err = registry.link(&elements, a, b, "calls /x", None).unwrap_err();

        assert!(matches!(err, ModelError::DuplicateRelationship { .. }));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_same_endpoints_different_description() {
        let (elements, a, b) = two_containers();
        let mut registry = RelationshipRegistry::new();

        registry
            .link(&elements, a, b, "calls /x", None)
            .expect("first link should succeed");
        registry
            .link(&elements, a, b, "calls /y", None)
            .expect("different description is a different edge");
        registry
            .link(&elements, b, a, "calls /x", None)
            .expect("reverse direction is a different edge");

        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_relationships_of_both_directions() {
        let (elements, a, b) = two_containers();
        let mut registry = RelationshipRegistry::new();
        registry
            .link(&elements, a, b, "calls /x", None)
            .expect("link should succeed");
        registry
            .link(&elements, b, a, "replies", None)
            .expect("link should succeed");

        let of_a: Vec<usize> = registry.relationships_of(a).map(Relationship::id).collect();
        assert_eq!(of_a, [0, 1]);

        // Restartable: a second traversal yields the same sequence.
        let again: Vec<usize> = registry.relationships_of(a).map(Relationship::id).collect();
        assert_eq!(of_a, again);
    }

    #[test]
    fn test_relationships_of_isolated_element() {
        let (elements, a, _) = two_containers();
        let registry = RelationshipRegistry::new();

        assert_eq!(registry.relationships_of(a).count(), 0);
    }

    #[test]
    fn test_self_loop_reported_once() {
        let (elements, a, _) = two_containers();
        let mut registry = RelationshipRegistry::new();
        registry
            .link(&elements, a, a, "schedules itself", None)
            .expect("self-loops are representable");

        assert_eq!(registry.relationships_of(a).count(), 1);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let (elements, a, b) = two_containers();
        let mut registry = RelationshipRegistry::new();
        registry
            .link(&elements, a, b, "first", None)
            .expect("link should succeed");
        registry
            .link(&elements, b, a, "second", None)
            .expect("link should succeed");
        registry
            .link(&elements, a, b, "third", None)
            .expect("link should succeed");

        let descriptions: Vec<&str> = registry.iter().map(Relationship::description).collect();
        assert_eq!(descriptions, ["first", "second", "third"]);
        let ids: Vec<usize> = registry.iter().map(Relationship::id).collect();
        assert_eq!(ids, [0, 1, 2]);
    }
}
