//! Identifier management using string interning for efficient storage and comparison.
//!
//! This module provides the [`Id`] type used for every element in the model
//! graph. Ids are deterministic name-qualified paths: a root element's id is
//! its name, and a child's id is the parent id followed by `::` and the child
//! name. Because the path is derived purely from registration names, ids are
//! stable across a single assembly run and can be written down in manifests.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use serde::{Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for efficient identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

/// Efficient identifier type using string interning.
///
/// Two `Id`s created from the same path are equal and share storage, so the
/// registries can key maps by `Id` without cloning strings.
///
/// # Examples
///
/// ```
/// use armature_core::identifier::Id;
///
/// let system = Id::new("Print Platform");
/// let container = system.nested("API");
/// assert_eq!(container, "Print Platform::API");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from a name or a full `::`-separated path.
    pub fn new(name: &str) -> Self {
        let mut interner = INTERNER
            .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
            .lock()
            .expect("Failed to acquire interner lock");
        let symbol = interner.get_or_intern(name);
        Self(symbol)
    }

    /// Creates the id of a child element by appending `name` to this path.
    ///
    /// # Examples
    ///
    /// ```
    /// use armature_core::identifier::Id;
    ///
    /// let parent = Id::new("Print Platform");
    /// let child = parent.nested("API");
    /// let grandchild = child.nested("Sign In Controller");
    /// assert_eq!(grandchild, "Print Platform::API::Sign In Controller");
    /// ```
    pub fn nested(&self, name: &str) -> Self {
        let mut interner = INTERNER
            .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
            .lock()
            .expect("Failed to acquire interner lock");
        let parent_str = interner
            .resolve(self.0)
            .expect("Parent ID should exist in interner");
        let nested_name = format!("{parent_str}::{name}");
        let symbol = interner.get_or_intern(&nested_name);
        Self(symbol)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = INTERNER
            .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
            .lock()
            .expect("Failed to acquire interner lock");
        let str_value = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        write!(f, "{str_value}")
    }
}

// Required because `ModelError::DuplicateRelationship` has a field named
// `source`, which the `thiserror::Error` derive treats as the error source and
// therefore requires to implement `std::error::Error`. `Id` carries no further
// cause, so the default `source()` (returning `None`) is correct.
impl std::error::Error for Id {}

impl Serialize for Id {
    /// Serializes the id as its full path string.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<&str> for Id {
    /// Creates an `Id` from a string slice.
    ///
    /// This is a convenience implementation that calls `Id::new`.
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "path"`.
    fn eq(&self, other: &str) -> bool {
        let interner = INTERNER
            .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
            .lock()
            .expect("Failed to acquire interner lock");
        let self_str = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        self_str == other
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
