//! Tag-keyed style rules and resolution.
//!
//! Style rules mirror sequential declarative configuration: rules for
//! distinct tags apply in registration order with later rules overriding
//! earlier ones field by field, while re-registering a tag replaces that
//! rule in place. Matching is by tag name equality only; there is no
//! hierarchy or specificity order.

use std::fmt;

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{color::Color, error::ModelError, model::Element};

/// Node shapes understood by the documentation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Shape {
    Box,
    RoundedBox,
    Person,
    Cylinder,
    WebBrowser,
    Component,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Shape::Box => "box",
            Shape::RoundedBox => "rounded box",
            Shape::Person => "person",
            Shape::Cylinder => "cylinder",
            Shape::WebBrowser => "web browser",
            Shape::Component => "component",
        };
        f.write_str(label)
    }
}

/// Visual attributes contributed by one style rule.
///
/// Every field is optional so a rule can override a single attribute of an
/// earlier rule without clobbering the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<Shape>,
}

impl StyleAttributes {
    /// Overlays `other` on top of `self`, field by field.
    ///
    /// Fields `other` leaves unset keep their current value.
    fn apply(&mut self, other: &StyleAttributes) {
        if let Some(background) = &other.background {
            self.background = Some(background.clone());
        }
        if let Some(color) = &other.color {
            self.color = Some(color.clone());
        }
        if let Some(shape) = other.shape {
            self.shape = Some(shape);
        }
    }
}

/// Maps tags to visual attributes and resolves the effective style per element.
///
/// Precedence across different tags matching one element is
/// last-registered-wins. Re-registering a rule for an existing tag replaces
/// it in place (the tag is the key), keeping its original position in the
/// order.
#[derive(Debug, Default)]
pub struct StyleResolver {
    rules: IndexMap<String, StyleAttributes>,
    default: Option<StyleAttributes>,
}

impl StyleResolver {
    /// Creates a resolver with no rules and no default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule, or replaces the rule for `tag` in place.
    pub fn register(&mut self, tag: impl Into<String>, attributes: StyleAttributes) {
        let tag = tag.into();
        debug!(tag:% = tag; "Registering style rule");
        self.rules.insert(tag, attributes);
    }

    /// Sets the system-wide default used when no rule matches an element.
    pub fn set_default(&mut self, attributes: StyleAttributes) {
        self.default = Some(attributes);
    }

    pub fn default_style(&self) -> Option<&StyleAttributes> {
        self.default.as_ref()
    }

    /// Resolves the effective attributes for `element`.
    ///
    /// Starts from the default (when registered) and applies every rule whose
    /// tag the element carries, in registration order, each overriding earlier
    /// values field by field.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NoDefaultStyle`] when no rule matches and no
    /// default is registered.
    pub fn resolve(&self, element: &Element) -> Result<StyleAttributes, ModelError> {
        let mut resolved = self.default.clone().unwrap_or_default();
        let mut matched = false;

        for (tag, attributes) in &self.rules {
            if element.has_tag(tag) {
                resolved.apply(attributes);
                matched = true;
            }
        }

        if !matched && self.default.is_none() {
            return Err(ModelError::NoDefaultStyle { id: element.id() });
        }
        Ok(resolved)
    }

    /// Iterates over the rules in effective registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleAttributes)> {
        self.rules
            .iter()
            .map(|(tag, attributes)| (tag.as_str(), attributes))
    }

    /// The number of registered rules, defaults excluded.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
