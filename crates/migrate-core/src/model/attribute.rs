//! Attribute, attribute group and attribute pair types.

use crate::ids::{AttributeGroupId, AttributeId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single selectable value of an option (e.g., "Red").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub id: Option<AttributeId>,
    /// Display name, also the matching key against raw option values.
    pub name: String,
    pub position: Option<i32>,
    pub lang_id: Option<String>,
}

impl Attribute {
    /// Create an attribute carrying only its name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            position: None,
            lang_id: None,
        }
    }
}

/// A group of attributes, one per source option (e.g., "Color").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeGroup {
    pub id: Option<AttributeGroupId>,
    pub name: String,
    pub lang_id: Option<String>,
    /// Attributes keyed by their raw value string, in source order.
    pub attributes: IndexMap<String, Attribute>,
}

impl AttributeGroup {
    /// Create an empty group.
    pub fn new(id: Option<AttributeGroupId>, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            lang_id: None,
            attributes: IndexMap::new(),
        }
    }

    /// Look up an attribute by its raw value string.
    pub fn attribute(&self, key: &str) -> Option<&Attribute> {
        self.attributes.get(key)
    }

    /// Check whether a raw value belongs to this group.
    pub fn contains(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Number of distinct attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// A variant's selection of one attribute from one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributePair {
    pub attribute: Attribute,
    pub attribute_group: AttributeGroup,
}

impl AttributePair {
    /// Display label, e.g. "Color: Red".
    pub fn label(&self) -> String {
        format!("{}: {}", self.attribute_group.name, self.attribute.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_lookup() {
        let mut group = AttributeGroup::new(Some(AttributeGroupId::new("1")), "Color");
        group
            .attributes
            .insert("Red".to_string(), Attribute::named("Red"));

        assert!(group.contains("Red"));
        assert!(!group.contains("red"));
        assert_eq!(group.attribute("Red").map(|a| a.name.as_str()), Some("Red"));
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn test_pair_label() {
        let group = AttributeGroup::new(None, "Size");
        let pair = AttributePair {
            attribute: Attribute::named("Large"),
            attribute_group: group,
        };
        assert_eq!(pair.label(), "Size: Large");
    }
}
