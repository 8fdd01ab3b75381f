//! Attribute reconciliation.
//!
//! Builds one [`AttributeGroup`] per source option, then matches each
//! variant's option slots back to those groups to produce its ordered
//! [`AttributePair`] list.
//!
//! Matching is by exact raw value. A slot whose value appears in several
//! groups yields one pair per group; those slots are reported as ambiguous
//! rather than collapsed. A non-empty slot that matches no group yields no
//! pair and is reported as unmatched.

use crate::ids::AttributeGroupId;
use crate::model::{Attribute, AttributeGroup, AttributePair};
use crate::source::SourceOption;
use serde::Serialize;

/// Result of matching one variant's option slots against the groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMatch {
    /// Pairs in slot order, then group order within a slot.
    pub pairs: Vec<AttributePair>,
    /// 1-based slots whose value matched more than one group.
    pub ambiguous_slots: Vec<usize>,
    /// 1-based non-empty slots whose value matched no group.
    pub unmatched_slots: Vec<usize>,
}

/// Aggregated match diagnostics across variants and records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchStats {
    /// Slots that produced more than one pair.
    pub ambiguous: usize,
    /// Non-empty slots that produced no pair.
    pub unmatched: usize,
}

impl MatchStats {
    /// Fold one variant's match result into the totals.
    pub fn record(&mut self, m: &AttributeMatch) {
        self.ambiguous += m.ambiguous_slots.len();
        self.unmatched += m.unmatched_slots.len();
    }

    pub fn merge(&mut self, other: MatchStats) {
        self.ambiguous += other.ambiguous;
        self.unmatched += other.unmatched;
    }

    pub fn is_clean(&self) -> bool {
        self.ambiguous == 0 && self.unmatched == 0
    }
}

/// Build one attribute group per option, preserving declaration order.
///
/// Each distinct non-empty value becomes one attribute; the first occurrence
/// wins. Option-level position is not propagated to the attributes.
pub fn build_attribute_groups(options: &[SourceOption]) -> Vec<AttributeGroup> {
    options
        .iter()
        .map(|option| {
            let id = option
                .id
                .as_ref()
                .and_then(|id| id.to_id_string())
                .map(AttributeGroupId::new);
            let mut group = AttributeGroup::new(id, option.name.clone());

            for value in option.values.iter().filter(|v| !v.is_empty()) {
                if !group.attributes.contains_key(value) {
                    group
                        .attributes
                        .insert(value.clone(), Attribute::named(value.clone()));
                }
            }

            group
        })
        .collect()
}

/// Match a variant's option slots against the groups, with diagnostics.
pub fn reconcile_variant(groups: &[AttributeGroup], slots: &[Option<&str>]) -> AttributeMatch {
    let mut result = AttributeMatch::default();

    for (index, slot) in slots.iter().enumerate() {
        let value = match slot {
            Some(value) if !value.is_empty() => *value,
            _ => continue,
        };

        let mut hits = 0;
        for group in groups {
            if let Some(attribute) = group.attribute(value) {
                result.pairs.push(AttributePair {
                    attribute: attribute.clone(),
                    attribute_group: group.clone(),
                });
                hits += 1;
            }
        }

        match hits {
            0 => result.unmatched_slots.push(index + 1),
            1 => {}
            _ => result.ambiguous_slots.push(index + 1),
        }
    }

    result
}

/// Match a variant's option slots against the groups.
pub fn match_variant_attributes(
    groups: &[AttributeGroup],
    slots: &[Option<&str>],
) -> Vec<AttributePair> {
    reconcile_variant(groups, slots).pairs
}
