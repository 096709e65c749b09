//! Pedigree rules: per-union configuration that triggers special windowing
//! and layout behaviour.
//!
//! ```json
//! {
//!   "u_root":     { "defaultChildren": ["p_me", "p_brother"], "mirrorWith": "u_aunt" },
//!   "u_maternal": { "expandCollaterals": true }
//! }
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PedigreeRule {
    /// Children shown when the union has none recorded yet.
    pub default_children: Vec<String>,
    /// When this union is the ascendant of a right-focused root, surface the
    /// focused parent's sibling unions and their children.
    pub expand_collaterals: bool,
    /// This union's subtree must sit left of the named union's subtree.
    pub mirror_with: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PedigreeRules {
    rules: HashMap<String, PedigreeRule>,
}

impl PedigreeRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, union_id: impl Into<String>, rule: PedigreeRule) -> Self {
        self.rules.insert(union_id.into(), rule);
        self
    }

    pub fn get(&self, union_id: &str) -> Option<&PedigreeRule> {
        self.rules.get(union_id)
    }

    pub fn default_children(&self, union_id: &str) -> &[String] {
        self.get(union_id)
            .map(|r| r.default_children.as_slice())
            .unwrap_or(&[])
    }

    pub fn expands_collaterals(&self, union_id: &str) -> bool {
        self.get(union_id).is_some_and(|r| r.expand_collaterals)
    }

    /// `(left, right)` pairs, sorted for a stable pass order.
    pub fn mirror_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .rules
            .iter()
            .filter_map(|(id, rule)| rule.mirror_with.clone().map(|other| (id.clone(), other)))
            .collect();
        pairs.sort();
        pairs
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_rules.rs"]
mod tests;
