//! DataIndex: id-keyed lookups built once per dataset load.

use std::collections::HashMap;

use super::siblings::NameCollator;
use super::types::{Dataset, Person, Union};

/// Lookup tables over a [`Dataset`].
///
/// `unions_by_person` keeps the first union (in dataset order) each person
/// is a partner of; a person with several partnerships resolves to the
/// earliest recorded one.
#[derive(Debug, Clone, Default)]
pub struct DataIndex {
    people_by_id: HashMap<String, Person>,
    unions_by_id: HashMap<String, Union>,
    /// Dataset order of unions, for deterministic iteration.
    union_order: Vec<String>,
    children_by_union: HashMap<String, Vec<String>>,
    parent_union_by_child: HashMap<String, String>,
    union_by_person: HashMap<String, String>,
    names: NameCollator,
}

impl DataIndex {
    pub fn new(dataset: &Dataset, locale: &str) -> Self {
        let mut people_by_id: HashMap<String, Person> = HashMap::new();
        for person in &dataset.people {
            people_by_id.insert(person.id.clone(), person.clone());
        }

        let mut unions_by_id: HashMap<String, Union> = HashMap::new();
        let mut union_order: Vec<String> = Vec::new();
        let mut union_by_person: HashMap<String, String> = HashMap::new();
        let mut children_by_union: HashMap<String, Vec<String>> = HashMap::new();
        for union in &dataset.unions {
            if !unions_by_id.contains_key(&union.id) {
                union_order.push(union.id.clone());
            }
            unions_by_id.insert(union.id.clone(), union.clone());
            children_by_union.entry(union.id.clone()).or_default();
            for partner in [&union.partner_left_id, &union.partner_right_id] {
                union_by_person
                    .entry(partner.clone())
                    .or_insert_with(|| union.id.clone());
            }
        }

        let mut parent_union_by_child: HashMap<String, String> = HashMap::new();
        for (child, union_id) in dataset.links() {
            children_by_union
                .entry(union_id.clone())
                .or_default()
                .push(child.clone());
            parent_union_by_child.insert(child, union_id);
        }

        Self {
            people_by_id,
            unions_by_id,
            union_order,
            children_by_union,
            parent_union_by_child,
            union_by_person,
            names: NameCollator::new(locale),
        }
    }

    pub fn locale(&self) -> &str {
        self.names.locale()
    }

    /// Name collation for the primary locale, shared by every sibling sort.
    pub fn collator(&self) -> &NameCollator {
        &self.names
    }

    pub fn person(&self, id: &str) -> Option<&Person> {
        self.people_by_id.get(id)
    }

    pub fn union(&self, id: &str) -> Option<&Union> {
        self.unions_by_id.get(id)
    }

    /// Unions in dataset order.
    pub fn unions(&self) -> impl Iterator<Item = &Union> {
        self.union_order
            .iter()
            .filter_map(|id| self.unions_by_id.get(id))
    }

    /// Raw child ids of `union_id` in link-table order. Empty if unknown.
    pub fn child_ids(&self, union_id: &str) -> &[String] {
        self.children_by_union
            .get(union_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Resolved children of `union_id`, unknown ids skipped, link-table order.
    pub fn children(&self, union_id: &str) -> Vec<&Person> {
        self.child_ids(union_id)
            .iter()
            .filter_map(|id| self.person(id))
            .collect()
    }

    /// The union `child_id` was born into.
    pub fn parent_union(&self, child_id: &str) -> Option<&str> {
        self.parent_union_by_child.get(child_id).map(String::as_str)
    }

    /// The first union `person_id` is a partner of.
    pub fn union_of(&self, person_id: &str) -> Option<&str> {
        self.union_by_person.get(person_id).map(String::as_str)
    }

    /// Display name of a person, or the raw id when the person is unknown.
    pub fn display_name(&self, person_id: &str) -> String {
        self.person(person_id)
            .map(|p| p.display_name(self.names.locale()))
            .unwrap_or_else(|| person_id.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_index.rs"]
mod tests;
