//! Dataset loading and the add-relative mutation entry point.

use std::fs;
use std::io::Read;
use std::path::Path;

use tracing::{debug, warn};

use super::types::{Dataset, Person, Side, Union};
use crate::error::{ChartError, Result};

impl Dataset {
    pub fn from_json_str(src: &str) -> Result<Self> {
        let dataset: Dataset = serde_json::from_str(src)?;
        dataset.report_dangling();
        Ok(dataset)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let dataset: Dataset = serde_json::from_reader(reader)?;
        dataset.report_dangling();
        Ok(dataset)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ChartError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Log references that will be skipped at windowing time.
    fn report_dangling(&self) {
        for union in &self.unions {
            for partner in [&union.partner_left_id, &union.partner_right_id] {
                if self.person(partner).is_none() {
                    warn!(union = %union.id, partner = %partner, "union partner is not a recorded person");
                }
            }
        }
        for (child, union_id) in self.links() {
            if self.union(&union_id).is_none() {
                warn!(child = %child, union = %union_id, "child is linked to an unknown union");
            }
        }
        debug!(
            people = self.people.len(),
            unions = self.unions.len(),
            "dataset loaded"
        );
    }

    /// Add `person` related to `connect_to`. Returns the id of the union the
    /// person was attached to.
    ///
    /// - `Child`: `connect_to` is a union; the person becomes its child.
    /// - `Partner`: `connect_to` is a person; a new union pairs them, the
    ///   existing person on the left.
    /// - `Parent`: `connect_to` is a person; the person joins the existing
    ///   parent union if it has a placeholder slot, otherwise a new parent
    ///   union is created with the new person on the left.
    pub fn add_relative(
        &mut self,
        person: Person,
        relation: Relation,
        connect_to: &str,
    ) -> Result<String> {
        if self.person(&person.id).is_some() {
            return Err(ChartError::DuplicatePerson(person.id));
        }
        let union_id = match relation {
            Relation::Child => {
                if self.union(connect_to).is_none() {
                    return Err(ChartError::UnknownUnion(connect_to.to_string()));
                }
                self.link_child(&person.id, connect_to);
                connect_to.to_string()
            }
            Relation::Partner => {
                if self.person(connect_to).is_none() {
                    return Err(ChartError::UnknownPerson(connect_to.to_string()));
                }
                let id = self.fresh_union_id(connect_to, &person.id);
                self.unions.push(Union::new(&id, connect_to, &person.id));
                id
            }
            Relation::Parent => {
                if self.person(connect_to).is_none() {
                    return Err(ChartError::UnknownPerson(connect_to.to_string()));
                }
                let parent_union = self
                    .links()
                    .into_iter()
                    .find(|(child, _)| child == connect_to)
                    .map(|(_, union_id)| union_id);
                match parent_union {
                    Some(union_id) => self.fill_parent_slot(&union_id, &person.id)?,
                    None => {
                        let id = self.fresh_union_id(&person.id, connect_to);
                        let placeholder = format!("{}_partner", person.id);
                        self.unions.push(Union::new(&id, &person.id, placeholder));
                        self.link_child(connect_to, &id);
                        id
                    }
                }
            }
        };
        debug!(person = %person.id, ?relation, union = %union_id, "relative added");
        self.people.push(person);
        Ok(union_id)
    }

    fn link_child(&mut self, child: &str, union_id: &str) {
        for union in &mut self.unions {
            union.children.retain(|c| c != child);
        }
        self.child_of.insert(child.to_string(), union_id.to_string());
    }

    /// Replace whichever partner of `union_id` is not a recorded person.
    fn fill_parent_slot(&mut self, union_id: &str, person_id: &str) -> Result<String> {
        let missing = {
            let union = self
                .union(union_id)
                .ok_or_else(|| ChartError::UnknownUnion(union_id.to_string()))?;
            [Side::Left, Side::Right]
                .into_iter()
                .find(|side| self.person(union.partner(*side)).is_none())
        };
        let Some(side) = missing else {
            return Err(ChartError::UnionFull(union_id.to_string()));
        };
        if let Some(union) = self.union_mut(union_id) {
            match side {
                Side::Left => union.partner_left_id = person_id.to_string(),
                Side::Right => union.partner_right_id = person_id.to_string(),
            }
        }
        Ok(union_id.to_string())
    }

    fn fresh_union_id(&self, left: &str, right: &str) -> String {
        let base = format!("u_{}_{}", strip_prefix(left), strip_prefix(right));
        let mut id = base.clone();
        let mut n = 2;
        while self.union(&id).is_some() {
            id = format!("{base}_{n}");
            n += 1;
        }
        id
    }
}

fn strip_prefix(id: &str) -> &str {
    id.strip_prefix("p_").unwrap_or(id)
}

/// How a newly added person relates to the record they are attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    Child,
    Partner,
    Parent,
}

#[cfg(test)]
#[path = "../../tests/rust/test_dataset.rs"]
mod tests;
