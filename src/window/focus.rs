//! Focus state: which partner's ancestry is expanded, per union.
//!
//! The state is an immutable value. `toggle` returns a new state and leaves
//! the old one untouched, so an in-flight layout keeps reading a consistent
//! snapshot. Declared `focusSide` defaults enter only through `from_index`
//! and `reseeded`; the builder and the reducer both read `side`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::family::{DataIndex, Side, Union};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FocusState {
    sides: BTreeMap<String, Side>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed one entry per union from its declared `focusSide` (absent → left).
    pub fn from_index(index: &DataIndex) -> Self {
        let sides = index
            .unions()
            .map(|u| (u.id.clone(), u.focus_side.unwrap_or_default()))
            .collect();
        Self { sides }
    }

    /// Recorded side for `union_id`; absent entries read as left.
    pub fn side(&self, union_id: &str) -> Side {
        self.sides.get(union_id).copied().unwrap_or_default()
    }

    pub fn side_of(&self, union: &Union) -> Side {
        self.side(&union.id)
    }

    /// Keep every recorded side; unions seen for the first time start from
    /// their declared side.
    pub fn reseeded(&self, index: &DataIndex) -> Self {
        let mut sides = self.sides.clone();
        for union in index.unions() {
            sides
                .entry(union.id.clone())
                .or_insert_with(|| union.focus_side.unwrap_or_default());
        }
        Self { sides }
    }

    pub fn with_side(mut self, union_id: impl Into<String>, side: Side) -> Self {
        self.sides.insert(union_id.into(), side);
        self
    }

    pub fn len(&self) -> usize {
        self.sides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sides.is_empty()
    }
}

/// Pure reducer: flip `union_id` between left and right. Other unions are untouched.
pub fn toggle(state: &FocusState, union_id: &str) -> FocusState {
    let mut sides = state.sides.clone();
    let next = state.side(union_id).flip();
    sides.insert(union_id.to_string(), next);
    FocusState { sides }
}

#[cfg(test)]
#[path = "../../tests/rust/test_focus.rs"]
mod tests;
