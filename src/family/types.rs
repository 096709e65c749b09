//! Family dataset records: Person, Union, Side, Dataset.
//!
//! These types are the persisted contract. Field names follow the JSON shape
//! (`partnerLeftId`, `birthOrder`, `childOf`, ...) via serde renames.

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

// ─── Side ────────────────────────────────────────────────────────────────────

/// Which partner of a union anchors the displayed ascendant lineage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Left,
    Right,
}

impl Side {
    pub fn flip(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

// ─── Person ──────────────────────────────────────────────────────────────────

/// One localized name. Chinese records usually carry only `full`,
/// western ones `first` and `last`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Name {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
}

impl Name {
    pub fn full(full: impl Into<String>) -> Self {
        Self {
            full: Some(full.into()),
            ..Self::default()
        }
    }

    /// `full` if present, otherwise `first last` trimmed. `None` when both are empty.
    pub fn display(&self) -> Option<String> {
        if let Some(full) = self.full.as_deref().filter(|s| !s.trim().is_empty()) {
            return Some(full.to_string());
        }
        let joined = format!(
            "{} {}",
            self.first.as_deref().unwrap_or(""),
            self.last.as_deref().unwrap_or("")
        );
        let joined = joined.trim();
        if joined.is_empty() {
            None
        } else {
            Some(joined.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    /// locale → name, e.g. `zh`, `en`.
    #[serde(default)]
    pub names: BTreeMap<String, Name>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nicknames: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Person {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Builder-style helper used by fixtures and the add-relative form.
    pub fn with_name(mut self, locale: &str, full: impl Into<String>) -> Self {
        self.names.insert(locale.to_string(), Name::full(full));
        self
    }

    pub fn with_dob(mut self, dob: impl Into<String>) -> Self {
        self.dob = Some(dob.into());
        self
    }

    pub fn with_birth_order(mut self, order: i64) -> Self {
        self.birth_order = Some(order);
        self
    }

    /// Absent liveness means alive.
    pub fn is_alive(&self) -> bool {
        self.alive != Some(false)
    }

    /// Primary display name: `locale` first, then any other locale, then the raw id.
    pub fn display_name(&self, locale: &str) -> String {
        self.names
            .get(locale)
            .and_then(Name::display)
            .or_else(|| self.names.values().find_map(Name::display))
            .unwrap_or_else(|| self.id.clone())
    }

    /// Display name used for ordering; empty when no name is recorded.
    pub fn sort_name(&self, locale: &str) -> String {
        self.names
            .get(locale)
            .and_then(Name::display)
            .unwrap_or_default()
    }

    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.dob.as_deref().and_then(parse_birth_date)
    }
}

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d{4})(?:-(\d{1,2})(?:-(\d{1,2}))?)?").expect("date pattern is valid")
});

/// Parse `YYYY`, `YYYY-MM`, `YYYY-MM-DD` or an RFC 3339 timestamp prefix.
///
/// Missing month/day default to 1. Impossible dates (`2001-02-30`) yield `None`.
pub fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    let caps = DATE_RE.captures(raw)?;
    let year: i32 = caps.get(1)?.as_str().parse().ok()?;
    let month: u32 = caps.get(2).map_or(Some(1), |m| m.as_str().parse().ok())?;
    let day: u32 = caps.get(3).map_or(Some(1), |m| m.as_str().parse().ok())?;
    NaiveDate::from_ymd_opt(year, month, day)
}

// ─── Union ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Union {
    pub id: String,
    pub partner_left_id: String,
    pub partner_right_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_side: Option<Side>,
    /// Inline child list; folded into the link table on load.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
}

impl Union {
    pub fn new(
        id: impl Into<String>,
        partner_left_id: impl Into<String>,
        partner_right_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            partner_left_id: partner_left_id.into(),
            partner_right_id: partner_right_id.into(),
            focus_side: None,
            children: Vec::new(),
        }
    }

    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children = children.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_focus(mut self, side: Side) -> Self {
        self.focus_side = Some(side);
        self
    }

    pub fn partner(&self, side: Side) -> &str {
        match side {
            Side::Left => &self.partner_left_id,
            Side::Right => &self.partner_right_id,
        }
    }

    pub fn has_partner(&self, person_id: &str) -> bool {
        self.partner_left_id == person_id || self.partner_right_id == person_id
    }
}

// ─── Dataset ─────────────────────────────────────────────────────────────────

/// The full family dataset: people, unions and the child → union link table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub people: Vec<Person>,
    #[serde(default)]
    pub unions: Vec<Union>,
    /// child id → union id. Wins over inline `Union::children` on conflict.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub child_of: HashMap<String, String>,
}

impl Dataset {
    pub fn new(people: Vec<Person>, unions: Vec<Union>) -> Self {
        Self {
            people,
            unions,
            child_of: HashMap::new(),
        }
    }

    pub fn person(&self, id: &str) -> Option<&Person> {
        self.people.iter().find(|p| p.id == id)
    }

    pub fn union(&self, id: &str) -> Option<&Union> {
        self.unions.iter().find(|u| u.id == id)
    }

    pub fn union_mut(&mut self, id: &str) -> Option<&mut Union> {
        self.unions.iter_mut().find(|u| u.id == id)
    }

    /// Resolved link table: inline children first, then explicit `childOf` entries.
    pub fn links(&self) -> Vec<(String, String)> {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        let mut links: Vec<(String, String)> = Vec::new();
        for union in &self.unions {
            for child in &union.children {
                match seen.get(child.as_str()) {
                    Some(&i) => links[i].1 = union.id.clone(),
                    None => {
                        seen.insert(child.as_str(), links.len());
                        links.push((child.clone(), union.id.clone()));
                    }
                }
            }
        }
        let mut explicit: Vec<(&String, &String)> = self.child_of.iter().collect();
        explicit.sort();
        for (child, union_id) in explicit {
            match seen.get(child.as_str()) {
                Some(&i) => links[i].1 = union_id.clone(),
                None => {
                    seen.insert(child.as_str(), links.len());
                    links.push((child.clone(), union_id.clone()));
                }
            }
        }
        links
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_family_types.rs"]
mod tests;
