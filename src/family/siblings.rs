//! Sibling ordering: the birth-order comparator applied to every child list.
//!
//! Order of precedence:
//!   1. parsed date of birth, when both are present and distinct
//!   2. explicit `birthOrder`, when both are present, non-zero and distinct
//!   3. primary display name, collated for the primary locale

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use icu_collator::options::CollatorOptions;
use icu_collator::CollatorBorrowed;
use icu_locale_core::Locale;
use tracing::warn;

use super::types::Person;

/// Locale-aware name comparison for one primary locale.
///
/// Without collation data for the locale, names compare by code point.
#[derive(Clone)]
pub struct NameCollator {
    locale: String,
    collator: Option<Arc<CollatorBorrowed<'static>>>,
}

impl NameCollator {
    pub fn new(locale: &str) -> Self {
        let collator = locale
            .parse::<Locale>()
            .map_err(|e| e.to_string())
            .and_then(|tag| {
                CollatorBorrowed::try_new(tag.into(), CollatorOptions::default())
                    .map_err(|e| e.to_string())
            });
        let collator = match collator {
            Ok(c) => Some(Arc::new(c)),
            Err(err) => {
                warn!(locale, error = %err, "no collation for locale; comparing names by code point");
                None
            }
        };
        Self {
            locale: locale.to_string(),
            collator,
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(c) => c.compare(a, b),
            None => a.cmp(b),
        }
    }
}

impl Default for NameCollator {
    fn default() -> Self {
        Self::new("und")
    }
}

impl fmt::Debug for NameCollator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NameCollator")
            .field("locale", &self.locale)
            .field("collating", &self.collator.is_some())
            .finish()
    }
}

/// Compare two people of the same generation.
pub fn compare_siblings(a: &Person, b: &Person, names: &NameCollator) -> Ordering {
    if let (Some(da), Some(db)) = (a.birth_date(), b.birth_date()) {
        if da != db {
            return da.cmp(&db);
        }
    }
    if let (Some(oa), Some(ob)) = (a.birth_order, b.birth_order) {
        if oa != 0 && ob != 0 && oa != ob {
            return oa.cmp(&ob);
        }
    }
    let locale = names.locale();
    names.compare(&a.sort_name(locale), &b.sort_name(locale))
}

/// Stable in-place sort by [`compare_siblings`].
///
/// Mixed records (one sibling dated, another only numbered) can make the
/// comparator non-transitive, which `slice::sort_by` may reject with a panic.
/// Binary insertion keeps the result deterministic for any input.
pub fn sort_siblings(people: &mut Vec<&Person>, names: &NameCollator) {
    let mut sorted: Vec<&Person> = Vec::with_capacity(people.len());
    for person in people.drain(..) {
        let at = sorted.partition_point(|placed| {
            compare_siblings(placed, person, names) != Ordering::Greater
        });
        sorted.insert(at, person);
    }
    *people = sorted;
}

#[cfg(test)]
#[path = "../../tests/rust/test_siblings.rs"]
mod tests;
