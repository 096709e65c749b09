//! Family dataset: records, loading, lookup index and sibling ordering.

pub mod dataset;
pub mod index;
pub mod siblings;
pub mod types;

pub use dataset::Relation;
pub use index::DataIndex;
pub use siblings::{NameCollator, compare_siblings, sort_siblings};
pub use types::{Dataset, Name, Person, Side, Union, parse_birth_date};
