//! Windowing: the focus state, pedigree rules and the builder that derives
//! the visible subgraph from them.

pub mod builder;
pub mod focus;
pub mod rules;
pub mod types;

pub use builder::{GraphBuilder, build_visible_graph};
pub use focus::{FocusState, toggle};
pub use rules::{PedigreeRule, PedigreeRules};
pub use types::{NodeKind, WindowEdge, WindowNode, WindowedGraph};
