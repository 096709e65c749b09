//! family-chart — windowed family-tree graphs with layered layout correction.
//!
//! Pipeline:
//!   dataset → DataIndex → GraphBuilder (+ FocusState, PedigreeRules)
//!   → WindowedGraph → LayoutSolver → post-processing → PositionedGraph
//!
//! Modules:
//!   family   — records, dataset loading, lookup index, sibling ordering
//!   window   — focus state, pedigree rules, graph builder
//!   layout   — solver adapter, bundled Sugiyama solver, post-processor
//!   session  — focus toggling, selection, add-relative, last-request-wins layout
//!   config   — ChartConfig (sizes, layout options, overlap gaps, rules)

pub mod config;
pub mod error;
pub mod family;
pub mod layout;
pub mod session;
pub mod window;

#[cfg(feature = "wasm")]
mod wasm;

pub use config::ChartConfig;
pub use error::{ChartError, LayoutError, Result};
pub use family::{DataIndex, Dataset, Person, Relation, Side, Union};
pub use layout::{LayoutSolver, PositionedGraph, SugiyamaSolver};
pub use session::{ChartSession, CommitStatus};
pub use window::{FocusState, WindowedGraph, build_visible_graph};

/// Build the windowed graph for `root` after applying `toggles` in order.
pub fn window_chart(
    dataset: &Dataset,
    root: &str,
    toggles: &[String],
    config: &ChartConfig,
) -> Result<WindowedGraph> {
    let index = DataIndex::new(dataset, &config.primary_locale);
    let mut focus = FocusState::from_index(&index);
    for union_id in toggles {
        if index.union(union_id).is_none() {
            return Err(ChartError::UnknownUnion(union_id.clone()));
        }
        focus = window::toggle(&focus, union_id);
    }
    Ok(window::GraphBuilder::new(&index, &focus, &config.rules)
        .with_sizes(config.node_sizes)
        .build(root))
}

/// Window and lay out in one call.
pub async fn layout_chart(
    dataset: &Dataset,
    root: &str,
    toggles: &[String],
    config: &ChartConfig,
    solver: &dyn LayoutSolver,
) -> Result<PositionedGraph> {
    let graph = window_chart(dataset, root, toggles, config)?;
    Ok(layout::layout(&graph, solver, config).await?)
}
