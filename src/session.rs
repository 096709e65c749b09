//! ChartSession: the stateful shell around the pure pipeline.
//!
//! The session owns the dataset, the current focus state and the windowed
//! graph snapshot. Layout runs outside the session: `request_layout` hands
//! out an immutable request stamped with a generation, and `commit` applies
//! the outcome only if no newer request (or rebuild) happened meanwhile.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::ChartConfig;
use crate::error::{ChartError, LayoutError, Result};
use crate::family::{DataIndex, Dataset, Person, Relation};
use crate::layout::{LayoutSolver, PositionedGraph, layout};
use crate::window::{FocusState, GraphBuilder, WindowedGraph, toggle};

/// A layout job over one snapshot of the windowed graph.
#[derive(Debug, Clone)]
pub struct LayoutRequest {
    pub generation: u64,
    pub graph: Arc<WindowedGraph>,
    pub config: Arc<ChartConfig>,
}

impl LayoutRequest {
    pub async fn run(self, solver: &dyn LayoutSolver) -> LayoutOutcome {
        let result = layout(&self.graph, solver, &self.config).await;
        LayoutOutcome {
            generation: self.generation,
            result,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LayoutOutcome {
    pub generation: u64,
    pub result: std::result::Result<PositionedGraph, LayoutError>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommitStatus {
    Applied,
    /// A newer request superseded this one; the result was discarded.
    Stale,
    /// The solver failed; the previous layout stays displayed.
    Failed(LayoutError),
}

pub struct ChartSession {
    dataset: Dataset,
    index: Arc<DataIndex>,
    focus: Arc<FocusState>,
    config: Arc<ChartConfig>,
    root: String,
    graph: Arc<WindowedGraph>,
    generation: u64,
    displayed: Option<Arc<PositionedGraph>>,
    selected: Option<String>,
}

impl ChartSession {
    pub fn new(dataset: Dataset, root: impl Into<String>, config: ChartConfig) -> Self {
        let index = Arc::new(DataIndex::new(&dataset, &config.primary_locale));
        let focus = Arc::new(FocusState::from_index(&index));
        let mut session = Self {
            dataset,
            index,
            focus,
            config: Arc::new(config),
            root: root.into(),
            graph: Arc::new(WindowedGraph::default()),
            generation: 0,
            displayed: None,
            selected: None,
        };
        session.rebuild();
        session
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn index(&self) -> &DataIndex {
        &self.index
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn focus(&self) -> Arc<FocusState> {
        Arc::clone(&self.focus)
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Current windowed graph snapshot.
    pub fn graph(&self) -> Arc<WindowedGraph> {
        Arc::clone(&self.graph)
    }

    /// Last successfully committed layout.
    pub fn displayed(&self) -> Option<Arc<PositionedGraph>> {
        self.displayed.clone()
    }

    pub fn set_root(&mut self, root: impl Into<String>) {
        self.root = root.into();
        self.rebuild();
    }

    /// Flip which partner's ancestry `union_id` expands and rebuild the window.
    pub fn toggle_focus(&mut self, union_id: &str) -> Result<()> {
        if self.index.union(union_id).is_none() {
            return Err(ChartError::UnknownUnion(union_id.to_string()));
        }
        self.focus = Arc::new(toggle(&self.focus, union_id));
        debug!(union = %union_id, side = %self.focus.side(union_id).as_str(), "focus toggled");
        self.rebuild();
        Ok(())
    }

    /// Mark a person as selected. Unknown ids clear nothing and return `None`.
    pub fn select_person(&mut self, person_id: &str) -> Option<&Person> {
        if self.index.person(person_id).is_none() {
            return None;
        }
        self.selected = Some(person_id.to_string());
        self.index.person(person_id)
    }

    pub fn selected_person(&self) -> Option<&Person> {
        self.selected.as_deref().and_then(|id| self.index.person(id))
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Add a relative, reindex and rebuild. Existing focus sides survive.
    pub fn add_relative(
        &mut self,
        person: Person,
        relation: Relation,
        connect_to: &str,
    ) -> Result<String> {
        let union_id = self.dataset.add_relative(person, relation, connect_to)?;
        self.index = Arc::new(DataIndex::new(&self.dataset, &self.config.primary_locale));
        self.focus = Arc::new(self.focus.reseeded(&self.index));
        self.rebuild();
        Ok(union_id)
    }

    /// Start a layout over the current snapshot. Any earlier request becomes stale.
    pub fn request_layout(&mut self) -> LayoutRequest {
        self.generation += 1;
        LayoutRequest {
            generation: self.generation,
            graph: Arc::clone(&self.graph),
            config: Arc::clone(&self.config),
        }
    }

    /// Apply `outcome` if it belongs to the current generation.
    pub fn commit(&mut self, outcome: LayoutOutcome) -> CommitStatus {
        if outcome.generation != self.generation {
            debug!(
                got = outcome.generation,
                current = self.generation,
                "discarding stale layout"
            );
            return CommitStatus::Stale;
        }
        match outcome.result {
            Ok(positioned) => {
                self.displayed = Some(Arc::new(positioned));
                CommitStatus::Applied
            }
            Err(err) => {
                warn!(error = %err, "layout failed; keeping previous layout");
                CommitStatus::Failed(err)
            }
        }
    }

    /// Request, solve and commit in one step.
    pub async fn relayout(&mut self, solver: &dyn LayoutSolver) -> CommitStatus {
        let request = self.request_layout();
        let outcome = request.run(solver).await;
        self.commit(outcome)
    }

    /// Rebuild the window; in-flight layouts are invalidated.
    fn rebuild(&mut self) {
        let graph = GraphBuilder::new(&self.index, &self.focus, &self.config.rules)
            .with_sizes(self.config.node_sizes)
            .build(&self.root);
        info!(
            root = %self.root,
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            "window rebuilt"
        );
        self.graph = Arc::new(graph);
        self.generation += 1;
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_session.rs"]
mod tests;
