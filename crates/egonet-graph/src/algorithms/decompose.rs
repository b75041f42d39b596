//! Max-degree-seed component decomposition.
//!
//! Each round picks the highest-degree node of the working graph, extracts
//! its `depth`-neighborhood as the next component, hands that component to a
//! [`ComponentSink`] and continues on the remainder. The run stops when the
//! working graph is empty, the component budget is used up, or a cancel flag
//! is raised between rounds.
//!
//! ```text
//!   Running ──step──▶ Extracting ──persisted──▶ Running
//!      │                   │
//!      └── empty / budget / cancel / error ──▶ Done
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::extract::{extract_with_config, ExtractConfig};
use crate::io::sink::ComponentSink;
use crate::models::{ComponentId, Graph, NodeId};
use crate::{GraphError, Result};

/// Decomposition configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecomposeConfig {
    /// Maximum number of components to emit.
    pub max_components: usize,
    /// BFS radius around each seed.
    pub depth: u32,
    /// Prefix for component output names.
    pub prefix: String,
}

impl Default for DecomposeConfig {
    fn default() -> Self {
        Self {
            max_components: 100,
            depth: 1,
            prefix: "component_".to_string(),
        }
    }
}

impl DecomposeConfig {
    /// Create new decomposition configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the BFS radius.
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Set the component budget.
    pub fn with_max_components(mut self, max: usize) -> Self {
        self.max_components = max;
        self
    }

    /// Set the output name prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
}

/// Output name of component `id`: `{prefix}{id:04}.egr`.
pub fn component_name(prefix: &str, id: ComponentId) -> String {
    format!("{}{:04}.egr", prefix, id.get())
}

/// An extracted component, numbered in emission order.
///
/// Node indices are local to `graph`; the link back to the decomposed
/// graph is not kept.
#[derive(Debug, Clone)]
pub struct Component<L> {
    /// 0-based sequence number.
    pub id: ComponentId,
    /// Output name derived from the configured prefix.
    pub name: String,
    /// The extracted subgraph.
    pub graph: Graph<L>,
}

/// Why a decomposition stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoneReason {
    /// The working graph ran out of nodes.
    Exhausted,
    /// `max_components` components were emitted.
    BudgetReached,
    /// The cancel flag was raised between rounds.
    Cancelled,
    /// A round failed; the working graph is gone.
    Failed,
}

/// Driver state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecomposeState {
    /// Working graph present and budget remaining.
    Running,
    /// A round is in progress.
    Extracting,
    /// Terminal.
    Done(DoneReason),
}

impl DecomposeState {
    /// True once the driver has stopped.
    pub fn is_done(&self) -> bool {
        matches!(self, DecomposeState::Done(_))
    }
}

/// Totals for a finished decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecomposeSummary {
    /// Components emitted.
    pub components: usize,
    /// Nodes across all emitted components.
    pub nodes_emitted: usize,
    /// Nodes left in the working graph.
    pub nodes_remaining: usize,
    /// Why the run stopped.
    pub reason: DoneReason,
}

/// Pick the lowest-index node of maximum degree.
///
/// Returns `None` for an empty graph.
pub fn select_seed<L>(graph: &Graph<L>) -> Option<NodeId> {
    let mut best: Option<(NodeId, usize)> = None;
    for i in 0..graph.node_count() {
        let node = NodeId(i as u32);
        let degree = graph.degree(node);
        match best {
            Some((_, best_degree)) if degree <= best_degree => {}
            _ => best = Some((node, degree)),
        }
    }
    best.map(|(node, _)| node)
}

/// Round-by-round decomposition driver.
#[derive(Debug)]
pub struct Decomposer<L> {
    working: Option<Graph<L>>,
    config: DecomposeConfig,
    extract: ExtractConfig,
    state: DecomposeState,
    rounds: usize,
    nodes_emitted: usize,
    cancel: Option<Arc<AtomicBool>>,
}

impl<L: Clone> Decomposer<L> {
    /// Take ownership of `graph` as the initial working graph.
    pub fn new(graph: Graph<L>, config: DecomposeConfig) -> Self {
        let state = if config.max_components == 0 {
            DecomposeState::Done(DoneReason::BudgetReached)
        } else {
            DecomposeState::Running
        };
        Self {
            working: Some(graph),
            extract: ExtractConfig::new(config.depth),
            config,
            state,
            rounds: 0,
            nodes_emitted: 0,
            cancel: None,
        }
    }

    /// Override the extraction settings (depth is kept from the config).
    pub fn with_extract_config(mut self, extract: ExtractConfig) -> Self {
        self.extract = ExtractConfig {
            depth: self.config.depth,
            ..extract
        };
        self
    }

    /// Stop at the start of the next round once `flag` is set.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Current state.
    pub fn state(&self) -> DecomposeState {
        self.state
    }

    /// Completed rounds (= components emitted).
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Current working graph, if the driver still holds one.
    pub fn working_graph(&self) -> Option<&Graph<L>> {
        self.working.as_ref()
    }

    /// Give up the driver and keep whatever was not extracted.
    pub fn into_remainder(self) -> Option<Graph<L>> {
        self.working
    }

    fn finish(&mut self, reason: DoneReason) -> DecomposeState {
        self.state = DecomposeState::Done(reason);
        self.state
    }

    /// Run one round.
    pub fn step<S>(&mut self, sink: &mut S) -> Result<DecomposeState>
    where
        S: ComponentSink<L> + ?Sized,
    {
        if self.state.is_done() {
            return Ok(self.state);
        }

        if let Some(flag) = &self.cancel {
            if flag.load(Ordering::Relaxed) {
                debug!("Decomposition cancelled after {} round(s)", self.rounds);
                return Ok(self.finish(DoneReason::Cancelled));
            }
        }

        let Some(working) = self.working.take() else {
            return Ok(self.finish(DoneReason::Exhausted));
        };
        let Some(seed) = select_seed(&working) else {
            self.working = Some(working);
            return Ok(self.finish(DoneReason::Exhausted));
        };

        self.state = DecomposeState::Extracting;
        debug!(
            "Round {}: seed {} (degree {}) in {} nodes",
            self.rounds,
            seed,
            working.degree(seed),
            working.node_count()
        );

        let extraction = match extract_with_config(&working, &[seed], &self.extract) {
            Ok(extraction) => extraction,
            Err(err) => {
                self.finish(DoneReason::Failed);
                return Err(GraphError::ExtractionFailure {
                    round: self.rounds,
                    source: Box::new(err),
                });
            }
        };
        drop(working);

        let id = ComponentId::new(self.rounds as u32);
        let component = Component {
            id,
            name: component_name(&self.config.prefix, id),
            graph: extraction.subgraph,
        };

        if let Err(err) = sink.persist(&component) {
            self.finish(DoneReason::Failed);
            return Err(GraphError::PersistFailure {
                name: component.name,
                source: Box::new(err),
            });
        }

        info!(
            "Component {}: {} nodes, {} edges -> {}",
            id,
            component.graph.node_count(),
            component.graph.edge_count(),
            component.name
        );

        self.nodes_emitted += component.graph.node_count();
        self.working = Some(extraction.remainder);
        self.rounds += 1;

        if self.rounds >= self.config.max_components {
            return Ok(self.finish(DoneReason::BudgetReached));
        }
        self.state = DecomposeState::Running;
        Ok(self.state)
    }

    /// Run rounds until the driver reaches `Done`.
    pub fn run<S>(&mut self, sink: &mut S) -> Result<DecomposeSummary>
    where
        S: ComponentSink<L> + ?Sized,
    {
        loop {
            if let DecomposeState::Done(reason) = self.step(sink)? {
                return Ok(DecomposeSummary {
                    components: self.rounds,
                    nodes_emitted: self.nodes_emitted,
                    nodes_remaining: self.working.as_ref().map_or(0, Graph::node_count),
                    reason,
                });
            }
        }
    }
}

/// Decompose `graph` into at most `config.max_components` components.
pub fn decompose<L, S>(
    graph: Graph<L>,
    config: &DecomposeConfig,
    sink: &mut S,
) -> Result<DecomposeSummary>
where
    L: Clone,
    S: ComponentSink<L> + ?Sized,
{
    Decomposer::new(graph, config.clone()).run(sink)
}
