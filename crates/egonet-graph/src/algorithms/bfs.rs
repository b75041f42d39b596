//! Breadth-first search.
//!
//! Traversal is level-synchronous: the whole frontier at depth `d` is
//! expanded before anything at depth `d + 1`. [`LevelBfs`] exposes that one
//! level at a time, [`bfs_levels`] drives it to completion through a
//! callback, and [`bfs_sequential`] returns plain per-node distances.

use std::ops::ControlFlow;

use crate::models::{CsrMatrix, Distance, NodeId};
use crate::{GraphError, Result};

/// BFS configuration.
#[derive(Debug, Clone)]
pub struct BfsConfig {
    /// Maximum distance to explore.
    pub max_distance: u32,
}

impl Default for BfsConfig {
    fn default() -> Self {
        Self {
            max_distance: u32::MAX - 1,
        }
    }
}

impl BfsConfig {
    /// Create new BFS configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum distance.
    pub fn with_max_distance(mut self, max: u32) -> Self {
        self.max_distance = max;
        self
    }
}

/// Step-by-step level-synchronous BFS over a multi-node seed set.
///
/// Each call to [`LevelBfs::next_level`] expands the current frontier and
/// returns the nodes discovered for the first time at the new depth. A node
/// is reported at most once; the visited set only grows.
#[derive(Debug)]
pub struct LevelBfs<'a> {
    adj: &'a CsrMatrix,
    visited: Vec<bool>,
    frontier: Vec<NodeId>,
    scratch: Vec<NodeId>,
    depth: u32,
}

impl<'a> LevelBfs<'a> {
    /// Start a traversal from `sources` (depth 0). Duplicate sources collapse.
    pub fn new(adj: &'a CsrMatrix, sources: &[NodeId]) -> Result<Self> {
        let mut visited = vec![false; adj.num_rows];
        let mut frontier = Vec::with_capacity(sources.len());

        for &src in sources {
            let idx = src.index();
            if idx >= adj.num_rows {
                return Err(GraphError::InvalidSeed(src.0 as u64));
            }
            if !visited[idx] {
                visited[idx] = true;
                frontier.push(src);
            }
        }

        Ok(Self {
            adj,
            visited,
            frontier,
            scratch: Vec::new(),
            depth: 0,
        })
    }

    /// Depth of the most recently returned level (0 before the first step).
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Per-node visited flags.
    pub fn visited(&self) -> &[bool] {
        &self.visited
    }

    /// Number of nodes visited so far, sources included.
    pub fn visited_count(&self) -> usize {
        self.visited.iter().filter(|&&v| v).count()
    }

    /// True once a step has produced no new nodes.
    pub fn is_finished(&self) -> bool {
        self.frontier.is_empty()
    }

    /// Expand one level. Returns `None` when nothing new was discovered.
    pub fn next_level(&mut self) -> Option<&[NodeId]> {
        if self.frontier.is_empty() {
            return None;
        }

        self.scratch.clear();
        for &node in &self.frontier {
            for &neighbor_id in self.adj.neighbors(node) {
                let neighbor = neighbor_id as usize;
                if !self.visited[neighbor] {
                    self.visited[neighbor] = true;
                    self.scratch.push(NodeId(neighbor_id));
                }
            }
        }

        std::mem::swap(&mut self.frontier, &mut self.scratch);
        if self.frontier.is_empty() {
            return None;
        }

        self.depth += 1;
        Some(&self.frontier)
    }
}

/// Run a full BFS, invoking `on_level(nodes, depth)` once per completed level.
///
/// Level 0 (the sources) is not reported. The callback returns
/// `ControlFlow::Break(())` to stop the traversal early. Returns the depth of
/// the last level handed to the callback.
pub fn bfs_levels<F>(adj: &CsrMatrix, sources: &[NodeId], mut on_level: F) -> Result<u32>
where
    F: FnMut(&[NodeId], u32) -> ControlFlow<()>,
{
    let mut bfs = LevelBfs::new(adj, sources)?;

    loop {
        let depth = bfs.depth() + 1;
        let Some(level) = bfs.next_level() else {
            return Ok(depth - 1);
        };
        if on_level(level, depth).is_break() {
            return Ok(depth);
        }
    }
}

/// Sequential BFS returning the distance of every node from the source set.
///
/// Unreachable nodes get [`Distance::INFINITY`].
pub fn bfs_sequential(adj: &CsrMatrix, sources: &[NodeId]) -> Result<Vec<Distance>> {
    bfs_sequential_with_config(adj, sources, &BfsConfig::default())
}

/// Sequential BFS with configuration.
pub fn bfs_sequential_with_config(
    adj: &CsrMatrix,
    sources: &[NodeId],
    config: &BfsConfig,
) -> Result<Vec<Distance>> {
    if adj.num_rows == 0 {
        return Err(GraphError::EmptyGraph);
    }

    let mut distances = vec![Distance::INFINITY; adj.num_rows];
    for &src in sources {
        if let Some(d) = distances.get_mut(src.index()) {
            *d = Distance::ZERO;
        }
    }

    if config.max_distance == 0 {
        // Still validate the sources.
        LevelBfs::new(adj, sources)?;
        return Ok(distances);
    }

    bfs_levels(adj, sources, |level, depth| {
        for node in level {
            distances[node.index()] = Distance::new(depth);
        }
        if depth >= config.max_distance {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })?;

    Ok(distances)
}
