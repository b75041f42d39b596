//! Node-level identifier types.
//!
//! - [`NodeId`]: dense index of a node inside one graph instance
//! - [`Distance`]: BFS level (hop count) from the seed set
//! - [`ComponentId`]: sequence number of an emitted component

use std::fmt;

use bytemuck::{Pod, Zeroable};

/// Node index inside a single graph.
///
/// Indices are only meaningful for the graph they came from. Every derived
/// graph (subgraph, remainder) has its own `0..n` index space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Invalid/sentinel node ID.
    pub const INVALID: NodeId = NodeId(u32::MAX);

    /// Create a new node ID.
    pub const fn new(id: u32) -> Self {
        NodeId(id)
    }

    /// Check if this is a valid node ID.
    pub const fn is_valid(&self) -> bool {
        self.0 != u32::MAX
    }

    /// Get the inner value.
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Index into per-node arrays.
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for NodeId {
    fn from(id: u32) -> Self {
        NodeId(id)
    }
}

impl From<usize> for NodeId {
    fn from(id: usize) -> Self {
        NodeId(id as u32)
    }
}

impl From<NodeId> for usize {
    fn from(id: NodeId) -> Self {
        id.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// SAFETY: NodeId is #[repr(transparent)] over u32
unsafe impl Zeroable for NodeId {}
unsafe impl Pod for NodeId {}

/// Distance from the seed set in BFS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Distance(pub u32);

impl Distance {
    /// Infinity (unreachable).
    pub const INFINITY: Distance = Distance(u32::MAX);

    /// Zero distance (seed node).
    pub const ZERO: Distance = Distance(0);

    /// Create a new distance.
    pub const fn new(d: u32) -> Self {
        Distance(d)
    }

    /// Check if node is reachable.
    pub const fn is_reachable(&self) -> bool {
        self.0 != u32::MAX
    }

    /// Get the inner value.
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// True if reachable and no further than `depth` hops away.
    pub const fn within(&self, depth: u32) -> bool {
        self.is_reachable() && self.0 <= depth
    }
}

impl From<u32> for Distance {
    fn from(d: u32) -> Self {
        Distance(d)
    }
}

// SAFETY: Distance is #[repr(transparent)] over u32
unsafe impl Zeroable for Distance {}
unsafe impl Pod for Distance {}

/// Sequence number of an extracted component (0-based, in emission order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ComponentId(pub u32);

impl ComponentId {
    /// Create a new component ID.
    pub const fn new(id: u32) -> Self {
        ComponentId(id)
    }

    /// Get the inner value.
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl From<u32> for ComponentId {
    fn from(id: u32) -> Self {
        ComponentId(id)
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// SAFETY: ComponentId is #[repr(transparent)] over u32
unsafe impl Zeroable for ComponentId {}
unsafe impl Pod for ComponentId {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_basics() {
        let node = NodeId::new(42);
        assert_eq!(node.get(), 42);
        assert_eq!(node.index(), 42);
        assert!(node.is_valid());
        assert!(!NodeId::INVALID.is_valid());
    }

    #[test]
    fn test_node_id_conversions() {
        let node: NodeId = 100u32.into();
        assert_eq!(node.get(), 100);

        let idx: usize = node.into();
        assert_eq!(idx, 100);
        assert_eq!(NodeId::from(7usize), NodeId(7));
    }

    #[test]
    fn test_distance_within() {
        assert!(Distance::ZERO.within(0));
        assert!(Distance::new(2).within(2));
        assert!(!Distance::new(3).within(2));
        assert!(!Distance::INFINITY.within(u32::MAX));
    }

    #[test]
    fn test_component_id_display() {
        assert_eq!(ComponentId::new(0).get(), 0);
        assert_eq!(ComponentId::new(12).to_string(), "12");
    }

    #[test]
    fn test_pod_traits() {
        let nodes = [NodeId::new(0), NodeId::new(1), NodeId::new(2)];
        let bytes = bytemuck::bytes_of(&nodes);
        assert_eq!(bytes.len(), 12);

        let raw: &[u32] = bytemuck::cast_slice(&nodes);
        assert_eq!(raw, &[0, 1, 2]);
    }
}
