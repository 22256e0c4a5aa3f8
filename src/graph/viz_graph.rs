//! Visualization graph implementation using petgraph.
//!
//! Nodes are keyed by a string identity and carry the entity they were
//! materialized from plus renderer attributes. Edges point from the
//! including/owning entity to the included/owned one.

use petgraph::algo::has_path_connecting;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use petgraph::Direction;
use std::collections::HashMap;

use super::node::{Attrs, Entity, VizEdge, VizNode};

/// A directed, attributed graph ready for rendering.
///
/// Backed by a `StableDiGraph` so node indices survive removals, with a
/// side table from identity to index for O(1) lookup.
///
/// # Example
///
/// ```rust
/// use rolegraph::graph::{Entity, VizEdge, VizGraph};
/// use rolegraph::style::Relation;
///
/// let mut graph = VizGraph::new();
/// graph.get_or_make("site", Entity::Playbook { name: "site".into() });
/// graph.get_or_make("web", Entity::role_named("web"));
///
/// assert!(graph.add_edge("site", "web", VizEdge::new(Relation::Includes)));
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct VizGraph {
    /// The underlying directed graph
    graph: StableDiGraph<VizNode, VizEdge>,
    /// Maps node identities to their indices
    node_indices: HashMap<String, NodeIndex>,
    /// Graph-level attributes (rankdir, tooltip, ...)
    attrs: Attrs,
}

impl Default for VizGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl VizGraph {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self {
            graph: StableDiGraph::new(),
            node_indices: HashMap::new(),
            attrs: Attrs::new(),
        }
    }

    /// Creates a new graph with pre-allocated capacity.
    ///
    /// # Arguments
    ///
    /// * `nodes` - Expected number of nodes
    /// * `edges` - Expected number of edges
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            graph: StableDiGraph::with_capacity(nodes, edges),
            node_indices: HashMap::with_capacity(nodes),
            attrs: Attrs::new(),
        }
    }

    /// Returns the node with identity `id`, creating it from `entity` if absent.
    ///
    /// An existing node is returned untouched.
    pub fn get_or_make(&mut self, id: &str, entity: Entity) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(id) {
            return idx;
        }

        let idx = self.graph.add_node(VizNode::new(id, entity));
        self.node_indices.insert(id.to_string(), idx);
        idx
    }

    /// Adds a directed edge between two existing nodes.
    ///
    /// Returns `false` if either node doesn't exist.
    pub fn add_edge(&mut self, from: &str, to: &str, edge: VizEdge) -> bool {
        let (Some(&from_idx), Some(&to_idx)) =
            (self.node_indices.get(from), self.node_indices.get(to))
        else {
            return false;
        };

        self.graph.add_edge(from_idx, to_idx, edge);
        true
    }

    /// Removes nodes, rewiring each predecessor directly to each successor.
    ///
    /// Nodes are removed one at a time, so chains of removed nodes collapse
    /// correctly. The rewired edge keeps the incoming edge's relation and
    /// attributes. Self-loops and duplicates of an existing edge are not
    /// created. Unknown identities are ignored.
    ///
    /// Returns the number of nodes removed.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rolegraph::graph::{Entity, VizEdge, VizGraph};
    /// use rolegraph::style::Relation;
    ///
    /// let mut graph = VizGraph::new();
    /// for name in ["a", "b", "c"] {
    ///     graph.get_or_make(name, Entity::role_named(name));
    /// }
    /// graph.add_edge("a", "b", VizEdge::new(Relation::CallsForeignTask));
    /// graph.add_edge("b", "c", VizEdge::new(Relation::CallsForeignTask));
    ///
    /// assert_eq!(graph.lowercut(["b"]), 1);
    /// assert!(graph.has_path("a", "c"));
    /// ```
    pub fn lowercut<I, S>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut removed = 0;
        for id in ids {
            let Some(idx) = self.node_indices.remove(id.as_ref()) else {
                continue;
            };

            let incoming: Vec<(NodeIndex, VizEdge)> = self
                .graph
                .edges_directed(idx, Direction::Incoming)
                .filter(|e| e.source() != idx)
                .map(|e| (e.source(), e.weight().clone()))
                .collect();
            let outgoing: Vec<NodeIndex> = self
                .graph
                .edges_directed(idx, Direction::Outgoing)
                .map(|e| e.target())
                .filter(|&target| target != idx)
                .collect();

            self.graph.remove_node(idx);
            removed += 1;

            for (pred, edge) in &incoming {
                for &succ in &outgoing {
                    if *pred == succ || self.graph.find_edge(*pred, succ).is_some() {
                        continue;
                    }
                    self.graph.add_edge(*pred, succ, edge.clone());
                }
            }
        }
        removed
    }

    /// Removes nodes and every incident edge, without rewiring.
    ///
    /// Returns the number of nodes removed.
    pub fn cut<I, S>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut removed = 0;
        for id in ids {
            if let Some(idx) = self.node_indices.remove(id.as_ref()) {
                self.graph.remove_node(idx);
                removed += 1;
            }
        }
        removed
    }

    /// Gets a node by identity.
    pub fn node(&self, id: &str) -> Option<&VizNode> {
        self.node_indices
            .get(id)
            .and_then(|&idx| self.graph.node_weight(idx))
    }

    /// Gets a mutable node by identity.
    pub fn node_mut(&mut self, id: &str) -> Option<&mut VizNode> {
        let idx = *self.node_indices.get(id)?;
        self.graph.node_weight_mut(idx)
    }

    /// Returns true if a node with identity `id` exists.
    pub fn contains(&self, id: &str) -> bool {
        self.node_indices.contains_key(id)
    }

    /// All nodes, in index order.
    pub fn nodes(&self) -> impl Iterator<Item = &VizNode> {
        self.graph
            .node_indices()
            .filter_map(move |idx| self.graph.node_weight(idx))
    }

    /// Applies `f` to every node, in index order.
    pub fn for_each_node_mut(&mut self, mut f: impl FnMut(&mut VizNode)) {
        let indices: Vec<NodeIndex> = self.graph.node_indices().collect();
        for idx in indices {
            if let Some(node) = self.graph.node_weight_mut(idx) {
                f(node);
            }
        }
    }

    /// All edges as `(from, to, edge)`.
    pub fn edges(&self) -> impl Iterator<Item = (&VizNode, &VizNode, &VizEdge)> {
        self.graph.edge_references().filter_map(move |e| {
            Some((
                self.graph.node_weight(e.source())?,
                self.graph.node_weight(e.target())?,
                self.graph.edge_weight(e.id())?,
            ))
        })
    }

    /// Outgoing edges of a node as `(target, edge)`.
    pub fn outgoing(&self, id: &str) -> Vec<(&VizNode, &VizEdge)> {
        self.directed(id, Direction::Outgoing)
    }

    /// Incoming edges of a node as `(source, edge)`.
    pub fn incoming(&self, id: &str) -> Vec<(&VizNode, &VizEdge)> {
        self.directed(id, Direction::Incoming)
    }

    fn directed(&self, id: &str, direction: Direction) -> Vec<(&VizNode, &VizEdge)> {
        let Some(&idx) = self.node_indices.get(id) else {
            return Vec::new();
        };

        self.graph
            .edges_directed(idx, direction)
            .filter_map(|e| {
                let other = match direction {
                    Direction::Outgoing => e.target(),
                    Direction::Incoming => e.source(),
                };
                Some((
                    self.graph.node_weight(other)?,
                    self.graph.edge_weight(e.id())?,
                ))
            })
            .collect()
    }

    /// Number of incoming edges; 0 for unknown nodes.
    pub fn incoming_count(&self, id: &str) -> usize {
        self.node_indices.get(id).map_or(0, |&idx| {
            self.graph
                .edges_directed(idx, Direction::Incoming)
                .count()
        })
    }

    /// Whether `to` is reachable from `from` along directed edges.
    pub fn has_path(&self, from: &str, to: &str) -> bool {
        match (self.node_indices.get(from), self.node_indices.get(to)) {
            (Some(&a), Some(&b)) => has_path_connecting(&self.graph, a, b, None),
            _ => false,
        }
    }

    /// Whether a direct edge `from -> to` exists.
    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        match (self.node_indices.get(from), self.node_indices.get(to)) {
            (Some(&a), Some(&b)) => self.graph.find_edge(a, b).is_some(),
            _ => false,
        }
    }

    /// Graph-level attributes.
    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    /// Sets a graph-level attribute.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(key.into(), value.into());
    }

    /// Gets a graph-level attribute.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of live edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// True when the graph holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Relation;

    fn role_graph(names: &[&str]) -> VizGraph {
        let mut graph = VizGraph::new();
        for name in names {
            graph.get_or_make(name, Entity::role_named(name));
        }
        graph
    }

    #[test]
    fn test_create_empty_graph() {
        let graph = VizGraph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_with_capacity_starts_empty() {
        let mut graph = VizGraph::with_capacity(16, 32);
        assert!(graph.is_empty());
        graph.get_or_make("web", Entity::role_named("web"));
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_get_or_make_is_idempotent() {
        let mut graph = VizGraph::new();
        let a = graph.get_or_make("web", Entity::role_named("web"));
        let b = graph.get_or_make("web", Entity::role_named("other"));

        assert_eq!(a, b);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.node("web").unwrap().label, "web");
    }

    #[test]
    fn test_add_edge() {
        let mut graph = role_graph(&["a", "b"]);

        assert!(graph.add_edge("a", "b", VizEdge::new(Relation::CallsForeignTask)));
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.has_edge("a", "b"));
        assert!(!graph.has_edge("b", "a"));

        assert!(!graph.add_edge("nonexistent", "b", VizEdge::new(Relation::Includes)));
        assert!(!graph.add_edge("a", "nonexistent", VizEdge::new(Relation::Includes)));
    }

    #[test]
    fn test_lowercut_rewires_predecessors_to_successors() {
        let mut graph = role_graph(&["p1", "p2", "mid", "s1", "s2"]);
        graph.add_edge("p1", "mid", VizEdge::new(Relation::Includes));
        graph.add_edge("p2", "mid", VizEdge::new(Relation::CallsForeignTask));
        graph.add_edge("mid", "s1", VizEdge::new(Relation::RoleCallsTask));
        graph.add_edge("mid", "s2", VizEdge::new(Relation::RoleCallsTask));

        assert_eq!(graph.lowercut(["mid"]), 1);

        assert!(!graph.contains("mid"));
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 4);
        for (from, to) in [("p1", "s1"), ("p1", "s2"), ("p2", "s1"), ("p2", "s2")] {
            assert!(graph.has_edge(from, to), "{from} -> {to}");
        }

        let rewired = graph.outgoing("p2");
        assert!(rewired
            .iter()
            .all(|(_, e)| e.relation == Relation::CallsForeignTask));
    }

    #[test]
    fn test_lowercut_chain() {
        let mut graph = role_graph(&["a", "b", "c", "d"]);
        graph.add_edge("a", "b", VizEdge::new(Relation::Includes));
        graph.add_edge("b", "c", VizEdge::new(Relation::Includes));
        graph.add_edge("c", "d", VizEdge::new(Relation::Includes));

        assert_eq!(graph.lowercut(["b", "c"]), 2);
        assert!(graph.has_edge("a", "d"));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_lowercut_no_duplicate_or_self_loop() {
        let mut graph = role_graph(&["a", "b", "c"]);
        graph.add_edge("a", "b", VizEdge::new(Relation::Includes));
        graph.add_edge("b", "a", VizEdge::new(Relation::Includes));
        graph.add_edge("b", "c", VizEdge::new(Relation::Includes));
        graph.add_edge("a", "c", VizEdge::new(Relation::Includes));

        graph.lowercut(["b"]);

        assert!(!graph.has_edge("a", "a"));
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.has_edge("a", "c"));
    }

    #[test]
    fn test_lowercut_unknown_is_ignored() {
        let mut graph = role_graph(&["a"]);
        assert_eq!(graph.lowercut(["ghost"]), 0);
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_cut_drops_paths() {
        let mut graph = role_graph(&["a", "b", "c"]);
        graph.add_edge("a", "b", VizEdge::new(Relation::Includes));
        graph.add_edge("b", "c", VizEdge::new(Relation::Includes));

        assert_eq!(graph.cut(["b"]), 1);

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 0);
        assert!(!graph.has_path("a", "c"));
    }

    #[test]
    fn test_indices_survive_removal() {
        let mut graph = role_graph(&["a", "b", "c"]);
        graph.cut(["a"]);

        assert_eq!(graph.node("c").unwrap().id, "c");
        assert_eq!(graph.node("b").unwrap().id, "b");
        let ids: Vec<&str> = graph.nodes().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn test_incoming_and_outgoing() {
        let mut graph = role_graph(&["a", "b", "c"]);
        graph.add_edge("a", "c", VizEdge::new(Relation::Includes));
        graph.add_edge("b", "c", VizEdge::new(Relation::Includes));

        assert_eq!(graph.incoming_count("c"), 2);
        assert_eq!(graph.incoming_count("a"), 0);
        assert_eq!(graph.incoming_count("ghost"), 0);
        assert_eq!(graph.outgoing("a").len(), 1);
        assert_eq!(graph.incoming("c").len(), 2);
        assert!(graph.outgoing("ghost").is_empty());
    }

    #[test]
    fn test_has_path() {
        let mut graph = role_graph(&["a", "b", "c"]);
        graph.add_edge("a", "b", VizEdge::new(Relation::Includes));
        graph.add_edge("b", "c", VizEdge::new(Relation::Includes));

        assert!(graph.has_path("a", "c"));
        assert!(!graph.has_path("c", "a"));
        assert!(!graph.has_path("a", "ghost"));
    }

    #[test]
    fn test_node_mut_and_attrs() {
        let mut graph = role_graph(&["a"]);
        graph.node_mut("a").unwrap().set_attr("shape", "house");
        graph.set_attr("rankdir", "LR");

        assert_eq!(graph.node("a").unwrap().attr("shape"), Some("house"));
        assert_eq!(graph.attr("rankdir"), Some("LR"));
        assert!(graph.node_mut("ghost").is_none());
    }

    #[test]
    fn test_for_each_node_mut() {
        let mut graph = role_graph(&["a", "b"]);
        graph.for_each_node_mut(|n| n.set_attr("style", "filled"));
        assert!(graph.nodes().all(|n| n.attr("style") == Some("filled")));
    }
}
