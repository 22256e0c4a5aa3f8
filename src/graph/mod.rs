//! Graph module for the visualization graph.
//!
//! This module provides the [`VizGraph`] struct: a directed graph whose
//! nodes are keyed by a fully-qualified identity and annotated with the
//! entity they came from and renderer attributes.
//!
//! # Example
//!
//! ```rust
//! use rolegraph::graph::{Entity, VizEdge, VizGraph};
//! use rolegraph::style::Relation;
//!
//! let mut graph = VizGraph::new();
//! graph.get_or_make("web", Entity::role_named("web"));
//! graph.get_or_make("web::main", Entity::Task { name: "main".into(), role: Some("web".into()) });
//! graph.add_edge("web", "web::main", VizEdge::new(Relation::RoleCallsTask));
//!
//! assert_eq!(graph.node_count(), 2);
//! assert_eq!(graph.edge_count(), 1);
//! ```

mod node;
mod viz_graph;

pub use node::{node_id, Attrs, Entity, VizEdge, VizNode, ID_SEPARATOR};
pub use viz_graph::VizGraph;
