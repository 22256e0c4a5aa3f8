//! JSON export implementation.
//!
//! Exports the built graph in JSON format for machine-readable output.

use super::Exporter;
use crate::graph::{Attrs, VizGraph};
use crate::grapher::rank_node;
use crate::style::{NodeKind, Rank, Relation};
use serde::Serialize;
use std::io::{self, Write};

/// JSON exporter implementation.
pub struct JsonExporter;

/// Serializable node for JSON output.
#[derive(Serialize)]
struct JsonNode<'a> {
    id: &'a str,
    label: &'a str,
    kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    rank: Option<Rank>,
    attrs: &'a Attrs,
}

/// Serializable edge for JSON output.
#[derive(Serialize)]
struct JsonEdge<'a> {
    from: &'a str,
    to: &'a str,
    relation: Relation,
    attrs: &'a Attrs,
}

/// Root JSON export structure.
#[derive(Serialize)]
struct JsonExport<'a> {
    graph: &'a Attrs,
    nodes: Vec<JsonNode<'a>>,
    edges: Vec<JsonEdge<'a>>,
}

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, graph: &VizGraph, writer: &mut W) -> io::Result<()> {
        let nodes: Vec<JsonNode> = graph
            .nodes()
            .map(|n| JsonNode {
                id: &n.id,
                label: &n.label,
                kind: n.kind(),
                rank: rank_node(n),
                attrs: &n.attrs,
            })
            .collect();

        let edges: Vec<JsonEdge> = graph
            .edges()
            .map(|(from, to, edge)| JsonEdge {
                from: &from.id,
                to: &to.id,
                relation: edge.relation,
                attrs: &edge.attrs,
            })
            .collect();

        let export = JsonExport {
            graph: graph.attrs(),
            nodes,
            edges,
        };

        let json = serde_json::to_string_pretty(&export)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writeln!(writer, "{}", json)
    }
}
