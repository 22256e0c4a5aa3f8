//! Export functionality for built graphs.
//!
//! This module provides exporters for handing a [`VizGraph`] to a renderer:
//! Graphviz DOT source, or JSON for other tooling.

pub mod dot;
pub mod json;

use crate::graph::VizGraph;
use std::io::{self, Write};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Graphviz DOT source
    #[default]
    Dot,
    /// JSON format - machine-readable, full data
    Json,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dot" | "gv" => Ok(ExportFormat::Dot),
            "json" => Ok(ExportFormat::Json),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: dot, json",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Dot => write!(f, "dot"),
            ExportFormat::Json => write!(f, "json"),
        }
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the graph to the given writer.
    fn export<W: Write>(&self, graph: &VizGraph, writer: &mut W) -> io::Result<()>;
}

/// Export the graph in the specified format.
pub fn export<W: Write>(format: ExportFormat, graph: &VizGraph, writer: &mut W) -> io::Result<()> {
    match format {
        ExportFormat::Dot => dot::DotExporter.export(graph, writer),
        ExportFormat::Json => json::JsonExporter.export(graph, writer),
    }
}

/// Export the graph to a string.
pub fn export_to_string(format: ExportFormat, graph: &VizGraph) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, graph, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
