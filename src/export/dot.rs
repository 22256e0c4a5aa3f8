//! DOT export implementation.
//!
//! Emits Graphviz source: graph attributes, nodes, edges, then one
//! `rank=` group per populated rank hint.

use std::collections::BTreeMap;
use std::io::{self, Write};

use super::Exporter;
use crate::graph::{Attrs, VizGraph};
use crate::grapher::rank_node;
use crate::style::Rank;

/// DOT exporter implementation.
pub struct DotExporter;

/// Escape special characters for quoted DOT strings.
pub fn escape(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

fn quote(input: &str) -> String {
    format!("\"{}\"", escape(input))
}

fn attr_list(label: Option<&str>, attrs: &Attrs) -> String {
    label
        .map(|l| ("label", l))
        .into_iter()
        .chain(attrs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .map(|(k, v)| format!("{}={}", k, quote(v)))
        .collect::<Vec<_>>()
        .join(", ")
}

impl Exporter for DotExporter {
    fn export<W: Write>(&self, graph: &VizGraph, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "digraph rolegraph {{")?;
        for (key, value) in graph.attrs() {
            writeln!(writer, "  {}={};", key, quote(value))?;
        }
        writeln!(writer)?;

        let mut ranks: BTreeMap<Rank, Vec<&str>> = BTreeMap::new();
        for node in graph.nodes() {
            writeln!(
                writer,
                "  {} [{}];",
                quote(&node.id),
                attr_list(Some(node.label.as_str()), &node.attrs)
            )?;
            if let Some(rank) = rank_node(node) {
                ranks.entry(rank).or_default().push(node.id.as_str());
            }
        }
        writeln!(writer)?;

        for (from, to, edge) in graph.edges() {
            writeln!(
                writer,
                "  {} -> {} [{}];",
                quote(&from.id),
                quote(&to.id),
                attr_list(None, &edge.attrs)
            )?;
        }

        if !ranks.is_empty() {
            writeln!(writer)?;
        }
        for (rank, ids) in &ranks {
            let members: Vec<String> = ids.iter().copied().map(quote).collect();
            writeln!(writer, "  {{ rank={}; {}; }}", rank, members.join("; "))?;
        }

        writeln!(writer, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Domain, Playbook, Role};
    use crate::grapher::{build_graph, GraphOptions};

    fn render(graph: &VizGraph) -> String {
        let mut buffer = Vec::new();
        DotExporter.export(graph, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape("a\nb"), "a\\nb");
        assert_eq!(escape(r"c:\x"), r"c:\\x");
    }

    #[test]
    fn test_dot_export() {
        let domain = Domain::new()
            .with_role(Role::new("web").with_task("install"))
            .with_playbook(Playbook::new("site").with_role("web").with_task("web", "install"));
        let graph = build_graph(&domain, &GraphOptions::default());
        let output = render(&graph);

        assert!(output.starts_with("digraph rolegraph {"));
        assert!(output.contains("  rankdir=\"LR\";"));
        assert!(output.contains("\"web::install\" [label=\"install\", fillcolor=\"cornsilk\""));
        assert!(output.contains("\"site\" -> \"web\" [tooltip=\"includes\"];"));
        assert!(output.contains(
            "\"site\" -> \"web::install\" [color=\"blue\", style=\"dashed\", tooltip=\"calls task\"];"
        ));
        assert!(output.contains("{ rank=source; \"site\"; }"));
        assert!(output.contains("{ rank=same; \"web::install\"; }"));
        assert!(!output.contains("rank=sink"));
        assert!(output.trim_end().ends_with('}'));
    }

    #[test]
    fn test_dot_export_sink_rank_with_vars() {
        let domain = Domain::new().with_role(Role::new("web").with_var("defaults", "port"));
        let graph = build_graph(&domain, &GraphOptions::with_vars());
        let output = render(&graph);

        assert!(output.contains("{ rank=sink; \"web::defaults::port\"; }"));
    }
}
