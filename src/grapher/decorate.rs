//! Decoration: per-kind styling, unused-role flags and variable pruning.

use crate::graph::{VizGraph, VizNode};
use crate::style::{NodeKind, Rank, UNUSED_ROLE_FILL, UNUSED_ROLE_TOOLTIP};

/// Styles every node, then flags roles nothing points at.
pub fn decorate(g: &mut VizGraph) {
    decorate_nodes(g);
    flag_unused_roles(g);
}

/// Applies the per-kind style table and default tooltip to every node.
pub fn decorate_nodes(g: &mut VizGraph) {
    g.for_each_node_mut(|node| {
        let kind = node.kind();
        let style = kind.style();
        node.set_attr("shape", style.shape);
        node.set_attr("fillcolor", style.fillcolor);
        node.set_attr("style", "filled");

        let qualifier = match kind {
            NodeKind::Task => node.entity.node_id(),
            _ => node.entity.name().to_string(),
        };
        node.set_attr("tooltip", format!("{} {}", kind.title(), qualifier));
    });
}

/// Marks role nodes with no incoming edges.
///
/// Returns the identities of the flagged roles.
pub fn flag_unused_roles(g: &mut VizGraph) -> Vec<String> {
    let unused: Vec<String> = g
        .nodes()
        .filter(|n| n.kind() == NodeKind::Role)
        .filter(|n| g.incoming_count(&n.id) == 0)
        .map(|n| n.id.clone())
        .collect();

    for id in &unused {
        if let Some(node) = g.node_mut(id) {
            node.set_attr("fillcolor", UNUSED_ROLE_FILL);
            let tooltip = format!("Role {}: {}", node.label, UNUSED_ROLE_TOOLTIP);
            node.set_attr("tooltip", tooltip);
        }
    }
    unused
}

/// Drops every variable node and its edges, without rewiring.
///
/// Returns the number of nodes removed.
pub fn hide_variables(g: &mut VizGraph) -> usize {
    let vars: Vec<String> = g
        .nodes()
        .filter(|n| n.kind() == NodeKind::Variable)
        .map(|n| n.id.clone())
        .collect();
    g.cut(vars)
}

/// Rank hint for a node, consumed by the layout engine.
pub fn rank_node(node: &VizNode) -> Option<Rank> {
    node.kind().rank()
}
