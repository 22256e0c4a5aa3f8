//! Graph builder: turns a [`Domain`] tree into a styled [`VizGraph`].
//!
//! The pipeline runs in a fixed order over one graph:
//!
//! 1. materialize one node per entity ([`add_nodes`])
//! 2. connect playbooks to roles and tasks ([`connect_playbooks`])
//! 3. connect roles to role dependencies, tasks and variables ([`connect_roles`])
//! 4. hide dull tasks, keeping reachability ([`hide_dull_tasks`])
//! 5. decorate, then drop variables unless asked to keep them ([`decorate`], [`hide_variables`])
//!
//! # Example
//!
//! ```
//! use rolegraph::domain::{Domain, Playbook, Role};
//! use rolegraph::grapher::{build_graph, GraphOptions};
//!
//! let domain = Domain::new()
//!     .with_role(Role::new("r1").with_task("main").with_task("setup"))
//!     .with_playbook(Playbook::new("p1").with_role("r1"));
//!
//! let graph = build_graph(&domain, &GraphOptions::default());
//!
//! assert_eq!(graph.node_count(), 3);
//! assert!(!graph.contains("r1::main"));
//! assert!(graph.has_edge("p1", "r1"));
//! ```

mod decorate;

pub use decorate::{decorate, decorate_nodes, flag_unused_roles, hide_variables, rank_node};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::Domain;
use crate::graph::{Entity, VizEdge, VizGraph};
use crate::style::Relation;

/// Caller-supplied build options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphOptions {
    /// Keep variable nodes in the final graph.
    pub show_vars: bool,
}

impl GraphOptions {
    /// Options that keep variable nodes.
    pub fn with_vars() -> Self {
        Self { show_vars: true }
    }
}

/// Builds a populated, decorated graph from `domain`.
pub fn build_graph(domain: &Domain, options: &GraphOptions) -> VizGraph {
    let (nodes, edges) = capacity_hint(domain);
    let mut g = VizGraph::with_capacity(nodes, edges);
    build_graph_into(&mut g, domain, options);
    g
}

/// Upper bound on `(nodes, edges)` the pipeline will create for `domain`.
///
/// Playbook references resolve to owned entities, so only detached
/// playbook tasks add nodes beyond the owned ones.
fn capacity_hint(domain: &Domain) -> (usize, usize) {
    let mut nodes = domain.playbook.len();
    let mut edges = 0;
    for role in domain.role.values() {
        let owned = role.task.len() + role.vars().count();
        nodes += 1 + owned;
        edges += owned + role.role_deps.len();
    }
    for playbook in domain.playbook.values() {
        nodes += playbook.task.iter().filter(|t| t.role.is_none()).count();
        edges += playbook.role.len() + playbook.task.len();
    }
    (nodes, edges)
}

/// Runs the full pipeline against a caller-supplied, empty graph.
pub fn build_graph_into(g: &mut VizGraph, domain: &Domain, options: &GraphOptions) {
    g.set_attr("rankdir", "LR");
    g.set_attr("tooltip", " ");

    add_nodes(g, domain);
    debug!(nodes = g.node_count(), "materialized nodes");

    connect_playbooks(g, domain);
    connect_roles(g, domain);
    debug!(edges = g.edge_count(), "connected graph");

    let hidden = hide_dull_tasks(g, domain);
    debug!(hidden, "hid dull tasks");

    decorate(g);

    if !options.show_vars {
        let removed = hide_variables(g);
        debug!(removed, "hid variables");
    }

    debug!(
        nodes = g.node_count(),
        edges = g.edge_count(),
        "graph built"
    );
}

/// Materializes one node per entity in the tree.
///
/// Playbook references to roles and tasks go through the same
/// get-or-create path, so referenced entities resolve to the owned ones.
pub fn add_nodes(g: &mut VizGraph, domain: &Domain) {
    for role in domain.role.values() {
        add_node(g, Entity::role(role));
        for task in role.task.values() {
            add_node(g, Entity::task(task));
        }
        for (varset, var) in role.vars() {
            add_node(g, Entity::variable(role, varset, var));
        }
    }

    for playbook in domain.playbook.values() {
        add_node(g, Entity::playbook(playbook));
        for role in &playbook.role {
            add_node(g, Entity::role_named(role));
        }
        for task in &playbook.task {
            add_node(g, Entity::task_ref(task));
        }
    }
}

/// Gets or creates the node for `entity`.
///
/// The label and entity payload are set once, when the node is created;
/// later calls with the same identity leave the node untouched.
///
/// # Arguments
///
/// * `g` - Graph to materialize into
/// * `entity` - Entity the node stands for
///
/// # Returns
///
/// The node identity.
pub fn add_node(g: &mut VizGraph, entity: Entity) -> String {
    let id = entity.node_id();
    g.get_or_make(&id, entity);
    id
}

/// Connects every playbook to its included roles and directly called tasks.
pub fn connect_playbooks(g: &mut VizGraph, domain: &Domain) {
    for playbook in domain.playbook.values() {
        let from = Entity::playbook(playbook).node_id();
        for role in &playbook.role {
            connect(g, &from, role, Relation::Includes);
        }
        for task in &playbook.task {
            connect(g, &from, &Entity::task_ref(task).node_id(), Relation::PlaybookCallsTask);
        }
    }
}

/// Connects every role to the roles it depends on, its tasks and its variables.
pub fn connect_roles(g: &mut VizGraph, domain: &Domain) {
    for role in domain.role.values() {
        let from = Entity::role(role).node_id();
        for dep in &role.role_deps {
            connect(g, &from, dep, Relation::CallsForeignTask);
        }
        for task in role.task.values() {
            connect(g, &from, &Entity::task(task).node_id(), Relation::RoleCallsTask);
        }
        for (varset, var) in role.vars() {
            let to = Entity::variable(role, varset, var).node_id();
            connect(g, &from, &to, Relation::ProvidesVar);
        }
    }
}

fn connect(g: &mut VizGraph, from: &str, to: &str, relation: Relation) {
    if !g.add_edge(from, to, VizEdge::new(relation)) {
        warn!(from, to, %relation, "skipping edge to unknown node");
    }
}

/// Removes dull tasks with a rewiring cut.
///
/// Returns the number of nodes removed.
pub fn hide_dull_tasks(g: &mut VizGraph, domain: &Domain) -> usize {
    let mut removed = 0;
    for role in domain.role.values() {
        let dull: Vec<String> = role
            .task
            .values()
            .filter(|task| task.is_dull())
            .map(|task| Entity::task(task).node_id())
            .collect();
        removed += g.lowercut(dull);
    }
    removed
}
