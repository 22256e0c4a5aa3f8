//! Node and edge payloads stored in a [`VizGraph`](super::VizGraph).

use std::collections::BTreeMap;

use crate::domain::{Playbook, Role, Task, TaskRef, VarSet, Variable};
use crate::style::{NodeKind, Relation};

/// Free-form renderer attributes (shape, fillcolor, tooltip, ...).
///
/// Ordered so that rendered output is stable.
pub type Attrs = BTreeMap<String, String>;

/// Separator between a parent qualifier and an entity name.
pub const ID_SEPARATOR: &str = "::";

/// Computes a node identity: `parent::name`, or `name` for top-level entities.
///
/// # Example
///
/// ```
/// use rolegraph::graph::node_id;
///
/// assert_eq!(node_id("install", Some("web")), "web::install");
/// assert_eq!(node_id("site", None), "site");
/// ```
pub fn node_id(name: &str, parent: Option<&str>) -> String {
    match parent {
        Some(parent) => format!("{parent}{ID_SEPARATOR}{name}"),
        None => name.to_string(),
    }
}

/// The domain entity a node was materialized from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Entity {
    Playbook {
        name: String,
    },
    Role {
        name: String,
    },
    Task {
        name: String,
        role: Option<String>,
    },
    Variable {
        name: String,
        role: String,
        varset: String,
    },
}

impl Entity {
    /// Entity for a playbook.
    pub fn playbook(playbook: &Playbook) -> Self {
        Self::Playbook {
            name: playbook.name.clone(),
        }
    }

    /// Entity for an owned role.
    pub fn role(role: &Role) -> Self {
        Self::role_named(&role.name)
    }

    /// A role known only by name, as referenced from a playbook or a role dependency.
    pub fn role_named(name: &str) -> Self {
        Self::Role {
            name: name.to_string(),
        }
    }

    /// Entity for a task, qualified by its owning role if it has one.
    pub fn task(task: &Task) -> Self {
        Self::Task {
            name: task.name.clone(),
            role: task.role.clone(),
        }
    }

    /// Entity for the task a playbook calls.
    ///
    /// Resolves to the same identity as the owned task it points at.
    pub fn task_ref(task: &TaskRef) -> Self {
        Self::task(&task.to_task())
    }

    /// Entity for a variable provided by `role` through `varset`.
    ///
    /// # Arguments
    ///
    /// * `role` - Role owning the variable set
    /// * `varset` - Variable set holding the variable
    /// * `var` - The variable itself
    pub fn variable(role: &Role, varset: &VarSet, var: &Variable) -> Self {
        Self::Variable {
            name: var.name.clone(),
            role: role.name.clone(),
            varset: varset.name.clone(),
        }
    }

    /// Node kind this entity materializes as.
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Playbook { .. } => NodeKind::Playbook,
            Self::Role { .. } => NodeKind::Role,
            Self::Task { .. } => NodeKind::Task,
            Self::Variable { .. } => NodeKind::Variable,
        }
    }

    /// The unqualified entity name.
    pub fn name(&self) -> &str {
        match self {
            Self::Playbook { name }
            | Self::Role { name }
            | Self::Task { name, .. }
            | Self::Variable { name, .. } => name,
        }
    }

    /// Qualifier of the immediate owner: the role for tasks, `role::varset` for variables.
    pub fn parent(&self) -> Option<String> {
        match self {
            Self::Playbook { .. } | Self::Role { .. } => None,
            Self::Task { role, .. } => role.clone(),
            Self::Variable { role, varset, .. } => Some(node_id(varset, Some(role))),
        }
    }

    /// Fully-qualified node identity.
    ///
    /// # Returns
    ///
    /// `parent::name` when the entity has an owner, else the bare name.
    pub fn node_id(&self) -> String {
        node_id(self.name(), self.parent().as_deref())
    }
}

/// A node in the visualization graph.
#[derive(Debug, Clone)]
pub struct VizNode {
    /// Fully-qualified identity.
    pub id: String,
    /// Display label; the bare entity name.
    pub label: String,
    /// Originating entity.
    pub entity: Entity,
    /// Renderer attributes.
    pub attrs: Attrs,
}

impl VizNode {
    /// Creates a node labelled with the entity's bare name and no attributes.
    pub fn new(id: impl Into<String>, entity: Entity) -> Self {
        Self {
            id: id.into(),
            label: entity.name().to_string(),
            entity,
            attrs: Attrs::new(),
        }
    }

    /// Node kind, taken from the entity.
    pub fn kind(&self) -> NodeKind {
        self.entity.kind()
    }

    /// Gets a renderer attribute.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Sets a renderer attribute, replacing any previous value.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(key.into(), value.into());
    }

    /// Tooltip attribute, if decorated.
    pub fn tooltip(&self) -> Option<&str> {
        self.attr("tooltip")
    }
}

/// A directed edge carrying its relation and renderer attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct VizEdge {
    pub relation: Relation,
    pub attrs: Attrs,
}

impl VizEdge {
    /// Creates an edge styled for `relation`, tooltip included.
    pub fn new(relation: Relation) -> Self {
        let mut attrs: Attrs = relation
            .style()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        attrs.insert("tooltip".to_string(), relation.tooltip().to_string());
        Self { relation, attrs }
    }

    /// Tooltip describing the relation.
    pub fn tooltip(&self) -> Option<&str> {
        self.attrs.get("tooltip").map(String::as_str)
    }
}
