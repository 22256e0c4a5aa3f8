//! Domain tree types.
//!
//! These structures mirror the tree produced by the playbook loader:
//! playbooks reference roles and tasks, roles own tasks and variable sets,
//! and variable sets own variables. Cross references are by name.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The complete domain tree handed to the graph builder.
///
/// # Example
///
/// ```
/// use rolegraph::domain::{Domain, Playbook, Role};
///
/// let domain = Domain::new()
///     .with_role(Role::new("web").with_task("install"))
///     .with_playbook(Playbook::new("site").with_role("web"));
///
/// assert_eq!(domain.role.len(), 1);
/// assert_eq!(domain.role["web"].task["install"].role.as_deref(), Some("web"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Domain {
    /// Roles keyed by name.
    #[serde(default)]
    pub role: BTreeMap<String, Role>,

    /// Playbooks keyed by name.
    #[serde(default)]
    pub playbook: BTreeMap<String, Playbook>,
}

impl Domain {
    /// Creates an empty domain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a role, keyed by its name.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role.insert(role.name.clone(), role);
        self
    }

    /// Adds a playbook, keyed by its name.
    pub fn with_playbook(mut self, playbook: Playbook) -> Self {
        self.playbook.insert(playbook.name.clone(), playbook);
        self
    }

    /// Fills in names from map keys and owning roles on owned tasks.
    ///
    /// Deserialized trees only carry names as map keys; this makes every
    /// entity self-describing so the builder never needs the parent map.
    pub fn link(&mut self) {
        for (name, role) in self.role.iter_mut() {
            role.name.clone_from(name);
            for (task_name, task) in role.task.iter_mut() {
                task.name.clone_from(task_name);
                task.role = Some(name.clone());
            }
            for (vs_name, varset) in role.varset.iter_mut() {
                varset.name.clone_from(vs_name);
                for (var_name, var) in varset.var.iter_mut() {
                    var.name.clone_from(var_name);
                }
            }
        }
        for (name, playbook) in self.playbook.iter_mut() {
            playbook.name.clone_from(name);
        }
    }

    /// Looks up a task by owning role and name.
    pub fn task(&self, role: &str, name: &str) -> Option<&Task> {
        self.role.get(role).and_then(|r| r.task.get(name))
    }
}

/// A reusable bundle of tasks and variable sets.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Role {
    #[serde(default)]
    pub name: String,

    /// Tasks owned by this role, keyed by name.
    #[serde(default)]
    pub task: BTreeMap<String, Task>,

    /// Variable sets owned by this role, keyed by name.
    #[serde(default)]
    pub varset: BTreeMap<String, VarSet>,

    /// Other roles whose tasks this role calls.
    #[serde(default)]
    pub role_deps: Vec<String>,
}

impl Role {
    /// Creates a role with no tasks, variable sets or dependencies.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds an owned task.
    pub fn with_task(mut self, name: impl Into<String>) -> Self {
        let task = Task::owned(name, self.name.clone());
        self.task.insert(task.name.clone(), task);
        self
    }

    /// Adds a variable to the named variable set, creating the set if needed.
    pub fn with_var(mut self, varset: impl Into<String>, var: impl Into<String>) -> Self {
        let varset = varset.into();
        let var = Variable::new(var);
        self.varset
            .entry(varset.clone())
            .or_insert_with(|| VarSet::new(varset))
            .var
            .insert(var.name.clone(), var);
        self
    }

    /// Declares a dependency on another role's tasks.
    pub fn with_role_dep(mut self, role: impl Into<String>) -> Self {
        self.role_deps.push(role.into());
        self
    }

    /// Iterates `(varset, variable)` pairs across all variable sets.
    pub fn vars(&self) -> impl Iterator<Item = (&VarSet, &Variable)> {
        self.varset
            .values()
            .flat_map(|vs| vs.var.values().map(move |v| (vs, v)))
    }
}

/// An action, owned by a role or attached directly to a playbook.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Task {
    #[serde(default)]
    pub name: String,

    /// Owning role, if any.
    #[serde(default)]
    pub role: Option<String>,
}

impl Task {
    /// A task owned by `role`.
    pub fn owned(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: Some(role.into()),
        }
    }

    /// A task with no owning role.
    pub fn detached(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: None,
        }
    }

    /// Dull tasks are internal wiring: `main`, or anything starting with `_`.
    pub fn is_dull(&self) -> bool {
        self.name.starts_with('_') || self.name == "main"
    }
}

/// A named group of variables owned by a role.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct VarSet {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub var: BTreeMap<String, Variable>,
}

impl VarSet {
    /// Creates an empty variable set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            var: BTreeMap::new(),
        }
    }
}

/// A variable declared in a variable set.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Variable {
    #[serde(default)]
    pub name: String,
}

impl Variable {
    /// Creates a variable.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Top-level unit that includes roles and calls tasks.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Playbook {
    #[serde(default)]
    pub name: String,

    /// Included roles, by name.
    #[serde(default)]
    pub role: Vec<String>,

    /// Directly called tasks.
    #[serde(default)]
    pub task: Vec<TaskRef>,
}

impl Playbook {
    /// Creates a playbook that includes nothing.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Includes a role by name.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role.push(role.into());
        self
    }

    /// Calls a task owned by `role`.
    pub fn with_task(mut self, role: impl Into<String>, task: impl Into<String>) -> Self {
        self.task.push(TaskRef {
            role: Some(role.into()),
            name: task.into(),
        });
        self
    }

    /// Calls a task that belongs to no role.
    pub fn with_detached_task(mut self, task: impl Into<String>) -> Self {
        self.task.push(TaskRef {
            role: None,
            name: task.into(),
        });
        self
    }
}

/// Reference from a playbook to a task.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TaskRef {
    #[serde(default)]
    pub role: Option<String>,
    pub name: String,
}

impl TaskRef {
    /// The task this reference points at.
    pub fn to_task(&self) -> Task {
        Task {
            name: self.name.clone(),
            role: self.role.clone(),
        }
    }
}
