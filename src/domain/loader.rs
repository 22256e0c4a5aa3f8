//! Loader for JSON domain trees.
//!
//! The upstream parser dumps its playbook/role/task/variable tree as JSON;
//! this module reads it back into [`Domain`] and optionally checks it for
//! the inconsistencies the graph builder silently tolerates.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use super::types::Domain;
use crate::graph::Entity;

/// Errors that can occur while loading a domain tree.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// Failed to read the file from disk.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse JSON content.
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The tree references entities that don't exist, or two entities
    /// would share a node identity.
    #[error("Malformed domain tree: {0}")]
    MalformedDomainTree(String),
}

/// Result type alias for loader operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// Parses a domain tree from a file path.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use rolegraph::domain::parse_file;
///
/// let domain = parse_file(Path::new("site.json")).unwrap();
/// println!("{} roles", domain.role.len());
/// ```
pub fn parse_file(path: &Path) -> DomainResult<Domain> {
    let content = fs::read_to_string(path)?;
    parse_str(&content)
}

/// Parses a domain tree from a string and links entity names.
///
/// # Example
///
/// ```
/// use rolegraph::domain::parse_str;
///
/// let json = r#"{"role": {"web": {"task": {"main": {}}}}, "playbook": {}}"#;
/// let domain = parse_str(json).unwrap();
/// assert_eq!(domain.role["web"].task["main"].role.as_deref(), Some("web"));
/// ```
pub fn parse_str(content: &str) -> DomainResult<Domain> {
    let mut domain: Domain = serde_json::from_str(content)?;
    domain.link();
    Ok(domain)
}

/// Checks cross references and node-identity uniqueness.
///
/// The graph builder never calls this; it is the single boundary check
/// for callers that don't trust their input.
pub fn validate(domain: &Domain) -> DomainResult<()> {
    for role in domain.role.values() {
        for dep in &role.role_deps {
            if !domain.role.contains_key(dep) {
                return Err(DomainError::MalformedDomainTree(format!(
                    "role '{}' depends on unknown role '{}'",
                    role.name, dep
                )));
            }
        }
    }

    let mut detached = BTreeSet::new();
    for playbook in domain.playbook.values() {
        for role in &playbook.role {
            if !domain.role.contains_key(role) {
                return Err(DomainError::MalformedDomainTree(format!(
                    "playbook '{}' includes unknown role '{}'",
                    playbook.name, role
                )));
            }
        }
        for task in &playbook.task {
            match &task.role {
                Some(role) if domain.task(role, &task.name).is_none() => {
                    return Err(DomainError::MalformedDomainTree(format!(
                        "playbook '{}' calls unknown task '{}::{}'",
                        playbook.name, role, task.name
                    )));
                }
                Some(_) => {}
                None => {
                    detached.insert(task.name.as_str());
                }
            }
        }
    }

    let mut entities: Vec<Entity> = Vec::new();
    for role in domain.role.values() {
        entities.push(Entity::role(role));
        entities.extend(role.task.values().map(Entity::task));
        entities.extend(role.vars().map(|(vs, v)| Entity::variable(role, vs, v)));
    }
    entities.extend(domain.playbook.values().map(Entity::playbook));
    entities.extend(detached.into_iter().map(|name| Entity::Task {
        name: name.to_string(),
        role: None,
    }));

    let mut seen: HashMap<String, &Entity> = HashMap::with_capacity(entities.len());
    for entity in &entities {
        if let Some(previous) = seen.insert(entity.node_id(), entity) {
            return Err(DomainError::MalformedDomainTree(format!(
                "{} '{}' and {} '{}' share node identity '{}'",
                previous.kind(),
                previous.name(),
                entity.kind(),
                entity.name(),
                entity.node_id()
            )));
        }
    }

    Ok(())
}
