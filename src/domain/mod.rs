//! Domain module for the playbook/role/task/variable tree.
//!
//! The tree is produced by an upstream loader and consumed read-only by
//! the graph builder.
//!
//! # Example
//!
//! ```
//! use rolegraph::domain::{parse_str, validate};
//!
//! let json = r#"{
//!     "role": {"web": {"task": {"main": {}, "setup": {}}}},
//!     "playbook": {"site": {"role": ["web"]}}
//! }"#;
//!
//! let domain = parse_str(json).unwrap();
//! assert!(validate(&domain).is_ok());
//! assert_eq!(domain.role["web"].task.len(), 2);
//! ```

pub mod loader;
pub mod types;

pub use loader::{parse_file, parse_str, validate, DomainError, DomainResult};
pub use types::{Domain, Playbook, Role, Task, TaskRef, VarSet, Variable};
