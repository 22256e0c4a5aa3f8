//! Node kinds, edge relations and their visual styling.
//!
//! Styling is a static table keyed by [`NodeKind`] and [`Relation`]; the
//! renderer only ever sees the resulting attribute maps.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fill color for roles no playbook reaches.
pub const UNUSED_ROLE_FILL: &str = "yellowgreen";

/// Tooltip suffix for roles no playbook reaches.
pub const UNUSED_ROLE_TOOLTIP: &str = "not used by any playbook";

/// The four kinds of node the builder materializes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Playbook,
    Role,
    Task,
    Variable,
}

impl NodeKind {
    /// Shape and fill color for this kind.
    pub fn style(self) -> NodeStyle {
        match self {
            Self::Playbook => NodeStyle::new("folder", "cornflowerblue"),
            Self::Role => NodeStyle::new("house", "palegreen"),
            Self::Task => NodeStyle::new("octagon", "cornsilk"),
            Self::Variable => NodeStyle::new("oval", "white"),
        }
    }

    /// Layout rank hint; `None` defers to the layout engine.
    pub fn rank(self) -> Option<Rank> {
        match self {
            Self::Playbook => Some(Rank::Source),
            Self::Task => Some(Rank::Same),
            Self::Variable => Some(Rank::Sink),
            Self::Role => None,
        }
    }

    /// Kind name with a leading capital, used as the tooltip prefix.
    pub fn title(self) -> &'static str {
        match self {
            Self::Playbook => "Playbook",
            Self::Role => "Role",
            Self::Task => "Task",
            Self::Variable => "Variable",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Playbook => write!(f, "playbook"),
            Self::Role => write!(f, "role"),
            Self::Task => write!(f, "task"),
            Self::Variable => write!(f, "variable"),
        }
    }
}

/// Shape and fill color of a node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeStyle {
    pub shape: &'static str,
    pub fillcolor: &'static str,
}

impl NodeStyle {
    const fn new(shape: &'static str, fillcolor: &'static str) -> Self {
        Self { shape, fillcolor }
    }
}

/// Rank hint consumed by the renderer for left-to-right placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    /// Leftmost.
    Source,
    /// Shared with peers of the same kind.
    Same,
    /// Rightmost.
    Sink,
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Same => write!(f, "same"),
            Self::Sink => write!(f, "sink"),
        }
    }
}

/// The relationship an edge represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    /// Playbook includes a role.
    Includes,
    /// Playbook calls a task directly.
    PlaybookCallsTask,
    /// Role owns and runs a task.
    RoleCallsTask,
    /// Role calls into another role's tasks.
    CallsForeignTask,
    /// Role provides a variable through one of its variable sets.
    ProvidesVar,
}

impl Relation {
    /// Tooltip text for edges of this relation.
    pub fn tooltip(self) -> &'static str {
        match self {
            Self::Includes => "includes",
            Self::PlaybookCallsTask | Self::RoleCallsTask => "calls task",
            Self::CallsForeignTask => "calls foreign task",
            Self::ProvidesVar => "provides var",
        }
    }

    /// Style attributes beyond the tooltip.
    pub fn style(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::PlaybookCallsTask => &[("style", "dashed"), ("color", "blue")],
            Self::CallsForeignTask => &[("color", "hotpink")],
            Self::Includes | Self::RoleCallsTask | Self::ProvidesVar => &[],
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tooltip())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_table() {
        assert_eq!(NodeKind::Playbook.style().shape, "folder");
        assert_eq!(NodeKind::Role.style().shape, "house");
        assert_eq!(NodeKind::Task.style().shape, "octagon");
        assert_eq!(NodeKind::Variable.style().shape, "oval");
        assert_eq!(NodeKind::Variable.style().fillcolor, "white");
    }

    #[test]
    fn test_rank_hints() {
        assert_eq!(NodeKind::Playbook.rank(), Some(Rank::Source));
        assert_eq!(NodeKind::Task.rank(), Some(Rank::Same));
        assert_eq!(NodeKind::Variable.rank(), Some(Rank::Sink));
        assert_eq!(NodeKind::Role.rank(), None);
    }

    #[test]
    fn test_relation_tooltips() {
        assert_eq!(Relation::Includes.tooltip(), "includes");
        assert_eq!(Relation::PlaybookCallsTask.tooltip(), "calls task");
        assert_eq!(Relation::RoleCallsTask.tooltip(), "calls task");
        assert_eq!(Relation::CallsForeignTask.tooltip(), "calls foreign task");
        assert_eq!(Relation::ProvidesVar.tooltip(), "provides var");
    }

    #[test]
    fn test_relation_style() {
        assert!(Relation::PlaybookCallsTask.style().contains(&("style", "dashed")));
        assert!(Relation::CallsForeignTask.style().contains(&("color", "hotpink")));
        assert!(Relation::Includes.style().is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", NodeKind::Variable), "variable");
        assert_eq!(NodeKind::Role.title(), "Role");
        assert_eq!(format!("{}", Rank::Sink), "sink");
    }
}
