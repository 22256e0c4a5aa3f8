//! Rolegraph - graph visualizer for configuration-management projects
//!
//! This crate turns a parsed tree of playbooks, roles, tasks and variables
//! into a styled directed graph, and exports it for rendering.

pub mod domain;
pub mod export;
pub mod graph;
pub mod grapher;
pub mod style;
