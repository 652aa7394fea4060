//! Core types for the workspace-seed generator.
//!
//! This crate provides the foundational types shared by the generator and
//! the populators:
//!
//! - [`Id`] - Opaque entity identifier
//! - [`SqlValue`] - Store-agnostic column value
//! - [`Record`] - A row that exposes its table, columns and values
//! - [`model`] - One record struct per table
//! - [`SeedConfig`] - Counts and history window for a run
//!
//! # Architecture
//!
//! ```text
//! seed-core (this crate)
//!    │
//!    ├─── seed-generator        (builds model records)
//!    │
//!    └─── seed-populate-sqlite  (persists any Record)
//! ```

pub mod config;
pub mod model;
pub mod record;
pub mod values;

// Re-exports for convenience
pub use config::{ConfigError, SeedConfig};
pub use model::{
    Comment, CustomFieldDefinition, EnumOption, FieldType, FieldValue, Layout, ParentLink,
    Priority, Project, ProjectCustomField, Section, Tag, Task, TaskFieldValue, TaskTag, Team,
    TeamMembership, User, Workspace,
};
pub use record::{describe_row, Record};
pub use values::{format_date, format_timestamp, Id, SqlValue, Timestamp};
