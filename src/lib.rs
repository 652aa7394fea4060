//! workspace-seed library
//!
//! Generates a synthetic but realistic work-management dataset (one
//! organization with its teams, people, projects, sections, tasks and
//! subtasks, tags, comments and custom fields) and persists it to SQLite with
//! every foreign key satisfied.
//!
//! The heavy lifting lives in the workspace crates:
//!
//! - `seed_core` - records, values and configuration
//! - `seed_generator` - seeded, dependency-ordered generation
//! - `seed_populate_sqlite` - schema, batched inserts and wave loading
//!
//! This crate wires them into the `populate` command.

pub mod populate;
