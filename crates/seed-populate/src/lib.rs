//! Common types and utilities for workspace-seed populators.
//!
//! This crate provides the shared argument type used by every
//! seed-populate-* crate, so all store backends expose the same generation
//! flags.

pub mod args;

pub use args::{CommonSeedArgs, DEFAULT_BATCH_SIZE};
