//! Dataset generator for workspace-seed.
//!
//! This crate provides the `DatasetGenerator`, which produces a complete,
//! referentially consistent work-management dataset from a [`SeedConfig`].
//! All randomness flows through a seeded [`SeedContext`], so the same seed
//! and clock anchor reproduce the same dataset.
//!
//! # Architecture
//!
//! ```text
//! SeedConfig + seed
//!        │
//!        ▼
//! ┌──────────────────┐
//! │ DatasetGenerator │
//! │                  │
//! │  - rng (StdRng)  │
//! │  - IdProvider    │
//! │  - Clock         │
//! └────────┬─────────┘
//!          │  workspace → teams/users → memberships → projects → sections
//!          │  → tasks (+ subtask links) → tags → comments → custom fields
//!          ▼
//!       Dataset
//! ```
//!
//! # Example
//!
//! ```rust
//! use seed_core::SeedConfig;
//! use seed_generator::DatasetGenerator;
//!
//! let config = SeedConfig {
//!     n_users: 10,
//!     n_teams: 2,
//!     n_projects: 3,
//!     n_tasks: 20,
//!     n_tags: 5,
//!     ..SeedConfig::default()
//! };
//!
//! let dataset = DatasetGenerator::new(config, 42).generate().unwrap();
//! assert_eq!(dataset.sections.len(), 12);
//! assert!(dataset.validate().is_empty());
//! ```
//!
//! [`SeedConfig`]: seed_core::SeedConfig

pub mod context;
pub mod dataset;
pub mod dates;
pub mod error;
pub mod generators;
pub mod ids;
pub mod validate;

pub use context::SeedContext;
pub use dataset::{Dataset, DatasetGenerator};
pub use dates::{offset_date, Clock};
pub use error::GeneratorError;
pub use ids::IdProvider;
pub use validate::Violation;
