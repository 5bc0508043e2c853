//! WorkTask store library.
//!
//! Exposes the task/checklist/dependency model, its query and mutation
//! operations, and dashboard aggregation.

pub mod cli;
pub mod config;
pub mod dates;
pub mod db;
pub mod error;
pub mod types;
