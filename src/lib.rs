//! context-forge: assemble project context documents for AI coding assistants.
//!
//! A project record is turned into markdown built from editable statements
//! and a catalog of system prompts.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api;
pub use domain::AppError;
