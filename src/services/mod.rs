//! Service layer for Lector business logic.
//!
//! Domain logic separated from UI concerns. Services emit events for
//! progress tracking so the CLI (or any other interface) can render
//! them however it wants.

pub mod pipeline;

pub use pipeline::{Pipeline, PipelineError, PipelineEvent};
