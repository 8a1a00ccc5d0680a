pub mod cli;
pub mod core;
pub mod games;

// Re-export for convenience
pub use crate::core::game::{Context, EngineCommand, Game};
