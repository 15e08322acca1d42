//! Common utilities and shared types for the GISO workspace.
//!
//! This crate provides configuration handling, the JSON graph description
//! format handed to the engine, and common test cases used across the project.

mod config;
mod description;
mod test_cases;

pub use crate::config::*;
pub use crate::description::*;
pub use crate::test_cases::*;
