//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod load_resources;
pub mod panel_controller;
