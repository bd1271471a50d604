//! CLI library components for the ParentShield client.

pub mod logging;
pub mod render;
