//! CLI command implementations

pub mod list;
pub mod migrate;
pub mod projects;
pub mod seed;
pub mod show;
