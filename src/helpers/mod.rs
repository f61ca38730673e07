//! Helper functions shared by content loading, listing and migration

mod date;

pub use date::*;
