//! Command implementations for the nhl-stats CLI

pub mod common;
pub mod fetch;
pub mod report;
