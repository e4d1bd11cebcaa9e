//! CLI library components for the marketing medallion pipeline.

pub mod cli;
pub mod commands;
pub mod generate;
pub mod logging;
pub mod summary;
