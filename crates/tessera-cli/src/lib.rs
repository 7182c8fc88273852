//! Tessera CLI - Command-line interface for seeding CKAN from a spreadsheet
//!
//! This crate provides the CLI application that ties together all Tessera components.

pub mod config;
pub mod preview;

pub use config::{Command, Config, PreviewFormat};
