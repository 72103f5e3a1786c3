//! Data structures and configuration.

pub mod config;
pub mod document;
