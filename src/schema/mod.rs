//! Schema module - Configuration types for building organisms.

mod config;

pub use config::*;
