//! SHELF application library
//!
//! The book resource service and the bootstrap that wires it to MongoDB and
//! the HTTP server.

pub mod bootstrap;
pub mod modules;

pub use bootstrap::{build_registry, run};
