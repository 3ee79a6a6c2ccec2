//! Adapter implementations for argument conversion ports.

pub mod memory;

pub use memory::InMemoryDirectory;
