//! Port contracts consumed by argument conversion.

pub mod directory;

pub use directory::{DirectoryError, DirectoryLookup, DirectoryResult};
