//! Unit tests for argument conversion.
