//! Unit tests for the component listener registry.

mod support;
