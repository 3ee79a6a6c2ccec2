//! Unit tests for the dispatch engine.

mod support;
