//! Unit tests for the command tree.

mod tree_tests;
