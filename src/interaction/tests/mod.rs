//! Unit tests for the interaction wire model.
