//! Property-based tests for graph views.
