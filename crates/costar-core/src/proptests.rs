//! Property-based tests for aggregation invariants.
