//! Property-based tests for the weekly transform.
