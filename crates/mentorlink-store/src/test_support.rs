//! Shared test utilities for store tests.
