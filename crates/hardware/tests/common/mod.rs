//! Shared helpers for predictor tests.
