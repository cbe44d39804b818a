//! Unit tests for the review context.

mod support;
