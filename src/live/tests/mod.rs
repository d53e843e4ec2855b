//! Unit tests for the live context.

mod feed_tests;
