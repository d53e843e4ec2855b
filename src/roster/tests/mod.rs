//! Unit tests for the roster context.

mod repository_tests;
