//! Tests for argument parsing and configuration resolution
