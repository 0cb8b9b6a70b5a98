//! Test modules for the key-value stores

mod file;
