//! Argument parsing and configuration

pub mod args;
pub mod config;

#[cfg(test)]
mod tests;
