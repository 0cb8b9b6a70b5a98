//! Command line application over the durable notification queue

pub mod cli;
pub mod commands;
pub mod error;
pub mod startup;
