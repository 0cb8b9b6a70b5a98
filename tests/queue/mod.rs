//! Queue integration test modules

pub mod durable_restart;
pub mod lifecycle_flow;
pub mod token_gate;
