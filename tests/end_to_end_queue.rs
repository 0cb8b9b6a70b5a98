//! Queue Integration Tests
//!
//! Exercise the public API the way an application embeds it:
//! - `queue::durable_restart` - pending messages across process restarts
//! - `queue::lifecycle_flow` - lifecycle-gated delivery with a live producer
//! - `queue::token_gate` - de-duplicating actions built from queue state

mod common;
mod queue;
