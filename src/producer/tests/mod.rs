//! Test modules for the state-to-event producer
//!
//! Organised by functional area: basic send/consume behaviour, the consumer
//! loop, concurrent producers and durable backing.

mod policy;
