pub mod app;
pub mod core;
pub mod lifecycle;
pub mod producer;
pub mod store;
pub mod token;
