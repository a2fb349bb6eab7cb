//! Adapters Layer - Running the Engine
//!
//! Connects the synchronous engine to the outside world:
//!
//! - Outbound: notifications over a tokio channel (`channel_engine`)
//! - Inbound: cancellation from another thread or task (`EngineHandle`)

mod runner;

pub use runner::{channel_engine, spawn_engine, EngineHandle};
