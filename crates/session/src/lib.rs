//! Session controller for the streaming job search.
//!
//! Owns one search run at a time: opens the transport, drives the read loop
//! (frame → classify → reduce), publishes complete session snapshots through
//! a watch channel, and exposes an imperative start/stop surface. Observers
//! never see partial state and never see a stale run publish after a new one
//! has begun.

pub mod controller;
pub mod transport;

pub use controller::SearchController;
pub use transport::{ChunkStream, HttpSearchTransport, SearchTransport};
