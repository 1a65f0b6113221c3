//! Platform abstraction layer
//!
//! Browser glue the core never sees directly:
//! - Canvas 2D drawing surface
//! - Host clock
//! - Restart control visibility

#[cfg(target_arch = "wasm32")]
pub mod web;
