//! Domain entities for the bridge graph.
//!
//! The graph is pure data: pins (anchor nodes) and slabs (beams) with
//! dual-state poses. All mutation goes through the `bridge` orchestrator.

pub mod config;
pub mod pin;
pub mod positioning;
pub mod slab;
