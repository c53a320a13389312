//! EVML Core Types
//!
//! This crate provides the host-independent building blocks of the Event
//! Model explorer:
//!
//! - **Geometry**: screen-space points ([`geometry`] module)
//! - **Viewport**: the pan/zoom state machine driven by pointer and wheel
//!   input ([`viewport`] module)

pub mod geometry;
pub mod viewport;
