//! Common utilities and types used throughout the memory controller model.
//!
//! This module provides fundamental types for DRAM addressing, AXI
//! transaction classification, error handling, and the bounded FIFO
//! primitive that every queue in the model is built on.

/// DRAM address decoding (rank/bank/row/column bit-slicing).
pub mod addr;

/// Transaction direction and AXI response codes.
pub mod data;

/// Error taxonomy and timing-violation definitions.
pub mod error;

/// Bounded FIFO with backpressure-aware insertion.
pub mod queue;

pub use addr::{AddressMap, DramAddr};
pub use data::{AxiResp, Direction};
pub use error::{ModelError, TimingViolation, ViolationKind};
pub use queue::BoundedQueue;

pub use addr::{ADDR_BITS, ADDR_MASK};
