//! DDR/LPDDR Memory Controller Behavioral Model.
//!
//! This crate implements a cycle-stepped behavioral model of an AXI-facing
//! DDR/LPDDR memory controller. It translates single-beat AXI read/write
//! transactions into DRAM command sequences (ACTIVATE, READ, WRITE,
//! PRECHARGE, REFRESH) under an open-page policy, checks DRAM minimum-interval
//! timing constraints, and retires AXI responses once the underlying commands
//! complete.
//!
//! # Architecture
//!
//! * **Scheduler**: one arbitration decision per main-clock tick, write
//!   priority by default, page hit/miss resolution against the page table.
//! * **Sequencer**: a state machine draining the DRAM command queue with a
//!   per-command-type wait-state count.
//! * **Memory**: sparse block-granular backing store so reads return
//!   previously written data.
//! * **Refresh**: an independent slow-clock process injecting REFRESH
//!   commands bounded by a pending-credit counter.
//!
//! # Modules
//!
//! * `common`: Shared types, bounded queues, address decoding, and errors.
//! * `config`: Configuration loading and parsing.
//! * `mc`: The controller core (scheduler, sequencer, page table, timing).
//! * `mem`: Sparse backing memory array.
//! * `sim`: Simulation harness and workload playback.
//! * `stats`: Statistics collection and reporting.

/// Shared types, constants, error handling, and queue primitives.
///
/// Provides the address decoder, the bounded FIFO used for every queue in
/// the model, and the error taxonomy shared across components.
pub mod common;

/// Configuration system for address mapping, timing, queue, and scheduler
/// settings.
///
/// Loads and parses TOML configuration files to customize model behavior
/// for different DRAM geometries and strictness levels.
pub mod config;

/// Memory controller core: scheduler, sequencer, page table, timing
/// tracker, refresh timer, and the APB-style register file.
pub mod mc;

/// Sparse block-granular backing memory.
///
/// Makes reads return previously written data and gives uninitialized
/// reads a deterministic address-derived pattern.
pub mod mem;

/// Simulation harness, workload loading, and the two-clock driving loop.
pub mod sim;

/// Statistics collection and reporting.
///
/// Tracks transaction counts, DRAM command counts, page hit/miss rates,
/// and violation counters during simulation.
pub mod stats;
