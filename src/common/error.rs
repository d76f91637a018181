//! Error Types and Violation Definitions.
//!
//! The model distinguishes fatal configuration errors, raised once at
//! initialization, from advisory violations that are counted and logged
//! during simulation. Violations only become errors when the corresponding
//! strict mode is enabled.

use std::fmt;

/// Kind of DRAM timing constraint that was violated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViolationKind {
    /// Four-activate-window: too many ACTIVATEs to one bank group.
    Tfaw,
    /// RAS-to-CAS delay: READ/WRITE too soon after ACTIVATE.
    Trcd,
    /// Row-precharge time: ACTIVATE too soon after PRECHARGE.
    Trp,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::Tfaw => write!(f, "tFAW"),
            ViolationKind::Trcd => write!(f, "tRCD"),
            ViolationKind::Trp => write!(f, "tRP"),
        }
    }
}

/// A detected timing-constraint violation.
///
/// Advisory in the default model; fatal when timing enforcement is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimingViolation {
    /// Which constraint was violated.
    pub kind: ViolationKind,
    /// Bank the offending command targeted.
    pub bank: u8,
    /// Main-clock cycle at which the command executed.
    pub cycle: u64,
}

impl fmt::Display for TimingViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} violation on bank {} at cycle {}",
            self.kind, self.bank, self.cycle
        )
    }
}

/// Top-level error type for the controller model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModelError {
    /// Invalid configuration detected at initialization.
    Config(String),
    /// A timing violation escalated to fatal by strict mode.
    Timing(TimingViolation),
    /// Read-back data differed from schedule-time data in verify mode.
    DataMismatch {
        /// Originating AXI address of the READ command.
        addr: u64,
        /// Data captured when the command was scheduled.
        expected: u64,
        /// Data found in the memory array at execute time.
        actual: u64,
    },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::Config(msg) => write!(f, "configuration error: {msg}"),
            ModelError::Timing(v) => write!(f, "{v}"),
            ModelError::DataMismatch {
                addr,
                expected,
                actual,
            } => write!(
                f,
                "data mismatch at {addr:#x}: expected {expected:#018x}, \
                 found {actual:#018x}"
            ),
        }
    }
}

impl std::error::Error for ModelError {}
