//! AXI Transaction Types.
//!
//! One [`Transaction`] is one AXI beat in flight. The write channel splits
//! into separate address and data entries, mirroring the separate AXI
//! handshakes; the scheduler pairs them back up head-to-head. A
//! transaction is owned by exactly one queue at a time and moves between
//! them, it is never shared.

use crate::common::{AxiResp, Direction};

/// One AXI beat moving through the controller's queues.
#[derive(Clone, Debug)]
pub struct Transaction {
    /// Correlation tag echoed in the response (12-bit AXI ID domain).
    pub id: u16,
    /// Physical byte address.
    pub addr: u64,
    /// Burst length field. Accepted and recorded; only single-beat
    /// transfers are modeled.
    pub len: u8,
    /// Burst size field.
    pub size: u8,
    /// Burst type field.
    pub burst: u8,
    /// Transfer direction.
    pub dir: Direction,
    /// Write payload (one 64-bit beat).
    pub data: u64,
    /// Byte-enable mask, bit per payload byte.
    pub strb: u8,
    /// Response code; the model always assigns OKAY at acceptance.
    pub resp: AxiResp,
    /// Main-clock cycle the beat was accepted.
    pub timestamp: u64,
}

impl Transaction {
    /// Builds a write-address-channel entry.
    pub fn write_addr(id: u16, addr: u64, now: u64) -> Self {
        Self {
            id,
            addr,
            len: 0,
            size: 3,
            burst: 1,
            dir: Direction::Write,
            data: 0,
            strb: 0,
            resp: AxiResp::Okay,
            timestamp: now,
        }
    }

    /// Builds a write-data-channel entry.
    pub fn write_data(data: u64, strb: u8, now: u64) -> Self {
        Self {
            id: 0,
            addr: 0,
            len: 0,
            size: 3,
            burst: 1,
            dir: Direction::Write,
            data,
            strb,
            resp: AxiResp::Okay,
            timestamp: now,
        }
    }

    /// Builds a read-address-channel entry.
    pub fn read_addr(id: u16, addr: u64, now: u64) -> Self {
        Self {
            id,
            addr,
            len: 0,
            size: 3,
            burst: 1,
            dir: Direction::Read,
            data: 0,
            strb: 0,
            resp: AxiResp::Okay,
            timestamp: now,
        }
    }
}

/// Response to a completed write transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WriteResponse {
    /// Correlation tag from the originating transaction.
    pub id: u16,
    /// Response status.
    pub resp: AxiResp,
}

/// Response to a completed read transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadResponse {
    /// Correlation tag from the originating transaction.
    pub id: u16,
    /// Response status.
    pub resp: AxiResp,
    /// Read payload.
    pub data: u64,
    /// Last beat marker; always true for single-beat transfers.
    pub last: bool,
}
