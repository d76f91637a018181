//! Transaction Classification Types.
//!
//! Defines the direction of an AXI beat and the response codes the model
//! can return. The default model only ever emits `Okay`; `SlvErr` exists
//! so the response field has the full two-bit AXI domain available to
//! stricter configurations.

/// Direction of an AXI transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Data read access.
    Read,
    /// Data write access.
    Write,
}

/// AXI response status code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AxiResp {
    /// Normal access success.
    #[default]
    Okay,
    /// Slave error.
    SlvErr,
}
