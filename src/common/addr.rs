//! DRAM Address Decoding.
//!
//! This module maps a flat physical address onto the rank/bank/row/column
//! hierarchy of a DRAM device. The bit position and width of every field
//! are configuration values, not literals, so different address mappings
//! can be modeled without touching the decode logic.

use crate::common::error::ModelError;
use crate::config::AddressMapConfig;

/// Width of the physical address domain in bits.
pub const ADDR_BITS: u32 = 40;

/// Mask selecting the valid physical address bits.
pub const ADDR_MASK: u64 = (1 << ADDR_BITS) - 1;

/// A physical address decoded into its DRAM components.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct DramAddr {
    /// Rank number.
    pub rank: u8,
    /// Bank number.
    pub bank: u8,
    /// Row number.
    pub row: u16,
    /// Column number.
    pub col: u16,
}

/// Configurable bit-slicing decoder from physical address to [`DramAddr`].
///
/// Each field is extracted as `(addr >> shift) & ((1 << bits) - 1)`. Any
/// address value is legal input; out-of-range addresses decode modulo the
/// field widths rather than failing.
#[derive(Clone, Debug)]
pub struct AddressMap {
    rank_shift: u32,
    rank_bits: u32,
    bank_shift: u32,
    bank_bits: u32,
    row_shift: u32,
    row_bits: u32,
    col_shift: u32,
    col_bits: u32,
}

fn field(addr: u64, shift: u32, bits: u32) -> u64 {
    (addr >> shift) & ((1u64 << bits) - 1)
}

impl AddressMap {
    /// Builds an address map from configuration, validating field widths.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Config`] when a field extends past the
    /// physical address domain or exceeds its storage width (8 bits for
    /// rank/bank, 16 bits for row/column).
    pub fn from_config(cfg: &AddressMapConfig) -> Result<Self, ModelError> {
        let fields = [
            ("rank", cfg.rank_shift, cfg.rank_bits, 8),
            ("bank", cfg.bank_shift, cfg.bank_bits, 8),
            ("row", cfg.row_shift, cfg.row_bits, 16),
            ("col", cfg.col_shift, cfg.col_bits, 16),
        ];
        for (name, shift, bits, max_bits) in fields {
            if bits == 0 || bits > max_bits {
                return Err(ModelError::Config(format!(
                    "{name} field width {bits} outside 1..={max_bits}"
                )));
            }
            if shift + bits > ADDR_BITS {
                return Err(ModelError::Config(format!(
                    "{name} field at bit {shift} width {bits} exceeds the \
                     {ADDR_BITS}-bit address"
                )));
            }
        }
        Ok(Self {
            rank_shift: cfg.rank_shift,
            rank_bits: cfg.rank_bits,
            bank_shift: cfg.bank_shift,
            bank_bits: cfg.bank_bits,
            row_shift: cfg.row_shift,
            row_bits: cfg.row_bits,
            col_shift: cfg.col_shift,
            col_bits: cfg.col_bits,
        })
    }

    /// Decodes a physical address into rank, bank, row, and column.
    pub fn decode(&self, addr: u64) -> DramAddr {
        let addr = addr & ADDR_MASK;
        DramAddr {
            rank: field(addr, self.rank_shift, self.rank_bits) as u8,
            bank: field(addr, self.bank_shift, self.bank_bits) as u8,
            row: field(addr, self.row_shift, self.row_bits) as u16,
            col: field(addr, self.col_shift, self.col_bits) as u16,
        }
    }

    /// Number of banks addressable under this mapping.
    pub fn banks(&self) -> usize {
        1 << self.bank_bits
    }

    /// Number of ranks addressable under this mapping.
    pub fn ranks(&self) -> usize {
        1 << self.rank_bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AddressMapConfig;

    #[test]
    fn default_map_decodes_documented_bits() {
        let map = AddressMap::from_config(&AddressMapConfig::default()).unwrap();
        let d = map.decode(0x4000_1248);
        assert_eq!(d.rank, 1);
        assert_eq!(d.bank, ((0x1248 >> 6) & 0xF) as u8);
        assert_eq!(d.row, ((0x1248 >> 10) & 0xFFFF) as u16);
        assert_eq!(d.col, ((0x1248 >> 3) & 0x3FF) as u16);
    }

    #[test]
    fn decode_wraps_out_of_range_addresses() {
        let map = AddressMap::from_config(&AddressMapConfig::default()).unwrap();
        // Bits above the address domain are ignored.
        assert_eq!(map.decode(0x123), map.decode(0x123 | (1 << 41)));
    }

    #[test]
    fn oversized_field_is_rejected() {
        let cfg = AddressMapConfig {
            row_shift: 30,
            row_bits: 16,
            ..AddressMapConfig::default()
        };
        assert!(AddressMap::from_config(&cfg).is_err());
    }
}
