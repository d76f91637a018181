//! Open-Page Table.
//!
//! Tracks which row, if any, is open in each bank. A bank's entry is valid
//! iff an ACTIVATE has been issued for it without an intervening
//! PRECHARGE; the stored row is meaningful only while valid.

#[derive(Clone, Copy, Default)]
struct PageEntry {
    valid: bool,
    row: u16,
}

/// Per-bank open/closed row tracker.
pub struct PageTable {
    entries: Vec<PageEntry>,
}

impl PageTable {
    /// Creates a table with every bank closed.
    pub fn new(banks: usize) -> Self {
        Self {
            entries: vec![PageEntry::default(); banks],
        }
    }

    /// True iff `bank` has `row` open.
    pub fn is_hit(&self, bank: u8, row: u16) -> bool {
        match self.entries.get(bank as usize) {
            Some(e) => e.valid && e.row == row,
            None => false,
        }
    }

    /// Marks `row` open in `bank`. Idempotent; out-of-range banks are
    /// ignored.
    pub fn open(&mut self, bank: u8, row: u16) {
        if let Some(e) = self.entries.get_mut(bank as usize) {
            e.valid = true;
            e.row = row;
        }
    }

    /// Closes `bank`'s open row, if any.
    pub fn close(&mut self, bank: u8) {
        if let Some(e) = self.entries.get_mut(bank as usize) {
            e.valid = false;
        }
    }

    /// Closes every bank (PRECHARGE-ALL, DRAM-level reset).
    pub fn close_all(&mut self) {
        for e in &mut self.entries {
            e.valid = false;
        }
    }

    /// Returns the open row of `bank`, if any.
    pub fn open_row(&self, bank: u8) -> Option<u16> {
        self.entries
            .get(bank as usize)
            .filter(|e| e.valid)
            .map(|e| e.row)
    }

    /// Number of banks with an open row.
    pub fn open_count(&self) -> usize {
        self.entries.iter().filter(|e| e.valid).count()
    }

    /// Number of banks tracked.
    pub fn banks(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_requires_matching_open_row() {
        let mut pt = PageTable::new(16);
        assert!(!pt.is_hit(3, 0x42));
        pt.open(3, 0x42);
        assert!(pt.is_hit(3, 0x42));
        assert!(!pt.is_hit(3, 0x43));
        assert!(!pt.is_hit(4, 0x42));
    }

    #[test]
    fn open_is_idempotent_and_replaces_row() {
        let mut pt = PageTable::new(16);
        pt.open(1, 0x10);
        pt.open(1, 0x10);
        assert_eq!(pt.open_row(1), Some(0x10));
        pt.open(1, 0x20);
        assert!(pt.is_hit(1, 0x20));
        assert!(!pt.is_hit(1, 0x10));
    }

    #[test]
    fn close_clears_one_bank() {
        let mut pt = PageTable::new(16);
        pt.open(0, 1);
        pt.open(1, 2);
        pt.close(0);
        assert!(!pt.is_hit(0, 1));
        assert!(pt.is_hit(1, 2));
    }

    #[test]
    fn close_all_clears_every_bank() {
        let mut pt = PageTable::new(16);
        for b in 0..16 {
            pt.open(b, b as u16);
        }
        assert_eq!(pt.open_count(), 16);
        pt.close_all();
        assert_eq!(pt.open_count(), 0);
    }

    #[test]
    fn out_of_range_bank_is_ignored() {
        let mut pt = PageTable::new(4);
        pt.open(9, 1);
        assert!(!pt.is_hit(9, 1));
        assert_eq!(pt.open_count(), 0);
        pt.close(9);
    }
}
