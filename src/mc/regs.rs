//! APB-Style Register File.
//!
//! An address-indexed table of 32-bit configuration, timing, and
//! statistics registers. Configuration registers live at 0x000..=0x04C
//! and read back what was written; statistics registers at 0x100..=0x11C
//! are read-only views of the model counters. Reads of unmapped addresses
//! return a poison value, writes to them are ignored.
//!
//! Register contents do not feed back into the scheduling logic; the
//! table exists so register-access flows can be exercised against the
//! model. The one exception is the PMU command register, which the
//! controller watches for the precharge-all request bit.

use crate::stats::ModelStats;

/// Sequencer control register offset.
pub const SEQ_CONTROL: u16 = 0x000;
/// Buffer configuration register offset.
pub const BUF_CONFIG: u16 = 0x004;
/// DDR configuration register offset.
pub const DDR_CONFIG: u16 = 0x008;
/// Address-map configuration register offset.
pub const DDR_ADR_CONFIG: u16 = 0x00C;
/// PMU command register offset.
pub const PMU_CMD: u16 = 0x010;
/// PMU mode-register-set register offset.
pub const PMU_MRS: u16 = 0x014;
/// PMU multi-purpose-command register offset.
pub const PMU_MPC: u16 = 0x018;
/// PMU status register offset.
pub const PMU_STATUS: u16 = 0x01C;
/// First AC timing register offset; ten consecutive registers.
pub const AC_TIMING_BASE: u16 = 0x020;
/// Refresh control register offset.
pub const REFRESH_CNTRL: u16 = 0x048;
/// Test configuration register offset.
pub const TEST_CONFIG: u16 = 0x04C;

/// Total accepted writes (read-only).
pub const STAT_TOTAL_WRITES: u16 = 0x100;
/// Total accepted reads (read-only).
pub const STAT_TOTAL_READS: u16 = 0x104;
/// Total executed DRAM commands (read-only).
pub const STAT_DRAM_COMMANDS: u16 = 0x108;
/// Page hits (read-only).
pub const STAT_PAGE_HITS: u16 = 0x10C;
/// Page misses (read-only).
pub const STAT_PAGE_MISSES: u16 = 0x110;
/// Data errors (read-only).
pub const STAT_DATA_ERRORS: u16 = 0x114;
/// Address errors (read-only).
pub const STAT_ADDRESS_ERRORS: u16 = 0x118;
/// Timing violations (read-only).
pub const STAT_TIMING_VIOLATIONS: u16 = 0x11C;

/// Value returned for reads of unmapped register addresses.
pub const BAD_ADDR_DATA: u32 = 0xDEAD_BEEF;

/// Bit in [`PMU_CMD`] requesting a PRECHARGE-ALL.
pub const PMU_CMD_PRECHARGE_ALL: u32 = 0x1;

/// The controller's register table.
pub struct RegisterFile {
    pub seq_control: u32,
    pub buf_config: u32,
    pub ddr_config: u32,
    pub ddr_adr_config: u32,
    pub pmu_cmd: u32,
    pub pmu_mrs: u32,
    pub pmu_mpc: u32,
    pub pmu_status: u32,
    pub ac_timing: [u32; 10],
    pub refresh_cntrl: u32,
    pub test_config: u32,
}

impl Default for RegisterFile {
    /// Reset values matching an LPDDR5 bring-up image.
    fn default() -> Self {
        Self {
            seq_control: 0x0000_0001,
            buf_config: 0x0000_0080,
            ddr_config: 0x0003_0520,
            ddr_adr_config: 0x0000_0123,
            pmu_cmd: 0x0000_0000,
            pmu_mrs: 0x0000_0000,
            pmu_mpc: 0x0000_0000,
            pmu_status: 0x0000_0030,
            ac_timing: [
                0x120E_1215, // tCL/tWL/tRCD/tRP
                0x2A3F_1008, // tRAS/tRC/tRRD/tFAW
                0x0804_0820, // tWTR/tRTP/tCCD/tBL
                0x1E78_0118, // tREFI/tRFC/tXSR
                0x0A05_0A05, // tMRD/tMOD/tZQCS/tZQCL
                0x0302_0304, // tCKE/tCKESR/tXP/tXPDLL
                0x0201_0203, // ODT switching
                0x0402_0108, // tDQSCK/WCK alignment
                0x0201_0405, // preamble/MRR/MRW
                0x0A05_0C06, // VREF/oscillator
            ],
            refresh_cntrl: 0x0000_1F41,
            test_config: 0x0000_0001,
        }
    }
}

impl RegisterFile {
    /// Reads a register, consulting `stats` for the read-only counters.
    pub fn read(&self, addr: u16, stats: &ModelStats) -> u32 {
        match addr {
            SEQ_CONTROL => self.seq_control,
            BUF_CONFIG => self.buf_config,
            DDR_CONFIG => self.ddr_config,
            DDR_ADR_CONFIG => self.ddr_adr_config,
            PMU_CMD => self.pmu_cmd,
            PMU_MRS => self.pmu_mrs,
            PMU_MPC => self.pmu_mpc,
            PMU_STATUS => self.pmu_status,
            a if (AC_TIMING_BASE..AC_TIMING_BASE + 40).contains(&a) && a % 4 == 0 => {
                self.ac_timing[((a - AC_TIMING_BASE) / 4) as usize]
            }
            REFRESH_CNTRL => self.refresh_cntrl,
            TEST_CONFIG => self.test_config,
            STAT_TOTAL_WRITES => stats.total_writes as u32,
            STAT_TOTAL_READS => stats.total_reads as u32,
            STAT_DRAM_COMMANDS => stats.total_dram_commands as u32,
            STAT_PAGE_HITS => stats.page_hits as u32,
            STAT_PAGE_MISSES => stats.page_misses as u32,
            STAT_DATA_ERRORS => stats.data_errors as u32,
            STAT_ADDRESS_ERRORS => stats.address_errors as u32,
            STAT_TIMING_VIOLATIONS => stats.timing_violations as u32,
            _ => BAD_ADDR_DATA,
        }
    }

    /// Writes a configuration register. Statistics registers and unmapped
    /// addresses are ignored.
    pub fn write(&mut self, addr: u16, value: u32) {
        match addr {
            SEQ_CONTROL => self.seq_control = value,
            BUF_CONFIG => self.buf_config = value,
            DDR_CONFIG => self.ddr_config = value,
            DDR_ADR_CONFIG => self.ddr_adr_config = value,
            PMU_CMD => self.pmu_cmd = value,
            PMU_MRS => self.pmu_mrs = value,
            PMU_MPC => self.pmu_mpc = value,
            PMU_STATUS => self.pmu_status = value,
            a if (AC_TIMING_BASE..AC_TIMING_BASE + 40).contains(&a) && a % 4 == 0 => {
                self.ac_timing[((a - AC_TIMING_BASE) / 4) as usize] = value;
            }
            REFRESH_CNTRL => self.refresh_cntrl = value,
            TEST_CONFIG => self.test_config = value,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::ModelStats;

    #[test]
    fn reset_values_match_the_bringup_image() {
        let regs = RegisterFile::default();
        let stats = ModelStats::default();
        assert_eq!(regs.read(DDR_CONFIG, &stats), 0x0003_0520);
        assert_eq!(regs.read(REFRESH_CNTRL, &stats), 0x0000_1F41);
        assert_eq!(regs.read(AC_TIMING_BASE, &stats), 0x120E_1215);
        assert_eq!(regs.read(AC_TIMING_BASE + 36, &stats), 0x0A05_0C06);
    }

    #[test]
    fn unmapped_addresses_read_poison() {
        let regs = RegisterFile::default();
        let stats = ModelStats::default();
        assert_eq!(regs.read(0x050, &stats), BAD_ADDR_DATA);
        assert_eq!(regs.read(0x3FF, &stats), BAD_ADDR_DATA);
    }

    #[test]
    fn config_registers_read_back_writes() {
        let mut regs = RegisterFile::default();
        let stats = ModelStats::default();
        regs.write(AC_TIMING_BASE + 8, 0x1234_5678);
        assert_eq!(regs.read(AC_TIMING_BASE + 8, &stats), 0x1234_5678);
    }

    #[test]
    fn statistics_registers_reflect_counters() {
        let regs = RegisterFile::default();
        let mut stats = ModelStats::default();
        stats.page_hits = 7;
        stats.timing_violations = 2;
        assert_eq!(regs.read(STAT_PAGE_HITS, &stats), 7);
        assert_eq!(regs.read(STAT_TIMING_VIOLATIONS, &stats), 2);
        // Writes to statistics space are ignored.
        let mut regs = regs;
        regs.write(STAT_PAGE_HITS, 99);
        assert_eq!(regs.read(STAT_PAGE_HITS, &stats), 7);
    }
}
