//! Simulation statistics collection and reporting.
//!
//! Tracks transaction counts, DRAM command counts, page hit/miss behavior,
//! refresh bookkeeping, and violation counters. The counter set mirrors the
//! controller's read-only statistics registers so the APB view and the
//! final report always agree.

use serde::Serialize;
use std::time::Instant;

/// Statistics structure tracking all model counters.
///
/// Every field is a plain counter incremented by exactly one component;
/// nothing here feeds back into scheduling decisions.
#[derive(Serialize)]
pub struct ModelStats {
    #[serde(skip)]
    start_time: Instant,
    /// Main-clock cycles simulated.
    pub cycles: u64,
    /// Slow-clock ticks simulated.
    pub slow_ticks: u64,

    /// AXI write transactions accepted.
    pub total_writes: u64,
    /// AXI read transactions accepted.
    pub total_reads: u64,
    /// DRAM commands executed by the sequencer.
    pub total_dram_commands: u64,

    /// Scheduling decisions that reused an open row.
    pub page_hits: u64,
    /// Scheduling decisions that required an ACTIVATE.
    pub page_misses: u64,

    /// Read-back mismatches detected in verify mode.
    pub data_errors: u64,
    /// Submitted addresses truncated to the physical address domain.
    pub address_errors: u64,
    /// Timing-constraint violations detected.
    pub timing_violations: u64,

    /// REFRESH commands enqueued by the refresh timer.
    pub refreshes_issued: u64,
    /// Refresh expiries dropped at the credit cap or on a full queue.
    pub dropped_refreshes: u64,

    /// Write submissions rejected by queue backpressure.
    pub write_stalls: u64,
    /// Read submissions rejected by queue backpressure.
    pub read_stalls: u64,
}

impl Default for ModelStats {
    /// Returns the default value.
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            slow_ticks: 0,
            total_writes: 0,
            total_reads: 0,
            total_dram_commands: 0,
            page_hits: 0,
            page_misses: 0,
            data_errors: 0,
            address_errors: 0,
            timing_violations: 0,
            refreshes_issued: 0,
            dropped_refreshes: 0,
            write_stalls: 0,
            read_stalls: 0,
        }
    }
}

impl ModelStats {
    /// Resets every counter while keeping the wall-clock start time.
    pub fn clear(&mut self) {
        let start = self.start_time;
        *self = Self::default();
        self.start_time = start;
    }

    /// Prints a formatted summary of all model statistics.
    ///
    /// Displays transaction and command counts, page hit rate, refresh
    /// bookkeeping, and violation counters in a human-readable format.
    pub fn print(&self) {
        let duration = self.start_time.elapsed();
        let seconds = duration.as_secs_f64();

        let cyc = if self.cycles == 0 { 1 } else { self.cycles };
        let khz = (self.cycles as f64 / seconds) / 1000.0;

        println!("\n==========================================================");
        println!("DDR CONTROLLER MODEL STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {:.4} s", seconds);
        println!("sim_cycles               {}", self.cycles);
        println!("sim_slow_ticks           {}", self.slow_ticks);
        println!("sim_freq                 {:.2} kHz", khz);
        println!("----------------------------------------------------------");
        println!("TRANSACTIONS");
        println!("  axi.writes             {}", self.total_writes);
        println!("  axi.reads              {}", self.total_reads);
        println!(
            "  axi.write_stalls       {} ({:.2}%)",
            self.write_stalls,
            (self.write_stalls as f64 / cyc as f64) * 100.0
        );
        println!(
            "  axi.read_stalls        {} ({:.2}%)",
            self.read_stalls,
            (self.read_stalls as f64 / cyc as f64) * 100.0
        );
        println!("----------------------------------------------------------");
        println!("DRAM COMMANDS");
        println!("  cmd.total              {}", self.total_dram_commands);
        println!("  page.hits              {}", self.page_hits);
        println!("  page.misses            {}", self.page_misses);
        let accesses = self.page_hits + self.page_misses;
        if accesses > 0 {
            let rate = (self.page_hits as f64 / accesses as f64) * 100.0;
            println!("  page.hit_rate          {:.2}%", rate);
        }
        println!("----------------------------------------------------------");
        println!("REFRESH");
        println!("  refresh.issued         {}", self.refreshes_issued);
        println!("  refresh.dropped        {}", self.dropped_refreshes);
        println!("----------------------------------------------------------");
        println!("VIOLATIONS");
        println!("  err.data               {}", self.data_errors);
        println!("  err.address            {}", self.address_errors);
        println!("  err.timing             {}", self.timing_violations);
        println!("==========================================================");
    }
}
