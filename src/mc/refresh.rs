//! Refresh Timer.
//!
//! Runs on the slow clock, independently of the main scheduler. Every
//! `interval` slow ticks it requests one REFRESH: if the pending-credit
//! counter is below its cap and the command queue has room, the credit is
//! taken and a REFRESH command enqueued; otherwise the request is dropped
//! and counted. Exactly one of the two happens per expiry, so no refresh
//! is ever lost without a trace. The sequencer returns the credit when the
//! refresh completes.

use crate::config::RefreshConfig;
use crate::mc::command::DramCommand;
use crate::mc::MemController;

/// Slow-clock refresh cadence state.
pub struct RefreshTimer {
    counter: u64,
    interval: u64,
    credit: u8,
    credit_cap: u8,
}

impl RefreshTimer {
    /// Creates a timer with the configured cadence and credit cap.
    pub fn new(cfg: &RefreshConfig) -> Self {
        Self {
            counter: 0,
            interval: cfg.interval.max(1),
            credit: 0,
            credit_cap: cfg.credit_cap,
        }
    }

    /// Advances the cadence counter; true when the interval expired.
    fn expire_tick(&mut self) -> bool {
        self.counter += 1;
        if self.counter >= self.interval {
            self.counter = 0;
            true
        } else {
            false
        }
    }

    /// Current pending-refresh credit.
    pub fn credit(&self) -> u8 {
        self.credit
    }

    /// Configured upper bound on the pending credit.
    pub fn credit_cap(&self) -> u8 {
        self.credit_cap
    }

    /// Returns one credit when a refresh completes.
    pub fn complete_one(&mut self) {
        if self.credit > 0 {
            self.credit -= 1;
        }
    }

    /// Clears the cadence counter and the pending credit.
    pub fn reset(&mut self) {
        self.counter = 0;
        self.credit = 0;
    }
}

/// Runs one slow-clock refresh step.
pub fn refresh_step(mc: &mut MemController) {
    if !mc.refresh.expire_tick() {
        return;
    }

    if mc.refresh.credit >= mc.refresh.credit_cap {
        mc.stats.dropped_refreshes += 1;
        if mc.trace {
            println!(
                "[Refresh] dropped, credit at cap ({})",
                mc.refresh.credit_cap
            );
        }
        return;
    }

    let cmd = DramCommand::refresh(mc.cycle);
    if mc.dram_cmd.push(cmd) {
        mc.refresh.credit += 1;
        mc.stats.refreshes_issued += 1;
        if mc.trace {
            println!("[Refresh] scheduled, pending={}", mc.refresh.credit);
        }
    } else {
        // Command queue full; the credit is not taken.
        mc.stats.dropped_refreshes += 1;
        if mc.trace {
            println!("[Refresh] dropped, command queue full");
        }
    }
}
