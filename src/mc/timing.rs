//! DRAM Timing Tracker.
//!
//! Records per-bank activate and precharge timestamps plus a per-bank-group
//! sliding window of recent activates, and evaluates the minimum-interval
//! constraints against them: tRCD (activate to column command), tRP
//! (precharge to activate), and tFAW (four activates per window). The wait
//! states the sequencer inserts are simplification constants standing in
//! for real DRAM intervals, so the thresholds here are configured
//! independently of them.
//!
//! Violations are advisory: the tracker reports, the caller decides
//! whether to count or abort.

use std::collections::VecDeque;

use crate::common::{TimingViolation, ViolationKind};
use crate::config::TimingConfig;
use crate::mc::command::{CommandKind, DramCommand};

/// Depth of the four-activate sliding window.
pub const FAW_WINDOW: usize = 4;

/// Per-bank and per-bank-group timing state.
pub struct TimingTracker {
    last_activate: Vec<Option<u64>>,
    last_precharge: Vec<Option<u64>>,
    /// Most recent activate cycles per bank group, oldest first.
    faw_window: Vec<VecDeque<u64>>,
    t_rcd_min: u64,
    t_rp_min: u64,
    t_faw_min: u64,
    banks_per_group: u32,
}

impl TimingTracker {
    /// Creates a tracker for `banks` banks.
    pub fn new(banks: usize, cfg: &TimingConfig) -> Self {
        let banks_per_group = cfg.banks_per_group.max(1);
        let groups = (banks + banks_per_group as usize - 1) / banks_per_group as usize;
        Self {
            last_activate: vec![None; banks],
            last_precharge: vec![None; banks],
            faw_window: vec![VecDeque::with_capacity(FAW_WINDOW); groups],
            t_rcd_min: cfg.t_rcd_min,
            t_rp_min: cfg.t_rp_min,
            t_faw_min: cfg.t_faw_min,
            banks_per_group,
        }
    }

    fn group(&self, bank: u8) -> usize {
        bank as usize / self.banks_per_group as usize
    }

    /// Checks `cmd` against the recorded state without mutating it.
    ///
    /// Must be called before [`TimingTracker::update`] for the same
    /// command.
    pub fn check(&self, cmd: &DramCommand, now: u64) -> Option<TimingViolation> {
        let bank = cmd.bank as usize;
        match cmd.kind {
            CommandKind::Activate => {
                if let Some(&tp) = self.last_precharge.get(bank).and_then(|t| t.as_ref()) {
                    if now.saturating_sub(tp) < self.t_rp_min {
                        return Some(TimingViolation {
                            kind: ViolationKind::Trp,
                            bank: cmd.bank,
                            cycle: now,
                        });
                    }
                }
                let window = &self.faw_window[self.group(cmd.bank)];
                if window.len() == FAW_WINDOW {
                    if let Some(&oldest) = window.front() {
                        if now.saturating_sub(oldest) < self.t_faw_min {
                            return Some(TimingViolation {
                                kind: ViolationKind::Tfaw,
                                bank: cmd.bank,
                                cycle: now,
                            });
                        }
                    }
                }
                None
            }
            CommandKind::Read | CommandKind::Write => {
                let since_act = self
                    .last_activate
                    .get(bank)
                    .and_then(|t| t.as_ref())
                    .map(|&ta| now.saturating_sub(ta));
                match since_act {
                    Some(delta) if delta >= self.t_rcd_min => None,
                    // Column command with no activate on record, or one
                    // issued inside the RAS-to-CAS interval.
                    _ => Some(TimingViolation {
                        kind: ViolationKind::Trcd,
                        bank: cmd.bank,
                        cycle: now,
                    }),
                }
            }
            _ => None,
        }
    }

    /// Records `cmd`'s effect on the timing state.
    pub fn update(&mut self, cmd: &DramCommand, now: u64) {
        match cmd.kind {
            CommandKind::Activate => {
                if let Some(slot) = self.last_activate.get_mut(cmd.bank as usize) {
                    *slot = Some(now);
                }
                let group = self.group(cmd.bank);
                if let Some(window) = self.faw_window.get_mut(group) {
                    if window.len() == FAW_WINDOW {
                        window.pop_front();
                    }
                    window.push_back(now);
                }
            }
            CommandKind::Precharge => {
                if let Some(slot) = self.last_precharge.get_mut(cmd.bank as usize) {
                    *slot = Some(now);
                }
            }
            CommandKind::PrechargeAll => {
                for slot in &mut self.last_precharge {
                    *slot = Some(now);
                }
            }
            _ => {}
        }
    }

    /// Returns the recorded window of recent activates for `bank`'s group.
    pub fn faw_window_len(&self, bank: u8) -> usize {
        self.faw_window[self.group(bank)].len()
    }

    /// Clears all recorded state.
    pub fn clear(&mut self) {
        for slot in &mut self.last_activate {
            *slot = None;
        }
        for slot in &mut self.last_precharge {
            *slot = None;
        }
        for window in &mut self.faw_window {
            window.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimingConfig;
    use crate::mc::command::{CommandKind, DramCommand};

    fn tracker() -> TimingTracker {
        TimingTracker::new(16, &TimingConfig::default())
    }

    fn cmd(kind: CommandKind, bank: u8) -> DramCommand {
        DramCommand {
            bank,
            ..DramCommand::new(kind, 0)
        }
    }

    #[test]
    fn column_command_without_activate_violates_trcd() {
        let t = tracker();
        let v = t.check(&cmd(CommandKind::Read, 0), 100).unwrap();
        assert_eq!(v.kind, ViolationKind::Trcd);
    }

    #[test]
    fn column_command_respecting_trcd_passes() {
        let mut t = tracker();
        t.update(&cmd(CommandKind::Activate, 2), 10);
        assert!(t.check(&cmd(CommandKind::Write, 2), 13).is_none());
        let v = t.check(&cmd(CommandKind::Write, 2), 12).unwrap();
        assert_eq!(v.kind, ViolationKind::Trcd);
    }

    #[test]
    fn activate_too_soon_after_precharge_violates_trp() {
        let mut t = tracker();
        t.update(&cmd(CommandKind::Precharge, 5), 20);
        let v = t.check(&cmd(CommandKind::Activate, 5), 21).unwrap();
        assert_eq!(v.kind, ViolationKind::Trp);
        assert!(t.check(&cmd(CommandKind::Activate, 5), 22).is_none());
    }

    #[test]
    fn fifth_activate_in_short_window_violates_tfaw() {
        let mut t = tracker();
        // Banks 0..4 share a group under the default grouping.
        for (i, bank) in [0u8, 1, 2, 3].iter().enumerate() {
            let a = cmd(CommandKind::Activate, *bank);
            assert!(t.check(&a, i as u64 * 4).is_none());
            t.update(&a, i as u64 * 4);
        }
        let fifth = cmd(CommandKind::Activate, 0);
        let v = t.check(&fifth, 16).unwrap();
        assert_eq!(v.kind, ViolationKind::Tfaw);
        // Outside the window the same command passes.
        assert!(t.check(&fifth, 25).is_none());
    }

    #[test]
    fn activates_in_other_groups_do_not_share_the_window() {
        let mut t = tracker();
        for i in 0..4u64 {
            t.update(&cmd(CommandKind::Activate, 0), i);
        }
        // Bank 4 is in the next group; its window is empty.
        assert!(t.check(&cmd(CommandKind::Activate, 4), 4).is_none());
    }
}
