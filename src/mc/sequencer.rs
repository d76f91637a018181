//! Command Sequencer.
//!
//! A state machine draining the DRAM command queue one command at a time.
//! From `Idle` it dequeues the head command, executes its side effects
//! (timing check and update, page closes, memory effects, statistics, DFI
//! latch), and sits in the wait state matching the command type for a
//! configured number of cycles before returning to `Idle`. Commands
//! execute in exactly the order they were enqueued.

use crate::common::ModelError;
use crate::config::TimingConfig;
use crate::mc::command::{CommandKind, DfiSnapshot, DramCommand};
use crate::mc::MemController;

/// Sequencer state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SequencerState {
    /// Ready to take the next command.
    #[default]
    Idle,
    /// Row-activate interval (stands in for tRCD).
    WaitActivate,
    /// Write recovery interval (stands in for tWR).
    WaitWrite,
    /// Read access interval (stands in for tCAS).
    WaitRead,
    /// Precharge interval (stands in for tRP).
    WaitPrecharge,
    /// Refresh cycle interval (stands in for tRFC).
    WaitRefresh,
}

/// The sequencer's state and per-command-type wait counts.
pub struct Sequencer {
    /// Current state.
    pub state: SequencerState,
    wait: u64,
    wait_activate: u64,
    wait_write: u64,
    wait_read: u64,
    wait_precharge: u64,
    wait_refresh: u64,
}

impl Sequencer {
    /// Creates an idle sequencer with the configured wait counts.
    pub fn new(cfg: &TimingConfig) -> Self {
        Self {
            state: SequencerState::Idle,
            wait: 0,
            wait_activate: cfg.wait_activate,
            wait_write: cfg.wait_write,
            wait_read: cfg.wait_read,
            wait_precharge: cfg.wait_precharge,
            wait_refresh: cfg.wait_refresh,
        }
    }

    fn wait_for(&self, kind: CommandKind) -> u64 {
        match kind {
            CommandKind::Activate => self.wait_activate,
            CommandKind::Write => self.wait_write,
            CommandKind::Read => self.wait_read,
            CommandKind::Precharge | CommandKind::PrechargeAll => self.wait_precharge,
            CommandKind::Refresh => self.wait_refresh,
            CommandKind::Nop => 0,
        }
    }

    /// Returns to the idle state.
    pub fn reset(&mut self) {
        self.state = SequencerState::Idle;
        self.wait = 0;
    }
}

/// Runs one sequencer step.
///
/// # Errors
///
/// Propagates timing violations and data mismatches as fatal errors when
/// the corresponding strict mode is enabled; otherwise they are counted
/// and the step succeeds.
pub fn sequencer_step(mc: &mut MemController) -> Result<(), ModelError> {
    let now = mc.cycle;

    match mc.sequencer.state {
        SequencerState::Idle => {
            if let Some(cmd) = mc.dram_cmd.pop() {
                execute_command(mc, &cmd, now)?;
                mc.sequencer.wait = mc.sequencer.wait_for(cmd.kind);
                mc.sequencer.state = match cmd.kind {
                    CommandKind::Activate => SequencerState::WaitActivate,
                    CommandKind::Write => SequencerState::WaitWrite,
                    CommandKind::Read => SequencerState::WaitRead,
                    CommandKind::Precharge | CommandKind::PrechargeAll => {
                        SequencerState::WaitPrecharge
                    }
                    CommandKind::Refresh => SequencerState::WaitRefresh,
                    CommandKind::Nop => SequencerState::Idle,
                };
            } else {
                mc.dfi = DfiSnapshot::default();
            }
        }
        state => {
            if mc.sequencer.wait > 0 {
                mc.sequencer.wait -= 1;
            }
            if mc.sequencer.wait == 0 {
                if state == SequencerState::WaitRefresh {
                    mc.refresh.complete_one();
                }
                mc.sequencer.state = SequencerState::Idle;
            }
        }
    }

    mc.dfi.wrdata_en = mc.sequencer.state == SequencerState::WaitWrite;
    mc.dfi.rddata_en = mc.sequencer.state == SequencerState::WaitRead;
    Ok(())
}

fn execute_command(mc: &mut MemController, cmd: &DramCommand, now: u64) -> Result<(), ModelError> {
    mc.stats.total_dram_commands += 1;

    if let Some(violation) = mc.timing.check(cmd, now) {
        mc.stats.timing_violations += 1;
        if mc.trace {
            println!("[Seq] {violation}");
        }
        if mc.enforce_timing {
            return Err(ModelError::Timing(violation));
        }
    }
    mc.timing.update(cmd, now);

    match cmd.kind {
        CommandKind::Write => {
            let (data, strb) = cmd.unpack_write_data();
            mc.memory.write(cmd.origin_addr, data, strb, now);
        }
        CommandKind::Read => {
            if mc.verify_data {
                let actual = mc.memory.peek(cmd.origin_addr);
                if let Some(expected) = cmd.expected {
                    if actual != expected {
                        mc.stats.data_errors += 1;
                        if mc.trace {
                            println!(
                                "[Seq] data mismatch addr={:#x} expected={:#018x} \
                                 actual={:#018x}",
                                cmd.origin_addr, expected, actual
                            );
                        }
                        return Err(ModelError::DataMismatch {
                            addr: cmd.origin_addr,
                            expected,
                            actual,
                        });
                    }
                }
            }
        }
        CommandKind::Precharge => mc.page_table.close(cmd.bank),
        CommandKind::PrechargeAll => mc.page_table.close_all(),
        CommandKind::Activate | CommandKind::Refresh | CommandKind::Nop => {}
    }

    mc.dfi = DfiSnapshot {
        command: cmd.kind,
        cs_active: cmd.kind != CommandKind::Nop,
        rank: cmd.rank,
        bank: cmd.bank,
        row: cmd.row,
        col: cmd.col,
        wrdata: cmd.data,
        wrdata_mask: cmd.mask,
        wrdata_en: false,
        rddata_en: false,
    };

    if mc.trace {
        match cmd.kind {
            CommandKind::Activate => {
                println!("[Seq] ACTIVATE bank={} row={:#x}", cmd.bank, cmd.row)
            }
            CommandKind::Read => println!("[Seq] READ bank={} col={:#x}", cmd.bank, cmd.col),
            CommandKind::Write => println!("[Seq] WRITE bank={} col={:#x}", cmd.bank, cmd.col),
            CommandKind::Precharge => println!("[Seq] PRECHARGE bank={}", cmd.bank),
            CommandKind::PrechargeAll => println!("[Seq] PRECHARGE-ALL"),
            CommandKind::Refresh => println!("[Seq] REFRESH"),
            CommandKind::Nop => println!("[Seq] NOP"),
        }
    }

    Ok(())
}
