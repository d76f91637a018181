//! Memory Controller Core.
//!
//! [`MemController`] owns the five AXI channel queues, the DRAM command
//! queue, and every subunit (page table, timing tracker, sequencer,
//! refresh timer, register file, backing memory). The SystemC-style
//! per-signal processes of the hardware this models become an explicit
//! ordered list of per-tick steps: one scheduler decision followed by one
//! sequencer step per main-clock tick, and one refresh-timer step per
//! slow-clock tick. The two clocks are independent; their ratio is a
//! simulation input.
//!
//! All mutation happens through `tick_main`/`tick_slow` and the submit
//! API, from a single thread. Backpressure is expressed entirely by the
//! bounded queues: a rejected submission is the AXI-ready deassert.

/// AXI transaction and response types.
pub mod axi;

/// DRAM command and DFI snapshot types.
pub mod command;

/// Open-page table.
pub mod page;

/// Refresh timer.
pub mod refresh;

/// APB-style register file.
pub mod regs;

/// Command scheduler and arbitration policies.
pub mod scheduler;

/// Command sequencer state machine.
pub mod sequencer;

/// DRAM timing tracker.
pub mod timing;

pub use axi::{ReadResponse, Transaction, WriteResponse};
pub use command::{CommandKind, DfiSnapshot, DramCommand, DFI_PHASES};
pub use page::PageTable;
pub use refresh::RefreshTimer;
pub use regs::RegisterFile;
pub use scheduler::{make_policy, Alternate, ArbitrationPolicy, WritePriority};
pub use sequencer::{Sequencer, SequencerState};
pub use timing::{TimingTracker, FAW_WINDOW};

use crate::common::{AddressMap, BoundedQueue, ModelError, ADDR_MASK};
use crate::config::Config;
use crate::mem::MemoryArray;
use crate::stats::ModelStats;

/// Main-clock cycles between queue-occupancy trace lines.
const OCCUPANCY_LOG_INTERVAL: u64 = 10_000;

/// The memory controller model.
///
/// Fields are public so testbenches can observe internal state; the
/// simulation contract is that only the tick and submit methods mutate it.
pub struct MemController {
    /// Physical-address bit-slicing map.
    pub addr_map: AddressMap,
    /// Per-bank open-row tracker.
    pub page_table: PageTable,
    /// Per-bank timing state and constraint checks.
    pub timing: TimingTracker,
    /// Command-draining state machine.
    pub sequencer: Sequencer,
    /// Slow-clock refresh cadence.
    pub refresh: RefreshTimer,
    /// Backing storage; authoritative for read data.
    pub memory: MemoryArray,
    /// APB-visible register table.
    pub regs: RegisterFile,
    /// Model counters.
    pub stats: ModelStats,

    /// Write address channel queue.
    pub write_addr: BoundedQueue<Transaction>,
    /// Write data channel queue.
    pub write_data: BoundedQueue<Transaction>,
    /// Write response channel queue.
    pub write_resp: BoundedQueue<WriteResponse>,
    /// Read address channel queue.
    pub read_addr: BoundedQueue<Transaction>,
    /// Read response channel queue.
    pub read_resp: BoundedQueue<ReadResponse>,
    /// DRAM command queue feeding the sequencer.
    pub dram_cmd: BoundedQueue<DramCommand>,

    /// Cross-stream arbitration policy.
    pub policy: Box<dyn ArbitrationPolicy>,
    /// Compare read-back data against schedule-time data.
    pub verify_data: bool,
    /// Escalate timing violations to fatal errors.
    pub enforce_timing: bool,
    /// Emit per-event trace lines.
    pub trace: bool,
    /// Main-clock cycle count.
    pub cycle: u64,

    dfi: DfiSnapshot,
}

impl MemController {
    /// Builds a controller from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Config`] for an invalid address map or
    /// zero-depth queues.
    pub fn new(config: &Config) -> Result<Self, ModelError> {
        let addr_map = AddressMap::from_config(&config.address_map)?;

        let q = &config.queues;
        for (name, depth) in [
            ("addr_depth", q.addr_depth),
            ("write_data_depth", q.write_data_depth),
            ("resp_depth", q.resp_depth),
            ("cmd_depth", q.cmd_depth),
        ] {
            if depth == 0 {
                return Err(ModelError::Config(format!("{name} must be nonzero")));
            }
        }
        if q.cmd_depth < 2 {
            return Err(ModelError::Config(
                "cmd_depth must fit an ACTIVATE plus a column command".into(),
            ));
        }

        let trace = cfg!(feature = "always-trace") || config.general.trace;
        let banks = addr_map.banks();

        Ok(Self {
            addr_map,
            page_table: PageTable::new(banks),
            timing: TimingTracker::new(banks, &config.timing),
            sequencer: Sequencer::new(&config.timing),
            refresh: RefreshTimer::new(&config.refresh),
            memory: MemoryArray::new(trace),
            regs: RegisterFile::default(),
            stats: ModelStats::default(),
            write_addr: BoundedQueue::new(q.addr_depth),
            write_data: BoundedQueue::new(q.write_data_depth),
            write_resp: BoundedQueue::new(q.resp_depth),
            read_addr: BoundedQueue::new(q.addr_depth),
            read_resp: BoundedQueue::new(q.resp_depth),
            dram_cmd: BoundedQueue::new(q.cmd_depth),
            policy: make_policy(config.scheduler.policy),
            verify_data: config.general.verify_data,
            enforce_timing: config.general.enforce_timing,
            trace,
            cycle: 0,
            dfi: DfiSnapshot::default(),
        })
    }

    /// Submits one AXI write beat (address and data phases together).
    ///
    /// Returns `false` when either write queue is full; the caller must
    /// stall and retry, as a bus master would on a deasserted ready.
    pub fn submit_write(&mut self, id: u16, addr: u64, data: u64, strb: u8) -> bool {
        if self.write_addr.is_full() || self.write_data.is_full() {
            self.stats.write_stalls += 1;
            return false;
        }
        let masked = addr & ADDR_MASK;
        if masked != addr {
            self.stats.address_errors += 1;
        }

        let pushed = self
            .write_addr
            .push(Transaction::write_addr(id, masked, self.cycle));
        debug_assert!(pushed);
        let pushed = self
            .write_data
            .push(Transaction::write_data(data, strb, self.cycle));
        debug_assert!(pushed);
        self.stats.total_writes += 1;

        if self.trace {
            println!("[Axi] write id={id:#x} addr={masked:#x} data={data:#018x} strb={strb:#04x}");
        }
        true
    }

    /// Submits one AXI read beat.
    ///
    /// Returns `false` when the read address queue is full.
    pub fn submit_read(&mut self, id: u16, addr: u64) -> bool {
        let masked = addr & ADDR_MASK;
        let trans = Transaction::read_addr(id, masked, self.cycle);
        if !self.read_addr.push(trans) {
            self.stats.read_stalls += 1;
            return false;
        }
        if masked != addr {
            self.stats.address_errors += 1;
        }
        self.stats.total_reads += 1;

        if self.trace {
            println!("[Axi] read id={id:#x} addr={masked:#x}");
        }
        true
    }

    /// Retires the oldest write response, if one is ready.
    pub fn pop_write_response(&mut self) -> Option<WriteResponse> {
        self.write_resp.pop()
    }

    /// Retires the oldest read response, if one is ready.
    pub fn pop_read_response(&mut self) -> Option<ReadResponse> {
        self.read_resp.pop()
    }

    /// Advances the main clock by one tick: one scheduler decision, then
    /// one sequencer step.
    ///
    /// # Errors
    ///
    /// Fails only in strict modes, on a timing violation or data
    /// mismatch. The default model always succeeds.
    pub fn tick_main(&mut self) -> Result<(), ModelError> {
        self.cycle += 1;
        self.stats.cycles += 1;
        if self.trace && self.cycle % OCCUPANCY_LOG_INTERVAL == 0 {
            println!(
                "[Mc] cycle {} queues: wr_addr={} wr_data={} rd_addr={} cmd={}",
                self.cycle,
                self.write_addr.len(),
                self.write_data.len(),
                self.read_addr.len(),
                self.dram_cmd.len()
            );
        }
        scheduler::schedule_step(self);
        sequencer::sequencer_step(self)
    }

    /// Advances the slow clock by one tick, running the refresh timer.
    pub fn tick_slow(&mut self) {
        self.stats.slow_ticks += 1;
        refresh::refresh_step(self);
    }

    /// Reads a 32-bit register over the APB-style interface.
    pub fn reg_read(&self, addr: u16) -> u32 {
        self.regs.read(addr, &self.stats)
    }

    /// Writes a 32-bit register over the APB-style interface.
    ///
    /// A write to the PMU command register with the precharge-all bit set
    /// additionally enqueues a PRECHARGE-ALL command.
    pub fn reg_write(&mut self, addr: u16, value: u32) {
        self.regs.write(addr, value);
        if addr == regs::PMU_CMD && value & regs::PMU_CMD_PRECHARGE_ALL != 0 {
            let cmd = DramCommand::precharge_all(self.cycle);
            if !self.dram_cmd.push(cmd) && self.trace {
                println!("[Mc] precharge-all dropped, command queue full");
            }
        }
    }

    /// The DFI-facing output snapshot from the latest sequencer step.
    pub fn dfi(&self) -> &DfiSnapshot {
        &self.dfi
    }

    /// True when no work is pending: request queues and the command queue
    /// are drained and the sequencer is idle.
    ///
    /// Responses waiting to be popped do not count as pending work; they
    /// are the downstream consumer's business.
    pub fn idle(&self) -> bool {
        self.write_addr.is_empty()
            && self.write_data.is_empty()
            && self.read_addr.is_empty()
            && self.dram_cmd.is_empty()
            && self.sequencer.state == SequencerState::Idle
    }

    /// Controller-level reset: clears queues, open pages, timing state,
    /// the sequencer, the refresh timer, and statistics.
    ///
    /// Memory contents survive, as DRAM contents survive a controller
    /// reset.
    pub fn reset(&mut self) {
        self.write_addr.clear();
        self.write_data.clear();
        self.write_resp.clear();
        self.read_addr.clear();
        self.read_resp.clear();
        self.dram_cmd.clear();
        self.page_table.close_all();
        self.timing.clear();
        self.sequencer.reset();
        self.refresh.reset();
        self.stats.clear();
        self.dfi = DfiSnapshot::default();
    }
}
