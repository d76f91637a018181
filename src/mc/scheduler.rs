//! Command Scheduler.
//!
//! One scheduling decision per main-clock tick: pick a direction, dequeue
//! the transaction at the head of that direction's queue(s), resolve page
//! hit/miss against the page table, and emit the DRAM command sequence.
//! A page miss emits ACTIVATE followed by the column command and opens the
//! row in the page table immediately; the sequencer executes commands in
//! strict FIFO order, so the table and the command stream stay consistent.
//!
//! Writes apply to the memory array and retire their AXI response at
//! schedule time; reads synthesize their response data from the array at
//! schedule time, with completion latency modeled only by the sequencer's
//! wait states. Both are documented simplifications carried from the
//! behavioral model this reimplements.

use crate::common::Direction;
use crate::config::ArbitrationKind;
use crate::mc::axi::{ReadResponse, WriteResponse};
use crate::mc::command::{CommandKind, DramCommand};
use crate::mc::MemController;

/// Arbitration between simultaneously-ready read and write streams.
///
/// The only cross-stream ordering rule in the model. Implementations are
/// stateful so policies like alternation can remember their last pick.
pub trait ArbitrationPolicy {
    /// Picks a direction given which streams have work ready.
    ///
    /// Returns `None` when neither stream is ready.
    fn choose(&mut self, has_write: bool, has_read: bool) -> Option<Direction>;
}

/// Writes always win on contention.
///
/// Avoids write starvation under a continuous read stream; a tunable
/// policy point, not a law.
pub struct WritePriority;

impl ArbitrationPolicy for WritePriority {
    fn choose(&mut self, has_write: bool, has_read: bool) -> Option<Direction> {
        if has_write {
            Some(Direction::Write)
        } else if has_read {
            Some(Direction::Read)
        } else {
            None
        }
    }
}

/// Strict alternation between directions while both have work.
pub struct Alternate {
    last_was_write: bool,
}

impl Alternate {
    pub fn new() -> Self {
        Self {
            last_was_write: false,
        }
    }
}

impl Default for Alternate {
    fn default() -> Self {
        Self::new()
    }
}

impl ArbitrationPolicy for Alternate {
    fn choose(&mut self, has_write: bool, has_read: bool) -> Option<Direction> {
        match (has_write, has_read) {
            (false, false) => None,
            (true, false) => {
                self.last_was_write = true;
                Some(Direction::Write)
            }
            (false, true) => {
                self.last_was_write = false;
                Some(Direction::Read)
            }
            (true, true) => {
                if self.last_was_write {
                    self.last_was_write = false;
                    Some(Direction::Read)
                } else {
                    self.last_was_write = true;
                    Some(Direction::Write)
                }
            }
        }
    }
}

/// Instantiates the policy selected by configuration.
pub fn make_policy(kind: ArbitrationKind) -> Box<dyn ArbitrationPolicy> {
    match kind {
        ArbitrationKind::WritePriority => Box::new(WritePriority),
        ArbitrationKind::Alternate => Box::new(Alternate::new()),
    }
}

/// Runs one scheduling decision.
///
/// A direction only counts as ready when its downstream resources also
/// have room: the command queue must fit a worst-case ACTIVATE plus
/// column command and the response queue one entry, so a scheduled
/// transaction can never be half-emitted. Transactions left waiting stay
/// at the head of their queue in arrival order.
pub fn schedule_step(mc: &mut MemController) {
    let cmd_room = mc.dram_cmd.capacity() - mc.dram_cmd.len() >= 2;
    let has_write = !mc.write_addr.is_empty()
        && !mc.write_data.is_empty()
        && !mc.write_resp.is_full()
        && cmd_room;
    let has_read = !mc.read_addr.is_empty() && !mc.read_resp.is_full() && cmd_room;

    match mc.policy.choose(has_write, has_read) {
        Some(Direction::Write) => schedule_write(mc),
        Some(Direction::Read) => schedule_read(mc),
        None => {}
    }
}

fn schedule_write(mc: &mut MemController) {
    let (addr_trans, data_trans) = match (mc.write_addr.pop(), mc.write_data.pop()) {
        (Some(a), Some(d)) => (a, d),
        _ => return,
    };
    let now = mc.cycle;

    // The write lands in the backing store at schedule time so a later
    // read scheduled against the same address observes it.
    mc.memory
        .write(addr_trans.addr, data_trans.data, data_trans.strb, now);

    let daddr = mc.addr_map.decode(addr_trans.addr);
    if mc.page_table.is_hit(daddr.bank, daddr.row) {
        mc.stats.page_hits += 1;
    } else {
        mc.stats.page_misses += 1;
        let act = DramCommand::activate(daddr, addr_trans.addr, now);
        let pushed = mc.dram_cmd.push(act);
        debug_assert!(pushed);
        mc.page_table.open(daddr.bank, daddr.row);
    }

    let mut cmd = DramCommand::column(CommandKind::Write, daddr, addr_trans.addr, now);
    cmd.pack_write_data(data_trans.data, data_trans.strb);
    let pushed = mc.dram_cmd.push(cmd);
    debug_assert!(pushed);

    let pushed = mc.write_resp.push(WriteResponse {
        id: addr_trans.id,
        resp: addr_trans.resp,
    });
    debug_assert!(pushed);

    if mc.trace {
        println!(
            "[Sched] write id={:#x} addr={:#x} bank={} row={:#x} col={:#x}",
            addr_trans.id, addr_trans.addr, daddr.bank, daddr.row, daddr.col
        );
    }
}

fn schedule_read(mc: &mut MemController) {
    let addr_trans = match mc.read_addr.pop() {
        Some(t) => t,
        None => return,
    };
    let now = mc.cycle;

    let daddr = mc.addr_map.decode(addr_trans.addr);
    if mc.page_table.is_hit(daddr.bank, daddr.row) {
        mc.stats.page_hits += 1;
    } else {
        mc.stats.page_misses += 1;
        let act = DramCommand::activate(daddr, addr_trans.addr, now);
        let pushed = mc.dram_cmd.push(act);
        debug_assert!(pushed);
        mc.page_table.open(daddr.bank, daddr.row);
    }

    // The read is satisfied from the backing store now; the sequencer only
    // models the latency.
    let data = mc.memory.read(addr_trans.addr, now);

    let mut cmd = DramCommand::column(CommandKind::Read, daddr, addr_trans.addr, now);
    cmd.expected = Some(data);
    let pushed = mc.dram_cmd.push(cmd);
    debug_assert!(pushed);

    let pushed = mc.read_resp.push(ReadResponse {
        id: addr_trans.id,
        resp: addr_trans.resp,
        data,
        last: true,
    });
    debug_assert!(pushed);

    if mc.trace {
        println!(
            "[Sched] read id={:#x} addr={:#x} bank={} row={:#x} col={:#x} data={:#018x}",
            addr_trans.id, addr_trans.addr, daddr.bank, daddr.row, daddr.col, data
        );
    }
}
