//! Simulation Harness.
//!
//! Drives the controller's two clock domains from one loop and plays back
//! JSON-described workloads against the AXI-facing API. The harness
//! stands exactly where the external bus-functional model or emulator
//! bridge would: it submits beats, honors backpressure by retrying on the
//! next cycle, and collects responses as they retire.

use serde::Deserialize;
use std::fs;

use crate::common::ModelError;
use crate::config::Config;
use crate::mc::{MemController, ReadResponse, WriteResponse};

/// One step of a playback workload.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum WorkloadOp {
    /// Submit one AXI write beat.
    Write {
        id: u16,
        addr: u64,
        data: u64,
        #[serde(default = "default_strb")]
        strb: u8,
    },
    /// Submit one AXI read beat.
    Read { id: u16, addr: u64 },
    /// Let the clocks run for a number of main-clock cycles.
    Wait { cycles: u64 },
    /// Write a 32-bit register over the APB-style interface.
    RegWrite { addr: u16, value: u32 },
    /// Read a 32-bit register; the value lands in the outcome.
    RegRead { addr: u16 },
}

fn default_strb() -> u8 {
    0xFF
}

/// Loads a workload from a JSON file.
///
/// The file holds an array of operation objects, e.g.
/// `[{"op": "write", "id": 1, "addr": 4096, "data": 3735928559}]`.
pub fn load_workload(path: &str) -> Result<Vec<WorkloadOp>, ModelError> {
    let content = fs::read_to_string(path)
        .map_err(|e| ModelError::Config(format!("cannot read workload {path}: {e}")))?;
    serde_json::from_str(&content)
        .map_err(|e| ModelError::Config(format!("cannot parse workload {path}: {e}")))
}

/// Everything a workload run produced, in retirement order.
#[derive(Debug, Default)]
pub struct SimOutcome {
    /// Main-clock cycles consumed.
    pub cycles: u64,
    /// Write responses in retirement order.
    pub write_responses: Vec<WriteResponse>,
    /// Read responses in retirement order.
    pub read_responses: Vec<ReadResponse>,
    /// Register read results in workload order.
    pub reg_reads: Vec<(u16, u32)>,
}

/// Two-clock driving loop around a [`MemController`].
pub struct Simulator {
    /// The controller under simulation.
    pub mc: MemController,
    slow_divider: u64,
}

impl Simulator {
    /// Builds the controller and the clock ratio from configuration.
    pub fn new(config: &Config) -> Result<Self, ModelError> {
        if config.general.slow_clock_divider == 0 {
            return Err(ModelError::Config(
                "slow_clock_divider must be nonzero".into(),
            ));
        }
        Ok(Self {
            mc: MemController::new(config)?,
            slow_divider: config.general.slow_clock_divider,
        })
    }

    /// Advances one main-clock tick, including the slow-clock tick when
    /// the divider rolls over.
    pub fn tick(&mut self) -> Result<(), ModelError> {
        self.mc.tick_main()?;
        if self.mc.cycle % self.slow_divider == 0 {
            self.mc.tick_slow();
        }
        Ok(())
    }

    fn tick_and_collect(&mut self, out: &mut SimOutcome) -> Result<(), ModelError> {
        self.tick()?;
        while let Some(r) = self.mc.pop_write_response() {
            out.write_responses.push(r);
        }
        while let Some(r) = self.mc.pop_read_response() {
            out.read_responses.push(r);
        }
        Ok(())
    }

    /// Plays a workload to completion.
    ///
    /// Submissions that hit backpressure retry on following cycles. After
    /// the last operation the clocks keep running until the controller
    /// drains or `max_cycles` is reached, whichever comes first.
    ///
    /// # Errors
    ///
    /// Propagates strict-mode violations; the default model always
    /// completes.
    pub fn run(&mut self, ops: &[WorkloadOp], max_cycles: u64) -> Result<SimOutcome, ModelError> {
        let mut out = SimOutcome::default();

        'workload: for op in ops {
            match *op {
                WorkloadOp::Write {
                    id,
                    addr,
                    data,
                    strb,
                } => {
                    while !self.mc.submit_write(id, addr, data, strb) {
                        if self.mc.cycle >= max_cycles {
                            break 'workload;
                        }
                        self.tick_and_collect(&mut out)?;
                    }
                }
                WorkloadOp::Read { id, addr } => {
                    while !self.mc.submit_read(id, addr) {
                        if self.mc.cycle >= max_cycles {
                            break 'workload;
                        }
                        self.tick_and_collect(&mut out)?;
                    }
                }
                WorkloadOp::Wait { cycles } => {
                    for _ in 0..cycles {
                        if self.mc.cycle >= max_cycles {
                            break 'workload;
                        }
                        self.tick_and_collect(&mut out)?;
                    }
                }
                WorkloadOp::RegWrite { addr, value } => self.mc.reg_write(addr, value),
                WorkloadOp::RegRead { addr } => {
                    out.reg_reads.push((addr, self.mc.reg_read(addr)));
                }
            }
        }

        while !self.mc.idle() && self.mc.cycle < max_cycles {
            self.tick_and_collect(&mut out)?;
        }

        out.cycles = self.mc.cycle;
        Ok(out)
    }
}
