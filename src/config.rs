use serde::Deserialize;

const SLOW_CLOCK_DIVIDER: u64 = 8;

const RANK_SHIFT: u32 = 30;
const RANK_BITS: u32 = 1;
const BANK_SHIFT: u32 = 6;
const BANK_BITS: u32 = 4;
const ROW_SHIFT: u32 = 10;
const ROW_BITS: u32 = 16;
const COL_SHIFT: u32 = 3;
const COL_BITS: u32 = 10;

const WAIT_ACTIVATE: u64 = 3;
const WAIT_WRITE: u64 = 2;
const WAIT_READ: u64 = 4;
const WAIT_PRECHARGE: u64 = 2;
const WAIT_REFRESH: u64 = 10;

const T_RCD_MIN: u64 = 3;
const T_RP_MIN: u64 = 2;
const T_FAW_MIN: u64 = 20;
const BANKS_PER_GROUP: u32 = 4;

const ADDR_QUEUE_DEPTH: usize = 64;
const WRITE_DATA_DEPTH: usize = 16;
const RESP_QUEUE_DEPTH: usize = 64;
const CMD_QUEUE_DEPTH: usize = 64;

const REFRESH_INTERVAL: u64 = 1950;
const REFRESH_CREDIT_CAP: u8 = 8;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub address_map: AddressMapConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub queues: QueueConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeneralConfig {
    #[serde(default)]
    pub trace: bool,

    /// Compare read-back data against schedule-time data on every READ.
    #[serde(default)]
    pub verify_data: bool,

    /// Treat timing violations as fatal instead of advisory.
    #[serde(default)]
    pub enforce_timing: bool,

    #[serde(default = "default_slow_clock_divider")]
    pub slow_clock_divider: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace: false,
            verify_data: false,
            enforce_timing: false,
            slow_clock_divider: SLOW_CLOCK_DIVIDER,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AddressMapConfig {
    #[serde(default = "default_rank_shift")]
    pub rank_shift: u32,

    #[serde(default = "default_rank_bits")]
    pub rank_bits: u32,

    #[serde(default = "default_bank_shift")]
    pub bank_shift: u32,

    #[serde(default = "default_bank_bits")]
    pub bank_bits: u32,

    #[serde(default = "default_row_shift")]
    pub row_shift: u32,

    #[serde(default = "default_row_bits")]
    pub row_bits: u32,

    #[serde(default = "default_col_shift")]
    pub col_shift: u32,

    #[serde(default = "default_col_bits")]
    pub col_bits: u32,
}

impl Default for AddressMapConfig {
    fn default() -> Self {
        Self {
            rank_shift: RANK_SHIFT,
            rank_bits: RANK_BITS,
            bank_shift: BANK_SHIFT,
            bank_bits: BANK_BITS,
            row_shift: ROW_SHIFT,
            row_bits: ROW_BITS,
            col_shift: COL_SHIFT,
            col_bits: COL_BITS,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct TimingConfig {
    #[serde(default = "default_wait_activate")]
    pub wait_activate: u64,

    #[serde(default = "default_wait_write")]
    pub wait_write: u64,

    #[serde(default = "default_wait_read")]
    pub wait_read: u64,

    #[serde(default = "default_wait_precharge")]
    pub wait_precharge: u64,

    #[serde(default = "default_wait_refresh")]
    pub wait_refresh: u64,

    #[serde(default = "default_t_rcd_min")]
    pub t_rcd_min: u64,

    #[serde(default = "default_t_rp_min")]
    pub t_rp_min: u64,

    #[serde(default = "default_t_faw_min")]
    pub t_faw_min: u64,

    #[serde(default = "default_banks_per_group")]
    pub banks_per_group: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            wait_activate: WAIT_ACTIVATE,
            wait_write: WAIT_WRITE,
            wait_read: WAIT_READ,
            wait_precharge: WAIT_PRECHARGE,
            wait_refresh: WAIT_REFRESH,
            t_rcd_min: T_RCD_MIN,
            t_rp_min: T_RP_MIN,
            t_faw_min: T_FAW_MIN,
            banks_per_group: BANKS_PER_GROUP,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct QueueConfig {
    #[serde(default = "default_addr_depth")]
    pub addr_depth: usize,

    #[serde(default = "default_write_data_depth")]
    pub write_data_depth: usize,

    #[serde(default = "default_resp_depth")]
    pub resp_depth: usize,

    #[serde(default = "default_cmd_depth")]
    pub cmd_depth: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            addr_depth: ADDR_QUEUE_DEPTH,
            write_data_depth: WRITE_DATA_DEPTH,
            resp_depth: RESP_QUEUE_DEPTH,
            cmd_depth: CMD_QUEUE_DEPTH,
        }
    }
}

/// Arbitration rule applied when both directions have work ready.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArbitrationKind {
    /// Writes always win on contention.
    #[default]
    WritePriority,
    /// Strict alternation between the two directions.
    Alternate,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SchedulerConfig {
    #[serde(default)]
    pub policy: ArbitrationKind,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RefreshConfig {
    /// Slow-clock ticks between refresh requests (~7.8 us at 250 MHz).
    #[serde(default = "default_refresh_interval")]
    pub interval: u64,

    #[serde(default = "default_refresh_credit_cap")]
    pub credit_cap: u8,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval: REFRESH_INTERVAL,
            credit_cap: REFRESH_CREDIT_CAP,
        }
    }
}

fn default_slow_clock_divider() -> u64 {
    SLOW_CLOCK_DIVIDER
}

fn default_rank_shift() -> u32 {
    RANK_SHIFT
}

fn default_rank_bits() -> u32 {
    RANK_BITS
}

fn default_bank_shift() -> u32 {
    BANK_SHIFT
}

fn default_bank_bits() -> u32 {
    BANK_BITS
}

fn default_row_shift() -> u32 {
    ROW_SHIFT
}

fn default_row_bits() -> u32 {
    ROW_BITS
}

fn default_col_shift() -> u32 {
    COL_SHIFT
}

fn default_col_bits() -> u32 {
    COL_BITS
}

fn default_wait_activate() -> u64 {
    WAIT_ACTIVATE
}

fn default_wait_write() -> u64 {
    WAIT_WRITE
}

fn default_wait_read() -> u64 {
    WAIT_READ
}

fn default_wait_precharge() -> u64 {
    WAIT_PRECHARGE
}

fn default_wait_refresh() -> u64 {
    WAIT_REFRESH
}

fn default_t_rcd_min() -> u64 {
    T_RCD_MIN
}

fn default_t_rp_min() -> u64 {
    T_RP_MIN
}

fn default_t_faw_min() -> u64 {
    T_FAW_MIN
}

fn default_banks_per_group() -> u32 {
    BANKS_PER_GROUP
}

fn default_addr_depth() -> usize {
    ADDR_QUEUE_DEPTH
}

fn default_write_data_depth() -> usize {
    WRITE_DATA_DEPTH
}

fn default_resp_depth() -> usize {
    RESP_QUEUE_DEPTH
}

fn default_cmd_depth() -> usize {
    CMD_QUEUE_DEPTH
}

fn default_refresh_interval() -> u64 {
    REFRESH_INTERVAL
}

fn default_refresh_credit_cap() -> u8 {
    REFRESH_CREDIT_CAP
}
