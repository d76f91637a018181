//! DDR Controller Model CLI.
//!
//! The main executable for the model. It handles command-line argument
//! parsing, controller construction, workload playback, and the final
//! statistics report.
//!
//! # Usage
//!
//! Point the binary at a TOML configuration and a JSON workload:
//!
//! ```text
//! ddrc-model --config configs/default.toml --workload traffic.json
//! ```

use clap::Parser;
use std::{fs, process};

extern crate ddrc_model;

use ddrc_model::config::Config;
use ddrc_model::sim::{load_workload, Simulator};

/// Command-line arguments for the DDR controller model.
#[derive(Parser, Debug)]
#[command(author, version, about = "DDR/LPDDR Memory Controller Behavioral Model")]
struct Args {
    #[arg(short, long, default_value = "configs/default.toml")]
    config: String,

    #[arg(short, long)]
    workload: Option<String>,

    /// Main-clock cycle budget for the run.
    #[arg(long, default_value_t = 100_000)]
    cycles: u64,

    /// Force per-event trace output on.
    #[arg(long)]
    trace: bool,

    /// Enable both strict modes (data verification, timing enforcement).
    #[arg(long)]
    strict: bool,

    /// Write final statistics as JSON to the given path.
    #[arg(long)]
    stats_json: Option<String>,
}

/// Main entry point for the DDR controller model.
///
/// # Behavior
///
/// 1. **Configuration**: Parses command-line arguments and loads the TOML
///    configuration file, applying the `--trace`/`--strict` overrides.
/// 2. **Initialization**: Constructs the `Simulator` (controller, clock
///    ratio) from the configuration.
/// 3. **Playback**: Runs the JSON workload to completion or to the cycle
///    budget.
/// 4. **Teardown**: Prints statistics and optionally dumps them as JSON;
///    exits nonzero on a strict-mode violation.
fn main() {
    let args = Args::parse();
    let config_content = fs::read_to_string(&args.config).expect("Failed to read config");
    let mut config: Config = toml::from_str(&config_content).expect("Failed to parse config");

    if args.trace {
        config.general.trace = true;
    }
    if args.strict {
        config.general.verify_data = true;
        config.general.enforce_timing = true;
    }

    println!("Global Configuration");
    println!("--------------------");
    println!("General:");
    println!("  Trace:              {}", config.general.trace);
    println!("  Verify Data:        {}", config.general.verify_data);
    println!("  Enforce Timing:     {}", config.general.enforce_timing);
    println!(
        "  Slow Clock Ratio:   1/{}",
        config.general.slow_clock_divider
    );
    println!("Address Map:");
    println!(
        "  Rank:               bit {} ({} bits)",
        config.address_map.rank_shift, config.address_map.rank_bits
    );
    println!(
        "  Bank:               bit {} ({} bits)",
        config.address_map.bank_shift, config.address_map.bank_bits
    );
    println!(
        "  Row:                bit {} ({} bits)",
        config.address_map.row_shift, config.address_map.row_bits
    );
    println!(
        "  Column:             bit {} ({} bits)",
        config.address_map.col_shift, config.address_map.col_bits
    );
    println!("Timing:");
    println!(
        "  Wait States:        ACT={} WR={} RD={} PRE={} REF={}",
        config.timing.wait_activate,
        config.timing.wait_write,
        config.timing.wait_read,
        config.timing.wait_precharge,
        config.timing.wait_refresh
    );
    println!(
        "  Minimums:           tRCD={} tRP={} tFAW={}",
        config.timing.t_rcd_min, config.timing.t_rp_min, config.timing.t_faw_min
    );
    println!("Refresh:");
    println!("  Interval:           {} slow ticks", config.refresh.interval);
    println!("  Credit Cap:         {}", config.refresh.credit_cap);
    println!("Scheduler:");
    println!("  Policy:             {:?}", config.scheduler.policy);
    println!("--------------------");

    let workload_path = match args.workload {
        Some(p) => p,
        None => {
            eprintln!("Error: No workload specified.");
            eprintln!("Usage:");
            eprintln!("  ddrc-model --config <config.toml> --workload <workload.json>");
            process::exit(1);
        }
    };

    let ops = match load_workload(&workload_path) {
        Ok(ops) => ops,
        Err(e) => {
            eprintln!("[!] {e}");
            process::exit(1);
        }
    };
    println!("[*] Workload: {} ({} operations)", workload_path, ops.len());

    let mut sim = match Simulator::new(&config) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("[!] {e}");
            process::exit(1);
        }
    };

    match sim.run(&ops, args.cycles) {
        Ok(outcome) => {
            println!(
                "[*] Completed in {} cycles: {} write responses, {} read responses",
                outcome.cycles,
                outcome.write_responses.len(),
                outcome.read_responses.len()
            );
            for (addr, value) in &outcome.reg_reads {
                println!("[*] Register {:#05x} = {:#010x}", addr, value);
            }
            sim.mc.stats.print();

            if let Some(path) = args.stats_json {
                let json = serde_json::to_string_pretty(&sim.mc.stats)
                    .expect("Failed to serialize stats");
                fs::write(&path, json).expect("Failed to write stats");
                println!("[*] Statistics written to {path}");
            }
        }
        Err(e) => {
            eprintln!("\n[!] FATAL: {e}");
            sim.mc.stats.print();
            process::exit(1);
        }
    }
}
