//! Integration tests for the command sequencer.

use ddrc_model::config::Config;
use ddrc_model::mc::{CommandKind, DramCommand, MemController, SequencerState};

/// Creates a test configuration with tracing off.
fn test_config() -> Config {
    Config::default()
}

/// Tests the wait-state durations around one ACTIVATE+WRITE sequence.
#[test]
fn test_wait_states_follow_command_type() {
    let mut mc = MemController::new(&test_config()).unwrap();
    assert!(mc.submit_write(1, 0x40, 0xAB, 0xFF));

    // Tick 1: scheduler emits ACT+WRITE, sequencer executes the ACT.
    mc.tick_main().unwrap();
    assert_eq!(mc.sequencer.state, SequencerState::WaitActivate);
    assert_eq!(mc.dfi().command, CommandKind::Activate);

    // Default ACT wait is 3 cycles.
    for _ in 0..3 {
        assert_ne!(mc.sequencer.state, SequencerState::Idle);
        mc.tick_main().unwrap();
    }
    assert_eq!(mc.sequencer.state, SequencerState::Idle);

    // Next tick executes the WRITE.
    mc.tick_main().unwrap();
    assert_eq!(mc.sequencer.state, SequencerState::WaitWrite);
    assert_eq!(mc.dfi().command, CommandKind::Write);
    assert!(mc.dfi().wrdata_en);
}

/// Tests that commands execute in exact enqueue order.
#[test]
fn test_commands_execute_in_fifo_order() {
    let mut mc = MemController::new(&test_config()).unwrap();
    assert!(mc.submit_write(1, 0x40, 0x11, 0xFF));
    assert!(mc.submit_write(2, 0x80, 0x22, 0xFF));

    let mut executed = Vec::new();
    let mut last = CommandKind::Nop;
    for _ in 0..40 {
        mc.tick_main().unwrap();
        let cmd = mc.dfi().command;
        if mc.dfi().cs_active && cmd != last {
            executed.push(cmd);
        }
        last = cmd;
        if mc.idle() {
            break;
        }
    }

    assert_eq!(
        executed,
        vec![
            CommandKind::Activate,
            CommandKind::Write,
            CommandKind::Activate,
            CommandKind::Write
        ]
    );
}

/// Tests that the DFI snapshot carries the packed write phases.
#[test]
fn test_dfi_snapshot_carries_write_phases() {
    let mut mc = MemController::new(&test_config()).unwrap();
    assert!(mc.submit_write(1, 0x40, 0x1122_3344_5566_7788, 0x0F));

    // ACT executes on tick 1 and waits 3 cycles; WRITE executes on tick 5.
    for _ in 0..5 {
        mc.tick_main().unwrap();
    }
    assert_eq!(mc.dfi().command, CommandKind::Write);
    assert_eq!(mc.dfi().wrdata[0], 0x5566_7788);
    assert_eq!(mc.dfi().wrdata[1], 0x1122_3344);
    assert_eq!(mc.dfi().wrdata_mask[0], 0xF);
    assert_eq!(mc.dfi().wrdata_mask[1], 0x0);
}

/// Tests that read-data-enable asserts only while a READ drains.
#[test]
fn test_rddata_en_tracks_read_wait() {
    let mut mc = MemController::new(&test_config()).unwrap();
    assert!(mc.submit_read(1, 0x1000));

    mc.tick_main().unwrap();
    assert!(!mc.dfi().rddata_en); // ACT executing

    for _ in 0..3 {
        mc.tick_main().unwrap();
    }
    mc.tick_main().unwrap(); // READ executes
    assert_eq!(mc.dfi().command, CommandKind::Read);
    assert!(mc.dfi().rddata_en);

    while mc.sequencer.state != SequencerState::Idle {
        mc.tick_main().unwrap();
    }
    assert!(!mc.dfi().rddata_en);
}

/// Tests that PRECHARGE closes exactly one bank.
#[test]
fn test_precharge_closes_bank() {
    let mut mc = MemController::new(&test_config()).unwrap();
    mc.page_table.open(1, 0x10);
    mc.page_table.open(2, 0x20);

    assert!(mc.dram_cmd.push(DramCommand::precharge(1, 0)));
    mc.tick_main().unwrap();

    assert_eq!(mc.sequencer.state, SequencerState::WaitPrecharge);
    assert_eq!(mc.page_table.open_row(1), None);
    assert_eq!(mc.page_table.open_row(2), Some(0x20));
}

/// Tests that the PMU precharge-all request closes every bank.
#[test]
fn test_pmu_precharge_all_closes_every_bank() {
    let mut mc = MemController::new(&test_config()).unwrap();
    for b in 0..4 {
        mc.page_table.open(b, b as u16 + 1);
    }

    mc.reg_write(
        ddrc_model::mc::regs::PMU_CMD,
        ddrc_model::mc::regs::PMU_CMD_PRECHARGE_ALL,
    );
    mc.tick_main().unwrap();

    assert_eq!(mc.dfi().command, CommandKind::PrechargeAll);
    assert_eq!(mc.page_table.open_count(), 0);
}

/// Tests verify mode passing when nothing disturbs the data.
#[test]
fn test_verify_data_passes_undisturbed_read() {
    let mut config = test_config();
    config.general.verify_data = true;
    let mut mc = MemController::new(&config).unwrap();

    assert!(mc.submit_write(1, 0x1000, 0xCAFE, 0xFF));
    assert!(mc.submit_read(2, 0x1000));
    for _ in 0..40 {
        mc.tick_main().unwrap();
        if mc.idle() {
            break;
        }
    }
    assert_eq!(mc.stats.data_errors, 0);
}

/// Tests that verify mode catches a write slipping in between a read's
/// schedule and its execution.
#[test]
fn test_verify_data_detects_mismatch() {
    let mut config = test_config();
    config.general.verify_data = true;
    let mut mc = MemController::new(&config).unwrap();

    assert!(mc.submit_read(1, 0x2000));
    // Tick 1 schedules the read (capturing the uninitialized pattern) and
    // executes the ACTIVATE.
    mc.tick_main().unwrap();
    // Disturb the address before the READ command executes.
    mc.memory.write(0x2000, 0x1234, 0xFF, 0);

    let mut result = Ok(());
    for _ in 0..10 {
        result = mc.tick_main();
        if result.is_err() {
            break;
        }
    }
    assert!(matches!(
        result,
        Err(ddrc_model::common::ModelError::DataMismatch { addr: 0x2000, .. })
    ));
    assert_eq!(mc.stats.data_errors, 1);
}

/// Tests that the default model ignores the same disturbance.
#[test]
fn test_default_model_ignores_disturbed_read() {
    let mut mc = MemController::new(&test_config()).unwrap();

    assert!(mc.submit_read(1, 0x2000));
    mc.tick_main().unwrap();
    mc.memory.write(0x2000, 0x1234, 0xFF, 0);

    for _ in 0..10 {
        mc.tick_main().unwrap();
    }
    assert_eq!(mc.stats.data_errors, 0);
}
