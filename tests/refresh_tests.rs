//! Integration tests for the refresh timer.

use ddrc_model::config::Config;
use ddrc_model::mc::{CommandKind, MemController, SequencerState};

/// Creates a configuration whose refresh interval expires on every slow
/// tick.
fn test_config() -> Config {
    let mut config = Config::default();
    config.refresh.interval = 1;
    config
}

/// Tests that an expiry below the cap takes a credit and enqueues REFRESH.
#[test]
fn test_expiry_enqueues_refresh_and_credit() {
    let mut mc = MemController::new(&test_config()).unwrap();

    mc.tick_slow();

    assert_eq!(mc.refresh.credit(), 1);
    assert_eq!(mc.stats.refreshes_issued, 1);
    assert_eq!(mc.dram_cmd.len(), 1);
    assert_eq!(mc.dram_cmd.front().unwrap().kind, CommandKind::Refresh);
}

/// Tests that the interval actually divides the slow clock.
#[test]
fn test_interval_gates_expiries() {
    let mut config = Config::default();
    config.refresh.interval = 5;
    let mut mc = MemController::new(&config).unwrap();

    for _ in 0..4 {
        mc.tick_slow();
    }
    assert_eq!(mc.stats.refreshes_issued, 0);
    mc.tick_slow();
    assert_eq!(mc.stats.refreshes_issued, 1);
}

/// Tests the refresh bound: the credit never exceeds its cap and every
/// expiry either issues or counts a drop.
#[test]
fn test_credit_bounded_and_drops_counted() {
    let mut mc = MemController::new(&test_config()).unwrap();
    let cap = mc.refresh.credit_cap();

    for _ in 0..100 {
        mc.tick_slow();
        assert!(mc.refresh.credit() <= cap);
    }

    assert_eq!(mc.stats.refreshes_issued, cap as u64);
    assert_eq!(mc.stats.dropped_refreshes, 100 - cap as u64);
    assert_eq!(mc.stats.refreshes_issued + mc.stats.dropped_refreshes, 100);
}

/// Tests that the sequencer treats REFRESH as an ordinary command and
/// returns the credit on completion.
#[test]
fn test_refresh_completion_returns_credit() {
    let mut mc = MemController::new(&test_config()).unwrap();

    mc.tick_slow();
    assert_eq!(mc.refresh.credit(), 1);

    mc.tick_main().unwrap();
    assert_eq!(mc.sequencer.state, SequencerState::WaitRefresh);
    assert_eq!(mc.dfi().command, CommandKind::Refresh);
    // Credit is held for the whole tRFC-style wait.
    assert_eq!(mc.refresh.credit(), 1);

    for _ in 0..10 {
        mc.tick_main().unwrap();
    }
    assert_eq!(mc.sequencer.state, SequencerState::Idle);
    assert_eq!(mc.refresh.credit(), 0);
}

/// Tests that a full command queue drops the refresh without taking a
/// credit.
#[test]
fn test_full_command_queue_drops_without_credit() {
    let mut config = test_config();
    config.queues.cmd_depth = 2;
    let mut mc = MemController::new(&config).unwrap();

    // Fill the command queue so the refresh cannot land.
    use ddrc_model::mc::DramCommand;
    assert!(mc.dram_cmd.push(DramCommand::new(CommandKind::Nop, 0)));
    assert!(mc.dram_cmd.push(DramCommand::new(CommandKind::Nop, 0)));

    mc.tick_slow();

    assert_eq!(mc.refresh.credit(), 0);
    assert_eq!(mc.stats.refreshes_issued, 0);
    assert_eq!(mc.stats.dropped_refreshes, 1);
}
