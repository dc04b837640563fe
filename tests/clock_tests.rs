use linkpulse::clock::sync::SyncState;
use linkpulse::config::{ClockConfig, TICKS_PER_BAR, TICK_LENGTH};
use linkpulse::{Controls, LinkClock, Light, ManualTimeline, Output, OutputSink, PortBuffer};
use std::time::Duration;

fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn node(config: ClockConfig) -> (ManualTimeline, LinkClock<ManualTimeline>, PortBuffer) {
    init_test_logging();
    let timeline = ManualTimeline::new();
    let clock = LinkClock::new(timeline.clone(), config);
    (timeline, clock, PortBuffer::new())
}

fn tick_phase(tick: u32) -> f64 {
    f64::from(tick) * TICK_LENGTH
}

#[test]
fn test_scenario_bar_start_locks() {
    let (timeline, mut clock, mut ports) = node(ClockConfig::swing());
    timeline.set_beats(0.0);

    let tick = clock.step(&Controls::new(0.0, 0.0), &mut ports);

    assert_eq!(tick, 0);
    assert_eq!(clock.sync_state(), SyncState::Synced);
    assert_eq!(ports.output(Output::Clock), 10.0);
    assert_eq!(ports.output(Output::Reset), 10.0);
}

#[test]
fn test_scenario_half_beat_after_lock() {
    let (timeline, mut clock, mut ports) = node(ClockConfig::swing());
    timeline.set_beats(0.0);
    clock.step(&Controls::default(), &mut ports);

    timeline.set_beats(0.5);
    let tick = clock.step(&Controls::default(), &mut ports);

    assert_eq!(tick, 16);
    assert_eq!(ports.output(Output::Clock), 10.0);
    assert_eq!(ports.output(Output::Reset), 0.0);
}

#[test]
fn test_scenario_swing_on_odd_group() {
    let (timeline, mut clock, mut ports) = node(ClockConfig::swing());
    let controls = Controls::new(0.0, 1.0);

    timeline.set_beats(1.0);
    assert_eq!(clock.step(&controls, &mut ports), 32);

    timeline.set_beats(1.25);
    assert_eq!(clock.step(&controls, &mut ports), 38);
}

#[test]
fn test_lock_only_at_bar_start() {
    let (timeline, mut clock, mut ports) = node(ClockConfig::swing());

    for tick in 1..TICKS_PER_BAR {
        timeline.set_beats(tick_phase(tick));
        clock.step(&Controls::default(), &mut ports);
        assert!(!clock.is_synced(), "locked at tick {}", tick);
    }

    timeline.set_beats(4.0);
    assert_eq!(clock.step(&Controls::default(), &mut ports), 0);
    assert!(clock.is_synced());
}

#[test]
fn test_resync_forces_unlock_at_every_tick() {
    let (timeline, mut clock, mut ports) = node(ClockConfig::swing());
    let pressed = Controls::default().with_sync_trigger(true);

    for tick in 0..TICKS_PER_BAR {
        // Lock first so the button has something to drop.
        timeline.set_beats(0.0);
        clock.step(&Controls::default(), &mut ports);
        assert!(clock.is_synced());

        timeline.set_beats(tick_phase(tick));
        clock.step(&pressed, &mut ports);
        assert_eq!(clock.sync_state(), SyncState::Unsynced, "tick {}", tick);
        assert_eq!(ports.output(Output::Clock), 0.0);
        assert_eq!(ports.light(Light::Sync), 1.0);
    }
}

#[test]
fn test_silence_while_unsynced() {
    let (timeline, mut clock, mut ports) = node(ClockConfig::swing());
    timeline.set_beats(0.125);

    for _ in 0..(3 * TICKS_PER_BAR) {
        clock.step(&Controls::default().with_sync_trigger(true), &mut ports);
        assert_eq!(ports.output(Output::Clock), 0.0);
        assert_eq!(ports.output(Output::Reset), 0.0);
        assert_eq!(ports.light(Light::Clock), 0.0);
        assert_eq!(ports.light(Light::Reset), 0.0);
        timeline.advance(TICK_LENGTH, Duration::from_millis(1));
    }
}

#[test]
fn test_full_bar_duty_cycles() {
    let (timeline, mut clock, mut ports) = node(ClockConfig::swing());
    let mut clock_high = 0;
    let mut reset_ticks = Vec::new();

    for tick in 0..TICKS_PER_BAR {
        timeline.set_beats(tick_phase(tick));
        clock.step(&Controls::default(), &mut ports);
        if ports.output(Output::Clock) == 10.0 {
            clock_high += 1;
            assert_eq!(ports.light(Light::Clock), 1.0);
        }
        if ports.output(Output::Reset) == 10.0 {
            reset_ticks.push(tick);
        }
    }

    assert_eq!(clock_high, 64);
    assert_eq!(reset_ticks, vec![0, 1]);
}

#[test]
fn test_offset_shifts_lock_point() {
    let (timeline, mut clock, mut ports) = node(ClockConfig::swing());
    // Five ticks early: phase 123/32 plus a full positive offset lands on tick 0.
    let controls = Controls::new(1.0, 0.0);

    timeline.set_beats(tick_phase(123));
    assert_eq!(clock.step(&controls, &mut ports), 0);
    assert!(clock.is_synced());

    let controls = Controls::new(-1.0, 0.0);
    timeline.set_beats(0.0);
    assert_eq!(clock.step(&controls, &mut ports), 123);
}

#[test]
fn test_plain_gating_writes_once_per_tick() {
    let (timeline, mut clock, mut ports) = node(ClockConfig::plain());
    timeline.set_beats(0.5);

    for _ in 0..10 {
        clock.step(&Controls::default(), &mut ports);
    }
    // Clock and reset written once for the single tick observed.
    assert_eq!(ports.output_writes(), 2);
    assert_eq!(ports.light(Light::Sync), 1.0);
}

#[test]
fn test_swing_gating_reasserts_silence_while_unsynced() {
    let (timeline, mut clock, mut ports) = node(ClockConfig::swing());
    timeline.set_beats(0.5);

    clock.step(&Controls::default(), &mut ports);
    ports.set_output(Output::Clock, 10.0);
    clock.step(&Controls::default(), &mut ports);

    assert_eq!(ports.output(Output::Clock), 0.0);
}

#[test]
fn test_plain_gating_keeps_remnant_until_tick_changes() {
    let (timeline, mut clock, mut ports) = node(ClockConfig::plain());
    timeline.set_beats(0.5);

    clock.step(&Controls::default(), &mut ports);
    ports.set_output(Output::Clock, 10.0);
    clock.step(&Controls::default(), &mut ports);
    assert_eq!(ports.output(Output::Clock), 10.0);

    timeline.set_beats(0.5 + TICK_LENGTH);
    clock.step(&Controls::default(), &mut ports);
    assert_eq!(ports.output(Output::Clock), 0.0);
}

#[test]
fn test_locked_outputs_hold_between_tick_changes() {
    let (timeline, mut clock, mut ports) = node(ClockConfig::swing());
    timeline.set_beats(0.0);
    clock.step(&Controls::default(), &mut ports);
    let writes = ports.output_writes();

    for _ in 0..5 {
        clock.step(&Controls::default(), &mut ports);
    }
    assert_eq!(ports.output_writes(), writes);
    assert_eq!(clock.last_tick(), Some(0));
}

#[test]
fn test_session_scoped_to_node() {
    init_test_logging();
    let timeline = ManualTimeline::new();
    let clock = LinkClock::new(timeline.clone(), ClockConfig::default());
    assert_eq!(timeline.enable_calls(), vec![true]);

    drop(clock);
    assert_eq!(timeline.enable_calls(), vec![true, false]);
}
