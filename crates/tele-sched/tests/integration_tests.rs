//! Integration tests for the station simulator
//!
//! These tests drive real stations, cadences and the scheduler against
//! virtual generators:
//! - All-or-nothing generator acquisition and pool conservation
//! - Cadence timing independent of how often the clock is stepped
//! - DTMF dialing completeness and restart
//! - Tone frequency arithmetic and the audible window
//! - Proximity eviction and dynamic pipelining
//! - Retry jitter after failed re-acquisition

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tele_cadence::{Cadence, CadenceEvent, DigitCadence, DigitTiming, TwoToneCadence, TwoToneProfile};
use tele_core::{
    in_audible_window, Millis, StationId, Tuning, WaveGenPool, MAX_GENERATORS, SILENT_FREQ,
};
use tele_sched::{
    ConfigError, PipelineConfig, SchedulerEvent, SimulatorConfig, StationConfig, StationManager,
};
use tele_sim::{VirtualSignalMeter, VirtualWaveGen, WaveGenCommand};
use tele_station::station::RESTART_DELAY_MS;
use tele_station::{SignalKind, Station, StationState};

// ============================================================================
// Helper Functions
// ============================================================================

mod helpers {
    use super::*;

    /// A pool of virtual generators
    pub fn pool(n: usize) -> WaveGenPool<VirtualWaveGen> {
        WaveGenPool::new(VirtualWaveGen::bank("gen", n))
    }

    /// A manager over `stations` with pipelining off
    pub fn static_manager(
        vfo: u64,
        stations: Vec<StationConfig>,
    ) -> StationManager<VirtualWaveGen> {
        let config = SimulatorConfig {
            stations,
            vfo_start_hz: vfo,
            pipeline: PipelineConfig {
                enabled: false,
                ..Default::default()
            },
            ..Default::default()
        };
        StationManager::from_config(&config, VirtualWaveGen::bank("gen", MAX_GENERATORS))
            .unwrap()
    }

    /// Check that nobody holds a partial set and the pool agrees with the
    /// stations about who holds what
    pub fn assert_conserved(pool: &WaveGenPool<VirtualWaveGen>, stations: &[Station]) {
        let mut held = 0;
        for station in stations {
            let count = station.held_generators();
            assert!(
                count == 0 || count == station.required_generators(),
                "station {} holds {} of {}",
                station.id(),
                count,
                station.required_generators()
            );
            assert_eq!(count > 0, station.has_all_realizers());
            for slot in station.realization().slots() {
                assert_eq!(pool.owner(slot), Some(station.id()));
            }
            held += count;
        }
        assert_eq!(pool.busy_count(), held);
        assert!(pool.busy_count() <= pool.capacity());
    }

    /// Step a cadence from 0 to `until` in `increment` steps, recording
    /// every transition with the time of the call
    pub fn transitions<C: Cadence>(
        cadence: &mut C,
        increment: u32,
        until: u32,
    ) -> Vec<(CadenceEvent, Millis)> {
        transitions_from(cadence, 0, increment, until)
    }

    /// Like `transitions`, starting the clock at `from` and letting it wrap
    pub fn transitions_from<C: Cadence>(
        cadence: &mut C,
        from: Millis,
        increment: u32,
        span: u32,
    ) -> Vec<(CadenceEvent, Millis)> {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut events = Vec::new();
        let mut offset = 0;
        while offset <= span {
            let now = from.wrapping_add(offset);
            let event = cadence.step(now, &mut rng);
            if event.is_transition() {
                events.push((event, now));
            }
            offset += increment;
        }
        events
    }

    /// Summed generator requirement of audible stations
    pub fn audible_requirement(manager: &StationManager<VirtualWaveGen>) -> usize {
        manager
            .stations()
            .iter()
            .filter(|s| s.state() == StationState::Audible)
            .map(|s| s.required_generators())
            .sum()
    }
}

// ============================================================================
// Generator Acquisition
// ============================================================================

#[test]
fn test_dual_tone_never_half_acquired() {
    let mut pool = helpers::pool(3);
    let mut stations = vec![
        Station::new(StationId(1), SignalKind::Ringback, 1_000_000.0, 1),
        Station::new(StationId(2), SignalKind::Busy, 1_000_500.0, 2),
        Station::new(StationId(3), SignalKind::MorseCq, 1_001_000.0, 3),
    ];

    assert!(stations[0].begin(&mut pool, 0));
    assert!(!stations[1].begin(&mut pool, 0));
    helpers::assert_conserved(&pool, &stations);

    assert!(stations[2].begin(&mut pool, 0));
    assert_eq!(pool.free_count(), 0);
    helpers::assert_conserved(&pool, &stations);

    stations[0].end(&mut pool);
    assert!(stations[1].begin(&mut pool, 10));
    helpers::assert_conserved(&pool, &stations);
}

#[test]
fn test_begin_is_idempotent() {
    let mut pool = helpers::pool(4);
    let mut station = Station::new(StationId(1), SignalKind::Reorder, 1_000_000.0, 1);
    assert!(station.begin(&mut pool, 0));
    assert!(station.begin(&mut pool, 5));
    assert_eq!(pool.busy_count(), 2);
}

// ============================================================================
// Cadence Timing
// ============================================================================

#[test]
fn test_ringback_timeline() {
    let mut ring = TwoToneCadence::new(TwoToneProfile::RINGBACK);
    ring.start(true);
    let events = helpers::transitions(&mut ring, 1, 10_000);
    assert_eq!(
        events,
        vec![
            (CadenceEvent::TurnOn, 0),
            (CadenceEvent::TurnOff, 2000),
            (CadenceEvent::TurnOn, 6000),
            (CadenceEvent::TurnOff, 8000),
        ]
    );
}

#[test]
fn test_ringback_timeline_across_clock_wrap() {
    let start = Millis::MAX - 999;
    let mut ring = TwoToneCadence::new(TwoToneProfile::RINGBACK);
    ring.start(true);
    let events = helpers::transitions_from(&mut ring, start, 1, 10_000);
    assert_eq!(
        events,
        vec![
            (CadenceEvent::TurnOn, start),
            (CadenceEvent::TurnOff, 1000),
            (CadenceEvent::TurnOn, 5000),
            (CadenceEvent::TurnOff, 7000),
        ]
    );
}

#[test]
fn test_dtmf_dials_every_digit_then_restarts() {
    let number = "15551234567";
    let mut dialer = DigitCadence::new(DigitTiming::default(), number);
    dialer.start(true);

    let mut rng = SmallRng::seed_from_u64(3);
    let mut dialed = String::new();
    let mut offs = 0;
    let mut now = 0;
    loop {
        match dialer.step(now, &mut rng) {
            CadenceEvent::TurnOn => dialed.extend(dialer.current_digit()),
            CadenceEvent::TurnOff => offs += 1,
            CadenceEvent::CycleEnd => break,
            _ => {}
        }
        now += 5;
        assert!(now < 60_000, "dialer never finished");
    }
    assert_eq!(dialed, number);
    assert_eq!(offs, number.len());
    assert!(!dialer.is_active());
    assert_eq!(dialer.cycles(), 1);

    dialer.restart();
    assert_eq!(dialer.step(now + 4000, &mut rng), CadenceEvent::TurnOn);
    assert_eq!(dialer.current_digit(), Some('1'));
}

#[test]
fn test_dtmf_station_comes_back_after_pause() {
    let mut pool = helpers::pool(4);
    let mut station = Station::new(StationId(1), SignalKind::Dtmf, 1_000_000.0, 17)
        .with_dial_number("15551234567");
    assert!(station.begin(&mut pool, 0));
    station.update(&mut pool, &Tuning::new(1_000_000));

    let mut now = 0;
    while !station.is_waiting() {
        station.step(&mut pool, &mut (), now);
        now += 10;
    }
    assert_eq!(pool.busy_count(), 0);

    let resume = station.resume_at().unwrap();
    station.step(&mut pool, &mut (), resume);
    assert_eq!(pool.busy_count(), 2);
    station.step(&mut pool, &mut (), resume);
    assert!(station.is_active());
    assert_eq!(station.frequency(), 697.0);
    assert_eq!(station.frequency2(), 1209.0);
    assert_eq!(station.dial_number(), Some("15551234567"));
}

#[test]
fn test_dtmf_pause_survives_clock_wrap() {
    let mut pool = helpers::pool(4);
    let mut station = Station::new(StationId(1), SignalKind::Dtmf, 1_000_000.0, 17)
        .with_dial_number("15551234567");
    station.update(&mut pool, &Tuning::new(1_000_000));

    let start = Millis::MAX - 3000;
    assert!(station.begin(&mut pool, start));
    let mut now = start;
    let mut steps = 0;
    while !station.is_waiting() {
        station.step(&mut pool, &mut (), now);
        now = now.wrapping_add(10);
        steps += 1;
        assert!(steps < 10_000, "dialer never finished");
    }
    // The number takes longer to dial than the clock had left
    assert!(now < start);
    assert_eq!(pool.busy_count(), 0);

    let resume = station.resume_at().unwrap();
    let pause = resume.wrapping_sub(now.wrapping_sub(10));
    assert!(RESTART_DELAY_MS.contains(&pause), "pause {}", pause);

    station.step(&mut pool, &mut (), resume.wrapping_sub(1));
    assert_eq!(pool.busy_count(), 0);
    station.step(&mut pool, &mut (), resume);
    assert_eq!(pool.busy_count(), 2);
    station.step(&mut pool, &mut (), resume.wrapping_add(10));
    assert!(station.is_active());
    assert_eq!(station.frequency(), 697.0);
}

// ============================================================================
// Frequency Arithmetic
// ============================================================================

#[test]
fn test_sub_hz_tuning_reaches_tone() {
    let mut pool = helpers::pool(4);
    let mut station = Station::new(StationId(1), SignalKind::DialTone, 1_000_000.0, 1);
    station.begin(&mut pool, 0);
    let tuning = Tuning {
        frequency: 1_000_100,
        sub_frequency: 5,
        bfo_offset_hz: 0.0,
    };
    station.update(&mut pool, &tuning);
    assert_eq!(station.frequency(), (1_000_100.5 - 1_000_000.0) + 0.0 + 350.0);
}

#[test]
fn test_invalid_dial_character_is_silent() {
    let mut pool = helpers::pool(4);
    let mut station =
        Station::new(StationId(1), SignalKind::Dtmf, 1_000_000.0, 1).with_dial_number("x");
    station.begin(&mut pool, 0);
    station.update(&mut pool, &Tuning::new(1_000_000));
    station.step(&mut pool, &mut (), 0);

    assert!(station.is_active());
    assert_eq!(station.frequency2(), SILENT_FREQ);
    for generator in pool.generators() {
        assert_eq!(generator.audible_frequency(), None);
    }
}

// ============================================================================
// Scheduler
// ============================================================================

#[test]
fn test_five_cw_stations_four_generators() {
    let vfo = 7_000_000;
    let mut manager = helpers::static_manager(
        vfo,
        (1..=5)
            .map(|k| StationConfig::new(SignalKind::MorseCq, (vfo + k * 100) as f64))
            .collect(),
    );
    manager.tick(0, &Tuning::new(vfo), &mut ());

    for id in 1..=4 {
        assert_eq!(
            manager.station(StationId(id)).unwrap().state(),
            StationState::Audible
        );
    }
    assert_eq!(
        manager.station(StationId(5)).unwrap().state(),
        StationState::Silent
    );
    assert_eq!(manager.pool().busy_count(), 4);

    manager.drain_events();
    manager.tick(10, &Tuning::new(vfo + 600), &mut ());
    assert_eq!(
        manager.station(StationId(5)).unwrap().state(),
        StationState::Audible
    );
    assert_eq!(
        manager.station(StationId(1)).unwrap().state(),
        StationState::Silent
    );
    let events = manager.drain_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, SchedulerEvent::StationPromoted { id, .. } if *id == StationId(5))));
    assert!(events
        .iter()
        .any(|e| matches!(e, SchedulerEvent::StationSilenced { id, .. } if *id == StationId(1))));
}

#[test]
fn test_promoted_station_never_sees_stale_tuning() {
    let vfo = 555_000_000;
    let mut manager = helpers::static_manager(
        vfo,
        vec![StationConfig::new(SignalKind::Ringback, (vfo + 500) as f64)],
    );
    manager.tick(0, &Tuning::new(vfo), &mut ());

    let station = manager.station(StationId(1)).unwrap();
    assert_eq!(station.state(), StationState::Audible);
    assert!(station.is_enabled());
    for generator in manager.pool().generators() {
        for command in generator.commands() {
            if let WaveGenCommand::SetFrequency { hz, .. } = command {
                assert!(
                    *hz == SILENT_FREQ || in_audible_window(*hz),
                    "{} programmed to {} Hz",
                    generator.id(),
                    hz
                );
            }
        }
    }
    let tones: Vec<Option<f64>> = manager
        .pool()
        .generators()
        .map(|g| g.audible_frequency())
        .collect();
    assert_eq!(tones[..2], [Some(-60.0), Some(-20.0)]);
}

#[test]
fn test_contention_is_resolved_by_distance_not_order() {
    let vfo = 7_000_000;
    let stations = vec![
        StationConfig::new(SignalKind::Busy, (vfo + 2000) as f64),
        StationConfig::new(SignalKind::Busy, (vfo + 3000) as f64),
        StationConfig::new(SignalKind::Busy, (vfo + 1000) as f64),
    ];
    let mut manager = helpers::static_manager(vfo, stations);
    manager.tick(0, &Tuning::new(vfo), &mut ());

    let audible: Vec<u32> = manager
        .stations()
        .iter()
        .filter(|s| s.state() == StationState::Audible)
        .map(|s| s.id().as_u32())
        .collect();
    assert_eq!(audible, vec![1, 3]);
}

#[test]
fn test_sweep_keeps_pool_consistent_and_ends_clean() {
    let config = SimulatorConfig::default();
    let mut manager =
        StationManager::from_config(&config, VirtualWaveGen::bank("gen", config.generators))
            .unwrap();
    let mut meter = VirtualSignalMeter::new();

    let mut vfo = config.vfo_start_hz;
    let mut relocated = 0;
    for now in (0..120_000u32).step_by(10) {
        if now % 50 == 0 {
            vfo += 100;
        }
        manager.tick(now, &Tuning::new(vfo), &mut meter);
        meter.decay(1);

        assert!(helpers::audible_requirement(&manager) <= MAX_GENERATORS);
        helpers::assert_conserved(manager.pool(), manager.stations());
        for station in manager.stations() {
            if station.state() != StationState::Audible {
                assert_eq!(station.held_generators(), 0);
            }
        }
        relocated += manager
            .drain_events()
            .iter()
            .filter(|e| matches!(e, SchedulerEvent::StationRelocated { .. }))
            .count();
    }
    assert!(relocated > 0);
    assert!(meter.pulses() > 0);

    manager.end_all();
    assert_eq!(manager.pool().free_count(), MAX_GENERATORS);
    assert!(manager.generator_assignments().iter().all(Option::is_none));
}

#[test]
fn test_stations_released_together_retry_apart() {
    let mut pool = helpers::pool(8);
    let mut dialers: Vec<Station> = (0..4)
        .map(|i| {
            Station::new(StationId(i + 1), SignalKind::Dtmf, 1_000_000.0, 100 + i as u64)
                .with_dial_number("5")
        })
        .collect();
    for dialer in &mut dialers {
        assert!(dialer.begin(&mut pool, 0));
        dialer.update(&mut pool, &Tuning::new(1_000_000));
    }

    let mut now = 0;
    while dialers.iter().any(|d| !d.is_waiting()) {
        for dialer in dialers.iter_mut().filter(|d| !d.is_waiting()) {
            dialer.step(&mut pool, &mut (), now);
        }
        now += 10;
    }

    let mut blockers: Vec<Station> = (0..4)
        .map(|i| Station::new(StationId(10 + i), SignalKind::Busy, 2_000_000.0, i as u64))
        .collect();
    for blocker in &mut blockers {
        assert!(blocker.begin(&mut pool, now));
    }

    let mut retries = Vec::new();
    for dialer in &mut dialers {
        let resume = dialer.resume_at().unwrap();
        dialer.step(&mut pool, &mut (), resume);
        assert!(dialer.is_waiting());
        retries.push(dialer.resume_at().unwrap().wrapping_sub(resume));
    }
    assert!(retries.iter().all(|r| (500..=1500).contains(r)));
    assert!(retries.iter().any(|r| *r != retries[0]), "{:?}", retries);
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_from_json() {
    let json = r#"{
        "seed": 42,
        "stations": [
            { "kind": "MorseCq", "frequency_hz": 7030000.0, "wpm": 18 },
            { "kind": "Dtmf", "frequency_hz": 7035000.0, "number": "18005550199" },
            { "kind": "Exchange", "frequency_hz": 7040000.0 }
        ]
    }"#;
    let config: SimulatorConfig = serde_json::from_str(json).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.generators, MAX_GENERATORS);
    assert_eq!(config.pipeline, PipelineConfig::default());

    let manager =
        StationManager::from_config(&config, VirtualWaveGen::bank("gen", config.generators))
            .unwrap();
    assert_eq!(
        manager.station(StationId(2)).unwrap().dial_number(),
        Some("18005550199")
    );
}

#[test]
fn test_config_rejects_oversized_station() {
    let config = SimulatorConfig {
        generators: 1,
        stations: vec![StationConfig::new(SignalKind::Ringback, 7_000_000.0)],
        ..Default::default()
    };
    let result = StationManager::from_config(&config, VirtualWaveGen::bank("gen", 1));
    assert!(matches!(
        result,
        Err(ConfigError::StationNeedsMoreGenerators { required: 2, available: 1, .. })
    ));
}

// ============================================================================
// Property-Based Tests
// ============================================================================

mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Begin(usize),
        End(usize),
        Advance(u32),
    }

    const KINDS: [SignalKind; 6] = [
        SignalKind::Ringback,
        SignalKind::Dtmf,
        SignalKind::MorseCq,
        SignalKind::Busy,
        SignalKind::Exchange,
        SignalKind::MorseCq,
    ];

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..KINDS.len()).prop_map(Op::Begin),
            (0..KINDS.len()).prop_map(Op::End),
            (1u32..3000).prop_map(Op::Advance),
        ]
    }

    fn signal_kind() -> impl Strategy<Value = SignalKind> {
        prop_oneof![
            Just(SignalKind::Ringback),
            Just(SignalKind::Busy),
            Just(SignalKind::Reorder),
            Just(SignalKind::DialTone),
        ]
    }

    proptest! {
        #[test]
        fn pool_is_conserved(ops in prop::collection::vec(op(), 1..150)) {
            let mut pool = helpers::pool(MAX_GENERATORS);
            let tuning = Tuning::new(1_000_000);
            let mut stations: Vec<Station> = KINDS
                .iter()
                .enumerate()
                .map(|(i, kind)| Station::new(StationId(i as u32 + 1), *kind, 1_000_000.0, i as u64))
                .collect();
            let mut now: Millis = 0;

            for op in ops {
                match op {
                    Op::Begin(i) => {
                        let before = pool.free_count();
                        let ok = stations[i].begin(&mut pool, now);
                        if !ok {
                            prop_assert_eq!(pool.free_count(), before);
                        }
                    }
                    Op::End(i) => stations[i].end(&mut pool),
                    Op::Advance(dt) => {
                        now = now.wrapping_add(dt);
                        for station in stations.iter_mut() {
                            station.update(&mut pool, &tuning);
                            station.step(&mut pool, &mut (), now);
                        }
                    }
                }
                helpers::assert_conserved(&pool, &stations);
            }

            for station in stations.iter_mut() {
                station.end(&mut pool);
            }
            prop_assert_eq!(pool.free_count(), MAX_GENERATORS);
        }

        #[test]
        fn ringback_timing_ignores_step_size(increment in 1u32..1000) {
            let mut ring = TwoToneCadence::new(TwoToneProfile::RINGBACK);
            ring.start(true);
            let events = helpers::transitions(&mut ring, increment, 10_000);

            prop_assert!(events.len() >= 3);
            prop_assert_eq!(events[0], (CadenceEvent::TurnOn, 0));
            prop_assert_eq!(events[1].0, CadenceEvent::TurnOff);
            prop_assert!(events[1].1 >= 2000 && events[1].1 < 2000 + increment);
            prop_assert_eq!(events[2].0, CadenceEvent::TurnOn);
            prop_assert!(events[2].1 >= 6000 && events[2].1 < 6000 + increment);
        }

        #[test]
        fn tone_follows_formula(
            kind in signal_kind(),
            fixed in 500_000_000u64..600_000_000,
            offset in -8000i64..8000,
            sub in 0u8..10,
            bfo in -1000.0f64..1000.0,
        ) {
            let mut pool = helpers::pool(MAX_GENERATORS);
            let fixed_hz = fixed as f64;
            let mut station = Station::new(StationId(1), kind, fixed_hz, 9);
            station.begin(&mut pool, 0);

            let tuning = Tuning {
                frequency: (fixed as i64 + offset) as u64,
                sub_frequency: sub,
                bfo_offset_hz: bfo,
            };
            let enabled = station.update(&mut pool, &tuning);
            let (a, b) = kind.tone_pair().unwrap();
            let expected = (tuning.vfo_hz() - fixed_hz) + bfo + a;

            prop_assert_eq!(station.frequency(), expected);
            prop_assert_eq!(station.frequency2(), (tuning.vfo_hz() - fixed_hz) + bfo + b);
            prop_assert_eq!(enabled, in_audible_window(expected));
            prop_assert_eq!(station.is_enabled(), enabled);
            if !enabled {
                for generator in pool.generators() {
                    prop_assert!(!tele_core::WaveGen::is_active(generator));
                }
            }
        }
    }
}
