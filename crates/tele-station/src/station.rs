//! A simulated station
//!
//! A station turns cadence events into generator commands. It owns one
//! [`Realization`] and only touches the generators that realization holds;
//! everything else goes through the pool.
//!
//! Lifecycle: `begin` acquires every generator or none, `update` follows the
//! receiver, `step` plays the cadence, `end` hands everything back. Whether
//! a station keeps its generators through the quiet part of its cadence is
//! decided by its [`Retention`].

use std::fmt;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tele_cadence::{
    Cadence, CadenceEvent, CadenceTimer, DigitCadence, DigitTiming, KeyingTiming, MorseCadence,
    TwoToneCadence,
};
use tele_core::clock::{after, deadline_reached, elapsed};
use tele_core::{
    in_audible_window, signal_charge, snap_to_step, tone_frequency, Millis, Realization, Register,
    SignalMeter, SlotIndex, StationId, Tuning, WaveGen, WaveGenPool, SILENT_FREQ,
};
use tracing::{debug, info};

use crate::content::{callsign, cq_message, drift_wpm, nanp_number, ExchangeSignal, WPM_RANGE};
use crate::dtmf::dtmf_tones;
use crate::signal::{Retention, SignalKind, MORSE_PITCH_HZ};

/// Largest distance an operator drifts when changing frequency (Hz)
pub const QSY_DRIFT_HZ: f64 = 250.0;

/// Grid relocated stations are aligned to (Hz)
pub const QSY_STEP_HZ: f64 = 100.0;

/// Pause before an operator keys up again after a sequence (ms)
pub const RESTART_DELAY_MS: std::ops::RangeInclusive<u32> = 3000..=5000;

/// Extra wait after a failed attempt to get generators (ms)
pub const RETRY_JITTER_MS: std::ops::RangeInclusive<u32> = 500..=1500;

/// How long an exchange line plays one signal before picking another (ms)
pub const EXCHANGE_ROTATE_MS: u32 = 30_000;

/// Where a station stands with the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StationState {
    /// Parked far from the receiver, available for relocation
    Dormant,
    /// Placed on a frequency but out of audible range
    Active,
    /// In range and holding generators
    Audible,
    /// In range but outranked by closer stations
    Silent,
}

impl fmt::Display for StationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StationState::Dormant => "DORMANT",
            StationState::Active => "ACTIVE",
            StationState::Audible => "AUDIBLE",
            StationState::Silent => "SILENT",
        };
        f.write_str(name)
    }
}

/// Per-kind content
#[derive(Debug, Clone, PartialEq)]
enum Content {
    Tones,
    Dial { number: String, generated: bool },
    Cq { callsign: String, base_wpm: u32 },
    Exchange { signal: ExchangeSignal },
}

/// Offsets of the two tones relative to zero beat; `None` plays silence
#[derive(Debug, Clone, Copy, PartialEq)]
struct ToneOffsets {
    a: Option<f64>,
    b: Option<f64>,
}

/// Snapshot of a station for diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct StationSummary {
    pub id: StationId,
    pub kind: SignalKind,
    pub state: StationState,
    pub fixed_hz: f64,
    pub frequency_hz: f64,
    pub active: bool,
    pub enabled: bool,
    pub generators: Vec<SlotIndex>,
    pub content: String,
}

impl fmt::Display for StationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let gens: Vec<String> = self.generators.iter().map(|g| g.to_string()).collect();
        write!(
            f,
            "#{} {:<7} {:>12.1} Hz {:<7} tone {:>8.1} Hz {}{} gens [{}] {}",
            self.id,
            self.kind.label(),
            self.fixed_hz,
            self.state,
            self.frequency_hz,
            if self.active { "ON " } else { "off" },
            if self.enabled { "" } else { " (out of band)" },
            gens.join(","),
            self.content
        )
    }
}

/// A simulated telephone or radio station
#[derive(Debug, Clone)]
pub struct Station {
    id: StationId,
    kind: SignalKind,
    realization: Realization,
    cadence: CadenceTimer,
    content: Content,
    fixed_freq: f64,
    vfo_freq: f64,
    bfo_offset: f64,
    frequency: f64,
    frequency2: f64,
    active: bool,
    enabled: bool,
    state: StationState,
    resume_at: Option<Millis>,
    rotated_at: Option<Millis>,
    cycles_seen: u32,
    cycles_completed: u32,
    cycles_until_qsy: u32,
    rng: SmallRng,
}

impl Station {
    /// Create an idle station on `fixed_freq`
    ///
    /// `seed` drives every random choice the station makes.
    pub fn new(id: StationId, kind: SignalKind, fixed_freq: f64, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let content = Self::roll_content(kind, &mut rng);
        let cadence = Self::cadence_for(kind, &content);
        let cycles_until_qsy = Self::roll_patience(kind, &mut rng);

        let mut station = Self {
            id,
            kind,
            realization: Realization::new(id, kind.required_generators()),
            cadence,
            content,
            fixed_freq,
            vfo_freq: 0.0,
            bfo_offset: 0.0,
            frequency: SILENT_FREQ,
            frequency2: SILENT_FREQ,
            active: false,
            enabled: false,
            state: StationState::Active,
            resume_at: None,
            rotated_at: None,
            cycles_seen: 0,
            cycles_completed: 0,
            cycles_until_qsy,
            rng,
        };
        station.cycles_seen = station.cadence.cycles();
        station
    }

    /// Dial a fixed number instead of generated ones
    pub fn with_dial_number(mut self, number: &str) -> Self {
        if self.kind == SignalKind::Dtmf {
            self.content = Content::Dial {
                number: number.to_string(),
                generated: false,
            };
            self.load_content();
        }
        self
    }

    /// Key CW at a given speed
    pub fn with_wpm(mut self, wpm: u32) -> Self {
        if let Content::Cq { base_wpm, .. } = &mut self.content {
            *base_wpm = wpm.max(1);
            self.load_content();
        }
        self
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn id(&self) -> StationId {
        self.id
    }

    pub fn kind(&self) -> SignalKind {
        self.kind
    }

    pub fn state(&self) -> StationState {
        self.state
    }

    /// Carrier frequency of the station (Hz)
    pub fn fixed_frequency(&self) -> f64 {
        self.fixed_freq
    }

    /// Audio frequency of the primary tone (Hz)
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Audio frequency of the secondary tone (Hz)
    pub fn frequency2(&self) -> f64 {
        self.frequency2
    }

    /// Whether a tone is keyed
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the tone falls inside the audible window
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the station sits in its between-sequence pause
    pub fn is_waiting(&self) -> bool {
        self.resume_at.is_some()
    }

    /// Time the station will next try to key up, if waiting
    pub fn resume_at(&self) -> Option<Millis> {
        self.resume_at
    }

    pub fn realization(&self) -> &Realization {
        &self.realization
    }

    pub fn cadence(&self) -> &CadenceTimer {
        &self.cadence
    }

    /// Generators needed to play
    pub fn required_generators(&self) -> usize {
        self.realization.realizer_count()
    }

    /// Whether every required generator is held
    pub fn has_all_realizers(&self) -> bool {
        self.realization.has_all_realizers()
    }

    /// Number of generators currently held
    pub fn held_generators(&self) -> usize {
        self.realization.held_count()
    }

    /// Number being dialed, for DTMF stations
    pub fn dial_number(&self) -> Option<&str> {
        match &self.content {
            Content::Dial { number, .. } => Some(number),
            _ => None,
        }
    }

    /// Operator callsign, for CQ stations
    pub fn callsign(&self) -> Option<&str> {
        match &self.content {
            Content::Cq { callsign, .. } => Some(callsign),
            _ => None,
        }
    }

    /// Signal currently played, for exchange lines
    pub fn exchange_signal(&self) -> Option<ExchangeSignal> {
        match &self.content {
            Content::Exchange { signal } => Some(*signal),
            _ => None,
        }
    }

    /// Completed cycles since the last relocation
    pub fn cycles_completed(&self) -> u32 {
        self.cycles_completed
    }

    /// Cycles left before the operator moves
    pub fn cycles_until_qsy(&self) -> u32 {
        self.cycles_until_qsy
    }

    /// Distance between the carrier and a VFO frequency (Hz)
    pub fn distance_to(&self, vfo_hz: f64) -> f64 {
        (self.fixed_freq - vfo_hz).abs()
    }

    pub fn summary(&self) -> StationSummary {
        let content = match &self.content {
            Content::Tones => String::new(),
            Content::Dial { number, .. } => number.clone(),
            Content::Cq { callsign, .. } => {
                let wpm = match &self.cadence {
                    CadenceTimer::Morse(keyer) => keyer.timing().wpm,
                    _ => 0,
                };
                format!("{} {}wpm", callsign, wpm)
            }
            Content::Exchange { signal } => signal.to_string(),
        };
        StationSummary {
            id: self.id,
            kind: self.kind,
            state: self.state,
            fixed_hz: self.fixed_freq,
            frequency_hz: self.frequency,
            active: self.active,
            enabled: self.enabled,
            generators: self.realization.slots().collect(),
            content,
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Acquire generators and start playing
    ///
    /// Returns `false` and changes nothing when the pool cannot supply every
    /// generator. Frequencies are pushed from the last tuning seen by
    /// `update`; a station out of the audible window starts parked.
    pub fn begin<G: WaveGen>(&mut self, pool: &mut WaveGenPool<G>, now: Millis) -> bool {
        if !self.acquire(pool) {
            return false;
        }
        self.active = false;
        self.recompute();
        self.enabled = in_audible_window(self.frequency);
        if self.enabled {
            self.push_frequencies(pool);
        } else {
            self.silence(pool);
        }
        self.cadence.start(true);
        self.resume_at = None;
        if self.kind == SignalKind::Exchange {
            self.rotated_at = Some(now);
        }
        debug!(
            "Station {} ({}) started on {} generators",
            self.id,
            self.kind,
            self.realization.held_count()
        );
        true
    }

    /// Release every generator
    pub fn end<G: WaveGen>(&mut self, pool: &mut WaveGenPool<G>) {
        if self.realization.held_count() > 0 {
            for slot in self.realization.slots() {
                if let Some(generator) = pool.access_realizer(slot) {
                    generator.set_active_frequency(false);
                }
            }
            debug!("Station {} released its generators", self.id);
        }
        self.realization.end(pool);
        self.active = false;
    }

    /// Follow the receiver tuning
    ///
    /// Returns whether the station's tone is inside the audible window.
    /// Outside it the held generators are parked on the silent frequency
    /// but kept.
    pub fn update<G: WaveGen>(&mut self, pool: &mut WaveGenPool<G>, tuning: &Tuning) -> bool {
        self.vfo_freq = tuning.vfo_hz();
        self.bfo_offset = tuning.bfo_offset_hz;
        self.recompute();

        if !in_audible_window(self.frequency) {
            self.silence(pool);
            self.enabled = false;
            return false;
        }

        self.enabled = true;
        if self.realization.has_all_realizers() {
            self.push_frequencies(pool);
            self.realize(pool);
        }
        true
    }

    /// Advance the cadence and apply the resulting event
    ///
    /// Always returns `true`; a station never asks to be removed.
    pub fn step<G: WaveGen, M: SignalMeter + ?Sized>(
        &mut self,
        pool: &mut WaveGenPool<G>,
        meter: &mut M,
        now: Millis,
    ) -> bool {
        if let Some(resume) = self.resume_at {
            if deadline_reached(now, resume) {
                if self.begin(pool, now) {
                    debug!("Station {} back on the air", self.id);
                } else {
                    self.defer(now);
                }
            }
            return true;
        }

        if let Some(since) = self.rotated_at {
            if elapsed(now, since) >= EXCHANGE_ROTATE_MS {
                self.rotate_exchange(pool, now);
            }
        }

        match self.cadence.step(now, &mut self.rng) {
            CadenceEvent::TurnOn => {
                if !self.realization.has_all_realizers() && !self.acquire(pool) {
                    self.cadence.stop();
                    self.defer(now);
                    return true;
                }
                self.active = true;
                self.force_frequency_update(pool);
                self.realize(pool);
                self.pulse(meter);
            }
            CadenceEvent::LeaveOn => self.pulse(meter),
            CadenceEvent::ChangeFreq => {
                self.force_frequency_update(pool);
                self.realize(pool);
                self.pulse(meter);
            }
            CadenceEvent::TurnOff => {
                self.active = false;
                self.realize(pool);
            }
            CadenceEvent::LeaveOff => {}
            CadenceEvent::CycleEnd => {
                self.active = false;
                self.realize(pool);
                if self.kind.retention() == Retention::ReleaseBetweenCycles {
                    self.end(pool);
                }
                let delay = self.rng.random_range(RESTART_DELAY_MS);
                self.resume_at = Some(after(now, delay));
            }
        }

        self.check_relocation(pool, now);
        true
    }

    /// Push the keyed state to every held generator
    ///
    /// All generators switch in the same call so dual tones stay in step.
    pub fn realize<G: WaveGen>(&mut self, pool: &mut WaveGenPool<G>) {
        if !self.enabled || !self.realization.has_all_realizers() {
            return;
        }
        for slot in self.realization.slots() {
            if let Some(generator) = pool.access_realizer(slot) {
                generator.set_active_frequency(self.active);
            }
        }
    }

    /// Recompute and push tone frequencies right away
    pub fn force_frequency_update<G: WaveGen>(&mut self, pool: &mut WaveGenPool<G>) {
        if !self.enabled || !self.realization.has_all_realizers() {
            return;
        }
        self.recompute();
        self.push_frequencies(pool);
    }

    /// Re-send register contents of every held generator
    pub fn force_wave_generator_refresh<G: WaveGen>(&mut self, pool: &mut WaveGenPool<G>) {
        for slot in self.realization.slots() {
            if let Some(generator) = pool.access_realizer(slot) {
                generator.force_refresh();
            }
        }
    }

    /// Move to a scheduler state
    ///
    /// Leaving `Audible` releases every generator and stops the cadence.
    pub fn set_station_state<G: WaveGen>(
        &mut self,
        pool: &mut WaveGenPool<G>,
        state: StationState,
    ) {
        if self.state == state {
            return;
        }
        if self.state == StationState::Audible {
            self.end(pool);
            self.cadence.stop();
            self.resume_at = None;
        }
        debug!("Station {} {} -> {}", self.id, self.state, state);
        self.state = state;
    }

    /// Start over as a different operator on `frequency`
    ///
    /// The station gives back its generators and waits in `Active` until the
    /// scheduler lets it play again.
    pub fn reinitialize<G: WaveGen>(
        &mut self,
        pool: &mut WaveGenPool<G>,
        now: Millis,
        frequency: f64,
    ) {
        self.end(pool);
        self.cadence.stop();
        let from = self.fixed_freq;
        self.fixed_freq = frequency;
        self.randomize();
        self.resume_at = None;
        self.rotated_at = None;
        self.enabled = false;
        self.state = StationState::Active;
        info!(
            "Station {} ({}) reinitialized {:.1} -> {:.1} Hz at {}ms",
            self.id, self.kind, from, frequency, now
        );
    }

    /// Re-roll content and patience as if a new operator took over
    pub fn randomize(&mut self) {
        match &mut self.content {
            Content::Dial { number, generated } if *generated => {
                *number = nanp_number(&mut self.rng);
            }
            Content::Cq { callsign: call, base_wpm } => {
                *call = callsign(&mut self.rng);
                *base_wpm = self.rng.random_range(WPM_RANGE);
            }
            Content::Exchange { signal } => {
                *signal = ExchangeSignal::pick(&mut self.rng);
            }
            _ => {}
        }
        self.load_content();
        self.cycles_seen = self.cadence.cycles();
        self.cycles_completed = 0;
        self.cycles_until_qsy = Self::roll_patience(self.kind, &mut self.rng);
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn acquire<G: WaveGen>(&mut self, pool: &mut WaveGenPool<G>) -> bool {
        if !self.realization.begin(pool) {
            return false;
        }
        for slot in self.realization.slots() {
            if let Some(generator) = pool.access_realizer(slot) {
                generator.set_frequency(SILENT_FREQ, Register::Secondary);
                generator.set_active_frequency(false);
            }
        }
        true
    }

    fn defer(&mut self, now: Millis) {
        let jitter = self.rng.random_range(RETRY_JITTER_MS);
        self.resume_at = Some(after(now, jitter));
        debug!("Station {} retrying in {}ms", self.id, jitter);
    }

    fn offsets(&self) -> ToneOffsets {
        let pair = |(a, b): (f64, f64)| ToneOffsets {
            a: Some(a),
            b: Some(b),
        };
        match (&self.content, self.kind) {
            (Content::Tones, kind) => kind.tone_pair().map(pair).unwrap_or(ToneOffsets {
                a: None,
                b: None,
            }),
            (Content::Dial { .. }, _) => self
                .cadence
                .current_digit()
                .and_then(dtmf_tones)
                .map(pair)
                .unwrap_or(ToneOffsets { a: None, b: None }),
            (Content::Cq { .. }, _) => ToneOffsets {
                a: Some(MORSE_PITCH_HZ),
                b: None,
            },
            (Content::Exchange { signal }, _) => match signal.tone_pair() {
                Some(tones) => pair(tones),
                None => ToneOffsets {
                    a: self.cadence.current_tone(),
                    b: None,
                },
            },
        }
    }

    /// Recompute audio frequencies from the stored tuning
    fn recompute(&mut self) {
        let offsets = self.offsets();
        let audio = |offset: Option<f64>| match offset {
            Some(o) => tone_frequency(self.vfo_freq, self.fixed_freq, self.bfo_offset, o),
            None => SILENT_FREQ,
        };
        // Bounds are judged on the primary tone; a silent primary is judged
        // by where its carrier sits.
        self.frequency = match offsets.a {
            Some(_) => audio(offsets.a),
            None => tone_frequency(self.vfo_freq, self.fixed_freq, self.bfo_offset, 0.0),
        };
        self.frequency2 = audio(offsets.b);
    }

    fn push_frequencies<G: WaveGen>(&mut self, pool: &mut WaveGenPool<G>) {
        let offsets = self.offsets();
        let primary = if offsets.a.is_some() {
            self.frequency
        } else {
            SILENT_FREQ
        };
        let tones = [primary, self.frequency2];
        for (slot, hz) in self.realization.slots().zip(tones) {
            if let Some(generator) = pool.access_realizer(slot) {
                generator.set_frequency(hz, Register::Primary);
            }
        }
    }

    fn silence<G: WaveGen>(&mut self, pool: &mut WaveGenPool<G>) {
        for slot in self.realization.slots() {
            if let Some(generator) = pool.access_realizer(slot) {
                generator.set_frequency(SILENT_FREQ, Register::Primary);
                generator.set_frequency(SILENT_FREQ, Register::Secondary);
                generator.set_active_frequency(false);
            }
        }
    }

    fn pulse<M: SignalMeter + ?Sized>(&self, meter: &mut M) {
        let charge = signal_charge(self.fixed_freq, self.vfo_freq);
        if charge != 0 {
            meter.add_charge(charge);
        }
    }

    fn check_relocation<G: WaveGen>(&mut self, pool: &mut WaveGenPool<G>, now: Millis) {
        let cycles = self.cadence.cycles();
        if cycles == self.cycles_seen {
            return;
        }
        self.cycles_completed += cycles.wrapping_sub(self.cycles_seen);
        self.cycles_seen = cycles;

        if self.kind.patience().is_none() || self.cycles_completed < self.cycles_until_qsy {
            return;
        }
        self.qsy(pool, now);
    }

    /// The operator gives up and moves a little
    fn qsy<G: WaveGen>(&mut self, pool: &mut WaveGenPool<G>, now: Millis) {
        let from = self.fixed_freq;
        // An operator the listener is tuned straight onto stays put
        if self.vfo_freq != self.fixed_freq {
            let drift = self.rng.random_range(0..=(2.0 * QSY_DRIFT_HZ * 100.0) as u32) as f64
                / 100.0
                - QSY_DRIFT_HZ;
            self.fixed_freq = snap_to_step(self.fixed_freq + drift, QSY_STEP_HZ);
        }

        match &mut self.content {
            Content::Dial { number, generated } if *generated => {
                *number = nanp_number(&mut self.rng);
            }
            Content::Cq { callsign: call, base_wpm } => {
                *call = callsign(&mut self.rng);
                *base_wpm = drift_wpm(&mut self.rng, *base_wpm);
            }
            _ => {}
        }
        self.cycles_completed = 0;
        self.cycles_until_qsy = Self::roll_patience(self.kind, &mut self.rng);

        match self.kind.retention() {
            Retention::ReleaseBetweenCycles => {
                self.end(pool);
                self.load_content();
                self.cycles_seen = self.cadence.cycles();
                let delay = self.rng.random_range(RESTART_DELAY_MS);
                self.resume_at = Some(after(now, delay));
            }
            Retention::KeepThroughSilence => {
                self.force_frequency_update(pool);
            }
        }

        info!(
            "Station {} ({}) QSY {:.1} -> {:.1} Hz",
            self.id, self.kind, from, self.fixed_freq
        );
    }

    fn rotate_exchange<G: WaveGen>(&mut self, pool: &mut WaveGenPool<G>, now: Millis) {
        if self.kind != SignalKind::Exchange {
            return;
        }
        let picked = ExchangeSignal::pick(&mut self.rng);
        self.play_exchange(pool, picked, now);
    }

    /// Switch an exchange line to `signal`, keeping its generators
    fn play_exchange<G: WaveGen>(
        &mut self,
        pool: &mut WaveGenPool<G>,
        signal: ExchangeSignal,
        now: Millis,
    ) {
        let Content::Exchange { signal: playing } = &mut self.content else {
            return;
        };
        *playing = signal;
        self.load_content();
        self.cycles_seen = self.cadence.cycles();
        self.cadence.start(true);
        self.active = false;
        self.realize(pool);
        self.rotated_at = Some(now);
        debug!("Exchange {} now playing {}", self.id, signal);
    }

    /// Load the current content into the cadence timer in place
    ///
    /// The timer is left stopped.
    fn load_content(&mut self) {
        match (&self.content, &mut self.cadence) {
            (Content::Dial { number, .. }, CadenceTimer::Digits(dialer)) => {
                dialer.set_sequence(number);
            }
            (Content::Cq { callsign, base_wpm }, CadenceTimer::Morse(keyer)) => {
                keyer.configure(KeyingTiming {
                    wpm: *base_wpm,
                    ..keyer.timing()
                });
                keyer.set_message(&cq_message(callsign));
            }
            (Content::Exchange { signal }, timer) => signal.retarget(timer),
            (Content::Tones, timer) => timer.stop(),
            (content, timer) => *timer = Self::cadence_for(self.kind, content),
        }
    }

    fn roll_content(kind: SignalKind, rng: &mut SmallRng) -> Content {
        match kind {
            SignalKind::Dtmf => Content::Dial {
                number: nanp_number(rng),
                generated: true,
            },
            SignalKind::MorseCq => Content::Cq {
                callsign: callsign(rng),
                base_wpm: KeyingTiming::default().wpm,
            },
            SignalKind::Exchange => Content::Exchange {
                signal: ExchangeSignal::pick(rng),
            },
            _ => Content::Tones,
        }
    }

    fn roll_patience(kind: SignalKind, rng: &mut SmallRng) -> u32 {
        kind.patience()
            .map(|range| rng.random_range(range))
            .unwrap_or(u32::MAX)
    }

    fn cadence_for(kind: SignalKind, content: &Content) -> CadenceTimer {
        match content {
            Content::Dial { number, .. } => DigitCadence::new(DigitTiming::default(), number).into(),
            Content::Cq { callsign, base_wpm } => MorseCadence::new(
                KeyingTiming {
                    wpm: *base_wpm,
                    ..KeyingTiming::default()
                },
                &cq_message(callsign),
            )
            .into(),
            Content::Exchange { signal } => signal.cadence(),
            Content::Tones => {
                TwoToneCadence::new(kind.profile().unwrap_or_default()).into()
            }
        }
    }
}
