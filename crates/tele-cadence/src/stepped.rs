//! Fixed tone sequences such as the exchange intercept error tone

use rand::Rng;
use serde::{Deserialize, Serialize};
use tele_core::Millis;

use crate::event::{Cadence, CadenceEvent, CadenceState};
use crate::timing::TimerCore;

/// One entry of a stepped sequence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneStep {
    /// Audio tone in Hz, `None` for a gap
    pub tone_hz: Option<f64>,
    pub duration_ms: u32,
}

impl ToneStep {
    pub const fn tone(hz: f64, duration_ms: u32) -> Self {
        Self {
            tone_hz: Some(hz),
            duration_ms,
        }
    }

    pub const fn gap(duration_ms: u32) -> Self {
        Self {
            tone_hz: None,
            duration_ms,
        }
    }
}

/// Three rising tones followed by a pause
pub const ERROR_TONE: [ToneStep; 6] = [
    ToneStep::tone(913.8, 380),
    ToneStep::gap(30),
    ToneStep::tone(1428.5, 276),
    ToneStep::gap(30),
    ToneStep::tone(1776.7, 380),
    ToneStep::gap(2000),
];

/// A dead line: nothing but a slow heartbeat of empty cycles
pub const QUIET: [ToneStep; 1] = [ToneStep::gap(10_000)];

/// Cadence timer that walks a fixed list of steps
#[derive(Debug, Clone)]
pub struct SteppedCadence {
    steps: Vec<ToneStep>,
    cursor: usize,
    core: TimerCore,
}

impl SteppedCadence {
    /// Create an idle sequencer
    pub fn new(steps: &[ToneStep]) -> Self {
        Self {
            steps: steps.to_vec(),
            cursor: 0,
            core: TimerCore::new(),
        }
    }

    /// Tone currently sounding, if any
    pub fn current_tone(&self) -> Option<f64> {
        if !self.core.transmitting {
            return None;
        }
        self.steps.get(self.cursor).and_then(|s| s.tone_hz)
    }

    /// The step list
    pub fn steps(&self) -> &[ToneStep] {
        &self.steps
    }

    /// Replace the step list and rewind; the sequencer is left stopped
    pub fn set_steps(&mut self, steps: &[ToneStep]) {
        self.steps = steps.to_vec();
        self.cursor = 0;
        self.core.stop();
    }

    fn enter(&mut self, now: Millis, index: usize) -> CadenceEvent {
        let was_on = self.core.transmitting;
        let previous = self.current_tone();
        let step = self.steps[index];
        self.cursor = index;
        if self.core.next_event.is_none() {
            self.core.arm(now, step.duration_ms);
        } else {
            self.core.advance(now, step.duration_ms);
        }

        match step.tone_hz {
            Some(hz) => {
                self.core.state = CadenceState::ToneA;
                self.core.transmitting = true;
                match previous {
                    None => CadenceEvent::TurnOn,
                    Some(prev) if prev != hz => CadenceEvent::ChangeFreq,
                    Some(_) => CadenceEvent::LeaveOn,
                }
            }
            None => {
                self.core.state = CadenceState::Silence;
                self.core.transmitting = false;
                if was_on {
                    CadenceEvent::TurnOff
                } else {
                    CadenceEvent::LeaveOff
                }
            }
        }
    }
}

impl Cadence for SteppedCadence {
    fn start(&mut self, repeat: bool) {
        self.cursor = 0;
        self.core.start(repeat);
    }

    fn stop(&mut self) {
        self.core.stop();
    }

    fn step<R: Rng>(&mut self, now: Millis, _rng: &mut R) -> CadenceEvent {
        if !self.core.active {
            return CadenceEvent::LeaveOff;
        }

        if self.core.next_event.is_none() {
            if self.steps.is_empty() {
                self.core.complete();
                return CadenceEvent::LeaveOff;
            }
            return self.enter(now, 0);
        }

        if !self.core.due(now) {
            return self.core.hold();
        }

        let next = self.cursor + 1;
        if next < self.steps.len() {
            return self.enter(now, next);
        }

        if self.core.repeat {
            self.core.cycles = self.core.cycles.wrapping_add(1);
            self.enter(now, 0)
        } else {
            let was_on = self.core.transmitting;
            self.core.complete();
            if was_on {
                CadenceEvent::TurnOff
            } else {
                CadenceEvent::LeaveOff
            }
        }
    }

    fn state(&self) -> CadenceState {
        self.core.state
    }

    fn is_active(&self) -> bool {
        self.core.active
    }

    fn is_transmitting(&self) -> bool {
        self.core.transmitting
    }

    fn cycles(&self) -> u32 {
        self.core.cycles
    }

    fn next_event(&self) -> Option<Millis> {
        self.core.next_event
    }
}
