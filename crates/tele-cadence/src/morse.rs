//! Morse keying cadence
//!
//! Standard PARIS timing: a dit is `1200 / wpm` ms, a dah three dits, one dit
//! between elements, three between letters and seven between words. A small
//! random "fist" error is applied to every element so no two operators key
//! identically.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tele_core::Millis;

use crate::event::{Cadence, CadenceEvent, CadenceState};
use crate::timing::TimerCore;

/// Keying speed and sloppiness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyingTiming {
    /// Words per minute
    pub wpm: u32,
    /// Maximum per-element timing error in percent
    pub jitter_pct: u8,
}

impl KeyingTiming {
    /// Length of one dit in ms
    pub fn dit_ms(&self) -> u32 {
        1200 / self.wpm.max(1)
    }
}

impl Default for KeyingTiming {
    fn default() -> Self {
        Self {
            wpm: 13,
            jitter_pct: 10,
        }
    }
}

/// Dot/dash pattern for a character, if it has one
pub fn morse_code(c: char) -> Option<&'static str> {
    let code = match c.to_ascii_uppercase() {
        'A' => ".-",
        'B' => "-...",
        'C' => "-.-.",
        'D' => "-..",
        'E' => ".",
        'F' => "..-.",
        'G' => "--.",
        'H' => "....",
        'I' => "..",
        'J' => ".---",
        'K' => "-.-",
        'L' => ".-..",
        'M' => "--",
        'N' => "-.",
        'O' => "---",
        'P' => ".--.",
        'Q' => "--.-",
        'R' => ".-.",
        'S' => "...",
        'T' => "-",
        'U' => "..-",
        'V' => "...-",
        'W' => ".--",
        'X' => "-..-",
        'Y' => "-.--",
        'Z' => "--..",
        '0' => "-----",
        '1' => ".----",
        '2' => "..---",
        '3' => "...--",
        '4' => "....-",
        '5' => ".....",
        '6' => "-....",
        '7' => "--...",
        '8' => "---..",
        '9' => "----.",
        '/' => "-..-.",
        '?' => "..--..",
        '.' => ".-.-.-",
        ',' => "--..--",
        '=' => "-...-",
        _ => return None,
    };
    Some(code)
}

/// One keyed or unkeyed span, in dit units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Element {
    keyed: bool,
    units: u32,
}

fn encode(message: &str) -> Vec<Element> {
    let mut elements = Vec::new();
    for word in message.split_whitespace() {
        let mut word_started = false;
        for c in word.chars() {
            let Some(code) = morse_code(c) else {
                continue;
            };
            if word_started {
                elements.push(Element { keyed: false, units: 3 });
            } else if !elements.is_empty() {
                elements.push(Element { keyed: false, units: 7 });
            }
            word_started = true;
            for (i, symbol) in code.chars().enumerate() {
                if i > 0 {
                    elements.push(Element { keyed: false, units: 1 });
                }
                let units = if symbol == '-' { 3 } else { 1 };
                elements.push(Element { keyed: true, units });
            }
        }
    }
    if !elements.is_empty() {
        elements.push(Element { keyed: false, units: 7 });
    }
    elements
}

/// Cadence timer that keys a message once per start
#[derive(Debug, Clone)]
pub struct MorseCadence {
    timing: KeyingTiming,
    message: String,
    elements: Vec<Element>,
    cursor: usize,
    core: TimerCore,
}

impl MorseCadence {
    /// Create an idle keyer for `message`
    pub fn new(timing: KeyingTiming, message: &str) -> Self {
        Self {
            timing,
            message: message.to_string(),
            elements: encode(message),
            cursor: 0,
            core: TimerCore::new(),
        }
    }

    /// Replace the message; the keyer is left stopped
    pub fn set_message(&mut self, message: &str) {
        self.message = message.to_string();
        self.elements = encode(message);
        self.cursor = 0;
        self.core.stop();
    }

    /// The message being keyed
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Change speed or fist without rebuilding
    pub fn configure(&mut self, timing: KeyingTiming) {
        self.timing = timing;
    }

    /// Current keying timing
    pub fn timing(&self) -> KeyingTiming {
        self.timing
    }

    /// Total length of the message in dit units
    pub fn length_units(&self) -> u32 {
        self.elements.iter().map(|e| e.units).sum()
    }

    fn element_ms<R: Rng>(&self, element: Element, rng: &mut R) -> u32 {
        let base = element.units * self.timing.dit_ms();
        let spread = base * self.timing.jitter_pct.min(50) as u32 / 100;
        if spread == 0 {
            return base;
        }
        rng.random_range(base - spread..=base + spread)
    }

    fn enter<R: Rng>(&mut self, now: Millis, rng: &mut R) -> CadenceEvent {
        let element = self.elements[self.cursor];
        let duration = self.element_ms(element, rng);
        if self.core.next_event.is_none() {
            self.core.arm(now, duration);
        } else {
            self.core.advance(now, duration);
        }
        self.core.transmitting = element.keyed;
        if element.keyed {
            self.core.state = CadenceState::ToneA;
            CadenceEvent::TurnOn
        } else {
            self.core.state = if element.units > 1 {
                CadenceState::InterGap
            } else {
                CadenceState::Silence
            };
            CadenceEvent::TurnOff
        }
    }
}

impl Cadence for MorseCadence {
    fn start(&mut self, repeat: bool) {
        self.cursor = 0;
        self.core.start(repeat);
    }

    fn stop(&mut self) {
        self.core.stop();
    }

    fn step<R: Rng>(&mut self, now: Millis, rng: &mut R) -> CadenceEvent {
        if !self.core.active {
            return CadenceEvent::LeaveOff;
        }

        if self.core.next_event.is_none() {
            if self.elements.is_empty() {
                self.core.complete();
                return CadenceEvent::CycleEnd;
            }
            self.cursor = 0;
            return self.enter(now, rng);
        }

        if !self.core.due(now) {
            return self.core.hold();
        }

        self.cursor += 1;
        if self.cursor >= self.elements.len() {
            self.core.complete();
            return CadenceEvent::CycleEnd;
        }
        self.enter(now, rng)
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
