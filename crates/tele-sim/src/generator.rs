//! Virtual wave generator
//!
//! Tracks both frequency registers and the output select line the way the
//! real part does, and keeps a log of commands for test verification.

use serde::{Deserialize, Serialize};
use tele_core::{Register, WaveGen, SILENT_FREQ};
use tracing::trace;

/// A command received by a virtual generator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WaveGenCommand {
    SetFrequency { register: Register, hz: f64 },
    SetActive(bool),
    Refresh,
}

/// Simulated sine-wave generator
#[derive(Debug, Clone)]
pub struct VirtualWaveGen {
    /// Identifier for logging
    id: String,
    registers: [f64; 2],
    active: bool,
    refreshes: u32,
    /// Commands received (for test verification)
    received_commands: Vec<WaveGenCommand>,
    recording: bool,
}

impl VirtualWaveGen {
    /// Create a generator with both registers parked on the silent frequency
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            registers: [SILENT_FREQ; 2],
            active: false,
            refreshes: 0,
            received_commands: Vec::new(),
            recording: true,
        }
    }

    /// Same generator without a command log, for long unattended runs
    pub fn without_log(mut self) -> Self {
        self.recording = false;
        self.received_commands.clear();
        self
    }

    /// A bank of `count` generators named `<prefix> #<n>`
    pub fn bank(prefix: &str, count: usize) -> Vec<Self> {
        (0..count)
            .map(|n| Self::new(format!("{} #{}", prefix, n)))
            .collect()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Frequency heard at the output, if any
    ///
    /// A selected primary register parked on the silent frequency counts as
    /// quiet.
    pub fn audible_frequency(&self) -> Option<f64> {
        let hz = self.registers[Register::Primary.index()];
        (self.active && hz != SILENT_FREQ).then_some(hz)
    }

    /// Number of refresh requests seen
    pub fn refresh_count(&self) -> u32 {
        self.refreshes
    }

    /// Commands received so far
    pub fn commands(&self) -> &[WaveGenCommand] {
        &self.received_commands
    }

    /// Drain the command log
    pub fn take_commands(&mut self) -> Vec<WaveGenCommand> {
        std::mem::take(&mut self.received_commands)
    }

    fn record(&mut self, command: WaveGenCommand) {
        if self.recording {
            self.received_commands.push(command);
        }
    }
}

impl WaveGen for VirtualWaveGen {
    fn set_frequency(&mut self, hz: f64, register: Register) {
        trace!("{} {:?} <- {:.1} Hz", self.id, register, hz);
        self.registers[register.index()] = hz;
        self.record(WaveGenCommand::SetFrequency { register, hz });
    }

    fn set_active_frequency(&mut self, active: bool) {
        self.active = active;
        self.record(WaveGenCommand::SetActive(active));
    }

    fn force_refresh(&mut self) {
        self.refreshes += 1;
        self.record(WaveGenCommand::Refresh);
    }

    fn frequency(&self, register: Register) -> f64 {
        self.registers[register.index()]
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
