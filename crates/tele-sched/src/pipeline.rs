//! Tuning tracker behind dynamic pipelining
//!
//! Watches the VFO, works out which way the operator is tuning and decides
//! when enough ground has been covered to place fresh stations ahead.

use tele_core::{snap_to_step, Millis};

use crate::config::PipelineConfig;

/// Pipelining state carried between ticks
#[derive(Debug, Clone)]
pub struct PipelineState {
    pub(crate) enabled: bool,
    last_vfo: f64,
    center: f64,
    direction: i8,
    last_tuning_time: Option<Millis>,
}

impl PipelineState {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            last_vfo: 0.0,
            center: 0.0,
            direction: 0,
            last_tuning_time: None,
        }
    }

    /// Centre the pipeline on `vfo` with no tuning detected
    pub fn setup(&mut self, vfo: f64) {
        self.last_vfo = vfo;
        self.center = vfo;
        self.direction = 0;
        self.last_tuning_time = None;
    }

    /// -1 tuning down, 1 tuning up, 0 stopped
    pub fn direction(&self) -> i8 {
        self.direction
    }

    pub fn center(&self) -> f64 {
        self.center
    }

    /// Time of the last detected VFO movement
    pub fn last_tuning_time(&self) -> Option<Millis> {
        self.last_tuning_time
    }

    /// Whether pipelining is on but the operator has stopped tuning
    pub fn is_paused(&self) -> bool {
        self.enabled && self.direction == 0
    }

    /// Update the tuning direction from a new VFO reading
    ///
    /// Movements smaller than the detect threshold are accumulated against
    /// the last reading that did count.
    pub fn detect(&mut self, vfo: f64, now: Millis, config: &PipelineConfig) -> i8 {
        let delta = vfo - self.last_vfo;
        if delta.abs() >= config.tune_detect_threshold_hz {
            self.direction = if delta > 0.0 { 1 } else { -1 };
            self.last_vfo = vfo;
            self.last_tuning_time = Some(now);
        } else {
            self.direction = 0;
        }
        self.direction
    }

    /// Direction to reallocate towards, once the VFO has travelled far
    /// enough from the centre
    ///
    /// Re-centres the pipeline when it fires.
    pub fn take_reallocation(&mut self, vfo: f64, config: &PipelineConfig) -> Option<i8> {
        let travel = vfo - self.center;
        if travel.abs() < config.realloc_threshold_hz {
            return None;
        }
        let direction = match self.direction {
            0 if travel > 0.0 => 1,
            0 => -1,
            d => d,
        };
        self.center = vfo;
        Some(direction)
    }
}

/// Carrier frequencies to place stations on ahead of the VFO
pub fn targets(vfo: f64, direction: i8, config: &PipelineConfig) -> Vec<f64> {
    if direction == 0 || config.station_spacing_hz <= 0.0 {
        return Vec::new();
    }
    let mut targets = Vec::new();
    let mut offset = config.station_spacing_hz;
    while offset <= config.lookahead_range_hz {
        let target = vfo + f64::from(direction) * offset;
        targets.push(snap_to_step(target, config.tuning_step_hz));
        offset += config.station_spacing_hz;
    }
    targets
}
