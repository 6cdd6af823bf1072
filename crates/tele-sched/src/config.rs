//! Simulator configuration
//!
//! The station list is the single source of truth: the manager derives its
//! station count from it, so there is nothing to keep in step by hand.

use serde::{Deserialize, Serialize};
use tele_core::{StationId, MAX_GENERATORS};
use tele_station::{SignalKind, Station};

use crate::error::ConfigError;

/// Dynamic pipelining settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Move stations ahead of the tuning direction
    pub enabled: bool,
    /// How far ahead of and behind the VFO stations are tracked (Hz)
    pub lookahead_range_hz: f64,
    /// Minimum distance between relocated stations (Hz)
    pub station_spacing_hz: f64,
    /// Distance within which a station may hold generators (Hz)
    pub audible_range_hz: f64,
    /// VFO travel that triggers a reallocation (Hz)
    pub realloc_threshold_hz: f64,
    /// Smallest VFO change counted as tuning (Hz)
    pub tune_detect_threshold_hz: f64,
    /// VFO tuning step; relocated stations land on it (Hz)
    pub tuning_step_hz: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            lookahead_range_hz: 8000.0,
            station_spacing_hz: 5000.0,
            audible_range_hz: 5000.0,
            realloc_threshold_hz: 6000.0,
            tune_detect_threshold_hz: 100.0,
            tuning_step_hz: 100.0,
        }
    }
}

/// One configured station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationConfig {
    pub kind: SignalKind,
    /// Carrier frequency (Hz)
    pub frequency_hz: f64,
    /// Keying speed for CW stations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wpm: Option<u32>,
    /// Fixed number for DTMF stations instead of generated ones
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
}

impl StationConfig {
    pub fn new(kind: SignalKind, frequency_hz: f64) -> Self {
        Self {
            kind,
            frequency_hz,
            wpm: None,
            number: None,
        }
    }

    pub fn with_wpm(mut self, wpm: u32) -> Self {
        self.wpm = Some(wpm);
        self
    }

    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }
}

/// Complete simulator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Seed every station's randomness is derived from
    pub seed: u64,
    /// Wave generators fitted
    pub generators: usize,
    /// BFO offset applied to every tone (Hz)
    pub bfo_offset_hz: f64,
    /// VFO frequency at power-up (Hz)
    pub vfo_start_hz: u64,
    pub pipeline: PipelineConfig,
    pub stations: Vec<StationConfig>,
}

impl Default for SimulatorConfig {
    /// Ten call-progress and DTMF stations around 555.1234 MHz
    fn default() -> Self {
        use SignalKind::*;
        let stations = [
            (Ringback, 555_123_400.0),
            (Dtmf, 555_130_000.0),
            (DialTone, 555_200_000.0),
            (DialTone, 555_250_000.0),
            (Ringback, 555_300_000.0),
            (Ringback, 555_350_000.0),
            (Dtmf, 555_400_000.0),
            (Busy, 555_450_000.0),
            (Reorder, 555_500_000.0),
            (Reorder, 555_550_000.0),
        ]
        .into_iter()
        .map(|(kind, hz)| StationConfig::new(kind, hz))
        .collect();

        Self {
            seed: 0x5555_1234,
            generators: MAX_GENERATORS,
            bfo_offset_hz: 0.0,
            vfo_start_hz: 555_123_400,
            pipeline: PipelineConfig::default(),
            stations,
        }
    }
}

impl SimulatorConfig {
    /// Reject configurations the simulator could never play
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stations.is_empty() {
            return Err(ConfigError::NoStations);
        }
        if self.generators == 0 {
            return Err(ConfigError::NoGenerators);
        }
        for (index, station) in self.stations.iter().enumerate() {
            if !station.frequency_hz.is_finite() || station.frequency_hz <= 0.0 {
                return Err(ConfigError::InvalidFrequency {
                    index,
                    hz: station.frequency_hz,
                });
            }
            let required = station.kind.required_generators();
            if required > self.generators {
                return Err(ConfigError::StationNeedsMoreGenerators {
                    index,
                    kind: station.kind,
                    required,
                    available: self.generators,
                });
            }
            if station.wpm == Some(0) {
                return Err(ConfigError::ZeroWpm { index });
            }
        }
        Ok(())
    }

    /// Seed for the station at `index`
    pub fn station_seed(&self, index: usize) -> u64 {
        self.seed
            .wrapping_add(index as u64)
            .wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }

    /// Build the configured stations, ids counting from 1
    pub fn build_stations(&self) -> Vec<Station> {
        self.stations
            .iter()
            .enumerate()
            .map(|(index, cfg)| {
                let id = StationId(index as u32 + 1);
                let mut station =
                    Station::new(id, cfg.kind, cfg.frequency_hz, self.station_seed(index));
                if let Some(number) = &cfg.number {
                    station = station.with_dial_number(number);
                }
                if let Some(wpm) = cfg.wpm {
                    station = station.with_wpm(wpm);
                }
                station
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SimulatorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.stations.len(), 10);
        assert_eq!(config.generators, 4);
        assert_eq!(config.pipeline.lookahead_range_hz, 8000.0);
    }

    #[test]
    fn test_validation_errors() {
        let empty = SimulatorConfig {
            stations: Vec::new(),
            ..Default::default()
        };
        assert_eq!(empty.validate(), Err(ConfigError::NoStations));

        let no_gens = SimulatorConfig {
            generators: 0,
            ..Default::default()
        };
        assert_eq!(no_gens.validate(), Err(ConfigError::NoGenerators));

        let one_gen = SimulatorConfig {
            generators: 1,
            ..Default::default()
        };
        assert!(matches!(
            one_gen.validate(),
            Err(ConfigError::StationNeedsMoreGenerators { index: 0, required: 2, .. })
        ));

        let slow = SimulatorConfig {
            stations: vec![StationConfig::new(SignalKind::MorseCq, 7_030_000.0).with_wpm(0)],
            ..Default::default()
        };
        assert_eq!(slow.validate(), Err(ConfigError::ZeroWpm { index: 0 }));

        let nan = SimulatorConfig {
            stations: vec![StationConfig::new(SignalKind::Busy, f64::NAN)],
            ..Default::default()
        };
        assert!(matches!(
            nan.validate(),
            Err(ConfigError::InvalidFrequency { index: 0, .. })
        ));
    }

    #[test]
    fn test_build_applies_overrides() {
        let config = SimulatorConfig {
            stations: vec![
                StationConfig::new(SignalKind::Dtmf, 1_000_000.0).with_number("5551212"),
                StationConfig::new(SignalKind::MorseCq, 1_010_000.0).with_wpm(18),
            ],
            ..Default::default()
        };
        let stations = config.build_stations();
        assert_eq!(stations[0].id(), StationId(1));
        assert_eq!(stations[0].dial_number(), Some("5551212"));
        assert_eq!(stations[1].id(), StationId(2));
        assert!(stations[1].summary().content.ends_with("18wpm"));
    }

    #[test]
    fn test_station_seeds_differ() {
        let config = SimulatorConfig::default();
        assert_ne!(config.station_seed(0), config.station_seed(1));
    }
}
