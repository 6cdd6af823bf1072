//! Station manager
//!
//! Decides, tick by tick, which stations hold wave generators. Stations are
//! ranked by distance from the VFO; the closest ones that fit in the pool
//! become audible, the rest in range stay silent. With dynamic pipelining on,
//! stations that fall far behind are parked and moved ahead of the tuning
//! direction so there is always something new to find.

use tele_core::{Millis, SignalMeter, StationId, Tuning, WaveGen, WaveGenPool};
use tele_station::{Station, StationState};
use tracing::{debug, info};

use crate::config::{PipelineConfig, SimulatorConfig};
use crate::error::ConfigError;
use crate::events::SchedulerEvent;
use crate::pipeline::{self, PipelineState};

/// The proximity scheduler
pub struct StationManager<G> {
    pool: WaveGenPool<G>,
    stations: Vec<Station>,
    config: PipelineConfig,
    pipeline: PipelineState,
    event_buffer: Vec<SchedulerEvent>,
}

impl<G: WaveGen> StationManager<G> {
    /// Create a manager over a pool and a station list
    pub fn new(pool: WaveGenPool<G>, stations: Vec<Station>, config: PipelineConfig) -> Self {
        info!(
            "Station manager: {} stations, {} generators, pipelining {}",
            stations.len(),
            pool.capacity(),
            if config.enabled { "on" } else { "off" }
        );
        Self {
            pool,
            stations,
            pipeline: PipelineState::new(config.enabled),
            config,
            event_buffer: Vec::new(),
        }
    }

    /// Build a manager from a validated configuration
    pub fn from_config(config: &SimulatorConfig, generators: Vec<G>) -> Result<Self, ConfigError> {
        config.validate()?;
        if generators.len() != config.generators {
            return Err(ConfigError::GeneratorCountMismatch {
                expected: config.generators,
                actual: generators.len(),
            });
        }
        let mut manager = Self::new(
            WaveGenPool::new(generators),
            config.build_stations(),
            config.pipeline,
        );
        manager.setup_pipeline(config.vfo_start_hz as f64);
        Ok(manager)
    }

    /// Pipelining settings in use
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Tick
    // ------------------------------------------------------------------

    /// Run one scheduling pass
    ///
    /// Every station follows the tuning first, then allocation runs, then
    /// audible stations advance their cadence. A station promoted here
    /// starts on this tick's frequencies, and a tone that keys up this tick
    /// already has them.
    pub fn tick<M: SignalMeter + ?Sized>(&mut self, now: Millis, tuning: &Tuning, meter: &mut M) {
        for station in self.stations.iter_mut() {
            station.update(&mut self.pool, tuning);
        }

        self.update_stations(tuning.vfo_hz(), now);

        for station in self.stations.iter_mut() {
            if station.state() == StationState::Audible {
                station.step(&mut self.pool, meter, now);
            }
        }
    }

    /// Pipeline, allocation and recycling for a VFO reading
    pub fn update_stations(&mut self, vfo: f64, now: Millis) {
        if self.pipeline.enabled {
            self.update_pipeline(vfo, now);
        }
        self.allocate_generators(vfo, now);
        if self.pipeline.enabled {
            self.recycle_dormant_stations(vfo);
        }
    }

    // ------------------------------------------------------------------
    // Allocation
    // ------------------------------------------------------------------

    /// Hand generators to the stations closest to `vfo`
    ///
    /// Ties on distance go to the lower index, so a given VFO trajectory
    /// always yields the same outcome.
    pub fn allocate_generators(&mut self, vfo: f64, now: Millis) {
        let range = self.config.audible_range_hz;

        for station in self.stations.iter_mut() {
            let state = station.state();
            let in_range = station.distance_to(vfo) <= range;
            if in_range || !matches!(state, StationState::Audible | StationState::Silent) {
                continue;
            }
            station.set_station_state(&mut self.pool, StationState::Active);
            if state == StationState::Audible {
                self.event_buffer
                    .push(SchedulerEvent::StationDemoted { id: station.id() });
            }
        }

        let mut candidates: Vec<usize> = (0..self.stations.len())
            .filter(|&i| {
                let station = &self.stations[i];
                station.state() != StationState::Dormant && station.distance_to(vfo) <= range
            })
            .collect();
        candidates.sort_by(|&a, &b| {
            self.stations[a]
                .distance_to(vfo)
                .total_cmp(&self.stations[b].distance_to(vfo))
                .then(a.cmp(&b))
        });

        let capacity = self.pool.capacity();
        let mut budget = capacity;
        let mut winners = Vec::new();
        let mut losers = Vec::new();
        for i in candidates {
            let required = self.stations[i].required_generators();
            if required <= budget {
                budget -= required;
                winners.push(i);
            } else {
                losers.push(i);
            }
        }

        // Closest winner still waiting for generators
        let contender = winners
            .iter()
            .filter(|&&i| self.stations[i].state() != StationState::Audible)
            .map(|&i| self.stations[i].distance_to(vfo))
            .reduce(f64::min);

        for &i in &losers {
            let state = self.stations[i].state();
            let evict = match state {
                StationState::Audible => contender
                    .is_some_and(|distance| self.can_interrupt_station(i, vfo, distance)),
                StationState::Active => true,
                _ => false,
            };
            if evict {
                self.silence_station(i, vfo);
            }
        }

        let mut reserved: usize = self
            .stations
            .iter()
            .filter(|s| s.state() == StationState::Audible)
            .map(|s| s.required_generators())
            .sum();

        for &i in &winners {
            let station = &mut self.stations[i];
            if station.state() == StationState::Audible {
                continue;
            }
            let required = station.required_generators();
            if reserved + required <= capacity && station.begin(&mut self.pool, now) {
                reserved += required;
                station.set_station_state(&mut self.pool, StationState::Audible);
                let distance_hz = station.distance_to(vfo);
                debug!("Station {} promoted at {:.0} Hz", station.id(), distance_hz);
                self.event_buffer.push(SchedulerEvent::StationPromoted {
                    id: station.id(),
                    distance_hz,
                });
            } else if station.state() != StationState::Silent {
                self.silence_station(i, vfo);
            }
        }
    }

    /// Whether an audible station may give up its generators to a contender
    /// `contender_distance` Hz from the VFO
    ///
    /// Only a station farther out than the contender is interrupted, so the
    /// closest station is never evicted. A station between sequences holds
    /// nothing and can always step aside.
    pub fn can_interrupt_station(&self, index: usize, vfo: f64, contender_distance: f64) -> bool {
        let Some(station) = self.stations.get(index) else {
            return false;
        };
        if station.state() != StationState::Audible {
            return false;
        }
        station.held_generators() == 0 || station.distance_to(vfo) > contender_distance
    }

    fn silence_station(&mut self, index: usize, vfo: f64) {
        let station = &mut self.stations[index];
        station.set_station_state(&mut self.pool, StationState::Silent);
        let distance_hz = station.distance_to(vfo);
        debug!("Station {} silenced at {:.0} Hz", station.id(), distance_hz);
        self.event_buffer.push(SchedulerEvent::StationSilenced {
            id: station.id(),
            distance_hz,
        });
    }

    // ------------------------------------------------------------------
    // Pipelining
    // ------------------------------------------------------------------

    /// Centre the pipeline on `vfo`
    pub fn setup_pipeline(&mut self, vfo: f64) {
        self.pipeline.setup(vfo);
        info!("Pipeline centred on {:.1} Hz", vfo);
    }

    /// Turn dynamic pipelining on or off
    pub fn enable_dynamic_pipelining(&mut self, enable: bool) {
        self.pipeline.enabled = enable;
        self.config.enabled = enable;
        info!(
            "Dynamic pipelining {}",
            if enable { "enabled" } else { "disabled" }
        );
    }

    pub fn is_dynamic_pipelining_enabled(&self) -> bool {
        self.pipeline.enabled
    }

    /// Pipelining is on but the VFO is standing still
    pub fn is_pipeline_paused(&self) -> bool {
        self.pipeline.is_paused()
    }

    /// -1 tuning down, 1 tuning up, 0 stopped
    pub fn tuning_direction(&self) -> i8 {
        self.pipeline.direction()
    }

    pub fn pipeline_center_freq(&self) -> f64 {
        self.pipeline.center()
    }

    /// Track tuning and reallocate once the VFO has moved far enough
    pub fn update_pipeline(&mut self, vfo: f64, now: Millis) {
        self.pipeline.detect(vfo, now, &self.config);
        if let Some(direction) = self.pipeline.take_reallocation(vfo, &self.config) {
            self.reallocate_stations(vfo, direction, now);
            self.event_buffer.push(SchedulerEvent::PipelineReallocated {
                center_hz: vfo,
                direction,
            });
        }
    }

    /// Move spare stations onto free spots ahead of the tuning direction
    fn reallocate_stations(&mut self, vfo: f64, direction: i8, now: Millis) {
        let spacing = self.config.station_spacing_hz;
        let mut moved = 0;

        for target in pipeline::targets(vfo, direction, &self.config) {
            let crowded = self.stations.iter().any(|s| {
                s.state() != StationState::Dormant && (s.fixed_frequency() - target).abs() < spacing
            });
            if crowded {
                continue;
            }
            let Some(index) = self.find_relocatable_station(vfo) else {
                break;
            };
            let station = &mut self.stations[index];
            let from_hz = station.fixed_frequency();
            station.reinitialize(&mut self.pool, now, target);
            self.event_buffer.push(SchedulerEvent::StationRelocated {
                id: station.id(),
                from_hz,
                to_hz: target,
            });
            moved += 1;
        }

        info!(
            "Pipeline reallocated around {:.1} Hz heading {}: {} stations moved",
            vfo,
            if direction > 0 { "up" } else { "down" },
            moved
        );
    }

    /// A dormant station, or else the farthest one out of audible range
    fn find_relocatable_station(&self, vfo: f64) -> Option<usize> {
        if let Some(index) = self
            .stations
            .iter()
            .position(|s| s.state() == StationState::Dormant)
        {
            return Some(index);
        }
        self.stations
            .iter()
            .enumerate()
            .filter(|(_, s)| {
                s.state() == StationState::Active
                    && s.distance_to(vfo) > self.config.audible_range_hz
            })
            .max_by(|(_, a), (_, b)| a.distance_to(vfo).total_cmp(&b.distance_to(vfo)))
            .map(|(index, _)| index)
    }

    /// Park stations that have fallen out of the lookahead range
    pub fn recycle_dormant_stations(&mut self, vfo: f64) {
        let lookahead = self.config.lookahead_range_hz;
        for station in self.stations.iter_mut() {
            if station.state() == StationState::Active && station.distance_to(vfo) > lookahead {
                station.set_station_state(&mut self.pool, StationState::Dormant);
                self.event_buffer
                    .push(SchedulerEvent::StationDormant { id: station.id() });
            }
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Stations the scheduler is tracking (anything not dormant)
    pub fn active_station_count(&self) -> usize {
        self.stations
            .iter()
            .filter(|s| s.state() != StationState::Dormant)
            .count()
    }

    pub fn audible_station_count(&self) -> usize {
        self.stations
            .iter()
            .filter(|s| s.state() == StationState::Audible)
            .count()
    }

    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.iter().find(|s| s.id() == id)
    }

    /// Station by position in the configuration
    pub fn station_at(&self, index: usize) -> Option<&Station> {
        self.stations.get(index)
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn pool(&self) -> &WaveGenPool<G> {
        &self.pool
    }

    /// Owner of every generator slot
    pub fn generator_assignments(&self) -> Vec<Option<StationId>> {
        self.pool.assignments()
    }

    /// Re-send register contents on every held generator
    pub fn refresh_generators(&mut self) {
        for station in self.stations.iter_mut() {
            station.force_wave_generator_refresh(&mut self.pool);
        }
    }

    /// Drain all pending events
    pub fn drain_events(&mut self) -> Vec<SchedulerEvent> {
        std::mem::take(&mut self.event_buffer)
    }

    /// Release every generator
    ///
    /// Audible stations drop back to `Active`; the pool is left empty.
    pub fn end_all(&mut self) {
        for station in self.stations.iter_mut() {
            if station.state() == StationState::Audible {
                station.set_station_state(&mut self.pool, StationState::Active);
            }
            station.end(&mut self.pool);
        }
        info!("All stations ended, {} generators free", self.pool.free_count());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tele_sim::VirtualWaveGen;
    use tele_station::SignalKind;

    use crate::config::StationConfig;

    const VFO: u64 = 1_000_000;

    fn manager(stations: Vec<StationConfig>, pipeline: PipelineConfig) -> StationManager<VirtualWaveGen> {
        let config = SimulatorConfig {
            stations,
            pipeline,
            vfo_start_hz: VFO,
            ..Default::default()
        };
        StationManager::from_config(&config, VirtualWaveGen::bank("gen", 4)).unwrap()
    }

    fn static_pipeline() -> PipelineConfig {
        PipelineConfig {
            enabled: false,
            ..Default::default()
        }
    }

    fn state(manager: &StationManager<VirtualWaveGen>, id: u32) -> StationState {
        manager.station(StationId(id)).unwrap().state()
    }

    #[test]
    fn test_generator_count_mismatch() {
        let config = SimulatorConfig::default();
        let result = StationManager::from_config(&config, VirtualWaveGen::bank("gen", 3));
        assert!(matches!(
            result,
            Err(ConfigError::GeneratorCountMismatch { expected: 4, actual: 3 })
        ));
    }

    #[test]
    fn test_closest_stations_win() {
        let mut manager = manager(
            vec![
                StationConfig::new(SignalKind::Busy, 1_000_900.0),
                StationConfig::new(SignalKind::Busy, 1_000_300.0),
                StationConfig::new(SignalKind::Busy, 1_000_600.0),
            ],
            static_pipeline(),
        );
        manager.tick(0, &Tuning::new(VFO), &mut ());

        assert_eq!(state(&manager, 1), StationState::Silent);
        assert_eq!(state(&manager, 2), StationState::Audible);
        assert_eq!(state(&manager, 3), StationState::Audible);
        assert_eq!(manager.pool().busy_count(), 4);
        assert_eq!(manager.audible_station_count(), 2);
    }

    #[test]
    fn test_contender_takes_over() {
        let mut manager = manager(
            vec![
                StationConfig::new(SignalKind::Busy, 1_000_900.0),
                StationConfig::new(SignalKind::Busy, 1_000_300.0),
                StationConfig::new(SignalKind::Busy, 1_000_600.0),
            ],
            static_pipeline(),
        );
        manager.tick(0, &Tuning::new(VFO), &mut ());
        manager.drain_events();

        manager.tick(10, &Tuning::new(1_001_000), &mut ());
        assert_eq!(state(&manager, 1), StationState::Audible);
        assert_eq!(state(&manager, 2), StationState::Silent);
        assert_eq!(state(&manager, 3), StationState::Audible);

        let events = manager.drain_events();
        assert!(events.contains(&SchedulerEvent::StationSilenced {
            id: StationId(2),
            distance_hz: 700.0
        }));
        assert!(events.contains(&SchedulerEvent::StationPromoted {
            id: StationId(1),
            distance_hz: 100.0
        }));
    }

    #[test]
    fn test_out_of_range_drops_to_active() {
        let mut manager = manager(
            vec![StationConfig::new(SignalKind::Ringback, 1_000_000.0)],
            static_pipeline(),
        );
        manager.tick(0, &Tuning::new(VFO), &mut ());
        assert_eq!(state(&manager, 1), StationState::Audible);

        manager.tick(10, &Tuning::new(VFO + 7000), &mut ());
        assert_eq!(state(&manager, 1), StationState::Active);
        assert_eq!(manager.pool().free_count(), 4);
        assert!(manager
            .drain_events()
            .contains(&SchedulerEvent::StationDemoted { id: StationId(1) }));
    }

    #[test]
    fn test_pipeline_moves_parked_station_ahead() {
        let mut manager = manager(
            vec![
                StationConfig::new(SignalKind::Busy, 1_000_000.0),
                StationConfig::new(SignalKind::Busy, 1_050_000.0),
            ],
            PipelineConfig::default(),
        );
        manager.tick(0, &Tuning::new(VFO), &mut ());
        assert_eq!(state(&manager, 1), StationState::Audible);
        assert_eq!(state(&manager, 2), StationState::Dormant);
        assert!(manager.is_pipeline_paused());
        manager.drain_events();

        manager.tick(10, &Tuning::new(VFO + 6000), &mut ());
        assert_eq!(manager.tuning_direction(), 1);
        assert_eq!(manager.pipeline_center_freq(), 1_006_000.0);

        let moved = manager.station(StationId(2)).unwrap();
        assert_eq!(moved.fixed_frequency(), 1_011_000.0);
        assert_eq!(moved.state(), StationState::Audible);
        assert_eq!(state(&manager, 1), StationState::Active);

        let events = manager.drain_events();
        assert!(events.contains(&SchedulerEvent::StationRelocated {
            id: StationId(2),
            from_hz: 1_050_000.0,
            to_hz: 1_011_000.0
        }));
        assert!(events.contains(&SchedulerEvent::PipelineReallocated {
            center_hz: 1_006_000.0,
            direction: 1
        }));
    }

    #[test]
    fn test_disabled_pipeline_never_parks() {
        let mut manager = manager(
            vec![
                StationConfig::new(SignalKind::Busy, 1_000_000.0),
                StationConfig::new(SignalKind::Busy, 1_050_000.0),
            ],
            static_pipeline(),
        );
        manager.tick(0, &Tuning::new(VFO), &mut ());
        assert_eq!(state(&manager, 2), StationState::Active);
        assert_eq!(manager.active_station_count(), 2);
        assert!(!manager.is_pipeline_paused());
    }

    #[test]
    fn test_end_all_empties_pool() {
        let mut manager = manager(
            vec![
                StationConfig::new(SignalKind::Busy, 1_000_000.0),
                StationConfig::new(SignalKind::MorseCq, 1_000_500.0),
            ],
            static_pipeline(),
        );
        manager.tick(0, &Tuning::new(VFO), &mut ());
        assert_eq!(manager.pool().busy_count(), 3);

        manager.end_all();
        assert_eq!(manager.pool().free_count(), 4);
        assert!(manager.generator_assignments().iter().all(Option::is_none));
        assert_eq!(manager.audible_station_count(), 0);
    }

    #[test]
    fn test_refresh_reaches_audible_generators() {
        let mut manager = manager(
            vec![StationConfig::new(SignalKind::Reorder, 1_000_000.0)],
            static_pipeline(),
        );
        manager.tick(0, &Tuning::new(VFO), &mut ());
        manager.refresh_generators();
        let refreshed: u32 = manager
            .pool()
            .generators()
            .map(VirtualWaveGen::refresh_count)
            .sum();
        assert_eq!(refreshed, 2);
    }
}
