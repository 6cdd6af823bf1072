//! Telephony Simulator Console
//!
//! Runs the station manager headless against virtual wave generators,
//! sweeping the VFO along a configured trajectory and logging what the
//! operator would hear.

mod settings;
mod sweep;

use std::time::Duration;

use anyhow::{Context, Result};
use settings::Settings;
use sweep::Sweep;
use tele_core::Millis;
use tele_sched::{SchedulerEvent, StationManager};
use tele_sim::{VirtualSignalMeter, VirtualWaveGen};
use tele_station::StationState;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "telesim=info,tele_core=info,tele_cadence=info,tele_station=info,tele_sched=info,tele_sim=info"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::load();

    if std::env::args().any(|arg| arg == "--write-config") {
        settings.save().map_err(anyhow::Error::msg)?;
        if let Some(path) = Settings::settings_path() {
            info!("Wrote settings to {}", path.display());
        }
        return Ok(());
    }

    tracing::info!("Starting telesim telephony simulator");
    run(settings).await
}

async fn run(settings: Settings) -> Result<()> {
    let config = &settings.simulator;
    let generators: Vec<VirtualWaveGen> = VirtualWaveGen::bank("AD9833", config.generators)
        .into_iter()
        .map(VirtualWaveGen::without_log)
        .collect();
    let mut manager = StationManager::from_config(config, generators)
        .context("Invalid simulator configuration")?;
    let mut meter = VirtualSignalMeter::new();
    let sweep = Sweep::new(settings.sweep, config.vfo_start_hz);

    info!(
        "{} stations on {} generators, VFO {} Hz",
        manager.stations().len(),
        manager.pool().capacity(),
        config.vfo_start_hz
    );

    let mut ticker = interval(Duration::from_millis(settings.tick_ms.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let started = Instant::now();
    let mut next_summary = 0u64;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let elapsed_ms = started.elapsed().as_millis() as u64;
                // Millis wraps; truncation keeps the low 32 bits
                let now = elapsed_ms as Millis;
                let tuning = sweep.tuning_at(elapsed_ms, config.bfo_offset_hz);

                manager.tick(now, &tuning, &mut meter);
                meter.decay(settings.meter_decay);

                for event in manager.drain_events() {
                    log_event(&event);
                }

                if elapsed_ms >= next_summary {
                    log_summary(&manager, &meter, tuning.vfo_hz());
                    next_summary = elapsed_ms + settings.summary_interval_ms.max(1);
                }

                if settings.run_for_ms.is_some_and(|limit| elapsed_ms >= limit) {
                    info!("Run time elapsed");
                    break;
                }
            }
            result = &mut shutdown => {
                result.context("Failed to listen for Ctrl-C")?;
                info!("Interrupted");
                break;
            }
        }
    }

    manager.end_all();
    info!(
        "Stopped: {} signal pulses, {} locked, peak level {}",
        meter.pulses(),
        meter.locked_pulses(),
        meter.peak()
    );
    Ok(())
}

fn log_event(event: &SchedulerEvent) {
    match event {
        SchedulerEvent::StationPromoted { id, distance_hz } => {
            info!("Station {} audible at {:.1} Hz", id, distance_hz)
        }
        SchedulerEvent::StationRelocated { id, from_hz, to_hz } => {
            info!("Station {} moved {:.0} -> {:.0} Hz", id, from_hz, to_hz)
        }
        other => debug!(?other, "scheduler"),
    }
}

fn log_summary(manager: &StationManager<VirtualWaveGen>, meter: &VirtualSignalMeter, vfo: f64) {
    info!(
        "VFO {:.1} Hz: {} active, {} audible, meter {}",
        vfo,
        manager.active_station_count(),
        manager.audible_station_count(),
        meter.level()
    );
    for station in manager.stations() {
        if station.state() != StationState::Dormant {
            info!("  {}", station.summary());
        }
    }
    for (generator, owner) in manager.pool().generators().zip(manager.generator_assignments()) {
        match (owner, generator.audible_frequency()) {
            (Some(owner), Some(hz)) => {
                debug!("  {} -> station {} at {:.1} Hz", generator.id(), owner, hz)
            }
            (Some(owner), None) => debug!("  {} -> station {} (quiet)", generator.id(), owner),
            (None, _) => debug!("  {} free", generator.id()),
        }
    }
}
