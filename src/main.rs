//! Traffic Way Sim.
//!
//! Lädt ein Level und simuliert eine Runde headless bis Sieg oder Unfall.
//! Aufruf: `traffic-way-sim [level.toml|level.json] [options.toml]`

use std::path::PathBuf;

use anyhow::Context;
use traffic_way_sim::{load_level_with_segments, RoundStatus, SimOptions, Simulation, SimulationEvent};

const DEFAULT_LEVEL: &str = "levels/crossing.toml";

fn main() -> anyhow::Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Traffic Way Sim v{} startet...", env!("CARGO_PKG_VERSION"));

    let mut args = std::env::args().skip(1);
    let level_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LEVEL));
    let options_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(SimOptions::FILE_NAME));

    let options = SimOptions::load_from_file(&options_path);
    let graph = load_level_with_segments(&level_path, options.bezier_segment_count)
        .with_context(|| format!("Level konnte nicht geladen werden: {}", level_path.display()))?;

    let tick = options.tick_seconds;
    if tick <= 0.0 {
        anyhow::bail!("Tick-Länge muss positiv sein, ist {}", tick);
    }

    let mut simulation = Simulation::new(graph, options);
    let mut spawned = 0usize;
    let mut arrived = 0usize;
    let mut last_report = 0u32;

    while simulation.status() == RoundStatus::Running {
        for event in simulation.tick(tick) {
            match event {
                SimulationEvent::Spawned { .. } => spawned += 1,
                SimulationEvent::Destroyed { .. } => arrived += 1,
                SimulationEvent::Collision { .. } | SimulationEvent::RoundWon { .. } => {}
            }
        }

        let second = simulation.elapsed() as u32;
        if second >= last_report + 10 {
            last_report = second;
            log::info!(
                "t={}s: {} Fahrzeuge unterwegs (erlaubt {}), {} angekommen",
                second,
                simulation.car_count(),
                simulation.max_car_count(),
                arrived
            );
        }
    }

    match simulation.status() {
        RoundStatus::Won => log::info!(
            "Ergebnis: gewonnen ({} Fahrzeuge erzeugt, {} angekommen)",
            spawned,
            arrived
        ),
        RoundStatus::Lost => log::info!(
            "Ergebnis: verloren nach {:.1}s ({} Fahrzeuge erzeugt, {} angekommen)",
            simulation.elapsed(),
            spawned,
            arrived
        ),
        RoundStatus::Running => {}
    }

    Ok(())
}
