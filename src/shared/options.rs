//! Zentrale Konfiguration der Verkehrssimulation.
//!
//! `SimOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use traffic_way_engine::constants::{
    BEZIER_SEGMENT_COUNT, MAX_RAYCAST_DISTANCE_IN_FRONT, THRESHOLD_DISTANCE_TO_END,
};

// ── Runde ───────────────────────────────────────────────────────────

/// Rundendauer in Sekunden; danach ist die Runde gewonnen.
pub const ROUND_TIME: f32 = 60.0;
/// Obergrenze, bis zu der die erlaubte Fahrzeuganzahl wächst.
pub const TOP_CAR_COUNT: u32 = 16;
/// Zuwachs der erlaubten Fahrzeuganzahl pro Sekunde.
pub const CAR_COUNT_GROWTH_PER_SECOND: f32 = 0.5;

// ── Spawner ─────────────────────────────────────────────────────────

/// Abklingzeit eines Spawners nach einem Spawn (Sekunden).
pub const SPAWN_COOLDOWN: f32 = 2.0;

// ── Fahrer ──────────────────────────────────────────────────────────

/// Höchstgeschwindigkeit (Einheiten pro Sekunde).
pub const MAX_SPEED: f32 = 10.0;
/// Beschleunigung beim Gasgeben.
pub const GAS_ACCELERATION: f32 = 10.0;
/// Verzögerung beim Bremsen (negativ).
pub const BRAKE_ACCELERATION: f32 = -20.0;
/// Anhalteabstand vor einer nicht-grünen Ampel.
pub const STOP_DISTANCE_LIGHT: f32 = 3.0;
/// Anhalteabstand zu einem vorausfahrenden Fahrzeug.
pub const STOP_DISTANCE_VEHICLE: f32 = 4.0;

// ── Fahrzeuge ───────────────────────────────────────────────────────

/// Fahrzeuglänge für die Ausrichtung in Kurven.
pub const VEHICLE_LENGTH: f32 = 4.0;
/// Abstand, unterhalb dessen sich zwei Fahrzeuge berühren.
pub const COLLISION_RADIUS: f32 = 1.5;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Simulations-Optionen.
/// Die Binary liest standardmäßig [`SimOptions::FILE_NAME`] im Arbeitsverzeichnis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimOptions {
    // ── Runde ───────────────────────────────────────────────────
    /// Rundendauer in Sekunden
    pub round_time: f32,
    /// Obergrenze der erlaubten Fahrzeuganzahl
    pub top_car_count: u32,
    /// Zuwachs der erlaubten Fahrzeuganzahl pro Sekunde
    pub car_count_growth_per_second: f32,
    /// Seed für die Spawner-Auswahl; `None` = zufällig
    pub seed: Option<u64>,
    /// Tick-Länge der Binary in Sekunden
    pub tick_seconds: f32,

    // ── Spawner ─────────────────────────────────────────────────
    /// Abklingzeit nach einem Spawn
    pub spawn_cooldown: f32,

    // ── Fahrer ──────────────────────────────────────────────────
    /// Höchstgeschwindigkeit
    pub max_speed: f32,
    /// Beschleunigung beim Gasgeben
    pub gas_acceleration: f32,
    /// Verzögerung beim Bremsen (negativ)
    pub brake_acceleration: f32,
    /// Anhalteabstand vor nicht-grüner Ampel
    pub stop_distance_light: f32,
    /// Anhalteabstand zum Vordermann
    pub stop_distance_vehicle: f32,

    // ── Fahrzeuge / Wegnetz ────────────────────────────────────
    /// Fahrzeuglänge
    pub vehicle_length: f32,
    /// Kollisionsabstand
    pub collision_radius: f32,
    /// Ankunfts-Schwellwert am Kantenende
    pub arrival_threshold: f32,
    /// Segmentanzahl der Kurven-Polylines
    pub bezier_segment_count: usize,
    /// Reichweite der Hindernis-Abfrage
    pub raycast_distance: f32,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            round_time: ROUND_TIME,
            top_car_count: TOP_CAR_COUNT,
            car_count_growth_per_second: CAR_COUNT_GROWTH_PER_SECOND,
            seed: None,
            tick_seconds: 1.0 / 60.0,

            spawn_cooldown: SPAWN_COOLDOWN,

            max_speed: MAX_SPEED,
            gas_acceleration: GAS_ACCELERATION,
            brake_acceleration: BRAKE_ACCELERATION,
            stop_distance_light: STOP_DISTANCE_LIGHT,
            stop_distance_vehicle: STOP_DISTANCE_VEHICLE,

            vehicle_length: VEHICLE_LENGTH,
            collision_radius: COLLISION_RADIUS,
            arrival_threshold: THRESHOLD_DISTANCE_TO_END,
            bezier_segment_count: BEZIER_SEGMENT_COUNT,
            raycast_distance: MAX_RAYCAST_DISTANCE_IN_FRONT,
        }
    }
}

impl SimOptions {
    /// Dateiname der Optionen im Arbeitsverzeichnis, wenn kein Pfad übergeben wird.
    pub const FILE_NAME: &'static str = "traffic_way_sim.toml";

    /// Liest Optionen aus einer TOML-Datei; fehlende Felder bekommen Standardwerte.
    pub fn read_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Optionen-Datei nicht lesbar: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Optionen-Datei fehlerhaft: {}", path.display()))
    }

    /// Lädt Optionen, fällt bei jedem Fehler auf die Standardwerte zurück.
    pub fn load_from_file(path: &Path) -> Self {
        if !path.exists() {
            log::info!(
                "Keine Optionen unter {}, verwende Standardwerte",
                path.display()
            );
            return Self::default();
        }
        match Self::read_from_file(path) {
            Ok(options) => {
                log::info!("Optionen geladen aus: {}", path.display());
                options
            }
            Err(e) => {
                log::warn!("{:#}; verwende Standardwerte", e);
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self).context("Optionen nicht serialisierbar")?;
        std::fs::write(path, content)
            .with_context(|| format!("Optionen-Datei nicht schreibbar: {}", path.display()))?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Erlaubte Fahrzeuganzahl nach `elapsed` Sekunden (ohne Obergrenze).
    pub fn allowed_car_count(&self, elapsed: f32) -> u32 {
        (elapsed * self.car_count_growth_per_second).max(0.0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let opts: SimOptions = toml::from_str("round_time = 30.0\nseed = 7\n").expect("gültiges TOML");

        assert_eq!(opts.round_time, 30.0);
        assert_eq!(opts.seed, Some(7));
        assert_eq!(opts.top_car_count, TOP_CAR_COUNT);
        assert_eq!(opts.bezier_segment_count, BEZIER_SEGMENT_COUNT);
    }

    #[test]
    fn toml_roundtrip() {
        let opts = SimOptions {
            seed: Some(42),
            max_speed: 12.5,
            ..SimOptions::default()
        };

        let text = toml::to_string_pretty(&opts).expect("serialisierbar");
        let back: SimOptions = toml::from_str(&text).expect("gültiges TOML");
        assert_eq!(back, opts);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let opts = SimOptions::load_from_file(Path::new("/nonexistent/traffic.toml"));
        assert_eq!(opts, SimOptions::default());
        assert!(SimOptions::read_from_file(Path::new("/nonexistent/traffic.toml")).is_err());
    }

    #[test]
    fn save_and_load_again() {
        let path = std::env::temp_dir().join(format!(
            "traffic_way_sim_options_{}.toml",
            std::process::id()
        ));
        let opts = SimOptions {
            round_time: 45.0,
            seed: Some(3),
            ..SimOptions::default()
        };

        opts.save_to_file(&path).expect("Optionen schreibbar");
        let loaded = SimOptions::load_from_file(&path);
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, opts);
    }

    #[test]
    fn broken_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!(
            "traffic_way_sim_broken_{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "round_time = [").expect("Datei schreibbar");

        assert!(SimOptions::read_from_file(&path).is_err());
        assert_eq!(SimOptions::load_from_file(&path), SimOptions::default());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn allowed_car_count_grows_with_time() {
        let opts = SimOptions::default();
        assert_eq!(opts.allowed_car_count(0.0), 0);
        assert_eq!(opts.allowed_car_count(5.0), 2);
        assert_eq!(opts.allowed_car_count(10.0), 5);
    }
}
