//! Level-Dateien (TOML oder JSON) laden und speichern.

use std::path::Path;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use traffic_way_engine::constants::BEZIER_SEGMENT_COUNT;
use traffic_way_engine::{TrafficLightDef, WayGraph, WayGraphDefinition, WayPointDef};

/// Dateiformat einer Level-Datei.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelFormat {
    Toml,
    Json,
}

impl LevelFormat {
    /// Ermittelt das Format anhand der Dateiendung.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            _ => bail!(
                "Unbekanntes Level-Format: {} (erwartet .toml oder .json)",
                path.display()
            ),
        }
    }
}

/// Persistierte Form eines Levels.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelFile {
    /// Anzeigename
    pub name: String,
    /// Ampeln
    pub lights: Vec<TrafficLightDef>,
    /// Way-Points
    pub way_points: Vec<WayPointDef>,
}

impl LevelFile {
    /// Wandelt das Level in Autorendaten um.
    ///
    /// Way-Points ohne Kurvendaten erhalten abgeleitete Standard-Tangenten.
    pub fn into_definition(self) -> WayGraphDefinition {
        let mut definition = WayGraphDefinition {
            lights: self.lights,
            points: self.way_points,
        };
        let derived = definition.derive_missing_curves();
        if derived > 0 {
            log::debug!("{} Way-Points mit abgeleiteten Kurvendaten", derived);
        }
        definition
    }

    /// Baut das Wegnetz mit `segment_count` Kurvensegmenten.
    pub fn build(self, segment_count: usize) -> anyhow::Result<WayGraph> {
        let name = self.name.clone();
        let definition = self.into_definition();
        WayGraph::build_with_segments(&definition, segment_count)
            .with_context(|| format!("Level '{}' ist ungültig", name))
    }
}

/// Parst den Inhalt einer Level-Datei.
pub fn parse_level(content: &str, format: LevelFormat) -> anyhow::Result<LevelFile> {
    let level = match format {
        LevelFormat::Toml => toml::from_str(content).context("Level-TOML fehlerhaft")?,
        LevelFormat::Json => serde_json::from_str(content).context("Level-JSON fehlerhaft")?,
    };
    Ok(level)
}

/// Serialisiert ein Level im gewünschten Format.
pub fn write_level(level: &LevelFile, format: LevelFormat) -> anyhow::Result<String> {
    let content = match format {
        LevelFormat::Toml => toml::to_string_pretty(level)?,
        LevelFormat::Json => serde_json::to_string_pretty(level)?,
    };
    Ok(content)
}

/// Liest eine Level-Datei; das Format folgt aus der Endung.
pub fn read_level_file(path: &Path) -> anyhow::Result<LevelFile> {
    let format = LevelFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Level-Datei nicht lesbar: {}", path.display()))?;
    parse_level(&content, format).with_context(|| format!("Level-Datei: {}", path.display()))
}

/// Lädt ein Level und baut das Wegnetz mit Standard-Segmentanzahl.
pub fn load_level(path: &Path) -> anyhow::Result<WayGraph> {
    load_level_with_segments(path, BEZIER_SEGMENT_COUNT)
}

/// Lädt ein Level und baut das Wegnetz mit `segment_count` Kurvensegmenten.
pub fn load_level_with_segments(path: &Path, segment_count: usize) -> anyhow::Result<WayGraph> {
    let level = read_level_file(path)?;
    log::info!(
        "Level '{}' geladen: {} Way-Points, {} Ampeln",
        level.name,
        level.way_points.len(),
        level.lights.len()
    );
    level.build(segment_count)
}
