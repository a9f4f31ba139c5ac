//! Das Wegnetz: Way-Points, gerichtete Kanten, Kurven-Polylines und Ampeln.
//!
//! Nach dem Build sind Kanten und Polylines unveränderlich; nur die Ampeln
//! schalten zur Laufzeit. Mehrere Cursor dürfen das Netz gleichzeitig lesen.

mod build;

use std::collections::HashMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::{
    CurvePath, LightId, LightType, NodeKind, TrafficLight, TrafficLightDef, WayPoint, WayPointDef,
    WayPointId, WaySelector,
};

/// Vollständige Autorendaten eines Levels.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WayGraphDefinition {
    /// Alle Ampeln
    #[serde(default)]
    pub lights: Vec<TrafficLightDef>,
    /// Alle Way-Points
    #[serde(default)]
    pub points: Vec<WayPointDef>,
}

/// Geometrie einer Kante (ohne Polyline).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeKind {
    /// Gerade Strecke zwischen den Way-Points
    Straight,
    /// Kubische Bézier-Kurve
    Curve {
        /// Erster Kontrollpunkt (Start-Tangente)
        control_start: Vec3,
        /// Zweiter Kontrollpunkt (End-Tangente)
        control_end: Vec3,
    },
}

/// Gerichtete Kante `(from, outbound) → to`.
#[derive(Debug, Clone)]
pub struct Edge {
    /// Ziel-Way-Point
    pub to: WayPointId,
    /// Gerade oder kurvig
    pub kind: EdgeKind,
    /// Vorberechnete Polyline, nur bei Kurven vorhanden
    pub(crate) curve: Option<CurvePath>,
}

impl Edge {
    /// Polyline der Kante, `None` für gerade Kanten.
    pub fn curve(&self) -> Option<&CurvePath> {
        self.curve.as_ref()
    }
}

/// Gebautes Wegnetz.
#[derive(Debug, Clone)]
pub struct WayGraph {
    /// Way-Points in Definitionsreihenfolge
    points: Vec<WayPoint>,
    /// ID → Index in `points`
    index: HashMap<WayPointId, usize>,
    /// Ampeln nach ID
    lights: HashMap<LightId, TrafficLight>,
    /// Segmentanzahl, mit der die Kurven abgetastet wurden
    segment_count: usize,
}

impl WayGraph {
    /// Sucht einen Way-Point.
    pub fn way_point(&self, id: WayPointId) -> Option<&WayPoint> {
        self.index.get(&id).map(|&i| &self.points[i])
    }

    /// Iterator über alle Way-Points in Definitionsreihenfolge.
    pub fn way_points(&self) -> impl Iterator<Item = &WayPoint> {
        self.points.iter()
    }

    /// Alle Spawn-Punkte in Definitionsreihenfolge.
    pub fn spawn_points(&self) -> impl Iterator<Item = &WayPoint> {
        self.points.iter().filter(|p| p.kind == NodeKind::Spawn)
    }

    /// Gibt die Anzahl der Way-Points zurück
    pub fn way_point_count(&self) -> usize {
        self.points.len()
    }

    /// Gibt die Anzahl aller Kanten zurück
    pub fn edge_count(&self) -> usize {
        self.points.iter().map(|p| p.edges.len()).sum()
    }

    /// Gibt die Anzahl der Kurven-Kanten zurück
    pub fn curve_count(&self) -> usize {
        self.points
            .iter()
            .flat_map(|p| p.edges.iter())
            .filter(|e| e.curve.is_some())
            .count()
    }

    /// Segmentanzahl der Kurven-Polylines.
    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    /// Kante `outbound` von `node`.
    pub fn edge(&self, node: WayPointId, outbound: usize) -> Option<&Edge> {
        self.way_point(node)?.edges.get(outbound)
    }

    /// Geometrie-Art der Kante; `Straight` auch für nicht existierende Kanten.
    pub fn edge_kind(&self, node: WayPointId, outbound: usize) -> EdgeKind {
        self.edge(node, outbound)
            .map_or(EdgeKind::Straight, |edge| edge.kind)
    }

    /// Polyline der Kante, `None` wenn gerade oder nicht vorhanden.
    pub fn curve_path(&self, node: WayPointId, outbound: usize) -> Option<&CurvePath> {
        self.edge(node, outbound)?.curve.as_ref()
    }

    /// Nachfolger über Outbound `outbound`.
    ///
    /// `None` bei fehlenden Outbounds oder ungültigem Index: der Pfad endet hier.
    pub fn next_way_point(&self, node: WayPointId, outbound: usize) -> Option<WayPointId> {
        self.way_point(node)?.outbound(outbound)
    }

    /// Wählt den Outbound, über den ein Fahrzeug `node` verlässt.
    ///
    /// Ohne Selector gilt Outbound 0. Liefert der Selector einen ungültigen
    /// Index, wird auf den letzten gültigen geklemmt und gewarnt.
    /// `None` wenn der Way-Point keine Outbounds hat.
    pub fn choose_outbound(
        &self,
        node: WayPointId,
        selector: Option<&mut dyn WaySelector>,
    ) -> Option<usize> {
        let point = self.way_point(node)?;
        let count = point.outbound_count();
        if count == 0 {
            return None;
        }

        let Some(selector) = selector else {
            return Some(0);
        };

        let chosen = selector.select(&point.label, count);
        if chosen >= count {
            log::warn!(
                "Way-Select an Way-Point {} ('{}') lieferte Index {} bei {} Outbounds, klemme auf {}",
                node,
                point.label,
                chosen,
                count,
                count - 1
            );
            return Some(count - 1);
        }
        Some(chosen)
    }

    /// Ampel nach ID.
    pub fn light(&self, id: LightId) -> Option<&TrafficLight> {
        self.lights.get(&id)
    }

    /// Iterator über alle Ampeln (ohne feste Reihenfolge).
    pub fn lights(&self) -> impl Iterator<Item = &TrafficLight> {
        self.lights.values()
    }

    /// Aktuelles Signal einer Ampel.
    pub fn light_state(&self, id: LightId) -> Option<LightType> {
        self.lights.get(&id).map(TrafficLight::state)
    }

    /// Signal an einem Way-Point: das der Ampel bei Haltelinien, sonst Grün.
    pub fn light_state_at(&self, node: WayPointId) -> LightType {
        match self.way_point(node).map(|p| p.kind) {
            Some(NodeKind::StopLine { light }) => {
                self.light_state(light).unwrap_or(LightType::SteadyGreen)
            }
            _ => LightType::SteadyGreen,
        }
    }

    /// Schaltet eine Ampel um; `None` bei unbekannter ID.
    pub fn switch_light(&mut self, id: LightId) -> Option<LightType> {
        let light = self.lights.get_mut(&id)?;
        let state = light.switch();
        log::debug!("Ampel {} schaltet auf {:?}", id, state);
        Some(state)
    }
}
