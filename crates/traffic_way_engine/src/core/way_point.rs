//! Way-Points: Knoten des Wegnetzes samt ihrer Autorendaten.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::LightId;
use super::way_graph::Edge;
use crate::shared::constants::{DEFAULT_TANGENT_OFFSET, SAME_DIRECTION_DOT};

/// ID eines Way-Points.
pub type WayPointId = u64;

/// Art eines Way-Points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    /// Gewöhnlicher Durchfahrtspunkt
    #[default]
    Normal,
    /// Hier werden Fahrzeuge erzeugt
    Spawn,
    /// Fahrzeuge, die diesen Punkt erreichen, verlassen die Simulation
    End,
    /// Haltelinie vor einer Ampel
    StopLine {
        /// Ampel, die diese Haltelinie steuert
        light: LightId,
    },
}

/// Kurven-Zuordnung eines Way-Points in der persistierten Form.
///
/// `outbound_path_mapping[i]` ist der Index in die Tangenten-Arrays für
/// Outbound `i`, negative Werte (üblich: −1) bedeuten „gerade Strecke“.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurveMappingDef {
    /// Outbound-Index → Kurven-Index (−1 = gerade)
    pub outbound_path_mapping: Vec<i32>,
    /// Start-Tangentenpunkte (erster Bézier-Kontrollpunkt)
    pub start_tangents: Vec<Vec3>,
    /// End-Tangentenpunkte (zweiter Bézier-Kontrollpunkt)
    pub end_tangents: Vec<Vec3>,
}

fn default_forward() -> Vec3 {
    Vec3::Z
}

/// Autorendaten eines Way-Points, wie sie aus einem Level geladen werden.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WayPointDef {
    /// Way-Point-ID
    pub id: WayPointId,
    /// Weltposition
    pub position: Vec3,
    /// Blickrichtung (wird normalisiert)
    #[serde(default = "default_forward")]
    pub forward: Vec3,
    /// Optionales Label, wird an den Way-Select-Callback übergeben
    #[serde(default)]
    pub label: String,
    /// Art des Way-Points
    #[serde(default)]
    pub kind: NodeKind,
    /// Nachfolger; Index 0 ist die Standardroute
    #[serde(default)]
    pub outbounds: Vec<WayPointId>,
    /// Kurvendaten; `None` = alle Outbounds gerade
    #[serde(default)]
    pub curves: Option<CurveMappingDef>,
}

impl WayPointDef {
    /// Erstellt einen normalen Way-Point ohne Outbounds.
    pub fn new(id: WayPointId, position: Vec3, forward: Vec3) -> Self {
        Self {
            id,
            position,
            forward,
            label: String::new(),
            kind: NodeKind::Normal,
            outbounds: Vec::new(),
            curves: None,
        }
    }

    /// Setzt die Nachfolger.
    pub fn with_outbounds(mut self, outbounds: Vec<WayPointId>) -> Self {
        self.outbounds = outbounds;
        self
    }

    /// Setzt die Art des Way-Points.
    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = kind;
        self
    }

    /// Setzt das Label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Setzt die Kurvendaten.
    pub fn with_curves(mut self, curves: CurveMappingDef) -> Self {
        self.curves = Some(curves);
        self
    }
}

/// Prüft, ob `b` von `a` aus geradeaus erreichbar ist.
///
/// Beide Blickrichtungen müssen nahezu übereinstimmen und `b` muss in
/// Blickrichtung von `a` liegen. Nur für die Autorenzeit relevant.
pub fn is_straight_outbound(a_position: Vec3, a_forward: Vec3, b_position: Vec3, b_forward: Vec3) -> bool {
    let a_forward = a_forward.normalize_or_zero();
    let b_forward = b_forward.normalize_or_zero();
    let to_b = (b_position - a_position).normalize_or_zero();
    a_forward.dot(b_forward) > SAME_DIRECTION_DOT && a_forward.dot(to_b) > SAME_DIRECTION_DOT
}

/// Erzeugt Standard-Kurvendaten für einen Way-Point.
///
/// Nicht-gerade Outbounds erhalten Tangenten im Abstand
/// `DEFAULT_TANGENT_OFFSET` entlang der Blickrichtungen. `targets` liefert
/// Position und Blickrichtung je Outbound, `None` für unbekannte Ziele
/// (diese bleiben gerade, der Build meldet sie anschließend).
pub fn derive_curve_mapping(
    position: Vec3,
    forward: Vec3,
    targets: &[Option<(Vec3, Vec3)>],
) -> CurveMappingDef {
    let mut mapping = CurveMappingDef::default();
    let forward_n = forward.normalize_or_zero();

    for target in targets {
        match target {
            Some((b_position, b_forward)) if !is_straight_outbound(position, forward, *b_position, *b_forward) => {
                mapping.start_tangents.push(position + forward_n * DEFAULT_TANGENT_OFFSET);
                mapping
                    .end_tangents
                    .push(*b_position - b_forward.normalize_or_zero() * DEFAULT_TANGENT_OFFSET);
                mapping
                    .outbound_path_mapping
                    .push(mapping.start_tangents.len() as i32 - 1);
            }
            _ => mapping.outbound_path_mapping.push(-1),
        }
    }

    mapping
}

/// Ein Way-Point im gebauten Wegnetz (nach dem Build unveränderlich).
#[derive(Debug, Clone)]
pub struct WayPoint {
    /// Way-Point-ID
    pub id: WayPointId,
    /// Weltposition
    pub position: Vec3,
    /// Normalisierte Blickrichtung
    pub forward: Vec3,
    /// Label für die Routenwahl (leer wenn nicht gesetzt)
    pub label: String,
    /// Art des Way-Points
    pub kind: NodeKind,
    pub(crate) edges: Vec<Edge>,
}

impl WayPoint {
    /// Ausgehende Kanten in Outbound-Reihenfolge.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Anzahl der Outbounds.
    pub fn outbound_count(&self) -> usize {
        self.edges.len()
    }

    /// Ziel des Outbounds `index`, `None` wenn es keinen solchen gibt.
    pub fn outbound(&self, index: usize) -> Option<WayPointId> {
        self.edges.get(index).map(|edge| edge.to)
    }

    /// `true` für End-Punkte, an denen Fahrzeuge entfernt werden.
    pub fn is_terminal(&self) -> bool {
        self.kind == NodeKind::End
    }
}
