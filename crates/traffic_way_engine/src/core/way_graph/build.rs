//! Aufbau des Wegnetzes aus Autorendaten inklusive Kurven-Vorberechnung.

use std::collections::{HashMap, HashSet};

use super::{Edge, EdgeKind, WayGraph, WayGraphDefinition};
use crate::core::{
    CurveMappingDef, CurvePath, GraphError, NodeKind, TrafficLight, WayPoint, WayPointDef, WayPointId,
    derive_curve_mapping,
};
use crate::shared::constants::BEZIER_SEGMENT_COUNT;

impl WayGraphDefinition {
    /// Ergänzt Kurvendaten für alle Way-Points ohne `curves`.
    ///
    /// Nicht-gerade Outbounds bekommen Standard-Tangenten (siehe
    /// [`derive_curve_mapping`]). Bestehende Kurvendaten bleiben unverändert.
    /// Gibt die Anzahl der ergänzten Way-Points zurück.
    pub fn derive_missing_curves(&mut self) -> usize {
        let poses: HashMap<_, _> = self
            .points
            .iter()
            .map(|p| (p.id, (p.position, p.forward)))
            .collect();

        let mut derived = 0;
        for point in self.points.iter_mut().filter(|p| p.curves.is_none()) {
            let targets: Vec<_> = point
                .outbounds
                .iter()
                .map(|to| poses.get(to).copied())
                .collect();
            point.curves = Some(derive_curve_mapping(point.position, point.forward, &targets));
            derived += 1;
        }
        derived
    }
}

impl WayGraph {
    /// Baut das Wegnetz mit der Standard-Segmentanzahl.
    pub fn build(definition: &WayGraphDefinition) -> Result<Self, GraphError> {
        Self::build_with_segments(definition, BEZIER_SEGMENT_COUNT)
    }

    /// Baut das Wegnetz und tastet jede Kurve mit `segment_count` Segmenten ab.
    pub fn build_with_segments(
        definition: &WayGraphDefinition,
        segment_count: usize,
    ) -> Result<Self, GraphError> {
        if segment_count == 0 {
            return Err(GraphError::ZeroSegmentCount);
        }

        let mut lights = HashMap::with_capacity(definition.lights.len());
        for def in &definition.lights {
            if lights
                .insert(def.id, TrafficLight::new(def.id, def.initial))
                .is_some()
            {
                return Err(GraphError::DuplicateLight(def.id));
            }
        }

        let mut index = HashMap::with_capacity(definition.points.len());
        for (i, def) in definition.points.iter().enumerate() {
            if index.insert(def.id, i).is_some() {
                return Err(GraphError::DuplicateWayPoint(def.id));
            }
        }

        let mut points = Vec::with_capacity(definition.points.len());
        for def in &definition.points {
            if let NodeKind::StopLine { light } = def.kind
                && !lights.contains_key(&light)
            {
                return Err(GraphError::UnknownLight { id: def.id, light });
            }

            let edges = build_edges(def, definition, &index, segment_count)?;
            points.push(WayPoint {
                id: def.id,
                position: def.position,
                forward: def.forward.normalize_or_zero(),
                label: def.label.clone(),
                kind: def.kind,
                edges,
            });
        }

        let graph = Self {
            points,
            index,
            lights,
            segment_count,
        };
        log::info!(
            "Wegnetz aufgebaut: {} Way-Points, {} Kanten ({} Kurven), {} Ampeln",
            graph.way_point_count(),
            graph.edge_count(),
            graph.curve_count(),
            graph.lights.len()
        );
        Ok(graph)
    }
}

/// Erzeugt die Kanten eines Way-Points und tastet dessen Kurven ab.
fn build_edges(
    def: &WayPointDef,
    definition: &WayGraphDefinition,
    index: &HashMap<WayPointId, usize>,
    segment_count: usize,
) -> Result<Vec<Edge>, GraphError> {
    let curve_indices = match &def.curves {
        Some(curves) => validate_mapping(def, curves)?,
        None => vec![None; def.outbounds.len()],
    };

    let mut edges = Vec::with_capacity(def.outbounds.len());
    for (outbound, (&to, curve_idx)) in def.outbounds.iter().zip(curve_indices).enumerate() {
        let Some(&target) = index.get(&to) else {
            return Err(GraphError::DanglingOutbound {
                from: def.id,
                index: outbound,
                to,
            });
        };
        let end = definition.points[target].position;

        let edge = match (curve_idx, &def.curves) {
            (Some(cp), Some(curves)) => {
                let control_start = curves.start_tangents[cp];
                let control_end = curves.end_tangents[cp];
                Edge {
                    to,
                    kind: EdgeKind::Curve {
                        control_start,
                        control_end,
                    },
                    curve: Some(CurvePath::from_bezier(
                        def.position,
                        control_start,
                        control_end,
                        end,
                        segment_count,
                    )),
                }
            }
            _ => Edge {
                to,
                kind: EdgeKind::Straight,
                curve: None,
            },
        };
        edges.push(edge);
    }
    Ok(edges)
}

/// Prüft die Kurven-Zuordnung und liefert je Outbound den Kurven-Index.
fn validate_mapping(
    def: &WayPointDef,
    curves: &CurveMappingDef,
) -> Result<Vec<Option<usize>>, GraphError> {
    if curves.outbound_path_mapping.len() != def.outbounds.len() {
        return Err(GraphError::MappingLengthMismatch {
            id: def.id,
            mapping: curves.outbound_path_mapping.len(),
            outbounds: def.outbounds.len(),
        });
    }
    if curves.start_tangents.len() != curves.end_tangents.len() {
        return Err(GraphError::TangentLengthMismatch {
            id: def.id,
            start: curves.start_tangents.len(),
            end: curves.end_tangents.len(),
        });
    }

    let mut used = HashSet::new();
    let mut result = Vec::with_capacity(curves.outbound_path_mapping.len());
    for (outbound, &raw) in curves.outbound_path_mapping.iter().enumerate() {
        if raw < 0 {
            result.push(None);
            continue;
        }
        let cp = raw as usize;
        if cp >= curves.start_tangents.len() {
            return Err(GraphError::CurveIndexOutOfRange {
                id: def.id,
                index: outbound,
                curve: raw,
            });
        }
        if !used.insert(cp) {
            return Err(GraphError::CurveIndexReused { id: def.id, curve: cp });
        }
        result.push(Some(cp));
    }
    Ok(result)
}
