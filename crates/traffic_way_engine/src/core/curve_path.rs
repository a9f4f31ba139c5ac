//! Diskretisierte Bézier-Kurve einer Kanten mit Restlängen-Tabelle.

use glam::Vec3;

use crate::shared::sample_cubic_bezier;

/// Polyline einer Kurven-Kante.
///
/// Invarianten: `points.len() == segment_count + 1`, `remaining` ist parallel
/// zu `points`, monoton fallend und endet bei 0.
#[derive(Debug, Clone, PartialEq)]
pub struct CurvePath {
    points: Vec<Vec3>,
    remaining: Vec<f32>,
}

impl CurvePath {
    /// Tastet die Bézier-Kurve `start → end` mit den Tangentenpunkten ab.
    ///
    /// `segment_count` muss größer als 0 sein (wird beim Graph-Build geprüft).
    pub fn from_bezier(
        start: Vec3,
        control_start: Vec3,
        control_end: Vec3,
        end: Vec3,
        segment_count: usize,
    ) -> Self {
        let points = sample_cubic_bezier(start, control_start, control_end, end, segment_count);
        Self::from_points(points)
    }

    /// Baut die Restlängen-Tabelle rückwärts über die Stützpunkte auf.
    fn from_points(points: Vec<Vec3>) -> Self {
        let mut remaining = vec![0.0f32; points.len()];
        for i in (0..points.len().saturating_sub(1)).rev() {
            remaining[i] = remaining[i + 1] + points[i].distance(points[i + 1]);
        }
        Self { points, remaining }
    }

    /// Alle Stützpunkte (Start und Ende inklusive).
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Restlänge von jedem Stützpunkt bis zum Kurvenende.
    pub fn remaining(&self) -> &[f32] {
        &self.remaining
    }

    /// Anzahl der Segmente (Stützpunkte − 1).
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Gesamtlänge der Polyline.
    pub fn total_length(&self) -> f32 {
        self.remaining.first().copied().unwrap_or(0.0)
    }

    /// Stützpunkt `index`.
    pub fn point(&self, index: usize) -> Option<Vec3> {
        self.points.get(index).copied()
    }

    /// Restlänge ab Stützpunkt `index` (0 hinter dem letzten Punkt).
    pub fn remaining_from(&self, index: usize) -> f32 {
        self.remaining.get(index).copied().unwrap_or(0.0)
    }

    /// Letzter Stützpunkt (= Position des Ziel-Way-Points).
    pub fn last_point(&self) -> Option<Vec3> {
        self.points.last().copied()
    }
}
