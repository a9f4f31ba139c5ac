//! Reine Geometrie-Funktionen für kubische Bézier-Kurven.

use glam::Vec3;

/// B(t) = (1-t)³·P0 + 3(1-t)²t·P1 + 3(1-t)t²·P2 + t³·P3
///
/// `t` wird nicht geklemmt: Werte außerhalb von [0, 1] extrapolieren die Kurve.
pub fn cubic_bezier(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let inv = 1.0 - t;
    let inv2 = inv * inv;
    let t2 = t * t;
    inv2 * inv * p0 + 3.0 * inv2 * t * p1 + 3.0 * inv * t2 * p2 + t2 * t * p3
}

/// Tastet die Kurve an `segments + 1` gleichverteilten t-Werten ab (0 und 1 inklusive).
pub fn sample_cubic_bezier(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, segments: usize) -> Vec<Vec3> {
    if segments == 0 {
        return vec![p0];
    }
    (0..=segments)
        .map(|i| cubic_bezier(p0, p1, p2, p3, i as f32 / segments as f32))
        .collect()
}

/// Approximierte Länge einer Polyline.
pub fn polyline_length(points: &[Vec3]) -> f32 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}
