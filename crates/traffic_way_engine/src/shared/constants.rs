//! Feste Standardwerte des Wegnetzes und der Pfadverfolgung.
//!
//! Die Simulation kann die meisten davon über ihre Optionen überschreiben.

/// Anzahl der Segmente, in die eine Bézier-Kurve zerlegt wird.
pub const BEZIER_SEGMENT_COUNT: usize = 10;

/// Abstand (Welteinheiten), ab dem ein End-Way-Point als erreicht gilt.
pub const THRESHOLD_DISTANCE_TO_END: f32 = 0.2;

/// Maximale Reichweite der Hindernis-Abfrage nach vorn.
pub const MAX_RAYCAST_DISTANCE_IN_FRONT: f32 = 10.0;

/// Mindest-Skalarprodukt zweier Richtungen, um als „gleiche Fahrtrichtung“ zu gelten.
pub const SAME_DIRECTION_DOT: f32 = 0.98;

/// Abstand der automatisch erzeugten Tangentenpunkte vom Way-Point.
pub const DEFAULT_TANGENT_OFFSET: f32 = 5.0;
