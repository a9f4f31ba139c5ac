//! Schnittstelle zur Hindernis-Abfrage vor einem Fahrzeug.
//!
//! Die eigentliche Raum-Abfrage (Raycast, KD-Tree, …) liefert die Umgebung;
//! der Kern wertet nur Treffer-Distanz und Fahrtrichtung des Hindernisses aus.

use glam::Vec3;

/// Treffer einer Hindernis-Abfrage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleHit {
    /// Abstand vom Abfrage-Ursprung
    pub distance: f32,
    /// Vorgeschlagene Fahrtrichtung des getroffenen Fahrzeugs
    pub direction: Vec3,
}

/// Liefert das nächste Fahrzeug entlang eines Strahls.
pub trait ObstacleQuery {
    /// Sucht das nächste Hindernis ab `origin` in Richtung `forward` bis `max_distance`.
    ///
    /// Das abfragende Fahrzeug selbst darf nicht getroffen werden.
    fn cast_ahead(&self, origin: Vec3, forward: Vec3, max_distance: f32) -> Option<ObstacleHit>;
}
