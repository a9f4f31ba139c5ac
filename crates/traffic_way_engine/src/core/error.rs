//! Konfigurationsfehler beim Aufbau des Wegnetzes.

use thiserror::Error;

use super::{LightId, WayPointId};

/// Fehlerhafte Autorendaten; der Graph-Build wird abgebrochen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Zwei Way-Points mit derselben ID
    #[error("Way-Point {0} ist doppelt definiert")]
    DuplicateWayPoint(WayPointId),

    /// Zwei Ampeln mit derselben ID
    #[error("Ampel {0} ist doppelt definiert")]
    DuplicateLight(LightId),

    /// Outbound verweist auf einen nicht existierenden Way-Point
    #[error("Outbound {index} von Way-Point {from} verweist auf unbekannten Way-Point {to}")]
    DanglingOutbound {
        from: WayPointId,
        index: usize,
        to: WayPointId,
    },

    /// Kurven-Zuordnung und Outbound-Liste sind unterschiedlich lang
    #[error("Way-Point {id}: {mapping} Kurven-Zuordnungen für {outbounds} Outbounds")]
    MappingLengthMismatch {
        id: WayPointId,
        mapping: usize,
        outbounds: usize,
    },

    /// Start- und End-Tangenten sind unterschiedlich lang
    #[error("Way-Point {id}: {start} Start-Tangenten, aber {end} End-Tangenten")]
    TangentLengthMismatch {
        id: WayPointId,
        start: usize,
        end: usize,
    },

    /// Kurven-Index zeigt hinter die Tangenten-Arrays
    #[error("Way-Point {id}: Outbound {index} verweist auf ungültigen Kurven-Index {curve}")]
    CurveIndexOutOfRange {
        id: WayPointId,
        index: usize,
        curve: i32,
    },

    /// Zwei Outbounds teilen sich denselben Kurven-Index
    #[error("Way-Point {id}: Kurven-Index {curve} ist mehrfach vergeben")]
    CurveIndexReused { id: WayPointId, curve: usize },

    /// Haltelinie verweist auf eine unbekannte Ampel
    #[error("Way-Point {id} verweist auf unbekannte Ampel {light}")]
    UnknownLight { id: WayPointId, light: LightId },

    /// Bézier-Kurven können nicht in 0 Segmente zerlegt werden
    #[error("Bézier-Segmentanzahl muss größer als 0 sein")]
    ZeroSegmentCount,
}
