//! `traffic_way_engine` — Wegnetz und Pfadverfolgung für Way-Agents.
//!
//! Enthält den algorithmischen Kern der Verkehrssimulation:
//! - Kubische Bézier-Auswertung und Polyline-Diskretisierung
//! - `WayGraph`: Way-Points mit gerichteten Outbounds (gerade oder kurvig)
//! - `PathCursor`: Fortschritt eines Fahrzeugs entlang des Wegnetzes
//! - Ampel-Zustand und die Schnittstelle zur Hindernis-Abfrage
//!
//! # Beispiel
//! ```
//! use glam::Vec3;
//! use traffic_way_engine::{NodeKind, PathCursor, WayGraph, WayGraphDefinition, WayPointDef};
//!
//! let definition = WayGraphDefinition {
//!     lights: Vec::new(),
//!     points: vec![
//!         WayPointDef::new(1, Vec3::ZERO, Vec3::X).with_outbounds(vec![2]),
//!         WayPointDef::new(2, Vec3::new(10.0, 0.0, 0.0), Vec3::X).with_kind(NodeKind::End),
//!     ],
//! };
//! let graph = WayGraph::build(&definition)?;
//!
//! let mut cursor = PathCursor::new(Vec3::ZERO, Vec3::X, 4.0);
//! cursor.attach(&graph, 1);
//! cursor.advance(&graph, cursor.distance());
//! cursor.refresh(&graph);
//! assert!(cursor.is_arrived());
//! # Ok::<(), traffic_way_engine::GraphError>(())
//! ```

pub mod core;
pub mod shared;

pub use crate::core::{
    CurveMappingDef, CurvePath, CursorState, Edge, EdgeKind, FirstOutbound, GraphError,
    LastOutbound, LightId, LightType, NodeKind, ObstacleHit, ObstacleQuery, PathCursor,
    RefreshEvent, TrafficLight, TrafficLightDef, WayGraph, WayGraphDefinition, WayPoint,
    WayPointDef, WayPointId, WaySelector, derive_curve_mapping, is_straight_outbound,
};
pub use crate::shared::{constants, cubic_bezier, polyline_length, sample_cubic_bezier};
