//! Core-Domänentypen: Way-Points, Kanten, Wegnetz, Pfad-Cursor.

pub mod curve_path;
pub mod error;
pub mod obstacle;
pub mod path_cursor;
pub mod select;
pub mod traffic_light;
pub mod way_graph;
pub mod way_point;

pub use curve_path::CurvePath;
pub use error::GraphError;
pub use obstacle::{ObstacleHit, ObstacleQuery};
pub use path_cursor::{CursorState, PathCursor, RefreshEvent};
pub use select::{FirstOutbound, LastOutbound, WaySelector};
pub use traffic_light::{LightId, LightType, TrafficLight, TrafficLightDef};
pub use way_graph::{Edge, EdgeKind, WayGraph, WayGraphDefinition};
pub use way_point::{
    CurveMappingDef, NodeKind, WayPoint, WayPointDef, WayPointId, derive_curve_mapping,
    is_straight_outbound,
};
