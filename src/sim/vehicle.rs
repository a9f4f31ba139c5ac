//! Ein Fahrzeug: Cursor auf dem Wegnetz plus Fahrer.

use glam::Vec3;
use traffic_way_engine::{ObstacleQuery, PathCursor, RefreshEvent, WayGraph, WayPointId};

use super::driver::Driver;
use super::scan::VehiclePose;

/// ID eines Fahrzeugs innerhalb einer Simulation.
pub type AgentId = u64;

/// Ein fahrendes Fahrzeug.
#[derive(Debug)]
pub struct Vehicle {
    id: AgentId,
    origin: WayPointId,
    cursor: PathCursor,
    driver: Driver,
}

impl Vehicle {
    /// Erstellt ein Fahrzeug aus einem bereits angebundenen Cursor.
    pub fn new(id: AgentId, origin: WayPointId, cursor: PathCursor, driver: Driver) -> Self {
        Self {
            id,
            origin,
            cursor,
            driver,
        }
    }

    /// Fahrzeug-ID
    pub fn id(&self) -> AgentId {
        self.id
    }

    /// Spawn-Punkt, an dem das Fahrzeug entstanden ist
    pub fn origin(&self) -> WayPointId {
        self.origin
    }

    /// Position auf dem Wegnetz
    pub fn cursor(&self) -> &PathCursor {
        &self.cursor
    }

    /// Geschwindigkeitsregelung
    pub fn driver(&self) -> &Driver {
        &self.driver
    }

    /// Aktuelle Weltposition
    pub fn position(&self) -> Vec3 {
        self.cursor.position()
    }

    /// `true` sobald das Fahrzeug einen End-Punkt erreicht hat.
    pub fn is_arrived(&self) -> bool {
        self.cursor.is_arrived()
    }

    /// Pose für die Hindernis-Abfrage der anderen Fahrzeuge.
    pub fn pose(&self) -> VehiclePose {
        VehiclePose {
            agent: self.id,
            position: self.cursor.position(),
            direction: self.cursor.direction(),
        }
    }

    /// Ein Simulationsschritt.
    pub fn tick(&mut self, graph: &WayGraph, query: &dyn ObstacleQuery, dt: f32) -> RefreshEvent {
        self.driver.tick(&mut self.cursor, graph, query, dt)
    }
}
