//! Spawner: erzeugt Fahrzeuge an Spawn-Way-Points mit Abklingzeit.

use glam::Vec3;
use traffic_way_engine::{LastOutbound, PathCursor, RefreshEvent, WayGraph, WayPoint, WayPointId};

use super::driver::{Driver, DriverConfig};
use super::vehicle::{AgentId, Vehicle};
use crate::shared::SimOptions;

/// Erzeugt Fahrzeuge an genau einem Way-Point.
#[derive(Debug, Clone)]
pub struct Spawner {
    way_point: WayPointId,
    position: Vec3,
    forward: Vec3,
    cooldown: f32,
    timer: f32,
}

impl Spawner {
    /// Erstellt einen sofort bereiten Spawner am Way-Point.
    pub fn new(way_point: &WayPoint, cooldown: f32) -> Self {
        Self {
            way_point: way_point.id,
            position: way_point.position,
            forward: way_point.forward,
            cooldown,
            timer: 0.0,
        }
    }

    /// Way-Point des Spawners
    pub fn way_point(&self) -> WayPointId {
        self.way_point
    }

    /// Verbleibende Abklingzeit
    pub fn remaining_cooldown(&self) -> f32 {
        self.timer
    }

    /// Zählt die Abklingzeit herunter.
    pub fn tick(&mut self, dt: f32) {
        self.timer = (self.timer - dt).max(0.0);
    }

    /// `true` sobald die Abklingzeit abgelaufen ist.
    pub fn can_spawn(&self) -> bool {
        self.timer <= 0.0
    }

    /// Erzeugt ein Fahrzeug am Way-Point und startet die Abklingzeit.
    ///
    /// Gibt `None` zurück, solange die Abklingzeit läuft.
    pub fn spawn(&mut self, graph: &WayGraph, id: AgentId, options: &SimOptions) -> Option<Vehicle> {
        if !self.can_spawn() {
            return None;
        }
        self.timer = self.cooldown;

        let mut cursor = PathCursor::new(self.position, self.forward, options.vehicle_length)
            .with_arrival_threshold(options.arrival_threshold)
            .with_way_selector(LastOutbound);
        let event = cursor.attach(graph, self.way_point);
        if let RefreshEvent::DeadEnd { at } = event {
            log::warn!("Fahrzeug {} steht an Way-Point {} ohne Outbound", id, at);
        }

        let driver = Driver::new(DriverConfig::from_options(options));
        Some(Vehicle::new(id, self.way_point, cursor, driver))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use traffic_way_engine::{CursorState, NodeKind, WayGraphDefinition, WayPointDef};

    fn fork_graph() -> WayGraph {
        let def = WayGraphDefinition {
            lights: Vec::new(),
            points: vec![
                WayPointDef::new(1, Vec3::ZERO, Vec3::Z)
                    .with_kind(NodeKind::Spawn)
                    .with_outbounds(vec![2, 3]),
                WayPointDef::new(2, Vec3::new(0.0, 0.0, 10.0), Vec3::Z).with_kind(NodeKind::End),
                WayPointDef::new(3, Vec3::new(0.0, 0.0, 20.0), Vec3::Z).with_kind(NodeKind::End),
            ],
        };
        WayGraph::build(&def).expect("gültiges Wegnetz")
    }

    #[test]
    fn test_spawn_attaches_with_last_outbound() {
        let graph = fork_graph();
        let point = graph.way_point(1).expect("Spawn-Punkt vorhanden");
        let mut spawner = Spawner::new(point, 2.0);

        let vehicle = spawner
            .spawn(&graph, 7, &SimOptions::default())
            .expect("Spawner ist bereit");

        assert_eq!(vehicle.id(), 7);
        assert_eq!(vehicle.origin(), 1);
        assert_eq!(vehicle.cursor().state(), CursorState::OnEdge);
        assert_eq!(vehicle.cursor().end(), Some(3));
        assert_eq!(vehicle.position(), Vec3::ZERO);
    }

    #[test]
    fn test_cooldown_blocks_until_elapsed() {
        let graph = fork_graph();
        let point = graph.way_point(1).expect("Spawn-Punkt vorhanden");
        let mut spawner = Spawner::new(point, 2.0);
        let options = SimOptions::default();

        assert!(spawner.can_spawn());
        assert!(spawner.spawn(&graph, 1, &options).is_some());
        assert!(!spawner.can_spawn());
        assert!(spawner.spawn(&graph, 2, &options).is_none());

        spawner.tick(1.5);
        assert!(!spawner.can_spawn());
        spawner.tick(0.5);
        assert!(spawner.can_spawn());
        assert_eq!(spawner.remaining_cooldown(), 0.0);
    }
}
