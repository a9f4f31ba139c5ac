//! Einfacher Fahrer: Gas geben, bis Ampel oder Vordermann zum Anhalten zwingen.

use traffic_way_engine::{LightType, ObstacleQuery, PathCursor, RefreshEvent, WayGraph};

use crate::shared::SimOptions;

/// Fahrparameter eines Fahrers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriverConfig {
    /// Höchstgeschwindigkeit
    pub max_speed: f32,
    /// Beschleunigung beim Gasgeben
    pub gas_acceleration: f32,
    /// Verzögerung beim Bremsen (negativ)
    pub brake_acceleration: f32,
    /// Anhalteabstand vor nicht-grüner Ampel
    pub stop_distance_light: f32,
    /// Anhalteabstand zum Vordermann
    pub stop_distance_vehicle: f32,
}

impl DriverConfig {
    /// Übernimmt die Fahrparameter aus den Optionen.
    pub fn from_options(options: &SimOptions) -> Self {
        Self {
            max_speed: options.max_speed,
            gas_acceleration: options.gas_acceleration,
            brake_acceleration: options.brake_acceleration,
            stop_distance_light: options.stop_distance_light,
            stop_distance_vehicle: options.stop_distance_vehicle,
        }
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self::from_options(&SimOptions::default())
    }
}

/// Geschwindigkeitsregelung eines Fahrzeugs.
#[derive(Debug, Clone)]
pub struct Driver {
    config: DriverConfig,
    speed: f32,
}

impl Driver {
    /// Erstellt einen stehenden Fahrer.
    pub fn new(config: DriverConfig) -> Self {
        Self { config, speed: 0.0 }
    }

    /// Aktuelle Geschwindigkeit
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Fahrparameter
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Muss der Fahrer bremsen?
    pub fn need_stop(&self, cursor: &PathCursor, graph: &WayGraph, query: &dyn ObstacleQuery) -> bool {
        let red_ahead = cursor.current_light_state(graph) != LightType::SteadyGreen
            && cursor.distance() < self.config.stop_distance_light;

        red_ahead
            || cursor
                .obstacle_ahead(query, self.config.stop_distance_vehicle)
                .is_some()
    }

    /// Ein Simulationsschritt: Geschwindigkeit regeln, Cursor bewegen und auflösen.
    pub fn tick(
        &mut self,
        cursor: &mut PathCursor,
        graph: &WayGraph,
        query: &dyn ObstacleQuery,
        dt: f32,
    ) -> RefreshEvent {
        if self.need_stop(cursor, graph, query) {
            self.speed = (self.speed + self.config.brake_acceleration * dt).max(0.0);
        } else if self.speed <= self.config.max_speed {
            self.speed += self.config.gas_acceleration * dt;
        }

        cursor.advance(graph, self.speed * dt);
        cursor.refresh(graph)
    }
}
