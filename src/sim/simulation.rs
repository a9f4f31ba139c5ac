//! Simulationskontext einer Runde: Wegnetz, Spawner, Fahrzeuge, Uhr.

use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use traffic_way_engine::{LightId, LightType, WayGraph, WayPointId};

use super::scan::VehicleScan;
use super::spawner::Spawner;
use super::vehicle::{AgentId, Vehicle};
use crate::shared::SimOptions;

/// Zustand der Runde.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundStatus {
    /// Runde läuft
    #[default]
    Running,
    /// Rundenzeit ohne Unfall überstanden
    Won,
    /// Zwei Fahrzeuge sind kollidiert
    Lost,
}

/// Beobachtbare Ereignisse eines Ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimulationEvent {
    /// Neues Fahrzeug am Spawn-Punkt
    Spawned { agent: AgentId, at: WayPointId },
    /// Fahrzeug hat einen End-Punkt erreicht und wurde entfernt
    Destroyed { agent: AgentId },
    /// Zwei Fahrzeuge berühren sich, die Runde ist verloren
    Collision { first: AgentId, second: AgentId },
    /// Rundenzeit erreicht
    RoundWon { elapsed: f32 },
}

/// Eine laufende Runde.
#[derive(Debug)]
pub struct Simulation {
    graph: WayGraph,
    options: SimOptions,
    spawners: Vec<Spawner>,
    agents: IndexMap<AgentId, Vehicle>,
    next_agent: AgentId,
    car_count: u32,
    max_car_count: u32,
    elapsed: f32,
    rng: StdRng,
    status: RoundStatus,
}

impl Simulation {
    /// Startet eine Runde auf dem Wegnetz.
    ///
    /// Jeder Spawn-Way-Point erhält einen Spawner. Ohne Seed in den Optionen
    /// wird der Zufallsgenerator aus der Systementropie initialisiert.
    pub fn new(graph: WayGraph, options: SimOptions) -> Self {
        let spawners: Vec<Spawner> = graph
            .spawn_points()
            .map(|point| Spawner::new(point, options.spawn_cooldown))
            .collect();
        if spawners.is_empty() {
            log::warn!("Wegnetz ohne Spawn-Punkte, es werden keine Fahrzeuge erzeugt");
        }

        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        log::info!(
            "Runde gestartet: {} Spawner, Rundenzeit {:.0}s, max. {} Fahrzeuge",
            spawners.len(),
            options.round_time,
            options.top_car_count
        );

        Self {
            graph,
            options,
            spawners,
            agents: IndexMap::new(),
            next_agent: 1,
            car_count: 0,
            max_car_count: 0,
            elapsed: 0.0,
            rng,
            status: RoundStatus::Running,
        }
    }

    /// Wegnetz der Runde
    pub fn graph(&self) -> &WayGraph {
        &self.graph
    }

    /// Optionen, mit denen die Runde gestartet wurde
    pub fn options(&self) -> &SimOptions {
        &self.options
    }

    /// Zustand der Runde
    pub fn status(&self) -> RoundStatus {
        self.status
    }

    /// Vergangene Rundenzeit in Sekunden
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Anzahl lebender Fahrzeuge
    pub fn car_count(&self) -> u32 {
        self.car_count
    }

    /// Aktuell erlaubte Fahrzeuganzahl
    pub fn max_car_count(&self) -> u32 {
        self.max_car_count
    }

    /// Spawner in Reihenfolge der Spawn-Way-Points
    pub fn spawners(&self) -> &[Spawner] {
        &self.spawners
    }

    /// Fahrzeuge in Erzeugungsreihenfolge
    pub fn vehicles(&self) -> impl Iterator<Item = &Vehicle> {
        self.agents.values()
    }

    /// Sucht ein lebendes Fahrzeug.
    pub fn vehicle(&self, id: AgentId) -> Option<&Vehicle> {
        self.agents.get(&id)
    }

    /// Schaltet eine Ampel um (Klick auf die Ampel).
    pub fn switch_light(&mut self, id: LightId) -> Option<LightType> {
        self.graph.switch_light(id)
    }

    /// Ein Simulationsschritt um `dt` Sekunden.
    ///
    /// Außerhalb einer laufenden Runde passiert nichts.
    pub fn tick(&mut self, dt: f32) -> Vec<SimulationEvent> {
        let mut events = Vec::new();
        if self.status != RoundStatus::Running {
            return events;
        }

        self.elapsed += dt;
        for spawner in &mut self.spawners {
            spawner.tick(dt);
        }

        if self.max_car_count <= self.options.top_car_count {
            self.max_car_count = self.options.allowed_car_count(self.elapsed);
        }

        if self.car_count <= self.max_car_count {
            events.extend(self.try_spawn());
        }

        self.drive_agents(dt);
        self.remove_arrived(&mut events);
        self.detect_collisions(&mut events);

        if self.status == RoundStatus::Running && self.elapsed >= self.options.round_time {
            self.status = RoundStatus::Won;
            log::info!(
                "Runde gewonnen nach {:.1}s ({} Fahrzeuge unterwegs)",
                self.elapsed,
                self.car_count
            );
            events.push(SimulationEvent::RoundWon {
                elapsed: self.elapsed,
            });
        }

        events
    }

    /// Läuft, bis die Runde gewonnen oder verloren ist.
    ///
    /// Gibt die Anzahl der ausgeführten Ticks zurück.
    pub fn run_to_end(&mut self, dt: f32) -> u64 {
        let mut ticks = 0;
        if dt <= 0.0 {
            return ticks;
        }
        while self.status == RoundStatus::Running {
            self.tick(dt);
            ticks += 1;
        }
        ticks
    }

    fn try_spawn(&mut self) -> Option<SimulationEvent> {
        if self.spawners.is_empty() {
            return None;
        }
        let index = self.rng.gen_range(0..self.spawners.len());
        let agent = self.next_agent;
        let spawner = &mut self.spawners[index];
        let vehicle = spawner.spawn(&self.graph, agent, &self.options)?;
        let at = spawner.way_point();

        self.next_agent += 1;
        self.car_count += 1;
        self.agents.insert(agent, vehicle);
        log::debug!("Fahrzeug {} an Way-Point {} erzeugt", agent, at);
        Some(SimulationEvent::Spawned { agent, at })
    }

    fn drive_agents(&mut self, dt: f32) {
        let scan = self.scan();
        for (id, vehicle) in &mut self.agents {
            vehicle.tick(&self.graph, &scan.seen_by(*id), dt);
        }
    }

    fn remove_arrived(&mut self, events: &mut Vec<SimulationEvent>) {
        let arrived: Vec<AgentId> = self
            .agents
            .values()
            .filter(|vehicle| vehicle.is_arrived())
            .map(Vehicle::id)
            .collect();

        for agent in arrived {
            self.agents.shift_remove(&agent);
            self.car_count = self.car_count.saturating_sub(1);
            log::debug!("Fahrzeug {} am Ziel entfernt", agent);
            events.push(SimulationEvent::Destroyed { agent });
        }
    }

    fn detect_collisions(&mut self, events: &mut Vec<SimulationEvent>) {
        let pairs = self.scan().touching_pairs(self.options.collision_radius);
        for (first, second) in pairs {
            log::warn!("Kollision zwischen Fahrzeug {} und {}", first, second);
            events.push(SimulationEvent::Collision { first, second });
            self.status = RoundStatus::Lost;
        }
        if self.status == RoundStatus::Lost {
            log::info!("Runde verloren nach {:.1}s", self.elapsed);
        }
    }

    fn scan(&self) -> VehicleScan {
        VehicleScan::from_poses(
            self.agents.values().map(Vehicle::pose).collect(),
            self.options.collision_radius,
            self.options.raycast_distance,
        )
    }
}
