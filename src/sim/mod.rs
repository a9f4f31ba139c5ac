//! Rundenbasierte Simulation über dem Wegnetz.
//!
//! Spawner erzeugen Fahrzeuge, jeder Fahrer regelt seine Geschwindigkeit
//! anhand von Ampel und Vordermann, der Kontext wertet Ankunft, Kollisionen
//! und Rundenzeit aus.

pub mod driver;
pub mod scan;
pub mod simulation;
pub mod spawner;
pub mod vehicle;

pub use driver::{Driver, DriverConfig};
pub use scan::{AgentScan, ScanMatch, VehiclePose, VehicleScan};
pub use simulation::{RoundStatus, Simulation, SimulationEvent};
pub use spawner::Spawner;
pub use vehicle::{AgentId, Vehicle};
