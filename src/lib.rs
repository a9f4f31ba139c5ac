//! Traffic Way Sim Library.
//! Headless Verkehrssimulation über dem Wegnetz, als Library exportiert für Tests und Wiederverwendung.

pub mod level;
pub mod shared;
pub mod sim;

pub use level::{
    load_level, load_level_with_segments, parse_level, read_level_file, write_level, LevelFile,
    LevelFormat,
};
pub use shared::SimOptions;
pub use sim::{
    AgentId, Driver, DriverConfig, RoundStatus, Simulation, SimulationEvent, Spawner, Vehicle,
    VehicleScan,
};

pub use traffic_way_engine as engine;
