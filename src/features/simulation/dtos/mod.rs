mod simulation_dto;

pub use simulation_dto::{RunSimulationRequestDto, SimulationRun};
