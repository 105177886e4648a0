mod simulation;

pub use simulation::{
    OptimizedFacility, Recommendation, SimulationRequest, SimulationResponse, SimulationResult,
    SimulationSummary,
};
