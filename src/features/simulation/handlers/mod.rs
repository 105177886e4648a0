mod simulation_handler;

pub use simulation_handler::{
    __path_get_latest_simulation, __path_run_simulation, get_latest_simulation, run_simulation,
};
