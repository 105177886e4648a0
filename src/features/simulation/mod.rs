//! Facility placement simulation.
//!
//! The optimiser on the planning backend proposes where to build new
//! facilities within a budget. One simulation runs per session at a time and
//! the latest result is kept for report export and the assistant.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/simulation/run` | Run a simulation |
//! | GET | `/api/simulation/latest` | Last result of this session |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::SimulationService;
