//! Per-browser app sessions.
//!
//! Each browser gets an opaque session cookie. Behind it the service keeps
//! the auth session, the map (viewport, loaded regencies, markers) and the
//! dashboard workspace (last simulation, last priority ranking, chat
//! history). Idle sessions are expired by [`SessionSweeper`].

mod registry;
mod session;
pub mod workers;

pub use registry::{AppSessionRegistry, SessionDeps};
pub use session::{AppSession, SimulationPermit, Workspace};
pub use workers::SessionSweeper;
