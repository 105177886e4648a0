//! Facility map of one browser session.
//!
//! Every map move records the viewport; once the map has been still for the
//! debounce window, the regencies overlapping the viewport are resolved and
//! the facilities of regencies not loaded yet are fetched and merged into the
//! session's markers.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/map/viewport` | Record a map move (debounced load) |
//! | POST | `/api/map/viewport/resolve` | Load facilities for a viewport now |
//! | GET | `/api/map/facilities` | Markers, `?types=hospital,clinic` to filter |
//! | DELETE | `/api/map/facilities` | Clear Map |

pub mod debounce;
pub mod dtos;
pub mod handlers;
pub mod loader;
pub mod models;
pub mod routes;
pub mod services;
