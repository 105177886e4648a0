//! Indonesian administrative regions and their healthcare facilities.
//!
//! Proxies the planning backend's region endpoints for the dashboard's
//! cascading selectors and the map.
//!
//! ## Data Hierarchy
//!
//! - Level 1: Provinces (Provinsi)
//! - Level 2: Regencies/Cities (Kabupaten/Kota), the unit facilities are loaded by
//! - Level 3: Sub-districts (Kecamatan), the unit coverage is scored and simulated on
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/regions/provinces` | List all provinces |
//! | GET | `/api/regions/provinces/{id}/regencies` | List regencies in a province |
//! | GET | `/api/regions/regencies/{id}/subdistricts` | List sub-districts in a regency |
//! | GET | `/api/regions/regencies/{id}/facilities` | List facilities in a regency |
//! | GET | `/api/regions/search` | Regions overlapping a bounding box |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::RegionService;
