//! Coverage analysis of a regency: heatmap, sub-district priority ranking,
//! the dashboard's coverage card and per sub-district details.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/analysis/regencies/{id}/heatmap` | Heatmap points |
//! | GET | `/api/analysis/regencies/{id}/priority-score` | Ranking and least-covered sub-districts |
//! | GET | `/api/analysis/regencies/{id}/summary` | Coverage card |
//! | GET | `/api/analysis/subdistricts/{id}` | Sub-district details |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::AnalysisService;
