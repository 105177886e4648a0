mod export_service;

pub use export_service::{ExportService, REPORT_TYPE_SIMULATION_RESULTS};
