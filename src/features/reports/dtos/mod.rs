mod export_dto;

pub use export_dto::{ExportRequestDto, ExportResponseDto};
