mod analysis_dto;

pub use analysis_dto::{CoverageCardDto, PriorityResponseDto};
