mod map_dto;

pub use map_dto::{
    FacilityFilterQuery, LoadOutcomeDto, MapStateDto, ResolveResponseDto, ViewportRequestDto,
};
