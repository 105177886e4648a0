mod region_dto;

pub use region_dto::{
    FacilityResponseDto, ProvinceResponseDto, RegencyResponseDto, RegionSearchQuery,
    RegionSearchResponseDto, SubDistrictResponseDto,
};
