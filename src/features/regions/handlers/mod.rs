mod region_handler;

pub use region_handler::{
    __path_list_facilities, __path_list_provinces, __path_list_regencies,
    __path_list_sub_districts, __path_search_regions, list_facilities, list_provinces,
    list_regencies, list_sub_districts, search_regions,
};
