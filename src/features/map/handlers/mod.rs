mod map_handler;

pub use map_handler::{
    __path_clear_map, __path_list_facilities, __path_record_viewport, __path_resolve_viewport,
    clear_map, list_facilities, record_viewport, resolve_viewport,
};
