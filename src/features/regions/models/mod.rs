mod province;
mod regency;
mod region_ref;
mod sub_district;

pub use province::Province;
pub use regency::Regency;
pub use region_ref::{RegionKind, RegionRef, RegionSearchResult};
pub use sub_district::SubDistrict;
