mod facility;
mod viewport;

pub use facility::{Facility, FacilityType, MarkerStyle, UnknownFacilityType};
pub use viewport::{BoundingBox, Coordinate};
