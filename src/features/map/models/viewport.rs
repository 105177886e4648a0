use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A WGS84 point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinate {
    #[schema(example = -6.9175)]
    pub lat: f64,
    #[schema(example = 107.6191)]
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Usable as a marker position: finite and neither axis left at zero
    pub fn is_plottable(&self) -> bool {
        self.is_finite() && self.lat != 0.0 && self.lng != 0.0
    }
}

/// Visible map rectangle given by its north-east and south-west corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BoundingBox {
    pub north_east: Coordinate,
    pub south_west: Coordinate,
}

impl BoundingBox {
    pub fn new(north_east: Coordinate, south_west: Coordinate) -> Self {
        Self {
            north_east,
            south_west,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.north_east.is_finite() && self.south_west.is_finite()
    }

    /// Inclusive containment check. Corners given in the wrong order are
    /// normalised so a swapped rectangle still describes the same area.
    pub fn contains(&self, point: &Coordinate) -> bool {
        let (min_lat, max_lat) = ordered(self.south_west.lat, self.north_east.lat);
        let (min_lng, max_lng) = ordered(self.south_west.lng, self.north_east.lng);

        (min_lat..=max_lat).contains(&point.lat) && (min_lng..=max_lng).contains(&point.lng)
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
