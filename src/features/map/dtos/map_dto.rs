use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::core::error::AppError;
use crate::features::map::loader::LoadOutcome;
use crate::features::map::models::{BoundingBox, Coordinate, FacilityType};
use crate::features::map::services::LoadStatus;
use crate::features::regions::dtos::FacilityResponseDto;

/// Current map viewport, sent on every map move
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ViewportRequestDto {
    pub north_east: Coordinate,
    pub south_west: Coordinate,
}

impl From<ViewportRequestDto> for BoundingBox {
    fn from(dto: ViewportRequestDto) -> Self {
        BoundingBox::new(dto.north_east, dto.south_west)
    }
}

/// Comma-separated list of enabled facility types, e.g. `hospital,clinic`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct FacilityFilterQuery {
    #[param(example = "hospital,clinic")]
    pub types: Option<String>,
}

impl FacilityFilterQuery {
    /// `None` when no filter was given; an empty value enables no type
    pub fn enabled_types(&self) -> Result<Option<BTreeSet<FacilityType>>, AppError> {
        let Some(raw) = self.types.as_deref() else {
            return Ok(None);
        };

        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<FacilityType>()
                    .map_err(|e| AppError::BadRequest(e.to_string()))
            })
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Some)
    }
}

/// Markers and loading state of the caller's map
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MapStateDto {
    pub status: LoadStatus,
    pub bounds: Option<BoundingBox>,
    pub loaded_regions: Vec<String>,
    pub facilities: Vec<FacilityResponseDto>,
}

/// Result of an immediate resolution pass
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LoadOutcomeDto {
    Skipped,
    SearchFailed { message: String },
    NoRegions,
    Applied {
        fetched: Vec<String>,
        failed: Vec<String>,
        added: usize,
    },
    Stale,
}

impl From<LoadOutcome> for LoadOutcomeDto {
    fn from(outcome: LoadOutcome) -> Self {
        match outcome {
            LoadOutcome::Skipped => LoadOutcomeDto::Skipped,
            LoadOutcome::SearchFailed(e) => LoadOutcomeDto::SearchFailed {
                message: e.to_string(),
            },
            LoadOutcome::NoRegions => LoadOutcomeDto::NoRegions,
            LoadOutcome::Applied {
                fetched,
                failed,
                added,
                ..
            } => LoadOutcomeDto::Applied {
                fetched,
                failed,
                added,
            },
            LoadOutcome::Stale => LoadOutcomeDto::Stale,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ResolveResponseDto {
    #[serde(flatten)]
    pub outcome: LoadOutcomeDto,
    pub state: MapStateDto,
}
