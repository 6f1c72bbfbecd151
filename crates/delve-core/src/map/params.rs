//! Generation parameters and validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Border thickness kept free of rooms along every map edge.
pub const MAP_BORDER: i32 = 2;

/// Invalid generation parameter combinations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    #[error("map width {width} leaves no usable interior inside the {border}-cell border")]
    MapTooNarrow { width: i32, border: i32 },

    #[error("minimum room size {min} exceeds maximum room size {max}")]
    RoomBoundsInverted { min: i32, max: i32 },

    #[error("minimum room size {min} is below 2")]
    RoomTooSmall { min: i32 },

    #[error("minimum clearance {clearance} is below 1")]
    ClearanceTooSmall { clearance: i32 },

    #[error("a {min}-cell room cannot fit in a {width}-cell map with a {border}-cell border")]
    RoomCannotFit { min: i32, width: i32, border: i32 },
}

/// Caller-supplied map generation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapParams {
    /// Side length of the square map.
    pub map_width: i32,
    /// Smallest sampled room edge.
    pub min_room_size: i32,
    /// Largest sampled room edge.
    pub max_room_size: i32,
    /// Minimum empty-cell margin enforced between room footprints.
    pub min_clearance: i32,
}

impl Default for MapParams {
    fn default() -> Self {
        Self {
            map_width: 64,
            min_room_size: 4,
            max_room_size: 10,
            min_clearance: 2,
        }
    }
}

impl MapParams {
    /// Check that the parameters describe a generatable map.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.map_width <= 2 * MAP_BORDER {
            return Err(ParamsError::MapTooNarrow {
                width: self.map_width,
                border: MAP_BORDER,
            });
        }
        if self.min_room_size < 2 {
            return Err(ParamsError::RoomTooSmall {
                min: self.min_room_size,
            });
        }
        if self.min_room_size > self.max_room_size {
            return Err(ParamsError::RoomBoundsInverted {
                min: self.min_room_size,
                max: self.max_room_size,
            });
        }
        if self.min_clearance < 1 {
            return Err(ParamsError::ClearanceTooSmall {
                clearance: self.min_clearance,
            });
        }
        if self.min_room_size > self.map_width - 2 * MAP_BORDER {
            return Err(ParamsError::RoomCannotFit {
                min: self.min_room_size,
                width: self.map_width,
                border: MAP_BORDER,
            });
        }
        Ok(())
    }

    /// Interior cell count available for room placement.
    pub fn usable_area(&self) -> i32 {
        let side = self.map_width - 2 * MAP_BORDER;
        side * side
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_are_valid() {
        assert_eq!(MapParams::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_inverted_room_bounds() {
        let params = MapParams {
            min_room_size: 8,
            max_room_size: 4,
            ..MapParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParamsError::RoomBoundsInverted { min: 8, max: 4 })
        ));
    }

    #[test]
    fn rejects_map_swallowed_by_border() {
        let params = MapParams {
            map_width: 2 * MAP_BORDER,
            ..MapParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParamsError::MapTooNarrow { .. })
        ));
    }

    #[test]
    fn rejects_zero_clearance() {
        let params = MapParams {
            min_clearance: 0,
            ..MapParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParamsError::ClearanceTooSmall { clearance: 0 })
        ));
    }

    #[test]
    fn rejects_room_wider_than_interior() {
        let params = MapParams {
            map_width: 10,
            min_room_size: 8,
            max_room_size: 9,
            ..MapParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParamsError::RoomCannotFit { .. })
        ));
    }

    #[test]
    fn usable_area_excludes_border() {
        let params = MapParams {
            map_width: 10,
            ..MapParams::default()
        };
        assert_eq!(params.usable_area(), 36);
    }
}
