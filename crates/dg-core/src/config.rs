//! Generation parameters
//!
//! `GenConfig` is owned by the caller through `Grid::config` and read by the
//! generators. Partial JSON documents are accepted; missing fields keep
//! their defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default margin excluded from floor placement
pub const DEFAULT_BORDER: usize = 2;
/// Default wall thickness
pub const DEFAULT_WALL_THICKNESS: usize = 2;
/// Default corridor cross-section
pub const DEFAULT_CORRIDOR_WIDTH: usize = 2;
/// Default smallest room side
pub const DEFAULT_MIN_ROOM_SIZE: usize = 4;
/// Default largest room side (also the lattice cell size)
pub const DEFAULT_MAX_ROOM_SIZE: usize = 8;
/// Default island threshold
pub const DEFAULT_MIN_ISLAND_SIZE: usize = 26;

/// Parameters shared by every generation strategy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenConfig {
    /// Margin of cells where Floor may never be placed
    pub border: usize,
    /// Radius used by wall thickening and the gap between freeform rooms
    pub wall_thickness: usize,
    /// Corridor cross-section and random-walk brush size
    pub corridor_width: usize,
    pub min_room_width: usize,
    pub min_room_height: usize,
    /// Upper bound for freeform rooms; lattice cell size for grid rooms
    pub max_room_width: usize,
    pub max_room_height: usize,
    /// Jitter corridors sideways within the rooms they join
    pub random_corridor_offset: bool,
    /// Restart an attempt once it has run this long
    #[serde(rename = "retry_after_ms", with = "millis")]
    pub retry_after: Duration,
    /// Give up once a generation call has run this long
    #[serde(rename = "fail_after_ms", with = "millis")]
    pub fail_after: Duration,
    /// Give up after this many attempts, whatever the clock says
    pub max_attempts: u32,
    /// Threshold used by island cleanup pipelines
    pub min_island_size: usize,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            border: DEFAULT_BORDER,
            wall_thickness: DEFAULT_WALL_THICKNESS,
            corridor_width: DEFAULT_CORRIDOR_WIDTH,
            min_room_width: DEFAULT_MIN_ROOM_SIZE,
            min_room_height: DEFAULT_MIN_ROOM_SIZE,
            max_room_width: DEFAULT_MAX_ROOM_SIZE,
            max_room_height: DEFAULT_MAX_ROOM_SIZE,
            random_corridor_offset: false,
            retry_after: Duration::from_millis(250),
            fail_after: Duration::from_secs(2),
            max_attempts: 10_000,
            min_island_size: DEFAULT_MIN_ISLAND_SIZE,
        }
    }
}

impl GenConfig {
    /// Parse a JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GenConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject parameter combinations that would produce degenerate geometry
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_room_width == 0
            || self.min_room_height == 0
            || self.max_room_width == 0
            || self.max_room_height == 0
        {
            return Err(ConfigError::ZeroRoomSize);
        }
        if self.min_room_width > self.max_room_width {
            return Err(ConfigError::RoomWidthRange {
                min: self.min_room_width,
                max: self.max_room_width,
            });
        }
        if self.min_room_height > self.max_room_height {
            return Err(ConfigError::RoomHeightRange {
                min: self.min_room_height,
                max: self.max_room_height,
            });
        }
        if self.corridor_width == 0 {
            return Err(ConfigError::ZeroCorridorWidth);
        }
        let narrowest = self.min_room_width.min(self.min_room_height);
        if self.corridor_width > narrowest {
            return Err(ConfigError::CorridorWiderThanRoom {
                corridor: self.corridor_width,
                room: narrowest,
            });
        }
        if self.retry_after > self.fail_after {
            return Err(ConfigError::RetryAfterFailure {
                retry: self.retry_after,
                fail: self.fail_after,
            });
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        Ok(())
    }

    /// Check that the largest room plus its wall ring fits inside the
    /// playable area of a `width` x `height` grid
    pub fn validate_room_fit(&self, width: usize, height: usize) -> Result<(), ConfigError> {
        let ring = 2 * self.wall_thickness;
        let margin = 2 * self.border;
        for (axis, room, dim) in [
            ("width", self.max_room_width, width),
            ("height", self.max_room_height, height),
        ] {
            let playable = dim.saturating_sub(margin);
            if room + ring > playable {
                return Err(ConfigError::RoomLargerThanGrid {
                    axis,
                    footprint: room + ring,
                    playable,
                });
            }
        }
        Ok(())
    }
}

/// Durations as integer milliseconds
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
