//! Error types for grid access and map generation

use std::time::Duration;

use thiserror::Error;

/// Errors returned by grid access and the generators
#[derive(Error, Debug)]
pub enum GenError {
    /// A Floor tile was written outside the playable area, or a coordinate
    /// fell outside the buffer.
    #[error("coordinate ({x}, {y}) out of bounds")]
    OutOfBounds { x: i32, y: i32 },

    /// The requested room count exceeds what the lattice can hold.
    #[error("not enough space to generate dungeon: {requested} rooms requested, capacity is {capacity}")]
    NotEnoughSpace { requested: usize, capacity: usize },

    /// A room footprint overlapped existing floor. Freeform placement
    /// recovers from this internally.
    #[error("floor tile already placed at ({x}, {y})")]
    FloorCollision { x: i32, y: i32 },

    #[error("took too long to generate dungeon: gave up after {attempts} attempts in {elapsed:?}")]
    Timeout { attempts: u32, elapsed: Duration },

    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Malformed generation parameters
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("min_room_width {min} exceeds max_room_width {max}")]
    RoomWidthRange { min: usize, max: usize },

    #[error("min_room_height {min} exceeds max_room_height {max}")]
    RoomHeightRange { min: usize, max: usize },

    #[error("room dimensions must be non-zero")]
    ZeroRoomSize,

    #[error("corridor_width must be non-zero")]
    ZeroCorridorWidth,

    #[error("corridor_width {corridor} does not fit in a room span of {room}")]
    CorridorWiderThanRoom { corridor: usize, room: usize },

    #[error("retry_after {retry:?} exceeds fail_after {fail:?}")]
    RetryAfterFailure { retry: Duration, fail: Duration },

    #[error("{axis} room footprint of {footprint} tiles exceeds the playable {playable}")]
    RoomLargerThanGrid {
        axis: &'static str,
        footprint: usize,
        playable: usize,
    },

    #[error("max_attempts must be non-zero")]
    ZeroAttempts,

    #[error("{what} must be non-zero")]
    EmptyRequest { what: &'static str },

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = GenError::NotEnoughSpace {
            requested: 26,
            capacity: 25,
        };
        assert_eq!(
            err.to_string(),
            "not enough space to generate dungeon: 26 rooms requested, capacity is 25"
        );

        let err = GenError::from(ConfigError::ZeroCorridorWidth);
        assert!(matches!(err, GenError::InvalidConfig(_)));
        assert_eq!(
            err.to_string(),
            "invalid configuration: corridor_width must be non-zero"
        );
    }
}
