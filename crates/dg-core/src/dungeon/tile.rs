//! Tile occupancy states

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Occupancy state of one grid cell
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Tile {
    /// Unused space
    #[default]
    Void = 0,
    Wall = 1,
    /// Reserved room perimeter; normalised to `Wall` by `Grid::thicken_walls`
    PendingWall = 2,
    /// Walkable
    Floor = 3,
}

impl Tile {
    /// Check if this is walkable
    pub const fn is_floor(&self) -> bool {
        matches!(self, Tile::Floor)
    }

    /// Check if this is either wall state
    pub const fn is_wall(&self) -> bool {
        matches!(self, Tile::Wall | Tile::PendingWall)
    }

    /// Get the display character for this tile
    pub const fn symbol(&self) -> char {
        match self {
            Tile::Void => ' ',
            Tile::Wall => '#',
            Tile::PendingWall => '+',
            Tile::Floor => '.',
        }
    }
}
