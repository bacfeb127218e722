//! Dungeon grid and generators
//!
//! Contains the tile buffer, the three layout generators and the
//! post-processing passes that turn raw floor into walled rooms.

mod freeform;
mod grid;
mod lattice;
mod random_walk;
mod rect;
mod retry;
mod tile;
mod topology;

pub use grid::Grid;
pub use rect::{Direction, Rect};
pub use tile::Tile;
