//! dg-core: Procedural dungeon tile-grid generation
//!
//! A [`Grid`] is filled by one of three generators (random walk, lattice
//! rooms, freeform rooms) and then shaped by the topology passes
//! ([`Grid::thicken_walls`], [`Grid::prune_walls`], [`Grid::remove_islands`]).
//! Every generator retries whole attempts under a time budget and reports
//! failure through [`GenError`].

pub mod config;
pub mod dungeon;
pub mod error;
pub mod rng;

pub use config::GenConfig;
pub use dungeon::{Direction, Grid, Rect, Tile};
pub use error::{ConfigError, GenError};
pub use rng::GenRng;
