//! The tile buffer every generator draws into

use super::{Rect, Tile};
use crate::config::GenConfig;
use crate::error::GenError;
use crate::rng::GenRng;

/// A rectangular tile map plus the parameters and RNG used to fill it
///
/// Tiles are stored row-major. Coordinates are `(x, y)` with `x` the column.
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
    /// Generation parameters, mutable between calls
    pub config: GenConfig,
    rng: GenRng,
    rooms: Vec<Rect>,
    corridors: Vec<Rect>,
}

impl Grid {
    /// Create a Void grid with default parameters and a freshly seeded RNG
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_rng(width, height, GenRng::from_entropy())
    }

    /// Create a Void grid whose generation is reproducible from `seed`
    pub fn with_seed(width: usize, height: usize, seed: u64) -> Self {
        Self::with_rng(width, height, GenRng::new(seed))
    }

    fn with_rng(width: usize, height: usize, rng: GenRng) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::Void; width * height],
            config: GenConfig::default(),
            rng,
            rooms: Vec::new(),
            corridors: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Seed of the grid's RNG
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Restart the RNG stream from `seed`
    pub fn reseed(&mut self, seed: u64) {
        self.rng = GenRng::new(seed);
    }

    pub(crate) fn rng_mut(&mut self) -> &mut GenRng {
        &mut self.rng
    }

    /// Reallocate the buffer as all Void and forget the recorded layout
    pub fn clear(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.tiles = vec![Tile::Void; width * height];
        self.rooms.clear();
        self.corridors.clear();
    }

    /// Clear at the current size; run before every generation attempt
    pub(crate) fn reset(&mut self) {
        self.clear(self.width, self.height);
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    /// Check whether `(x, y)` lies in the playable area inside the border
    pub fn in_placement_bounds(&self, x: i32, y: i32) -> bool {
        let b = self.config.border as i64;
        let (x, y) = (x as i64, y as i64);
        x >= b && y >= b && x < self.width as i64 - b && y < self.height as i64 - b
    }

    /// Read a tile inside the playable area
    pub fn read(&self, x: i32, y: i32) -> Result<Tile, GenError> {
        if !self.in_placement_bounds(x, y) {
            return Err(GenError::OutOfBounds { x, y });
        }
        self.index(x, y)
            .map(|i| self.tiles[i])
            .ok_or(GenError::OutOfBounds { x, y })
    }

    /// Write a tile
    ///
    /// Floor is only accepted inside the border. Other tiles may go anywhere
    /// in the buffer so walls can cap the playable area.
    pub fn write(&mut self, x: i32, y: i32, tile: Tile) -> Result<(), GenError> {
        if tile == Tile::Floor && !self.in_placement_bounds(x, y) {
            return Err(GenError::OutOfBounds { x, y });
        }
        let i = self.index(x, y).ok_or(GenError::OutOfBounds { x, y })?;
        self.tiles[i] = tile;
        Ok(())
    }

    /// All tiles, row-major
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// One row of tiles, or `None` past the last row
    pub fn row(&self, y: usize) -> Option<&[Tile]> {
        if y >= self.height {
            return None;
        }
        self.tiles.get(y * self.width..(y + 1) * self.width)
    }

    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    /// Coordinates of every Floor tile, row-major
    pub fn floor_cells(&self) -> Vec<(i32, i32)> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_floor())
            .map(|(i, _)| ((i % self.width) as i32, (i / self.width) as i32))
            .collect()
    }

    /// Smallest rectangle containing every Floor tile
    pub fn floor_bounds(&self) -> Option<Rect> {
        let cells = self.floor_cells();
        let (first_x, first_y) = *cells.first()?;
        let (mut min_x, mut max_x, mut min_y, mut max_y) = (first_x, first_x, first_y, first_y);
        for &(x, y) in &cells {
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
        Some(Rect::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
    }

    /// Rooms placed by the last successful room generation
    pub fn rooms(&self) -> &[Rect] {
        &self.rooms
    }

    /// Corridors carved by the last successful room generation
    pub fn corridors(&self) -> &[Rect] {
        &self.corridors
    }

    pub(crate) fn record_room(&mut self, room: Rect) {
        self.rooms.push(room);
    }

    pub(crate) fn record_corridor(&mut self, corridor: Rect) {
        self.corridors.push(corridor);
    }

    /// Text rendering, one character per tile and one line per row
    pub fn render(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in (0..self.height).filter_map(|y| self.row(y)) {
            out.extend(row.iter().map(Tile::symbol));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_void() {
        let grid = Grid::new(10, 6);
        assert_eq!(grid.width(), 10);
        assert_eq!(grid.height(), 6);
        assert_eq!(grid.count(Tile::Void), 60);
        assert!(grid.floor_bounds().is_none());
    }

    #[test]
    fn test_floor_write_inside_border() {
        let mut grid = Grid::new(10, 10);
        grid.write(2, 2, Tile::Floor).unwrap();
        grid.write(7, 7, Tile::Floor).unwrap();
        assert_eq!(grid.read(2, 2).unwrap(), Tile::Floor);
        assert_eq!(grid.read(7, 7).unwrap(), Tile::Floor);
    }

    #[test]
    fn test_floor_write_in_border_rejected() {
        let mut grid = Grid::new(10, 10);
        for (x, y) in [(0, 0), (1, 5), (8, 5), (5, 9), (9, 9)] {
            assert!(matches!(
                grid.write(x, y, Tile::Floor),
                Err(GenError::OutOfBounds { .. })
            ));
        }
        assert_eq!(grid.count(Tile::Void), 100);
    }

    #[test]
    fn test_non_floor_write_in_border_allowed() {
        let mut grid = Grid::new(10, 10);
        grid.write(0, 0, Tile::Wall).unwrap();
        grid.write(9, 1, Tile::PendingWall).unwrap();
        assert_eq!(grid.tiles()[0], Tile::Wall);
        assert_eq!(grid.row(1).unwrap()[9], Tile::PendingWall);
        // Still unreadable through the border check
        assert!(grid.read(0, 0).is_err());
    }

    #[test]
    fn test_outside_buffer_rejected_for_every_tile() {
        let mut grid = Grid::new(4, 4);
        assert!(grid.write(-1, 0, Tile::Wall).is_err());
        assert!(grid.write(0, 4, Tile::Void).is_err());
        assert!(grid.read(100, 100).is_err());
    }

    #[test]
    fn test_clear_resizes_and_forgets_layout() {
        let mut grid = Grid::new(10, 10);
        grid.write(3, 3, Tile::Floor).unwrap();
        grid.record_room(Rect::new(3, 3, 1, 1));
        grid.clear(12, 8);
        assert_eq!((grid.width(), grid.height()), (12, 8));
        assert_eq!(grid.count(Tile::Void), 96);
        assert!(grid.rooms().is_empty());
    }

    #[test]
    fn test_floor_bounds_and_render() {
        let mut grid = Grid::new(8, 6);
        grid.write(2, 2, Tile::Floor).unwrap();
        grid.write(4, 3, Tile::Floor).unwrap();
        assert_eq!(grid.floor_bounds(), Some(Rect::new(2, 2, 3, 2)));

        let text = grid.render();
        assert_eq!(text.lines().count(), 6);
        assert_eq!(text.lines().nth(2), Some("  .     "));
    }

    #[test]
    fn test_row_past_last_is_none() {
        let grid = Grid::new(8, 6);
        assert_eq!(grid.row(5).map(<[Tile]>::len), Some(8));
        assert!(grid.row(6).is_none());
        assert!(grid.row(usize::MAX).is_none());
    }

    #[test]
    fn test_seeded_grids_share_stream() {
        let mut a = Grid::with_seed(5, 5, 99);
        let mut b = Grid::with_seed(5, 5, 99);
        assert_eq!(a.seed(), 99);
        assert_eq!(a.rng_mut().below(1000), b.rng_mut().below(1000));
        b.reseed(100);
        assert_eq!(b.seed(), 100);
    }
}
