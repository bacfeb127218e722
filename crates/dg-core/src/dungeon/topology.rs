//! Post-processing passes over a generated grid
//!
//! These operate purely on the grid's current tiles and are meant to be run
//! by the caller once a generator has returned.

use std::collections::VecDeque;

use super::{Grid, Tile};

const NEIGHBOURS_8: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const NEIGHBOURS_4: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

impl Grid {
    /// Surround every Floor tile with Wall out to `wall_thickness`
    ///
    /// Only Void becomes Wall, and every PendingWall is settled as Wall.
    /// The border is lifted while this runs so walls may reach the edge.
    pub fn thicken_walls(&mut self) {
        let t = self.config.wall_thickness as i32;
        let border = std::mem::replace(&mut self.config.border, 0);
        let (w, h) = (self.width() as i32, self.height() as i32);

        for y in 0..h {
            for x in 0..w {
                match self.read(x, y) {
                    Ok(Tile::Floor) => {
                        for dy in -t..=t {
                            for dx in -t..=t {
                                if let Ok(Tile::Void) = self.read(x + dx, y + dy) {
                                    let _ = self.write(x + dx, y + dy, Tile::Wall);
                                }
                            }
                        }
                    }
                    Ok(Tile::PendingWall) => {
                        let _ = self.write(x, y, Tile::Wall);
                    }
                    _ => {}
                }
            }
        }

        self.config.border = border;
    }

    /// Turn every Wall with at least `min_floor_neighbours` Floor tiles among
    /// its 8 neighbours into Floor
    ///
    /// One pass; counts come from the grid as it was before the pass. Run it
    /// repeatedly to erode thin wall fragments.
    pub fn prune_walls(&mut self, min_floor_neighbours: usize) -> usize {
        let (w, h) = (self.width() as i32, self.height() as i32);
        let mut open = Vec::new();

        for y in 0..h {
            for x in 0..w {
                if !matches!(self.read(x, y), Ok(Tile::Wall)) {
                    continue;
                }
                let floors = NEIGHBOURS_8
                    .iter()
                    .filter(|(dx, dy)| matches!(self.read(x + dx, y + dy), Ok(Tile::Floor)))
                    .count();
                if floors >= min_floor_neighbours {
                    open.push((x, y));
                }
            }
        }

        // Every candidate passed `read`, so it lies inside the border
        for &(x, y) in &open {
            let _ = self.write(x, y, Tile::Floor);
        }
        open.len()
    }

    /// The 4-connected Floor regions, each as a list of coordinates
    pub fn floor_regions(&self) -> Vec<Vec<(i32, i32)>> {
        let (w, h) = (self.width(), self.height());
        let mut seen = vec![false; w * h];
        let mut regions = Vec::new();

        for (x, y) in self.floor_cells() {
            let start = y as usize * w + x as usize;
            if seen[start] {
                continue;
            }
            seen[start] = true;
            let mut region = Vec::new();
            let mut queue = VecDeque::from([(x, y)]);
            while let Some((cx, cy)) = queue.pop_front() {
                region.push((cx, cy));
                for (dx, dy) in NEIGHBOURS_4 {
                    let (nx, ny) = (cx + dx, cy + dy);
                    if nx < 0 || ny < 0 || nx as usize >= w || ny as usize >= h {
                        continue;
                    }
                    let i = ny as usize * w + nx as usize;
                    if !seen[i] && self.tiles()[i].is_floor() {
                        seen[i] = true;
                        queue.push_back((nx, ny));
                    }
                }
            }
            regions.push(region);
        }
        regions
    }

    /// Clear every Floor region smaller than `min_size` back to Void
    ///
    /// Returns the number of regions removed.
    pub fn remove_islands(&mut self, min_size: usize) -> usize {
        let mut removed = 0;
        for region in self.floor_regions() {
            if region.len() >= min_size {
                continue;
            }
            for (x, y) in region {
                let _ = self.write(x, y, Tile::Void);
            }
            removed += 1;
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::Rect;

    fn fill(grid: &mut Grid, rect: Rect, tile: Tile) {
        for (x, y) in rect.cells() {
            grid.write(x, y, tile).unwrap();
        }
    }

    #[test]
    fn test_thicken_surrounds_floor() {
        let mut grid = Grid::new(12, 12);
        grid.write(5, 5, Tile::Floor).unwrap();
        grid.thicken_walls();

        assert_eq!(grid.count(Tile::Floor), 1);
        assert_eq!(grid.count(Tile::Wall), 24);
        for (x, y) in Rect::new(3, 3, 5, 5).cells() {
            if (x, y) != (5, 5) {
                assert_eq!(grid.read(x, y).unwrap(), Tile::Wall);
            }
        }
        assert_eq!(grid.config.border, 2);
    }

    #[test]
    fn test_thicken_reaches_buffer_edge() {
        let mut grid = Grid::new(8, 8);
        grid.write(2, 2, Tile::Floor).unwrap();
        grid.thicken_walls();
        assert_eq!(grid.tiles()[0], Tile::Wall);
        assert_eq!(grid.row(4).unwrap()[4], Tile::Wall);
    }

    #[test]
    fn test_thicken_settles_pending_walls() {
        let mut grid = Grid::new(10, 10);
        grid.write(0, 9, Tile::PendingWall).unwrap();
        grid.write(6, 6, Tile::PendingWall).unwrap();
        grid.thicken_walls();
        assert_eq!(grid.count(Tile::PendingWall), 0);
        assert_eq!(grid.count(Tile::Wall), 2);
    }

    #[test]
    fn test_thicken_is_idempotent() {
        let mut grid = Grid::new(20, 20);
        fill(&mut grid, Rect::new(4, 4, 5, 3), Tile::Floor);
        fill(&mut grid, Rect::new(12, 10, 2, 6), Tile::Floor);
        grid.thicken_walls();
        let once = grid.tiles().to_vec();
        grid.thicken_walls();
        assert_eq!(grid.tiles(), &once[..]);
    }

    #[test]
    fn test_prune_respects_threshold() {
        let mut grid = Grid::new(10, 10);
        // A lone wall pillar inside a floor block has 8 floor neighbours
        fill(&mut grid, Rect::new(3, 3, 3, 3), Tile::Floor);
        grid.write(4, 4, Tile::Wall).unwrap();
        // A wall with a single floor neighbour
        grid.write(7, 7, Tile::Floor).unwrap();
        grid.write(7, 6, Tile::Wall).unwrap();

        assert_eq!(grid.prune_walls(9), 0);
        assert_eq!(grid.prune_walls(5), 1);
        assert_eq!(grid.read(4, 4).unwrap(), Tile::Floor);
        assert_eq!(grid.read(7, 6).unwrap(), Tile::Wall);
    }

    #[test]
    fn test_prune_uses_pre_pass_counts() {
        let mut grid = Grid::new(12, 8);
        // Two wall cells side by side, each with 3 floor neighbours above
        fill(&mut grid, Rect::new(3, 3, 4, 1), Tile::Floor);
        grid.write(4, 4, Tile::Wall).unwrap();
        grid.write(5, 4, Tile::Wall).unwrap();
        assert_eq!(grid.prune_walls(3), 2);
        // A neighbour opened in this pass must not count toward this pass
        let mut grid = Grid::new(12, 8);
        fill(&mut grid, Rect::new(3, 3, 3, 1), Tile::Floor);
        grid.write(4, 4, Tile::Wall).unwrap();
        grid.write(4, 5, Tile::Wall).unwrap();
        assert_eq!(grid.prune_walls(3), 1);
        assert_eq!(grid.read(4, 5).unwrap(), Tile::Wall);
    }

    #[test]
    fn test_prune_stable_grid_is_idempotent() {
        let mut grid = Grid::new(16, 16);
        fill(&mut grid, Rect::new(4, 4, 6, 6), Tile::Floor);
        grid.thicken_walls();
        while grid.prune_walls(5) > 0 {}
        let stable = grid.tiles().to_vec();
        assert_eq!(grid.prune_walls(5), 0);
        assert_eq!(grid.tiles(), &stable[..]);
    }

    #[test]
    fn test_floor_regions_and_islands() {
        let mut grid = Grid::new(20, 12);
        fill(&mut grid, Rect::new(2, 2, 6, 6), Tile::Floor);
        fill(&mut grid, Rect::new(12, 2, 2, 2), Tile::Floor);
        // Diagonal contact does not join regions
        grid.write(8, 8, Tile::Floor).unwrap();

        let mut sizes: Vec<usize> = grid.floor_regions().iter().map(Vec::len).collect();
        sizes.sort_unstable();
        assert_eq!(sizes, vec![1, 4, 36]);

        assert_eq!(grid.remove_islands(5), 2);
        assert_eq!(grid.count(Tile::Floor), 36);
        assert_eq!(grid.floor_regions().len(), 1);
        assert_eq!(grid.remove_islands(5), 0);
    }
}
