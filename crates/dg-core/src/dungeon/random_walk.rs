//! Random-walk generation
//!
//! A cursor wanders from the centre of the grid, stamping a square brush of
//! floor at every step. The result looks chaotic but every floor tile is
//! connected. A finished walk must cover a reasonable part of the grid and
//! must not be one unbroken run along its middle scanline, otherwise the
//! whole attempt is discarded.

use super::retry::{self, Clock, Interrupt, RetryReason};
use super::{Direction, Grid, Rect, Tile};
use crate::error::{ConfigError, GenError};

/// Extent of the cursor positions visited by a walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WalkBounds {
    min_x: i32,
    max_x: i32,
    min_y: i32,
    max_y: i32,
}

impl WalkBounds {
    fn empty(width: i32, height: i32) -> Self {
        Self {
            min_x: width,
            max_x: 0,
            min_y: height,
            max_y: 0,
        }
    }

    fn include(&mut self, x: i32, y: i32) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
    }

    /// At least half the grid wide or half the grid tall
    fn spans_half(&self, width: i32, height: i32) -> bool {
        self.max_x - self.min_x >= width / 2 || self.max_y - self.min_y >= height / 2
    }
}

impl Grid {
    /// Fill the grid by random walk until `tile_budget` floor tiles exist
    ///
    /// Keep the budget well below the playable area or generation may run
    /// into the timeout.
    pub fn generate_random_walk(&mut self, tile_budget: usize) -> Result<(), GenError> {
        self.config.validate()?;
        if tile_budget == 0 {
            return Err(ConfigError::EmptyRequest {
                what: "tile budget",
            }
            .into());
        }
        retry::run(self, "random walk", |grid, clock| {
            grid.random_walk_attempt(tile_budget, clock)
        })
    }

    fn random_walk_attempt(&mut self, tile_budget: usize, clock: &Clock) -> Result<(), Interrupt> {
        let (w, h) = (self.width() as i32, self.height() as i32);
        let brush = self.config.corridor_width as i32;
        let (cx, cy) = (w / 2, h / 2);
        let (mut x, mut y) = (cx, cy);
        let mut bounds = WalkBounds::empty(w, h);
        let mut placed = 0;

        while placed < tile_budget {
            clock.check()?;

            let (dx, dy) = Direction::random(self.rng_mut()).delta();
            x += dx;
            y += dy;

            let block = Rect::new(x - brush / 2, y - brush / 2, brush, brush);
            if !block.cells().all(|(bx, by)| self.in_placement_bounds(bx, by)) {
                x = cx;
                y = cy;
                continue;
            }
            for (bx, by) in block.cells() {
                if self.read(bx, by)? == Tile::Void {
                    self.write(bx, by, Tile::Floor)?;
                    placed += 1;
                }
            }
            bounds.include(x, y);
        }

        if !bounds.spans_half(w, h) {
            return Err(Interrupt::Retry(RetryReason::BoundsTooSmall));
        }
        if !self.has_gap_on_midline(&bounds) {
            return Err(Interrupt::Retry(RetryReason::NoConvexity));
        }
        Ok(())
    }

    /// Scan the row through the middle of the walk for floor, a void gap,
    /// then floor again
    fn has_gap_on_midline(&self, bounds: &WalkBounds) -> bool {
        let y = bounds.min_y + (bounds.max_y - bounds.min_y) / 2;
        let mut found_floor = false;
        let mut in_gap = false;
        for x in bounds.min_x..bounds.max_x {
            match self.read(x, y) {
                Ok(Tile::Floor) => {
                    if found_floor && in_gap {
                        return true;
                    }
                    found_floor = true;
                }
                Ok(Tile::Void) => {
                    if found_floor {
                        in_gap = true;
                    }
                }
                _ => {}
            }
        }
        false
    }
}
