//! Freeform room generation
//!
//! Rooms of random size are chained together: each new room is placed beside
//! the current anchor room, separated by a wall-thick gap that a short
//! corridor bridges. When a room does not fit, the anchor jumps to a random
//! room placed earlier and the slot is tried again.

use log::debug;

use super::rect::strip_offset_range;
use super::retry::{self, Clock, Interrupt, RetryReason};
use super::{Direction, Grid, Rect, Tile};
use crate::error::{ConfigError, GenError};

/// Perimeter cells reserved for walls while an attempt is in progress
#[derive(Debug, Default)]
struct PendingPerimeter {
    cells: Vec<(i32, i32)>,
}

impl PendingPerimeter {
    fn reserve(&mut self, x: i32, y: i32) {
        self.cells.push((x, y));
    }

    /// Turn every reserved cell that is still Void into Wall
    fn commit(self, grid: &mut Grid) -> Result<(), GenError> {
        for (x, y) in self.cells {
            if grid.read(x, y)? == Tile::Void {
                grid.write(x, y, Tile::Wall)?;
            }
        }
        Ok(())
    }
}

impl Grid {
    /// Fill the grid with `room_count` rooms of random size joined by corridors
    ///
    /// Room sizes are drawn from the `min_room_*`/`max_room_*` ranges. The
    /// room count is bounded by the same capacity as
    /// [`generate_grid_rooms`](Grid::generate_grid_rooms).
    pub fn generate_freeform_rooms(&mut self, room_count: usize) -> Result<(), GenError> {
        self.config.validate()?;
        self.config.validate_room_fit(self.width(), self.height())?;
        if room_count == 0 {
            return Err(ConfigError::EmptyRequest { what: "room count" }.into());
        }
        let capacity = self.lattice_capacity();
        if room_count > capacity {
            return Err(GenError::NotEnoughSpace {
                requested: room_count,
                capacity,
            });
        }

        retry::run(self, "freeform rooms", |grid, clock| {
            grid.freeform_attempt(room_count, clock)
        })
    }

    fn freeform_attempt(&mut self, room_count: usize, clock: &Clock) -> Result<(), Interrupt> {
        let t = self.config.wall_thickness as i32;
        let mut pending = PendingPerimeter::default();

        let (w, h) = self.random_room_size();
        let first = Rect::centered(self.width() as i32 / 2, self.height() as i32 / 2, w, h);
        if let Err(err) = self.place_room(first, &mut pending) {
            debug!("freeform rooms: first room {first:?} rejected: {err}");
            return Err(Interrupt::Retry(RetryReason::FirstRoomBlocked));
        }
        self.record_room(first);

        let mut history = vec![first];
        let mut anchor = first;

        while history.len() < room_count {
            clock.check()?;

            let size = self.random_room_size();
            let dir = Direction::random(self.rng_mut());
            let (room, corridor) = self.beside(anchor, size, dir, t);

            if let Err(err) = self.place_room(room, &mut pending) {
                if let Some(&prev) = self.rng_mut().choose(&history) {
                    debug!(
                        "freeform rooms: {err}, backing up to room at ({}, {})",
                        prev.x, prev.y
                    );
                    anchor = prev;
                }
                continue;
            }

            self.carve_floor(corridor);
            self.record_room(room);
            self.record_corridor(corridor);
            history.push(room);
            anchor = room;
        }

        pending.commit(self)?;
        Ok(())
    }

    fn random_room_size(&mut self) -> (i32, i32) {
        let c = &self.config;
        let (min_w, max_w) = (c.min_room_width as i32, c.max_room_width as i32);
        let (min_h, max_h) = (c.min_room_height as i32, c.max_room_height as i32);
        let rng = self.rng_mut();
        (rng.between(min_w, max_w), rng.between(min_h, max_h))
    }

    /// A `size` room on the `dir` side of `anchor`, plus the corridor that
    /// fills the `gap` between them
    fn beside(
        &mut self,
        anchor: Rect,
        (w, h): (i32, i32),
        dir: Direction,
        gap: i32,
    ) -> (Rect, Rect) {
        let cw = self.config.corridor_width as i32;
        let (ax, ay) = anchor.center();
        let span = if dir.is_horizontal() {
            anchor.height.min(h)
        } else {
            anchor.width.min(w)
        };
        let offset = if self.config.random_corridor_offset {
            let (lo, hi) = strip_offset_range(span, cw);
            self.rng_mut().between(lo, hi)
        } else {
            0
        };
        let across_x = ax - cw / 2 + offset;
        let across_y = ay - cw / 2 + offset;

        match dir {
            Direction::Left => (
                Rect::new(anchor.x - gap - w, ay - h / 2, w, h),
                Rect::new(anchor.x - gap, across_y, gap, cw),
            ),
            Direction::Right => (
                Rect::new(anchor.right() + gap, ay - h / 2, w, h),
                Rect::new(anchor.right(), across_y, gap, cw),
            ),
            Direction::Up => (
                Rect::new(ax - w / 2, anchor.y - gap - h, w, h),
                Rect::new(across_x, anchor.y - gap, cw, gap),
            ),
            Direction::Down => (
                Rect::new(ax - w / 2, anchor.bottom() + gap, w, h),
                Rect::new(across_x, anchor.bottom(), cw, gap),
            ),
        }
    }

    /// Carve a room and reserve its wall ring
    ///
    /// The room together with a `wall_thickness` ring must be readable and
    /// free of Floor; otherwise nothing is written.
    fn place_room(&mut self, room: Rect, pending: &mut PendingPerimeter) -> Result<(), GenError> {
        let footprint = room.expand(self.config.wall_thickness as i32);
        for (x, y) in footprint.cells() {
            if self.read(x, y)? == Tile::Floor {
                return Err(GenError::FloorCollision { x, y });
            }
        }

        for (x, y) in footprint.cells() {
            if room.contains(x, y) {
                self.write(x, y, Tile::Floor)?;
            } else if self.read(x, y)? == Tile::Void {
                pending.reserve(x, y);
            }
        }
        Ok(())
    }
}
