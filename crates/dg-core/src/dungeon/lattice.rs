//! Grid-aligned room generation
//!
//! Rooms are laid out on a coarse lattice whose cells are `max_room_width`
//! tiles wide. A self-avoiding random walk over the lattice decides which
//! cells hold rooms and which rooms are joined; consecutive cells of a walk
//! segment ("run") get a straight corridor between them. The walk may step
//! back onto a sparse part of its own path to close loops, and when it gets
//! stuck it jumps back to an earlier cell and starts a new run from there.

use log::warn;

use super::rect::strip_offset_range;
use super::retry::{self, Clock, Interrupt, RetryReason};
use super::{Direction, Grid, Rect, Tile};
use crate::error::{ConfigError, GenError};
use crate::rng::GenRng;

/// Lattice cell coordinate
type Cell = (i32, i32);

/// Room occupancy over the lattice
#[derive(Debug, Clone)]
struct Lattice {
    width: i32,
    height: i32,
    occupied: Vec<bool>,
    count: usize,
}

impl Lattice {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width: width as i32,
            height: height as i32,
            occupied: vec![false; width * height],
            count: 0,
        }
    }

    /// The outer ring never holds rooms
    fn is_border(&self, (x, y): Cell) -> bool {
        x <= 0 || y <= 0 || x >= self.width - 1 || y >= self.height - 1
    }

    fn is_occupied(&self, (x, y): Cell) -> bool {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return false;
        }
        self.occupied[(y * self.width + x) as usize]
    }

    /// Mark a cell; returns true if it was free
    fn occupy(&mut self, (x, y): Cell) -> bool {
        let i = (y * self.width + x) as usize;
        let fresh = !self.occupied[i];
        self.occupied[i] = true;
        if fresh {
            self.count += 1;
        }
        fresh
    }

    fn neighbours((x, y): Cell) -> impl Iterator<Item = Cell> {
        Direction::ALL.into_iter().map(move |d| {
            let (dx, dy) = d.delta();
            (x + dx, y + dy)
        })
    }

    fn occupied_neighbours(&self, cell: Cell) -> usize {
        Self::neighbours(cell)
            .filter(|&n| self.is_occupied(n))
            .count()
    }

    fn has_free_neighbour(&self, cell: Cell) -> bool {
        Self::neighbours(cell).any(|n| !self.is_border(n) && !self.is_occupied(n))
    }

    fn occupied_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| (x, y)))
            .filter(|&c| self.is_occupied(c))
    }
}

/// Result of the lattice walk: occupancy plus the runs to connect
#[derive(Debug, Clone)]
struct LatticePlan {
    lattice: Lattice,
    runs: Vec<Vec<Cell>>,
}

/// Walk the lattice until `room_count` cells are occupied
fn plan_lattice(
    rng: &mut GenRng,
    width: usize,
    height: usize,
    room_count: usize,
    clock: &Clock,
) -> Result<LatticePlan, Interrupt> {
    let mut lattice = Lattice::new(width, height);
    let mut cursor = (lattice.width / 2, lattice.height / 2);
    lattice.occupy(cursor);
    let mut runs = vec![vec![cursor]];

    while lattice.count < room_count {
        clock.check()?;

        let (dx, dy) = Direction::random(rng).delta();
        cursor = (cursor.0 + dx, cursor.1 + dy);

        let crowded = lattice.is_occupied(cursor) && lattice.occupied_neighbours(cursor) >= 2;
        if lattice.is_border(cursor) || crowded {
            cursor = backtrack_target(&lattice, rng, room_count)?;
            runs.push(vec![cursor]);
            continue;
        }

        lattice.occupy(cursor);
        if let Some(run) = runs.last_mut() {
            run.push(cursor);
        }
    }

    Ok(LatticePlan { lattice, runs })
}

/// Pick a visited cell with at most two occupied neighbours to resume from
///
/// Only cells that still border free space are useful: the walk can never
/// reach a free cell through a crowded one, so when none exist the attempt
/// is dead and is restarted.
fn backtrack_target(
    lattice: &Lattice,
    rng: &mut GenRng,
    requested: usize,
) -> Result<Cell, Interrupt> {
    let candidates: Vec<Cell> = lattice
        .occupied_cells()
        .filter(|&c| lattice.occupied_neighbours(c) <= 2)
        .collect();
    if candidates.is_empty() {
        return Err(GenError::NotEnoughSpace {
            requested,
            capacity: lattice_capacity(lattice.width as usize, lattice.height as usize),
        }
        .into());
    }
    let frontier: Vec<Cell> = candidates
        .into_iter()
        .filter(|&c| lattice.has_free_neighbour(c))
        .collect();
    rng.choose(&frontier)
        .copied()
        .ok_or(Interrupt::Retry(RetryReason::Enclosed))
}

fn lattice_capacity(width: usize, height: usize) -> usize {
    width.saturating_sub(2) * height.saturating_sub(2)
}

impl Grid {
    /// Lattice dimensions for the current grid size and room size
    fn lattice_size(&self) -> (usize, usize) {
        let cell = self.config.max_room_width.max(1);
        let inner = |dim: usize| dim.saturating_sub(2 * self.config.border) / cell;
        (inner(self.width()), inner(self.height()))
    }

    /// Number of rooms the lattice can hold, excluding its outer ring
    pub fn lattice_capacity(&self) -> usize {
        let (w, h) = self.lattice_size();
        lattice_capacity(w, h)
    }

    /// Fill the grid with `room_count` equal rooms aligned to a lattice
    ///
    /// All rooms are `max_room_width` square. Fails with `NotEnoughSpace`
    /// before touching the grid if the lattice cannot hold that many rooms.
    pub fn generate_grid_rooms(&mut self, room_count: usize) -> Result<(), GenError> {
        self.config.validate()?;
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

        let (lw, lh) = self.lattice_size();
        retry::run(self, "grid rooms", |grid, clock| {
            let plan = plan_lattice(grid.rng_mut(), lw, lh, room_count, clock)?;
            grid.materialize_lattice(&plan);
            Ok(())
        })
    }

    fn materialize_lattice(&mut self, plan: &LatticePlan) {
        let size = self.config.max_room_width as i32;
        let stride = size + self.config.wall_thickness as i32;
        let corridor = self.config.corridor_width as i32;
        let (lo, hi) = strip_offset_range(size, corridor);
        let mut drawn = vec![false; plan.lattice.occupied.len()];
        let mut clipped = 0;

        for run in &plan.runs {
            for (i, &(lx, ly)) in run.iter().enumerate() {
                let idx = (ly * plan.lattice.width + lx) as usize;
                if !drawn[idx] {
                    drawn[idx] = true;
                    let room = Rect::centered(lx * stride, ly * stride, size, size);
                    clipped += self.carve_floor(room);
                    self.record_room(room);
                }
                if i == 0 {
                    continue;
                }

                let (px, py) = run[i - 1];
                let (ax, ay) = (px * stride, py * stride);
                let (bx, by) = (lx * stride, ly * stride);
                let offset = if self.config.random_corridor_offset {
                    self.rng_mut().between(lo, hi)
                } else {
                    0
                };
                let hall = if ay == by {
                    Rect::new(ax.min(bx), ay - corridor / 2 + offset, (ax - bx).abs(), corridor)
                } else {
                    Rect::new(ax - corridor / 2 + offset, ay.min(by), corridor, (ay - by).abs())
                };
                clipped += self.carve_floor(hall);
                self.record_corridor(hall);
            }
        }

        if clipped > 0 {
            warn!("grid rooms: {clipped} floor tiles fell outside the playable area");
        }
    }

    /// Write Floor over a rectangle, skipping cells outside the border
    ///
    /// Returns how many cells were skipped.
    pub(crate) fn carve_floor(&mut self, rect: Rect) -> usize {
        rect.cells()
            .filter(|&(x, y)| self.write(x, y, Tile::Floor).is_err())
            .count()
    }
}
