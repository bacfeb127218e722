//! Rectangles and cardinal directions used for room and corridor placement

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::rng::GenRng;

/// An axis-aligned rectangle of tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Left x coordinate
    pub x: i32,
    /// Top y coordinate
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of the given size whose centre is `(cx, cy)`
    ///
    /// For even sizes the centre is the first cell of the upper half.
    pub fn centered(cx: i32, cy: i32, width: i32, height: i32) -> Self {
        Self::new(cx - width / 2, cy - height / 2, width, height)
    }

    /// One past the right edge
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// One past the bottom edge
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    pub fn area(&self) -> usize {
        (self.width.max(0) * self.height.max(0)) as usize
    }

    /// The rectangle grown by `margin` on every side
    pub fn expand(&self, margin: i32) -> Rect {
        Rect::new(
            self.x - margin,
            self.y - margin,
            self.width + 2 * margin,
            self.height + 2 * margin,
        )
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check if this rectangle shares any cell with another
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.right() <= other.x
            || other.right() <= self.x
            || self.bottom() <= other.y
            || other.bottom() <= self.y)
    }

    /// Every cell, row-major
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + use<> {
        let Rect {
            x,
            y,
            width,
            height,
        } = *self;
        (y..y + height).flat_map(move |cy| (x..x + width).map(move |cx| (cx, cy)))
    }
}

/// Range of sideways offsets that keep a `strip`-wide corridor, centred on
/// the same line as a `span`-wide room, entirely inside that room
pub(crate) fn strip_offset_range(span: i32, strip: i32) -> (i32, i32) {
    (strip / 2 - span / 2, (span - span / 2) - (strip - strip / 2))
}

/// Cardinal step direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Pick one of the four directions uniformly
    pub fn random(rng: &mut GenRng) -> Self {
        Self::ALL[rng.below(4) as usize]
    }

    /// Unit step `(dx, dy)`; y grows downward
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }

    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}
