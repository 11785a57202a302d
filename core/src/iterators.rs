//! Tile Iterators

#![allow(dead_code)]

use crate::common::*;
use crate::geometry::{Bounds2i, Point2i};

/// Iterates over the tiles of an image in an outward spiral starting at the
/// centre, so that progressive previews refine the perceptually important
/// middle of the image first.
pub struct BlockSpiral {
    /// Image resolution in pixels.
    resolution: Point2i,

    /// Tile size in pixels.
    block_size: Point2i,

    /// Number of tiles in x and y.
    num_blocks: Point2i,

    /// Current tile position in tile coordinates, relative to the centre.
    position: Point2i,

    /// Current movement direction (index into the direction table).
    direction: usize,

    /// Remaining steps before the next turn.
    steps_left: i32,

    /// Length of the current run of steps.
    run_length: i32,

    /// Whether the run length grows after the next turn.
    grow_on_turn: bool,

    /// Number of tiles produced so far.
    produced: usize,
}

const DIRECTIONS: [Point2i; 4] = [
    Point2i { x: 1, y: 0 },
    Point2i { x: 0, y: 1 },
    Point2i { x: -1, y: 0 },
    Point2i { x: 0, y: -1 },
];

impl BlockSpiral {
    /// Create a new `BlockSpiral`.
    ///
    /// * `resolution` - Image resolution in pixels.
    /// * `block_size` - Tile size in pixels.
    pub fn new(resolution: Point2i, block_size: Point2i) -> Self {
        let num_blocks = Point2i::new(
            (resolution.x + block_size.x - 1) / block_size.x,
            (resolution.y + block_size.y - 1) / block_size.y,
        );
        Self {
            resolution,
            block_size,
            num_blocks,
            position: Point2i::zero(),
            direction: 0,
            steps_left: 1,
            run_length: 1,
            grow_on_turn: false,
            produced: 0,
        }
    }

    /// Returns the total number of tiles the spiral will produce.
    pub fn total_blocks(&self) -> usize {
        (self.num_blocks.x as usize) * (self.num_blocks.y as usize)
    }

    /// Maps a tile position relative to the centre to its pixel rectangle,
    /// or `None` if the tile lies outside the image.
    fn block_at(&self, position: Point2i) -> Option<Bounds2i> {
        let centre = Point2i::new((self.num_blocks.x - 1) / 2, (self.num_blocks.y - 1) / 2);
        let tile = Point2i::new(centre.x + position.x, centre.y + position.y);
        if tile.x < 0 || tile.x >= self.num_blocks.x || tile.y < 0 || tile.y >= self.num_blocks.y {
            return None;
        }
        let p_min = Point2i::new(tile.x * self.block_size.x, tile.y * self.block_size.y);
        let p_max = Point2i::new(
            min(p_min.x + self.block_size.x, self.resolution.x),
            min(p_min.y + self.block_size.y, self.resolution.y),
        );
        Some(Bounds2i::new(p_min, p_max))
    }

    /// Advances the spiral walk by one tile position.
    fn step(&mut self) {
        let d = DIRECTIONS[self.direction];
        self.position = Point2i::new(self.position.x + d.x, self.position.y + d.y);
        self.steps_left -= 1;
        if self.steps_left == 0 {
            self.direction = (self.direction + 1) % 4;
            if self.grow_on_turn {
                self.run_length += 1;
            }
            self.grow_on_turn = !self.grow_on_turn;
            self.steps_left = self.run_length;
        }
    }
}

impl Iterator for BlockSpiral {
    type Item = Bounds2i;

    fn next(&mut self) -> Option<Bounds2i> {
        if self.produced >= self.total_blocks() {
            return None;
        }
        // Walk the spiral, skipping positions that fall outside the image
        // for non-square layouts.
        loop {
            let block = self.block_at(self.position);
            self.step();
            if let Some(block) = block {
                self.produced += 1;
                return Some(block);
            }
        }
    }
}
