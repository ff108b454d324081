//! Collision queries against the static tile grid
//!
//! The grid is a row-major array of cells, each either empty or a [`Tile`].
//! Boxes are axis-aligned: `pos` is the top-left corner and `size` the
//! width/height, both in tile units.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Static grid cell kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    /// Solid, blocks movement
    Wall,
    /// Static lava, fatal to the player
    Lava,
}

impl Tile {
    /// Plan character for this tile
    pub fn code(self) -> char {
        match self {
            Tile::Wall => 'x',
            Tile::Lava => '!',
        }
    }
}

/// Immutable grid of tiles, fixed when a level is built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    width: usize,
    height: usize,
    cells: Vec<Option<Tile>>,
}

impl TileGrid {
    /// Build a grid from row-major cells. Missing trailing cells are empty.
    pub fn new(width: usize, height: usize, mut cells: Vec<Option<Tile>>) -> Self {
        cells.resize(width * height, None);
        Self {
            width,
            height,
            cells,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Tile at a cell, `None` for empty or out-of-range cells
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Tile> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells[y * self.width + x]
    }

    /// Iterate over rows of cells, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Option<Tile>]> {
        self.cells.chunks(self.width.max(1)).take(self.height)
    }

    /// First obstacle touched by a box, if any
    ///
    /// The sides and the top of the level count as walls. Anything hanging
    /// below the bottom row counts as lava, so falling out of the level kills.
    pub fn obstacle_at(&self, pos: Vec2, size: Vec2) -> Option<Tile> {
        let x_start = pos.x.floor();
        let x_end = (pos.x + size.x).ceil();
        let y_start = pos.y.floor();
        let y_end = (pos.y + size.y).ceil();

        if x_start < 0.0 || x_end > self.width as f32 || y_start < 0.0 {
            return Some(Tile::Wall);
        }
        if y_end > self.height as f32 {
            return Some(Tile::Lava);
        }

        for y in y_start as usize..y_end as usize {
            for x in x_start as usize..x_end as usize {
                if let Some(tile) = self.get(x, y) {
                    return Some(tile);
                }
            }
        }
        None
    }
}

/// Strict AABB intersection: touching edges do not overlap
#[inline]
pub fn overlaps(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    a_pos.x + a_size.x > b_pos.x
        && a_pos.x < b_pos.x + b_size.x
        && a_pos.y + a_size.y > b_pos.y
        && a_pos.y < b_pos.y + b_size.y
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 4x3 grid:
    /// ```text
    /// x...
    /// ....
    /// ..!.
    /// ```
    fn grid() -> TileGrid {
        let mut cells = vec![None; 12];
        cells[0] = Some(Tile::Wall);
        cells[2 * 4 + 2] = Some(Tile::Lava);
        TileGrid::new(4, 3, cells)
    }

    #[test]
    fn test_left_of_grid_is_wall() {
        let grid = grid();
        assert_eq!(
            grid.obstacle_at(Vec2::new(-2.0, 1.0), Vec2::new(1.0, 1.0)),
            Some(Tile::Wall)
        );
        // Partially out on the left still counts
        assert_eq!(
            grid.obstacle_at(Vec2::new(-0.1, 1.0), Vec2::new(0.5, 0.5)),
            Some(Tile::Wall)
        );
    }

    #[test]
    fn test_right_and_top_are_walls() {
        let grid = grid();
        assert_eq!(
            grid.obstacle_at(Vec2::new(3.5, 1.0), Vec2::new(0.8, 0.5)),
            Some(Tile::Wall)
        );
        assert_eq!(
            grid.obstacle_at(Vec2::new(1.0, -0.2), Vec2::new(0.5, 0.5)),
            Some(Tile::Wall)
        );
    }

    #[test]
    fn test_below_grid_is_lava() {
        let grid = grid();
        assert_eq!(
            grid.obstacle_at(Vec2::new(1.0, 2.5), Vec2::new(0.5, 0.8)),
            Some(Tile::Lava)
        );
    }

    #[test]
    fn test_empty_region_has_no_obstacle() {
        let grid = grid();
        assert_eq!(grid.obstacle_at(Vec2::new(1.0, 0.0), Vec2::new(0.8, 1.5)), None);
        // Exactly flush against the wall on its right edge
        assert_eq!(grid.obstacle_at(Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)), None);
    }

    #[test]
    fn test_first_tile_in_row_major_order_wins() {
        let grid = grid();
        assert_eq!(
            grid.obstacle_at(Vec2::new(0.5, 0.5), Vec2::new(0.2, 0.2)),
            Some(Tile::Wall)
        );
        assert_eq!(
            grid.obstacle_at(Vec2::new(1.5, 1.5), Vec2::new(1.0, 1.0)),
            Some(Tile::Lava)
        );
    }

    #[test]
    fn test_overlap_is_strict() {
        let one = Vec2::ONE;
        assert!(overlaps(Vec2::ZERO, one, Vec2::new(0.5, 0.5), one));
        assert!(!overlaps(Vec2::ZERO, one, Vec2::new(1.0, 0.0), one));
        assert!(!overlaps(Vec2::ZERO, one, Vec2::new(0.5, 1.0), one));
    }
}
