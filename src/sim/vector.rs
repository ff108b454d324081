//! 2D vectors for positions, sizes and speeds
//!
//! Positions are in tile units with the origin at the top-left of the level
//! and `y` growing downward. `glam::Vec2` is a value type, so `a + b` plays
//! the role of `plus` and `a * k` the role of `times`.

use glam::Vec2;

/// Point or displacement in tile units
pub type Vector = Vec2;

/// Grid cell containing a point, if it lies at non-negative coordinates
#[inline]
pub fn cell_of(pos: Vector) -> Option<(usize, usize)> {
    let cell = pos.floor();
    if cell.x < 0.0 || cell.y < 0.0 || !cell.is_finite() {
        return None;
    }
    Some((cell.x as usize, cell.y as usize))
}
