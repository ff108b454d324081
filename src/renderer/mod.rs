//! Display contract
//!
//! The simulation never draws. A display reads the level between ticks:
//! `draw_frame` after every frame and `clear` once the level is finished.

pub mod text;

pub use text::{TextDisplay, render_level};

use crate::sim::Level;

/// Something that can show a level
pub trait LevelDisplay {
    /// Repaint from the current level state
    fn draw_frame(&mut self, level: &Level, step: f32);
    /// Release whatever the display holds for the finished level
    fn clear(&mut self);
}

impl<D: LevelDisplay + ?Sized> LevelDisplay for Box<D> {
    fn draw_frame(&mut self, level: &Level, step: f32) {
        (**self).draw_frame(level, step);
    }

    fn clear(&mut self) {
        (**self).clear();
    }
}
