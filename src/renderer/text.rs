//! Plain-text display, one character per tile
//!
//! Actors are drawn on the cell under the center of their box using their
//! plan characters, so a fresh level renders exactly like its plan.

use crate::sim::{Level, Tile, cell_of};

use super::LevelDisplay;

/// Render the level as text rows joined by newlines
pub fn render_level(level: &Level) -> String {
    let mut rows: Vec<Vec<char>> = level
        .grid()
        .rows()
        .map(|row| row.iter().map(|cell| cell.map_or(' ', Tile::code)).collect())
        .collect();

    // Player last so it stays visible when overlapping a coin or lava
    let player = level.player_id();
    let actors = level
        .actors()
        .iter()
        .filter(|a| a.id != player)
        .chain(std::iter::once(level.player()));
    for actor in actors {
        let center = actor.pos + actor.size * 0.5;
        if let Some((x, y)) = cell_of(center)
            && let Some(cell) = rows.get_mut(y).and_then(|row| row.get_mut(x))
        {
            *cell = actor.spawn_code();
        }
    }

    rows.into_iter()
        .map(|row| row.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Keeps the most recent frame as a string
#[derive(Debug, Clone, Default)]
pub struct TextDisplay {
    frame: String,
    frames_drawn: u64,
    clears: u32,
}

impl TextDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last drawn frame, empty after `clear`
    pub fn frame(&self) -> &str {
        &self.frame
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// How many levels this display has been cleared for
    pub fn clears(&self) -> u32 {
        self.clears
    }
}

impl LevelDisplay for TextDisplay {
    fn draw_frame(&mut self, level: &Level, _step: f32) {
        self.frame = render_level(level);
        self.frames_drawn += 1;
    }

    fn clear(&mut self) {
        self.frame.clear();
        self.clears += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::KeyState;

    #[test]
    fn test_fresh_level_renders_like_its_plan() {
        let plan = ["x  o  x", "x @ v x", "x!!!!!x"];
        let level = Level::new(&plan).unwrap();
        assert_eq!(render_level(&level), plan.join("\n"));
    }

    #[test]
    fn test_display_tracks_frames_and_clears() {
        let mut level = Level::new(&["  @  ", "xxxxx"]).unwrap();
        let mut display = TextDisplay::new();
        level.animate(0.05, &KeyState::default());
        display.draw_frame(&level, 0.05);
        assert_eq!(display.frames_drawn(), 1);
        assert_eq!(display.frame(), "  @  \nxxxxx");

        display.clear();
        assert!(display.frame().is_empty());
        assert_eq!(display.clears(), 1);
    }
}
