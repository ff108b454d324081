//! Level sequencing
//!
//! A session plays the levels of a pack in order. Each frame it caps the
//! elapsed time, animates the level, and repaints the display. When the
//! level finishes, a loss restarts it and a win moves on to the next one.

use crate::levels::{LevelPack, PackError};
use crate::renderer::LevelDisplay;
use crate::settings::Settings;
use crate::sim::{KeyState, Level, Outcome};

/// What happened during a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Current level still running (or showing its result)
    Running,
    /// Level was lost and started over
    Restarted { level: usize },
    /// Level was won and the next one started
    Advanced { level: usize },
    /// Last level won; further frames do nothing
    Completed,
}

/// Drives a level pack frame by frame
pub struct Session<D: LevelDisplay> {
    /// Fresh copy of every level, cloned on (re)start
    templates: Vec<Level>,
    index: usize,
    level: Level,
    display: D,
    max_frame_step: f32,
    attempts: u32,
    completed: bool,
}

impl<D: LevelDisplay> Session<D> {
    /// Build every level of the pack up front and start at
    /// `settings.start_level` (clamped to the last level)
    pub fn new(pack: &LevelPack, settings: &Settings, display: D) -> Result<Self, PackError> {
        if pack.is_empty() {
            return Err(PackError::Empty);
        }
        let templates = (0..pack.len())
            .map(|i| pack.build(i, settings.physics, settings.seed.wrapping_add(i as u64)))
            .collect::<Result<Vec<_>, _>>()?;

        let index = settings.start_level.min(templates.len() - 1);
        let level = templates[index].clone();
        log::info!("Starting level {} of {}", index + 1, templates.len());

        Ok(Self {
            templates,
            index,
            level,
            display,
            max_frame_step: settings.clone().sanitized().max_frame_step,
            attempts: 1,
            completed: false,
        })
    }

    /// Run one frame
    pub fn frame(&mut self, elapsed: f32, keys: &KeyState) -> Progress {
        if self.completed {
            return Progress::Completed;
        }

        let step = elapsed.max(0.0).min(self.max_frame_step);
        self.level.animate(step, keys);
        self.display.draw_frame(&self.level, step);

        if !self.level.is_finished() {
            return Progress::Running;
        }
        self.display.clear();

        match self.level.status().outcome() {
            Some(Outcome::Lost) => {
                self.attempts += 1;
                log::info!(
                    "Level {} lost, restarting (attempt {})",
                    self.index + 1,
                    self.attempts
                );
                self.level = self.templates[self.index].clone();
                Progress::Restarted { level: self.index }
            }
            Some(Outcome::Won) if self.index + 1 < self.templates.len() => {
                self.index += 1;
                self.attempts = 1;
                log::info!("Level won, starting level {}", self.index + 1);
                self.level = self.templates[self.index].clone();
                Progress::Advanced { level: self.index }
            }
            Some(Outcome::Won) => {
                log::info!("All {} levels won", self.templates.len());
                self.completed = true;
                Progress::Completed
            }
            None => Progress::Running,
        }
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Zero-based index of the current level
    pub fn level_index(&self) -> usize {
        self.index
    }

    pub fn level_count(&self) -> usize {
        self.templates.len()
    }

    /// Tries on the current level, starting at 1
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn into_display(self) -> D {
        self.display
    }
}
