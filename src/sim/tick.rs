//! Sub-stepped simulation tick
//!
//! A frame's elapsed time is cut into slices no longer than
//! `Physics::max_step` so a long frame (after a stall) runs as several small
//! physics steps instead of one large one that could tunnel through walls.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::actor::ActorId;
use super::state::Level;

/// Logical movement keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
}

impl Direction {
    /// Classic browser arrow key codes
    pub fn from_key_code(code: u32) -> Option<Self> {
        match code {
            37 => Some(Direction::Left),
            38 => Some(Direction::Up),
            39 => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" | "arrowleft" => Ok(Direction::Left),
            "right" | "arrowright" => Ok(Direction::Right),
            "up" | "arrowup" => Ok(Direction::Up),
            other => Err(format!("unknown direction '{other}'")),
        }
    }
}

/// Pressed state of the movement keys for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
}

impl KeyState {
    /// Keys held down, all others released
    pub fn pressed(directions: &[Direction]) -> Self {
        let mut keys = Self::default();
        for &direction in directions {
            keys.set(direction, true);
        }
        keys
    }

    pub fn set(&mut self, direction: Direction, pressed: bool) {
        match direction {
            Direction::Left => self.left = pressed,
            Direction::Right => self.right = pressed,
            Direction::Up => self.up = pressed,
        }
    }

    pub fn is_pressed(&self, direction: Direction) -> bool {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
            Direction::Up => self.up,
        }
    }
}

/// Slices of a frame's elapsed time, each at most `max_step` long
///
/// The slice count is fixed up front so huge frames cannot stall on f32
/// rounding. Every slice but the last is exactly `max_step`.
#[derive(Debug, Clone)]
pub struct SubSteps {
    count: u64,
    taken: u64,
    max_step: f32,
    last: f32,
}

impl SubSteps {
    pub fn new(elapsed: f32, max_step: f32) -> Self {
        if !elapsed.is_finite() || elapsed <= 0.0 {
            return Self {
                count: 0,
                taken: 0,
                max_step,
                last: 0.0,
            };
        }
        let (elapsed64, max64) = (elapsed as f64, max_step as f64);
        // Tolerance keeps an exact multiple from gaining an empty slice
        let count = ((elapsed64 / max64 - 1e-6).ceil() as u64).max(1);
        let last = (elapsed64 - (count - 1) as f64 * max64).max(0.0) as f32;
        Self {
            count,
            taken: 0,
            max_step,
            last,
        }
    }
}

impl Iterator for SubSteps {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.taken >= self.count {
            return None;
        }
        self.taken += 1;
        Some(if self.taken == self.count {
            self.last
        } else {
            self.max_step
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = usize::try_from(self.count - self.taken).unwrap_or(usize::MAX);
        (left, Some(left))
    }
}

impl ExactSizeIterator for SubSteps {}

impl Level {
    /// Advance the level by `elapsed` seconds
    ///
    /// Once the level is won or lost the finish countdown runs down by the
    /// full `elapsed`, and the actors keep moving so the end animation plays.
    /// Negative and non-finite `elapsed` count as zero.
    pub fn animate(&mut self, elapsed: f32, keys: &KeyState) {
        let elapsed = if elapsed.is_finite() {
            elapsed.max(0.0)
        } else {
            0.0
        };
        self.count_down(elapsed);

        for step in SubSteps::new(elapsed, self.physics().max_step) {
            self.step_actors(step, keys);
        }
    }

    /// Run every actor's update once. Actors removed mid-step (collected
    /// coins) are skipped.
    fn step_actors(&mut self, step: f32, keys: &KeyState) {
        let ids: Vec<ActorId> = self.actors().iter().map(|a| a.id).collect();
        for id in ids {
            let Some(mut actor) = self.actor(id).copied() else {
                continue;
            };
            actor.act(step, self, keys);
            if let Some(slot) = self.actor_mut(id) {
                *slot = actor;
            }
        }
    }
}
