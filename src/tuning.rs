//! Data-driven physics tuning
//!
//! Every level carries its own copy so a settings file can retune the game
//! without touching the simulation code.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Physics constants used by the actor update rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Physics {
    /// Largest sub-step `animate` will run in one go
    pub max_step: f32,
    /// Downward acceleration applied to the player
    pub gravity: f32,
    /// Upward speed given when jumping off a surface
    pub jump_speed: f32,
    /// Horizontal walking speed
    pub player_x_speed: f32,
    /// Countdown started on win/loss
    pub finish_delay: f32,
    /// Coin phase advance per second
    pub wobble_speed: f32,
    /// Coin bobbing amplitude
    pub wobble_dist: f32,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            max_step: MAX_STEP,
            gravity: GRAVITY,
            jump_speed: JUMP_SPEED,
            player_x_speed: PLAYER_X_SPEED,
            finish_delay: FINISH_DELAY,
            wobble_speed: WOBBLE_SPEED,
            wobble_dist: WOBBLE_DIST,
        }
    }
}

impl Physics {
    /// Clamp values that would stall or invert the simulation
    pub fn sanitized(mut self) -> Self {
        if self.max_step.is_nan() || self.max_step <= 0.0 {
            log::warn!("max_step {} is not positive, using {}", self.max_step, MAX_STEP);
            self.max_step = MAX_STEP;
        }
        if self.finish_delay.is_nan() || self.finish_delay < 0.0 {
            self.finish_delay = FINISH_DELAY;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let physics = Physics::default();
        assert_eq!(physics.max_step, 0.05);
        assert_eq!(physics.gravity, 30.0);
        assert_eq!(physics.jump_speed, 17.0);
        assert_eq!(physics.player_x_speed, 7.0);
        assert_eq!(physics.finish_delay, 1.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let physics: Physics = serde_json::from_str(r#"{"gravity": 12.5}"#).unwrap();
        assert_eq!(physics.gravity, 12.5);
        assert_eq!(physics.jump_speed, JUMP_SPEED);
    }

    #[test]
    fn test_sanitized_rejects_zero_step() {
        let physics = Physics {
            max_step: 0.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(physics.max_step, MAX_STEP);
    }
}
