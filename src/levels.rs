//! Level plans
//!
//! Built-in levels plus JSON level packs of the form
//! `{"name": "...", "levels": [["row", "row", ...], ...]}`.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::sim::{ConstructionError, Level};
use crate::tuning::Physics;

/// Levels shipped with the game, played in order
pub const GAME_LEVELS: &[&[&str]] = &[
    &[
        "                      ",
        "                      ",
        "  x              = x  ",
        "  x         o o    x  ",
        "  x @      xxxxx   x  ",
        "  xxxxx            x  ",
        "      x!!!!!!!!!!!!x  ",
        "      xxxxxxxxxxxxxx  ",
        "                      ",
    ],
    &[
        "                              ",
        "  x                        x  ",
        "  x   o        o       o   x  ",
        "  x  xxx     xxxxx    xxx  x  ",
        "  x                        x  ",
        "  x @      |         =     x  ",
        "  xxxxxx         xxxxxxxxxxx  ",
        "       x!!!!!!!!!x            ",
        "       xxxxxxxxxxx            ",
    ],
    &[
        "                         ",
        "  x      v      v     x  ",
        "  x                   x  ",
        "  x  o      o      o  x  ",
        "  x xxx   xxxxx   xxx x  ",
        "  x                   x  ",
        "  x@                  x  ",
        "  xxxxxxx!!!!!!!xxxxxxx  ",
        "        xxxxxxxxx        ",
    ],
];

/// Errors loading or validating a level pack
#[derive(Debug, Error)]
pub enum PackError {
    #[error("failed to read level pack: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid level pack JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("level pack has no levels")]
    Empty,
    #[error("level {index} is invalid: {source}")]
    InvalidLevel {
        index: usize,
        #[source]
        source: ConstructionError,
    },
}

/// An ordered set of level plans
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelPack {
    #[serde(default)]
    pub name: String,
    pub levels: Vec<Vec<String>>,
}

impl Default for LevelPack {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LevelPack {
    /// The shipped levels
    pub fn builtin() -> Self {
        Self {
            name: "builtin".to_string(),
            levels: GAME_LEVELS
                .iter()
                .map(|plan| plan.iter().map(|row| row.to_string()).collect())
                .collect(),
        }
    }

    /// Parse and validate a pack from JSON
    pub fn from_json(json: &str) -> Result<Self, PackError> {
        let pack: LevelPack = serde_json::from_str(json)?;
        pack.validate()?;
        Ok(pack)
    }

    /// Read, parse and validate a pack file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PackError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let pack = Self::from_json(&json)?;
        log::info!(
            "Loaded level pack '{}' ({} levels) from {}",
            pack.name,
            pack.len(),
            path.as_ref().display()
        );
        Ok(pack)
    }

    pub fn to_json(&self) -> Result<String, PackError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every plan builds a level
    pub fn validate(&self) -> Result<(), PackError> {
        if self.levels.is_empty() {
            return Err(PackError::Empty);
        }
        for index in 0..self.levels.len() {
            self.build(index, Physics::default(), 0)?;
        }
        Ok(())
    }

    /// Construct level `index`
    pub fn build(&self, index: usize, physics: Physics, seed: u64) -> Result<Level, PackError> {
        let plan = self.levels.get(index).map(Vec::as_slice).unwrap_or_default();
        Level::with_physics(plan, physics, seed)
            .map_err(|source| PackError::InvalidLevel { index, source })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_levels_are_valid() {
        let pack = LevelPack::builtin();
        assert_eq!(pack.len(), GAME_LEVELS.len());
        pack.validate().unwrap();
        for &plan in GAME_LEVELS {
            let width = plan[0].len();
            assert!(plan.iter().all(|row| row.len() == width));
            let level = Level::new(plan).unwrap();
            assert!(level.coins_remaining() > 0);
        }
    }

    #[test]
    fn test_json_round_trip() {
        let pack = LevelPack::builtin();
        let json = pack.to_json().unwrap();
        assert_eq!(LevelPack::from_json(&json).unwrap(), pack);
    }

    #[test]
    fn test_name_is_optional() {
        let pack = LevelPack::from_json(r#"{"levels": [["@ o", "xxx"]]}"#).unwrap();
        assert_eq!(pack.name, "");
        assert_eq!(pack.len(), 1);
    }

    #[test]
    fn test_invalid_packs() {
        assert!(matches!(
            LevelPack::from_json(r#"{"levels": []}"#),
            Err(PackError::Empty)
        ));
        assert!(matches!(
            LevelPack::from_json("not json"),
            Err(PackError::Json(_))
        ));
        let err = LevelPack::from_json(r#"{"levels": [["@ o"], ["  o"]]}"#).unwrap_err();
        assert!(matches!(
            err,
            PackError::InvalidLevel {
                index: 1,
                source: ConstructionError::MissingPlayer
            }
        ));
    }

    #[test]
    fn test_build_out_of_range() {
        let pack = LevelPack::builtin();
        assert!(matches!(
            pack.build(99, Physics::default(), 0),
            Err(PackError::InvalidLevel {
                index: 99,
                source: ConstructionError::EmptyPlan
            })
        ));
    }
}
