//! Level plan parsing
//!
//! A plan is a list of text rows, one character per cell:
//!
//! | char | meaning                     |
//! |------|-----------------------------|
//! | `x`  | wall                        |
//! | `!`  | static lava                 |
//! | `@`  | player spawn                |
//! | `o`  | coin                        |
//! | `=`  | lava bouncing horizontally  |
//! | `\|` | lava bouncing vertically    |
//! | `v`  | dripping lava               |
//!
//! Anything else (including space) is an empty cell.

use thiserror::Error;

use super::actor::LavaKind;
use super::collision::{Tile, TileGrid};

/// Reasons a plan cannot become a level
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    #[error("level plan is empty")]
    EmptyPlan,
    #[error("level plan has no player ('@')")]
    MissingPlayer,
    #[error("level plan has {count} players ('@'), expected exactly one")]
    MultiplePlayers { count: usize },
}

/// Dynamic actor spawned from a plan cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Spawn {
    Player,
    Coin,
    Lava(LavaKind),
}

/// Meaning of a single plan character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Tile(Tile),
    Spawn(Spawn),
}

impl Cell {
    pub fn from_code(ch: char) -> Self {
        match ch {
            'x' => Cell::Tile(Tile::Wall),
            '!' => Cell::Tile(Tile::Lava),
            '@' => Cell::Spawn(Spawn::Player),
            'o' => Cell::Spawn(Spawn::Coin),
            _ => LavaKind::from_code(ch)
                .map(|kind| Cell::Spawn(Spawn::Lava(kind)))
                .unwrap_or(Cell::Empty),
        }
    }
}

/// Grid and spawn list extracted from a plan
#[derive(Debug, Clone)]
pub struct ParsedPlan {
    pub grid: TileGrid,
    /// Spawn cells `(x, y)` in row-major order
    pub spawns: Vec<((usize, usize), Spawn)>,
}

/// Split a plan into its static grid and actor spawns
///
/// The first row sets the width. Short rows are padded with empty cells and
/// characters past the width are ignored.
pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<ParsedPlan, ConstructionError> {
    let width = rows
        .first()
        .map(|row| row.as_ref().chars().count())
        .unwrap_or(0);
    let height = rows.len();
    if width == 0 {
        return Err(ConstructionError::EmptyPlan);
    }

    let mut cells = Vec::with_capacity(width * height);
    let mut spawns = Vec::new();
    for (y, row) in rows.iter().enumerate() {
        let mut chars = row.as_ref().chars();
        for x in 0..width {
            let cell = chars.next().map(Cell::from_code).unwrap_or(Cell::Empty);
            match cell {
                Cell::Tile(tile) => cells.push(Some(tile)),
                Cell::Spawn(spawn) => {
                    spawns.push(((x, y), spawn));
                    cells.push(None);
                }
                Cell::Empty => cells.push(None),
            }
        }
    }

    match spawns.iter().filter(|(_, s)| *s == Spawn::Player).count() {
        0 => return Err(ConstructionError::MissingPlayer),
        1 => {}
        count => return Err(ConstructionError::MultiplePlayers { count }),
    }

    Ok(ParsedPlan {
        grid: TileGrid::new(width, height, cells),
        spawns,
    })
}
