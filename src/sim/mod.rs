//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time only advances through `Level::animate`
//! - Seeded RNG only (coin wobble phase)
//! - Stable actor order (spawn order, row-major over the plan)
//! - No rendering or platform dependencies

pub mod actor;
pub mod collision;
pub mod plan;
pub mod state;
pub mod tick;
pub mod vector;

pub use actor::{Actor, ActorId, ActorKind, LavaKind};
pub use collision::{Tile, TileGrid, overlaps};
pub use plan::{Cell, ConstructionError, Spawn};
pub use state::{Contact, Level, LevelStatus, Outcome};
pub use tick::{Direction, KeyState, SubSteps};
pub use vector::{Vector, cell_of};
