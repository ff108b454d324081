//! Level state: tile grid, actors, and the win/loss state machine
//!
//! A level is built once from a plan and then mutated in place by
//! [`Level::animate`](super::tick) until it is finished.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorId};
use super::collision::{Tile, TileGrid, overlaps};
use super::plan::{self, ConstructionError, Spawn};
use crate::tuning::Physics;

/// How a level ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

/// Level status with the display-hold countdown
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum LevelStatus {
    /// Still in play
    #[default]
    Playing,
    /// All coins collected
    Won { finish_delay: f32 },
    /// Player touched lava
    Lost { finish_delay: f32 },
}

impl LevelStatus {
    #[inline]
    pub fn is_playing(&self) -> bool {
        matches!(self, LevelStatus::Playing)
    }

    #[inline]
    pub fn is_won(&self) -> bool {
        matches!(self, LevelStatus::Won { .. })
    }

    #[inline]
    pub fn is_lost(&self) -> bool {
        matches!(self, LevelStatus::Lost { .. })
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            LevelStatus::Playing => None,
            LevelStatus::Won { .. } => Some(Outcome::Won),
            LevelStatus::Lost { .. } => Some(Outcome::Lost),
        }
    }

    pub fn finish_delay(&self) -> Option<f32> {
        match *self {
            LevelStatus::Playing => None,
            LevelStatus::Won { finish_delay } | LevelStatus::Lost { finish_delay } => {
                Some(finish_delay)
            }
        }
    }

    /// Run down the finish countdown (no-op while playing)
    pub fn count_down(&mut self, elapsed: f32) {
        match self {
            LevelStatus::Playing => {}
            LevelStatus::Won { finish_delay } | LevelStatus::Lost { finish_delay } => {
                *finish_delay -= elapsed;
            }
        }
    }

    /// Ended and the countdown has run out
    pub fn is_finished(&self) -> bool {
        self.finish_delay().is_some_and(|delay| delay < 0.0)
    }
}

/// Something the player ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Contact {
    Wall,
    Lava,
    Coin(ActorId),
}

impl From<Tile> for Contact {
    fn from(tile: Tile) -> Self {
        match tile {
            Tile::Wall => Contact::Wall,
            Tile::Lava => Contact::Lava,
        }
    }
}

/// A running level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    grid: TileGrid,
    /// Dynamic actors in spawn order
    actors: Vec<Actor>,
    player: ActorId,
    status: LevelStatus,
    physics: Physics,
    next_id: u32,
}

impl Level {
    /// Build a level with default physics and seed
    pub fn new<S: AsRef<str>>(plan: &[S]) -> Result<Self, ConstructionError> {
        Self::with_physics(plan, Physics::default(), 0)
    }

    /// Build a level with explicit tuning; `seed` drives coin phases
    pub fn with_physics<S: AsRef<str>>(
        plan: &[S],
        physics: Physics,
        seed: u64,
    ) -> Result<Self, ConstructionError> {
        let parsed = plan::parse(plan)?;
        let mut rng = Pcg32::seed_from_u64(seed);

        let mut level = Self {
            grid: parsed.grid,
            actors: Vec::with_capacity(parsed.spawns.len()),
            player: ActorId(0),
            status: LevelStatus::Playing,
            physics: physics.sanitized(),
            next_id: 1,
        };

        for ((x, y), spawn) in parsed.spawns {
            let id = level.next_actor_id();
            let origin = Vec2::new(x as f32, y as f32);
            let actor = match spawn {
                Spawn::Player => {
                    level.player = id;
                    Actor::player(id, origin)
                }
                Spawn::Coin => Actor::coin(id, origin, &mut rng),
                Spawn::Lava(kind) => Actor::lava(id, origin, kind),
            };
            level.actors.push(actor);
        }

        log::debug!(
            "Built {}x{} level with {} actors ({} coins)",
            level.width(),
            level.height(),
            level.actors.len(),
            level.coins_remaining()
        );
        Ok(level)
    }

    /// Allocate a new actor ID
    fn next_actor_id(&mut self) -> ActorId {
        let id = ActorId(self.next_id);
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    #[inline]
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    #[inline]
    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id == id)
    }

    pub(crate) fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.iter_mut().find(|a| a.id == id)
    }

    #[inline]
    pub fn player_id(&self) -> ActorId {
        self.player
    }

    /// The player actor
    ///
    /// Always present: construction guarantees one and only coins are ever
    /// removed.
    pub fn player(&self) -> &Actor {
        let index = self.player_index();
        &self.actors[index]
    }

    /// Mutable player, for placing it directly (editors, tests)
    pub fn player_mut(&mut self) -> &mut Actor {
        let index = self.player_index();
        &mut self.actors[index]
    }

    fn player_index(&self) -> usize {
        self.actors
            .iter()
            .position(|a| a.id == self.player)
            .unwrap_or_default()
    }

    #[inline]
    pub fn status(&self) -> LevelStatus {
        self.status
    }

    #[inline]
    pub fn physics(&self) -> &Physics {
        &self.physics
    }

    pub fn coins_remaining(&self) -> usize {
        self.actors.iter().filter(|a| a.is_coin()).count()
    }

    /// Ended and done showing the result
    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    /// First tile a box would hit; see [`TileGrid::obstacle_at`]
    #[inline]
    pub fn obstacle_at(&self, pos: Vec2, size: Vec2) -> Option<Tile> {
        self.grid.obstacle_at(pos, size)
    }

    /// First other actor overlapping `subject`
    pub fn actor_at(&self, subject: &Actor) -> Option<&Actor> {
        self.actors.iter().find(|other| {
            other.id != subject.id && overlaps(subject.pos, subject.size, other.pos, other.size)
        })
    }

    /// React to the player running into something
    ///
    /// Lava only ends a level that is still playing. Coins are removed and
    /// recounted whatever the status, so collecting the last coin wins even
    /// while the player is sinking.
    pub fn player_touched(&mut self, contact: Contact) {
        match contact {
            Contact::Wall => {}
            Contact::Lava => {
                if self.status.is_playing() {
                    log::info!("Player touched lava, level lost");
                    self.status = LevelStatus::Lost {
                        finish_delay: self.physics.finish_delay,
                    };
                }
            }
            Contact::Coin(id) => {
                self.actors.retain(|a| a.id != id);
                let remaining = self.coins_remaining();
                log::debug!("Coin {:?} collected, {} left", id, remaining);
                if remaining == 0 {
                    log::info!("All coins collected, level won");
                    self.status = LevelStatus::Won {
                        finish_delay: self.physics.finish_delay,
                    };
                }
            }
        }
    }

    pub(crate) fn count_down(&mut self, elapsed: f32) {
        self.status.count_down(elapsed);
    }

    /// Rebuild plan rows from the grid and the actors' spawn cells
    pub fn to_plan(&self) -> Vec<String> {
        let mut rows: Vec<Vec<char>> = self
            .grid
            .rows()
            .map(|row| row.iter().map(|cell| cell.map_or(' ', Tile::code)).collect())
            .collect();

        for actor in &self.actors {
            let (x, y) = (actor.origin.x as usize, actor.origin.y as usize);
            if let Some(cell) = rows.get_mut(y).and_then(|row| row.get_mut(x)) {
                *cell = actor.spawn_code();
            }
        }

        rows.into_iter().map(|row| row.into_iter().collect()).collect()
    }
}
