//! Dynamic level entities: the player, coins and moving lava
//!
//! Actors are a closed set, so each update rule is a plain `match` arm
//! instead of a trait object.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::state::{Contact, Level};
use super::tick::KeyState;

/// Stable actor handle, allocated by the owning level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u32);

/// Moving lava variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LavaKind {
    /// Bounces left and right (`=`)
    Horizontal,
    /// Bounces up and down (`|`)
    Vertical,
    /// Falls and restarts from its spawn cell (`v`)
    Drip,
}

impl LavaKind {
    pub fn from_code(ch: char) -> Option<Self> {
        match ch {
            '=' => Some(LavaKind::Horizontal),
            '|' => Some(LavaKind::Vertical),
            'v' => Some(LavaKind::Drip),
            _ => None,
        }
    }

    pub fn code(self) -> char {
        match self {
            LavaKind::Horizontal => '=',
            LavaKind::Vertical => '|',
            LavaKind::Drip => 'v',
        }
    }

    /// Initial speed in tiles per second
    pub fn speed(self) -> Vec2 {
        match self {
            LavaKind::Horizontal => Vec2::new(2.0, 0.0),
            LavaKind::Vertical => Vec2::new(0.0, 2.0),
            LavaKind::Drip => Vec2::new(0.0, 3.0),
        }
    }
}

/// Per-variant actor state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ActorKind {
    Player {
        speed: Vec2,
    },
    Coin {
        /// Rest position the coin bobs around
        base_pos: Vec2,
        /// Bobbing phase (radians)
        wobble: f32,
    },
    Lava {
        kind: LavaKind,
        speed: Vec2,
        /// Where drip lava restarts after hitting something
        repeat_pos: Option<Vec2>,
    },
}

/// A dynamic entity with an axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    /// Top-left corner (tiles)
    pub pos: Vec2,
    /// Width and height (tiles)
    pub size: Vec2,
    /// Plan cell this actor spawned from
    pub origin: Vec2,
    pub kind: ActorKind,
}

impl Actor {
    /// Player spawns half a tile above its cell since it is 1.5 tiles tall
    pub fn player(id: ActorId, origin: Vec2) -> Self {
        Self {
            id,
            pos: origin + Vec2::new(0.0, -0.5),
            size: Vec2::new(0.8, 1.5),
            origin,
            kind: ActorKind::Player { speed: Vec2::ZERO },
        }
    }

    /// Coin with a random starting phase so coins don't bob in lockstep
    pub fn coin<R: Rng + ?Sized>(id: ActorId, origin: Vec2, rng: &mut R) -> Self {
        let pos = origin + Vec2::new(0.2, 0.1);
        Self {
            id,
            pos,
            size: Vec2::new(0.6, 0.6),
            origin,
            kind: ActorKind::Coin {
                base_pos: pos,
                wobble: rng.random_range(0.0..TAU),
            },
        }
    }

    pub fn lava(id: ActorId, origin: Vec2, kind: LavaKind) -> Self {
        let repeat_pos = match kind {
            LavaKind::Drip => Some(origin),
            LavaKind::Horizontal | LavaKind::Vertical => None,
        };
        Self {
            id,
            pos: origin,
            size: Vec2::ONE,
            origin,
            kind: ActorKind::Lava {
                kind,
                speed: kind.speed(),
                repeat_pos,
            },
        }
    }

    #[inline]
    pub fn is_player(&self) -> bool {
        matches!(self.kind, ActorKind::Player { .. })
    }

    #[inline]
    pub fn is_coin(&self) -> bool {
        matches!(self.kind, ActorKind::Coin { .. })
    }

    #[inline]
    pub fn is_lava(&self) -> bool {
        matches!(self.kind, ActorKind::Lava { .. })
    }

    /// Current speed for moving actors
    pub fn speed(&self) -> Option<Vec2> {
        match self.kind {
            ActorKind::Player { speed } | ActorKind::Lava { speed, .. } => Some(speed),
            ActorKind::Coin { .. } => None,
        }
    }

    /// Plan character that spawns this actor
    pub fn spawn_code(&self) -> char {
        match self.kind {
            ActorKind::Player { .. } => '@',
            ActorKind::Coin { .. } => 'o',
            ActorKind::Lava { kind, .. } => kind.code(),
        }
    }

    /// What the player runs into when overlapping this actor
    pub fn contact(&self) -> Option<Contact> {
        match self.kind {
            ActorKind::Player { .. } => None,
            ActorKind::Coin { .. } => Some(Contact::Coin(self.id)),
            ActorKind::Lava { .. } => Some(Contact::Lava),
        }
    }

    /// Advance this actor by one sub-step
    pub fn act(&mut self, step: f32, level: &mut Level, keys: &KeyState) {
        match self.kind {
            ActorKind::Player { .. } => self.act_player(step, level, keys),
            ActorKind::Coin { .. } => self.act_coin(step, level),
            ActorKind::Lava { .. } => self.act_lava(step, level),
        }
    }

    fn act_player(&mut self, step: f32, level: &mut Level, keys: &KeyState) {
        let ActorKind::Player { mut speed } = self.kind else {
            return;
        };
        let physics = *level.physics();

        // Horizontal: no momentum, speed comes straight from the keys
        speed.x = 0.0;
        if keys.left {
            speed.x -= physics.player_x_speed;
        }
        if keys.right {
            speed.x += physics.player_x_speed;
        }
        let new_pos = self.pos + Vec2::new(speed.x * step, 0.0);
        match level.obstacle_at(new_pos, self.size) {
            Some(tile) => level.player_touched(tile.into()),
            None => self.pos = new_pos,
        }

        // Vertical: jumping only works while pressing into a floor
        speed.y += step * physics.gravity;
        let new_pos = self.pos + Vec2::new(0.0, speed.y * step);
        match level.obstacle_at(new_pos, self.size) {
            Some(tile) => {
                level.player_touched(tile.into());
                speed.y = if keys.up && speed.y > 0.0 {
                    -physics.jump_speed
                } else {
                    0.0
                };
            }
            None => self.pos = new_pos,
        }
        self.kind = ActorKind::Player { speed };

        let contact = level.actor_at(self).and_then(Actor::contact);
        if let Some(contact) = contact {
            level.player_touched(contact);
        }

        // Sink into the lava
        if level.status().is_lost() {
            self.pos.y += step;
            self.size.y = (self.size.y - step).max(0.0);
        }
    }

    fn act_coin(&mut self, step: f32, level: &Level) {
        let physics = level.physics();
        if let ActorKind::Coin { base_pos, wobble } = &mut self.kind {
            *wobble += step * physics.wobble_speed;
            let wobble_pos = wobble.sin() * physics.wobble_dist;
            self.pos = *base_pos + Vec2::new(0.0, wobble_pos);
        }
    }

    fn act_lava(&mut self, step: f32, level: &Level) {
        if let ActorKind::Lava {
            speed, repeat_pos, ..
        } = &mut self.kind
        {
            let new_pos = self.pos + *speed * step;
            if level.obstacle_at(new_pos, self.size).is_none() {
                self.pos = new_pos;
            } else if let Some(anchor) = repeat_pos {
                self.pos = *anchor;
            } else {
                *speed = *speed * -1.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn lava_at(code: char) -> Actor {
        let kind = LavaKind::from_code(code).unwrap();
        Actor::lava(ActorId(1), Vec2::new(10.0, 12.0), kind)
    }

    #[test]
    fn test_horizontal_lava() {
        let lava = lava_at('=');
        assert_eq!(lava.speed(), Some(Vec2::new(2.0, 0.0)));
        assert_eq!(lava.pos, Vec2::new(10.0, 12.0));
        assert_eq!(lava.size, Vec2::new(1.0, 1.0));
        assert!(matches!(lava.kind, ActorKind::Lava { repeat_pos: None, .. }));
        assert!(lava.is_lava());
    }

    #[test]
    fn test_vertical_lava() {
        let lava = lava_at('|');
        assert_eq!(lava.speed(), Some(Vec2::new(0.0, 2.0)));
        assert!(matches!(lava.kind, ActorKind::Lava { repeat_pos: None, .. }));
    }

    #[test]
    fn test_drip_lava_repeats_from_spawn() {
        let lava = lava_at('v');
        assert_eq!(lava.speed(), Some(Vec2::new(0.0, 3.0)));
        assert!(matches!(
            lava.kind,
            ActorKind::Lava { repeat_pos: Some(p), .. } if p == Vec2::new(10.0, 12.0)
        ));
    }

    #[test]
    fn test_player_spawn_offset() {
        let player = Actor::player(ActorId(1), Vec2::new(10.0, 12.0));
        assert_eq!(player.pos, Vec2::new(10.0, 11.5));
        assert_eq!(player.size, Vec2::new(0.8, 1.5));
        assert_eq!(player.speed(), Some(Vec2::ZERO));
        assert!(player.is_player());
        assert_eq!(player.contact(), None);
    }

    #[test]
    fn test_coin_spawn() {
        let mut rng = Pcg32::seed_from_u64(7);
        for i in 0..50 {
            let coin = Actor::coin(ActorId(i), Vec2::new(3.0, 4.0), &mut rng);
            let ActorKind::Coin { base_pos, wobble } = coin.kind else {
                panic!("expected a coin");
            };
            assert_eq!(base_pos, coin.pos);
            assert!(coin.pos.abs_diff_eq(Vec2::new(3.2, 4.1), 1e-6));
            assert_eq!(coin.size, Vec2::new(0.6, 0.6));
            assert!((0.0..TAU).contains(&wobble));
            assert_eq!(coin.contact(), Some(Contact::Coin(ActorId(i))));
        }
    }

    #[test]
    fn test_spawn_codes() {
        for code in ['=', '|', 'v'] {
            assert_eq!(lava_at(code).spawn_code(), code);
        }
        assert_eq!(LavaKind::from_code('x'), None);
        assert_eq!(Actor::player(ActorId(0), Vec2::ZERO).spawn_code(), '@');
    }
}
