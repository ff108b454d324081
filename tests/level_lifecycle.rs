use glam::Vec2;
use lava_platformer::sim::{ActorKind, ConstructionError, KeyState, Level, LevelStatus, Outcome};

#[test]
fn test_player_count_is_enforced() {
    assert_eq!(
        Level::new(&["x  ", "   "]).unwrap_err(),
        ConstructionError::MissingPlayer
    );
    assert_eq!(
        Level::new(&["@ @", "  @"]).unwrap_err(),
        ConstructionError::MultiplePlayers { count: 3 }
    );
    let rows: [&str; 0] = [];
    assert_eq!(Level::new(&rows).unwrap_err(), ConstructionError::EmptyPlan);

    let level = Level::new(&["o@o"]).unwrap();
    assert!(level.player().is_player());
    assert_eq!(level.player().origin, Vec2::new(1.0, 0.0));
}

#[test]
fn test_small_plan_with_drip_lava() {
    let mut level = Level::new(&["x  ", "  @", " v "]).unwrap();
    assert_eq!(level.width(), 3);
    assert_eq!(level.height(), 3);
    assert_eq!(level.actors().len(), 2);

    let lava = level.actors().iter().find(|a| a.is_lava()).unwrap();
    assert!(matches!(
        lava.kind,
        ActorKind::Lava { repeat_pos: Some(p), .. } if p == Vec2::new(1.0, 2.0)
    ));

    // No floor under the player, so only a short fall keeps it in play
    for _ in 0..5 {
        level.animate(0.02, &KeyState::default());
        assert_eq!(level.status(), LevelStatus::Playing);
    }
}

#[test]
fn test_no_coins_and_no_lava_stays_playing() {
    let mut level = Level::new(&["x   x", "x @ x", "xxxxx"]).unwrap();
    for _ in 0..600 {
        level.animate(1.0 / 60.0, &KeyState::default());
    }
    assert_eq!(level.status(), LevelStatus::Playing);
    assert!(!level.is_finished());
}

#[test]
fn test_collecting_last_coin_wins() {
    let mut level = Level::new(&["   ", "@ o", "xxx"]).unwrap();
    let coin = *level.actors().iter().find(|a| a.is_coin()).unwrap();
    level.player_mut().pos = coin.pos;

    level.animate(0.01, &KeyState::default());
    assert_eq!(level.coins_remaining(), 0);
    assert_eq!(level.status(), LevelStatus::Won { finish_delay: 1.0 });
    assert_eq!(level.status().outcome(), Some(Outcome::Won));

    level.animate(0.5, &KeyState::default());
    level.animate(0.5, &KeyState::default());
    assert!(!level.is_finished());
    level.animate(0.01, &KeyState::default());
    assert!(level.is_finished());
}

#[test]
fn test_overlapping_lava_tile_loses_for_good() {
    let mut level = Level::new(&["   ", "@  ", "x!x"]).unwrap();
    level.player_mut().pos = Vec2::new(1.1, 1.2);

    level.animate(0.01, &KeyState::default());
    assert_eq!(level.status(), LevelStatus::Lost { finish_delay: 1.0 });

    let height = level.player().size.y;
    for _ in 0..180 {
        level.animate(1.0 / 60.0, &KeyState::default());
        assert!(level.status().is_lost());
    }
    assert!(level.is_finished());
    // The player sank while the result was shown
    assert!(level.player().size.y < height);
}

#[test]
fn test_moving_lava_kills() {
    // Lava bounces between the walls and sweeps over the standing player
    let mut level = Level::new(&["x    x", "x= @ x", "xxxxxx"]).unwrap();
    let mut lost = false;
    for _ in 0..120 {
        level.animate(1.0 / 60.0, &KeyState::default());
        if level.status().is_lost() {
            lost = true;
            break;
        }
    }
    assert!(lost);
}
