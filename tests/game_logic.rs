/// Integration tests for game logic
///
/// These tests drive whole rounds and sessions through the public API and
/// check the interactions between entities: firing, collisions, scoring,
/// culling and the restart cycle.
use galactic_toast::{
    Bounds, Cue, Direction, Entity, LossCause, Obstacle, Phase, Player, Projectile, Round,
    Session, TickInput,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn fire() -> TickInput {
    TickInput {
        fire: true,
        ..Default::default()
    }
}

fn idle() -> TickInput {
    TickInput::default()
}

/// Round that has already had its first wave, so no random obstacles appear
/// for the next 99 frames
fn quiet_round() -> Round {
    let mut round = Round::new();
    round.frame = 1;
    round
}

#[test]
fn test_toast_shoots_down_incoming_asteroid() {
    let mut round = quiet_round();
    let mut rng = seeded_rng();
    round.obstacles.push(Obstacle::new(800, 300));

    assert!(round.tick(&fire(), &mut rng).fired);
    assert!(round.tick(&fire(), &mut rng).fired);
    assert_eq!(round.projectiles.len(), 2);

    let mut hit_frame = None;
    for _ in 0..90 {
        let report = round.tick(&idle(), &mut rng);
        assert!(report.loss.is_none());
        if report.hits > 0 {
            assert_eq!(report.hits, 1);
            hit_frame = Some(round.frame);
            break;
        }
    }

    assert!(hit_frame.is_some(), "projectile never reached the obstacle");
    assert_eq!(round.kills, 1);
    assert!(round.obstacles.is_empty());
    // The trailing toast is still in flight
    assert_eq!(round.projectiles.len(), 1);
    assert_eq!(round.ammo_cap(), 2);
    assert!(!round.is_lost());
}

#[test]
fn test_projectiles_leave_screen_and_free_ammo() {
    let mut round = quiet_round();
    let mut rng = seeded_rng();
    round.tick(&fire(), &mut rng);
    round.tick(&fire(), &mut rng);
    assert_eq!(round.remaining_ammo(), 0);

    // 800px at 12px per frame
    for _ in 0..70 {
        round.tick(&idle(), &mut rng);
    }
    assert!(round.projectiles.is_empty());
    assert_eq!(round.remaining_ammo(), 2);
}

#[test]
fn test_unchallenged_asteroid_loses_round() {
    let mut round = quiet_round();
    let mut rng = seeded_rng();
    // Keep it clear of the player's lane
    round.obstacles.push(Obstacle::new(800, 100));

    let mut loss = None;
    for _ in 0..250 {
        let report = round.tick(&idle(), &mut rng);
        if report.loss.is_some() {
            loss = report.loss;
            break;
        }
    }

    // 776px at 4px per frame
    assert_eq!(loss, Some(LossCause::Breach));
    assert_eq!(round.frame, 1 + 194);
    // Only the wave from frame 100 is left, still far from the edge
    assert_eq!(round.obstacles.len(), 1);
    assert!(round.obstacles[0].x > 0);
}

#[test]
fn test_moving_into_asteroid_loses_round() {
    let mut round = quiet_round();
    let mut rng = seeded_rng();
    round.obstacles.push(Obstacle::new(150, 100));

    let up = TickInput {
        direction: Some(Direction::Up),
        ..Default::default()
    };
    let mut loss = None;
    for _ in 0..40 {
        loss = round.tick(&up, &mut rng).loss;
        if loss.is_some() {
            break;
        }
    }
    assert_eq!(loss, Some(LossCause::Collision));
    // Touching the player does not destroy the asteroid
    assert_eq!(round.obstacles.len(), 1);
}

#[test]
fn test_player_held_at_top_edge() {
    let mut round = quiet_round();
    let mut rng = seeded_rng();
    let up = TickInput {
        direction: Some(Direction::Up),
        ..Default::default()
    };
    for _ in 0..60 {
        round.tick(&up, &mut rng);
    }
    assert_eq!(round.player.y, 0);

    let down = TickInput {
        direction: Some(Direction::Down),
        ..Default::default()
    };
    for _ in 0..90 {
        round.tick(&down, &mut rng);
    }
    assert_eq!(round.player.y, Player::max_y());
}

#[test]
fn test_full_session_cycle() {
    let mut rng = seeded_rng();
    let mut session = Session::new();
    session.round.frame = 1;
    session.round.kills = 12;
    session.round.obstacles.push(Obstacle { x: 2, y: 500 });

    let cues = session.tick(&idle(), &mut rng);
    assert_eq!(session.phase, Phase::GameOver);
    assert!(cues.contains(&Cue::GameOver));

    session.tick(&idle(), &mut rng);
    assert_eq!(session.phase, Phase::WaitingRestart);

    // Nothing moves while waiting
    let frozen = session.round.frame;
    session.tick(&fire(), &mut rng);
    assert_eq!(session.round.frame, frozen);

    let cues = session.tick(
        &TickInput {
            confirm: true,
            ..Default::default()
        },
        &mut rng,
    );
    assert_eq!(cues, vec![Cue::RoundStart]);
    assert_eq!(session.phase, Phase::Playing);
    assert_eq!(session.round.kills, 0);
    assert_eq!(session.round.ammo_cap(), 2);
    assert!(session.round.loss.is_none());
    assert!(session.round.projectiles.is_empty());
    assert!(session.round.obstacles.is_empty());
    assert_eq!(session.best_kills, 12);

    // The new round opens with a wave
    session.tick(&idle(), &mut rng);
    assert_eq!(session.round.obstacles.len(), 1);
}

#[test]
fn test_projectile_spawns_at_player_center() {
    let mut round = quiet_round();
    round.player.y = 120;
    round.tick(&fire(), &mut seeded_rng());

    let player_center = round.player.bounds().center();
    let projectile = &round.projectiles[0];
    // Already advanced one frame
    let expected = Projectile::new(player_center.0, player_center.1);
    assert_eq!(projectile.y, expected.y);
    assert_eq!(projectile.x, expected.x + 12);
}

#[test]
fn test_bounds_of_entities_match_their_sizes() {
    let player = Player::spawn();
    assert_eq!(player.bounds(), Bounds::new(0, 276, 64, 48));
    assert_eq!(Obstacle::new(800, 300).bounds(), Bounds::new(776, 276, 48, 48));
    assert_eq!(Projectile::new(32, 300).bounds(), Bounds::new(20, 292, 24, 16));
}
