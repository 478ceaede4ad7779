//! Property tests for the flight model

use glam::Vec2;
use proptest::prelude::*;

use hoop_toss::Settings;
use hoop_toss::sim::{
    BallState, Command, CommandQueue, GameState, Hoop, Viewport, predict_path, step, tick,
};

fn session() -> GameState {
    GameState::new(Viewport::new(1000.0, 800.0), &Settings::default())
}

/// Session with the hoop moved far off-screen so only gravity acts
fn open_court() -> GameState {
    let mut state = session();
    state.hoop = Hoop::with_rim(Vec2::new(-10_000.0, -10_000.0), 85.0);
    state
}

proptest! {
    #[test]
    fn vy_grows_every_frame_in_free_flight(
        x in 150.0f32..700.0,
        y in 100.0f32..600.0,
        vx in -5.0f32..5.0,
        vy in -20.0f32..5.0,
    ) {
        let mut state = open_court();
        state.ball.pos = Vec2::new(x, y);
        state.ball.vel = Vec2::new(vx, vy);
        state.ball.state = BallState::Flying;

        let mut last = state.ball.vel.y;
        for _ in 0..20 {
            step(&mut state);
            if !state.ball.is_flying() {
                break;
            }
            prop_assert!(state.ball.vel.y > last);
            last = state.ball.vel.y;
        }
    }

    #[test]
    fn resting_ball_is_inert(frames in 1usize..200, px in 0.0f32..1000.0, py in 0.0f32..800.0) {
        let mut state = session();
        let before = state.ball.clone();
        let mut queue = CommandQueue::new();
        // Pointer movement without a press must not disturb it
        queue.push(Command::PointerMove(Vec2::new(px, py)));
        for _ in 0..frames {
            tick(&mut state, &mut queue);
        }
        prop_assert_eq!(state.ball, before);
    }

    #[test]
    fn release_threshold(dx in -60.0f32..60.0, dy in -60.0f32..60.0) {
        let mut state = session();
        let rack = state.ball.pos;
        state.begin_drag(rack);
        state.update_drag(rack + Vec2::new(dx, dy));
        let expected = (rack + Vec2::new(dx, dy) - rack) * 0.14;
        state.release_drag();

        if expected.x.abs() + expected.y.abs() > 2.0 {
            prop_assert!(state.ball.is_flying());
            prop_assert_eq!(state.ball.vel, expected);
        } else {
            prop_assert!(!state.ball.is_flying());
            prop_assert_eq!(state.ball.vel, Vec2::ZERO);
        }
    }

    #[test]
    fn prediction_never_moves_the_ball(dx in -500.0f32..500.0, dy in -500.0f32..500.0) {
        let mut state = session();
        state.begin_drag(state.ball.pos);
        state.update_drag(state.ball.pos + Vec2::new(dx, dy));
        let before = state.ball.clone();
        let path = state.prediction();
        prop_assert!(path.is_some());
        prop_assert_eq!(state.ball, before);
    }

    #[test]
    fn predicted_path_matches_gravity_only_flight(vx in -20.0f32..20.0, vy in -30.0f32..0.0) {
        let start = Vec2::new(100.0, 650.0);
        let path = predict_path(start, Vec2::new(vx, vy), 0.35, 25);
        prop_assert_eq!(path.len(), 26);
        for pair in path.windows(2) {
            prop_assert!((pair[1].x - pair[0].x - vx).abs() < 1e-3);
        }
    }

    #[test]
    fn at_most_one_score_per_turn(frames in 1usize..60) {
        let mut state = session();
        state.hoop = Hoop::with_rim(Vec2::new(500.0, 300.0), 85.0);
        state.ball.pos = Vec2::new(500.0, 260.0);
        state.ball.vel = Vec2::new(0.0, 0.5);
        state.ball.state = BallState::Flying;
        for _ in 0..frames {
            step(&mut state);
        }
        prop_assert!(state.score <= 1);
    }
}

#[test]
fn miss_counted_once_when_leaving_bottom() {
    let mut state = open_court();
    state.ball.pos = Vec2::new(400.0, 880.0);
    state.ball.vel = Vec2::new(0.0, 0.0);
    state.ball.state = BallState::Flying;

    for _ in 0..100 {
        step(&mut state);
    }
    assert_eq!(state.misses, 1);
    assert_eq!(state.ball.pos, Vec2::new(100.0, 650.0));
    assert!(!state.ball.is_flying());
}

#[test]
fn full_throw_through_command_queue() {
    let mut state = session();
    let mut queue = CommandQueue::new();
    let rack = state.ball.pos;

    queue.push(Command::PointerDown(rack));
    queue.push(Command::PointerMove(rack + Vec2::new(100.0, -150.0)));
    tick(&mut state, &mut queue);
    assert!(state.prediction().is_some());

    queue.push(Command::PointerUp);
    tick(&mut state, &mut queue);
    assert!(state.ball.is_flying());

    let mut frames = 0;
    while state.ball.is_flying() && frames < 2000 {
        tick(&mut state, &mut queue);
        frames += 1;
    }
    assert!(!state.ball.is_flying());
    assert_eq!(state.score + state.misses, 1);
}
