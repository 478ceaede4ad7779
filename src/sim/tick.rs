//! Per-frame simulation tick
//!
//! Input handlers never touch `GameState` directly; they queue `Command`s and
//! the frame loop applies them all before stepping physics.

use std::collections::VecDeque;

use glam::Vec2;

use super::collision::{resolve_backboard, resolve_rim_point};
use super::state::{GameEvent, GameState, ResetKind, Viewport};

/// Input commands, applied in arrival order at the start of a frame
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Mouse down / touch start at a canvas position
    PointerDown(Vec2),
    /// Mouse / touch moved
    PointerMove(Vec2),
    /// Mouse up / touch end
    PointerUp,
    /// Viewport changed size
    Resize { width: f32, height: f32 },
    /// Zero the counters and rack the ball
    Restart,
    /// Pick a ball theme
    SelectSkin(usize),
    /// Skin picker shown or hidden
    SetModalOpen(bool),
}

/// FIFO of commands waiting for the next frame
#[derive(Debug, Default)]
pub struct CommandQueue {
    pending: VecDeque<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.pending.push_back(command);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and yield every queued command
    pub fn drain(&mut self) -> impl Iterator<Item = Command> + '_ {
        self.pending.drain(..)
    }
}

/// Apply one command to the session
pub fn apply_command(state: &mut GameState, command: Command) {
    match command {
        Command::PointerDown(pos) => state.begin_drag(pos),
        Command::PointerMove(pos) => state.update_drag(pos),
        Command::PointerUp => state.release_drag(),
        Command::Resize { width, height } => state.resize(Viewport::new(width, height)),
        Command::Restart => state.restart(),
        Command::SelectSkin(index) => state.select_skin(index),
        Command::SetModalOpen(open) => state.modal_open = open,
    }
}

/// Advance one frame: drain queued input, then step physics
pub fn tick(state: &mut GameState, commands: &mut CommandQueue) {
    if !commands.is_empty() {
        log::trace!("Applying {} queued commands", commands.len());
    }
    for command in commands.drain() {
        apply_command(state, command);
    }
    step(state);
}

/// One physics frame. Does nothing while the ball rests.
///
/// Order matters: integrate, backboard, left rim, right rim, swish gate,
/// then bounds. The swish gate and the rim ends are independent checks, so a
/// ball can score and bounce in the same frame.
pub fn step(state: &mut GameState) {
    if !state.ball.is_flying() {
        return;
    }

    let tuning = &state.tuning;
    let ball = &mut state.ball;
    let hoop = &mut state.hoop;

    // Semi-implicit Euler, one step per frame
    ball.vel.y += tuning.gravity;
    ball.vel.x *= tuning.air_resistance;
    ball.pos += ball.vel;
    ball.angle += ball.spin;

    resolve_backboard(ball, &hoop.backboard, tuning.bounce);

    for rim_end in [hoop.rim_left(), hoop.rim_right()] {
        resolve_rim_point(ball, rim_end, hoop.rim_thickness, tuning.bounce, tuning.rim_kick);
    }

    if !hoop.scored_this_turn && ball.vel.y > 0.0 && hoop.in_swish_gate(ball.pos) {
        hoop.scored_this_turn = true;
        state.score += 1;
        log::debug!("Swish! ({} total)", state.score);
        state.events.push(GameEvent::Scored { score: state.score });
    }

    if state.viewport.is_out_of_bounds(state.ball.pos) {
        state.reset_ball(ResetKind::OutOfBounds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::Settings;
    use crate::sim::hoop::Hoop;
    use crate::sim::state::BallState;

    fn state() -> GameState {
        GameState::new(Viewport::new(1000.0, 800.0), &Settings::default())
    }

    fn fly(state: &mut GameState, pos: Vec2, vel: Vec2) {
        state.ball.pos = pos;
        state.ball.vel = vel;
        state.ball.state = BallState::Flying;
    }

    #[test]
    fn test_resting_ball_does_not_move() {
        let mut s = state();
        let before = s.ball.clone();
        let mut queue = CommandQueue::new();
        for _ in 0..10 {
            tick(&mut s, &mut queue);
        }
        assert_eq!(s.ball, before);
    }

    #[test]
    fn test_drag_release_via_commands() {
        let mut s = state();
        let rack = s.ball.pos;
        let mut queue = CommandQueue::new();
        queue.push(Command::PointerDown(rack + Vec2::new(10.0, 10.0)));
        queue.push(Command::PointerMove(rack + Vec2::new(100.0, -200.0)));
        queue.push(Command::PointerUp);
        assert_eq!(queue.len(), 3);

        tick(&mut s, &mut queue);
        assert!(queue.is_empty());
        assert!(s.ball.is_flying());
        // Already one physics step in
        assert!((s.ball.vel.x - 14.0 * AIR_RESISTANCE).abs() < 1e-4);
        assert!((s.ball.vel.y - (-28.0 + GRAVITY)).abs() < 1e-4);
    }

    #[test]
    fn test_integration_step() {
        let mut s = state();
        fly(&mut s, Vec2::new(300.0, 500.0), Vec2::new(10.0, -5.0));
        s.ball.spin = 0.5;
        step(&mut s);
        assert!((s.ball.vel.y - (-5.0 + 0.35)).abs() < 1e-5);
        assert!((s.ball.vel.x - 9.95).abs() < 1e-5);
        assert!((s.ball.pos.x - 309.95).abs() < 1e-4);
        assert!((s.ball.pos.y - 495.35).abs() < 1e-4);
        assert_eq!(s.ball.angle, 0.5);
    }

    #[test]
    fn test_swish_scores_once_per_turn() {
        let mut s = state();
        s.hoop = Hoop::with_rim(Vec2::new(500.0, 300.0), 85.0);
        // Drops straight through the middle of the rim
        fly(&mut s, Vec2::new(500.0, 290.0), Vec2::new(0.0, 1.0));
        step(&mut s);
        assert_eq!(s.score, 1);
        assert!(s.hoop.scored_this_turn);

        // Still in the gate next frame, no second point
        step(&mut s);
        assert_eq!(s.score, 1);
        assert_eq!(s.drain_events(), vec![GameEvent::Scored { score: 1 }]);
    }

    #[test]
    fn test_rising_ball_does_not_score() {
        let mut s = state();
        s.hoop = Hoop::with_rim(Vec2::new(500.0, 300.0), 85.0);
        fly(&mut s, Vec2::new(500.0, 310.0), Vec2::new(0.0, -5.0));
        step(&mut s);
        assert_eq!(s.score, 0);
    }

    #[test]
    fn test_rim_bounce_and_score_in_one_frame() {
        let mut s = state();
        s.hoop = Hoop::with_rim(Vec2::new(500.0, 300.0), 85.0);
        // Drifting left onto the left rim end, low in the gate
        fly(&mut s, Vec2::new(473.0, 303.0), Vec2::new(-3.0, 1.65));
        step(&mut s);

        // Kicked back towards the middle and still dropping through
        assert!(s.ball.vel.x > 0.0);
        assert!(s.ball.vel.y > 0.0);
        assert!(s.hoop.in_swish_gate(s.ball.pos));
        assert_eq!(s.score, 1);
        assert!(s.ball.is_flying());
    }

    #[test]
    fn test_out_of_bounds_bottom_counts_miss() {
        let mut s = state();
        fly(&mut s, Vec2::new(300.0, 899.0), Vec2::new(0.0, 2.0));
        step(&mut s);
        assert_eq!(s.misses, 1);
        assert!(!s.ball.is_flying());
        assert_eq!(s.ball.pos, Vec2::new(100.0, 650.0));
        assert_eq!(s.ball.vel, Vec2::ZERO);
        assert_eq!(s.drain_events(), vec![GameEvent::Missed { misses: 1 }]);
    }

    #[test]
    fn test_out_of_bounds_sides() {
        let mut s = state();
        fly(&mut s, Vec2::new(-95.0, 100.0), Vec2::new(-10.0, 0.0));
        step(&mut s);
        assert_eq!(s.misses, 1);

        // Right side, below the backboard so nothing stops it
        fly(&mut s, Vec2::new(1095.0, 700.0), Vec2::new(10.0, 0.0));
        step(&mut s);
        assert_eq!(s.misses, 2);
    }

    #[test]
    fn test_top_is_open() {
        let mut s = state();
        fly(&mut s, Vec2::new(300.0, -500.0), Vec2::new(0.0, -10.0));
        step(&mut s);
        assert!(s.ball.is_flying());
    }

    #[test]
    fn test_scored_turn_leaving_screen_is_not_a_miss() {
        let mut s = state();
        fly(&mut s, Vec2::new(300.0, 950.0), Vec2::new(0.0, 5.0));
        s.hoop.scored_this_turn = true;
        step(&mut s);
        assert_eq!(s.misses, 0);
        assert!(!s.hoop.scored_this_turn);
    }

    #[test]
    fn test_backboard_bounce_in_step() {
        let mut s = state();
        let board = s.hoop.backboard;
        fly(&mut s, Vec2::new(board.x - 30.0, board.y + 50.0), Vec2::new(10.0, 0.0));
        step(&mut s);
        assert!(s.ball.vel.x < 0.0);
        assert_eq!(s.ball.pos.x, board.x - BALL_RADIUS - 2.0);
    }

    #[test]
    fn test_restart_command() {
        let mut s = state();
        s.score = 3;
        s.misses = 2;
        let mut queue = CommandQueue::new();
        queue.push(Command::Restart);
        tick(&mut s, &mut queue);
        assert_eq!((s.score, s.misses), (0, 0));
    }

    #[test]
    fn test_modal_blocks_drag() {
        let mut s = state();
        let mut queue = CommandQueue::new();
        queue.push(Command::SetModalOpen(true));
        queue.push(Command::PointerDown(s.ball.pos));
        tick(&mut s, &mut queue);
        assert!(s.drag.is_none());

        queue.push(Command::SetModalOpen(false));
        queue.push(Command::PointerDown(s.ball.pos));
        tick(&mut s, &mut queue);
        assert!(s.drag.is_some());
    }

    #[test]
    fn test_resize_command() {
        let mut s = state();
        let mut queue = CommandQueue::new();
        queue.push(Command::Resize {
            width: 640.0,
            height: 480.0,
        });
        tick(&mut s, &mut queue);
        assert_eq!(s.viewport, Viewport::new(640.0, 480.0));
        assert_eq!(s.ball.pos, Vec2::new(100.0, 330.0));
        assert_eq!(s.hoop.backboard.x, 628.0);
    }
}
