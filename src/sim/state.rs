//! Game state and core simulation types
//!
//! One `GameState` is the whole session: ball, hoop, counters, the active
//! drag gesture and UI flags the simulation must respect.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::hoop::Hoop;
use crate::consts::*;
use crate::settings::{PhysicsTuning, Settings};
use crate::skins::{self, BallTheme};

/// Ball state - resting on the rack or in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BallState {
    /// Pinned to the rack with zero velocity, waiting for a throw
    #[default]
    Resting,
    /// Thrown; physics runs every frame until the ball leaves the screen
    Flying,
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Pixels per frame
    pub vel: Vec2,
    pub radius: f32,
    /// Visual spin only, never used for collision
    pub angle: f32,
    pub spin: f32,
    pub state: BallState,
}

impl Ball {
    pub fn new(rack: Vec2) -> Self {
        Self {
            pos: rack,
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            angle: 0.0,
            spin: 0.0,
            state: BallState::Resting,
        }
    }

    #[inline]
    pub fn is_flying(&self) -> bool {
        self.state == BallState::Flying
    }

    /// Put the ball back on the rack, motionless
    pub fn rack(&mut self, rack: Vec2) {
        self.pos = rack;
        self.vel = Vec2::ZERO;
        self.angle = 0.0;
        self.spin = 0.0;
        self.state = BallState::Resting;
    }
}

/// Drawing surface size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Where the ball rests between throws
    pub fn rack(&self) -> Vec2 {
        Vec2::new(RACK_X, self.height - RACK_OFFSET_Y)
    }

    /// Past the bottom, right or left edge by more than the margin.
    /// The top is open so high lobs can come back down.
    pub fn is_out_of_bounds(&self, pos: Vec2) -> bool {
        pos.y > self.height + OUT_OF_BOUNDS_MARGIN
            || pos.x > self.width + OUT_OF_BOUNDS_MARGIN
            || pos.x < -OUT_OF_BOUNDS_MARGIN
    }
}

/// An in-progress drag from the ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragGesture {
    /// Ball position when the drag began
    pub start: Vec2,
    /// Latest pointer position
    pub current: Vec2,
}

impl DragGesture {
    /// Velocity the ball would get if the drag ended now
    pub fn launch_velocity(&self, launch_scale: f32) -> Vec2 {
        (self.current - self.start) * launch_scale
    }
}

/// How a ball reset was triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetKind {
    /// Restart button or resize; never costs a miss
    Manual,
    /// Ball left the screen; counts a miss unless this turn scored
    OutOfBounds,
}

/// Notifications for the presentation layer, drained once per frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Launched { vel: Vec2 },
    Scored { score: u32 },
    Missed { misses: u32 },
    Restarted,
    SkinChanged { index: usize },
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub viewport: Viewport,
    pub ball: Ball,
    pub hoop: Hoop,
    pub score: u32,
    pub misses: u32,
    /// Active drag, if any
    pub drag: Option<DragGesture>,
    /// Selected `BALL_THEMES` index
    pub skin: usize,
    /// Skin picker is showing; new drags are refused
    pub modal_open: bool,
    pub tuning: PhysicsTuning,
    /// Events raised since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session laid out for the given viewport
    pub fn new(viewport: Viewport, settings: &Settings) -> Self {
        Self {
            viewport,
            ball: Ball::new(viewport.rack()),
            hoop: Hoop::layout(viewport),
            score: 0,
            misses: 0,
            drag: None,
            skin: settings.skin.min(skins::BALL_THEMES.len() - 1),
            modal_open: false,
            tuning: settings.physics.clone().sanitized(),
            events: Vec::new(),
        }
    }

    /// Currently selected ball theme
    pub fn theme(&self) -> &'static BallTheme {
        skins::theme(self.skin)
    }

    /// JSON snapshot of the session, pending events excluded
    pub fn snapshot(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Restore a session from `snapshot` output
    pub fn from_snapshot(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Return the ball to the rack and start a new turn
    pub fn reset_ball(&mut self, kind: ResetKind) {
        if kind == ResetKind::OutOfBounds && self.ball.is_flying() && !self.hoop.scored_this_turn {
            self.misses += 1;
            log::debug!("Miss ({} total)", self.misses);
            let misses = self.misses;
            self.events.push(GameEvent::Missed { misses });
        }
        self.ball.rack(self.viewport.rack());
        self.hoop.scored_this_turn = false;
    }

    /// Zero both counters and rack the ball
    pub fn restart(&mut self) {
        self.score = 0;
        self.misses = 0;
        self.reset_ball(ResetKind::Manual);
        log::info!("Restarted");
        self.events.push(GameEvent::Restarted);
    }

    /// Re-layout for a new viewport. A ball in flight keeps going.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.hoop.relayout(viewport);
        if !self.ball.is_flying() {
            self.reset_ball(ResetKind::Manual);
        }
        log::info!("Resized to {}x{}", viewport.width, viewport.height);
    }

    /// Pointer pressed. Starts a drag only near a resting ball with no modal up.
    pub fn begin_drag(&mut self, pointer: Vec2) {
        if self.ball.is_flying() || self.modal_open {
            return;
        }
        if crate::distance(pointer, self.ball.pos) < GRAB_RADIUS {
            self.drag = Some(DragGesture {
                start: self.ball.pos,
                current: pointer,
            });
        }
    }

    /// Pointer moved
    pub fn update_drag(&mut self, pointer: Vec2) {
        if let Some(drag) = self.drag.as_mut() {
            drag.current = pointer;
        }
    }

    /// Pointer released. Throws if the release is strong enough; weak
    /// releases are dropped and the ball stays racked.
    pub fn release_drag(&mut self) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        let vel = drag.launch_velocity(self.tuning.launch_scale);
        if vel.x.abs() + vel.y.abs() > self.tuning.launch_threshold {
            self.ball.vel = vel;
            self.ball.spin = vel.x * self.tuning.spin_factor;
            self.ball.state = BallState::Flying;
            log::debug!("Launched at ({:.2}, {:.2})", vel.x, vel.y);
            self.events.push(GameEvent::Launched { vel });
        }
    }

    pub fn select_skin(&mut self, index: usize) {
        if index < skins::BALL_THEMES.len() && index != self.skin {
            self.skin = index;
            self.events.push(GameEvent::SkinChanged { index });
        }
    }
}
