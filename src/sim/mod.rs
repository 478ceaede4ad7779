//! Frame-stepped simulation module
//!
//! All gameplay logic lives here:
//! - One physics step per display frame, no substeps
//! - Input arrives as queued commands, never as direct mutation
//! - No rendering or platform dependencies

pub mod collision;
pub mod hoop;
pub mod predict;
pub mod state;
pub mod tick;

pub use collision::{
    CollisionResult, ball_point_contact, reflect_velocity, resolve_backboard, resolve_rim_point,
};
pub use hoop::{Hoop, Rect};
pub use predict::predict_path;
pub use state::{Ball, BallState, DragGesture, GameEvent, GameState, ResetKind, Viewport};
pub use tick::{Command, CommandQueue, apply_command, step, tick};
