use thiserror::Error;

use super::math::{Frame, Vec2};

/// Playable area `[0, width) x [0, height)` in whole cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    width: f32,
    height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoundsError {
    #[error("bounds must be at least 1x1 cells, got {width}x{height}")]
    Empty { width: u32, height: u32 },
}

impl Bounds {
    pub fn new(width: u32, height: u32) -> Result<Self, BoundsError> {
        if width == 0 || height == 0 {
            return Err(BoundsError::Empty { width, height });
        }
        Ok(Self {
            width: width as f32,
            height: height as f32,
        })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x < self.width && pos.y >= 0.0 && pos.y < self.height
    }
}

/// Spatial state of an actor that can move: its frame, the movement queued
/// since the last tick, and optional bounds.
#[derive(Debug, Clone, Default)]
pub struct PawnBody {
    frame: Frame,
    velocity: Vec2,
    bounds: Option<Bounds>,
}

impl PawnBody {
    /// Queues movement for the next integration. Calls within one tick add up.
    pub fn apply_movement(&mut self, delta: Vec2) {
        self.velocity += delta;
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub(crate) fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = Some(bounds);
    }

    pub(crate) fn clamp_to_bounds(&mut self) {
        let Some(bounds) = self.bounds else {
            return;
        };
        if self.velocity.is_zero() {
            return;
        }
        self.velocity.x = clamp_axis(self.frame.pos.x, self.velocity.x, bounds.width);
        self.velocity.y = clamp_axis(self.frame.pos.y, self.velocity.y, bounds.height);
    }

    pub(crate) fn integrate(&mut self) {
        if self.velocity.is_zero() {
            return;
        }
        self.frame.facing = self.velocity;
        self.frame.pos += self.velocity;
    }

    pub(crate) fn reset_velocity(&mut self) {
        self.velocity = Vec2::ZERO;
    }
}

// Truncates the step so it lands on 0 or on the last whole cell below `max`.
fn clamp_axis(pos: f32, velocity: f32, max: f32) -> f32 {
    if pos + velocity < 0.0 {
        -pos
    } else if pos + velocity >= max {
        max - 1.0 - pos
    } else {
        velocity
    }
}
