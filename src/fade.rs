//! Tick-driven color fade
//!
//! No coroutines or implicit suspension: the fade is a small state machine
//! the host advances with an explicit `tick(dt)`.

use glam::Vec3;

use crate::error::ConfigError;

/// Which endpoint the fade rests at, or is heading away from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pole {
    Starting,
    Other,
}

/// Fades between two RGB colors (components in [0, 1]) over a fixed
/// duration, flipping direction every completed fade.
#[derive(Debug, Clone)]
pub struct ColorFade {
    starting_color: Vec3,
    other_color: Vec3,
    /// Seconds a full fade takes.
    duration: f32,
    /// Progress through the active fade in [0, 1).
    progress: f32,
    resting_at: Pole,
    active: bool,
}

impl ColorFade {
    pub fn new(starting_color: Vec3, other_color: Vec3, duration: f32) -> Result<Self, ConfigError> {
        if !(duration > 0.0 && duration.is_finite()) {
            return Err(ConfigError::InvalidDuration(duration));
        }
        Ok(Self {
            starting_color,
            other_color,
            duration,
            progress: 0.0,
            resting_at: Pole::Starting,
            active: false,
        })
    }

    /// Begin fading toward the opposite color. Triggering mid-fade restarts
    /// the current fade from its resting pole.
    pub fn trigger(&mut self) {
        self.progress = 0.0;
        self.active = true;
    }

    pub fn is_fading(&self) -> bool {
        self.active
    }

    /// Advance by `dt` seconds and return the current color. Completing a
    /// fade flips the resting pole, so the next trigger fades back.
    pub fn tick(&mut self, dt: f32) -> Vec3 {
        let (start, end) = match self.resting_at {
            Pole::Starting => (self.starting_color, self.other_color),
            Pole::Other => (self.other_color, self.starting_color),
        };
        if !self.active {
            return start;
        }

        let color = start.lerp(end, self.progress);
        self.progress += dt / self.duration;
        if self.progress >= 1.0 {
            self.active = false;
            self.progress = 0.0;
            self.resting_at = match self.resting_at {
                Pole::Starting => Pole::Other,
                Pole::Other => Pole::Starting,
            };
            return end;
        }
        color
    }
}
