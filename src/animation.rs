//! Time-driven animation state.
//!
//! All accumulators advance from measured wall-clock deltas rather than a
//! fixed step, so a slow frame only costs smoothness, never correctness.

use std::f32::consts::PI;

use glam::{Mat4, Vec3};

/// Remembers when the previous tick happened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    last_ms: f64,
}

impl FrameClock {
    pub fn new(now_ms: f64) -> Self {
        Self { last_ms: now_ms }
    }

    /// Milliseconds since the previous tick. A clock that runs backwards
    /// yields zero instead of a negative step.
    pub fn tick(&mut self, now_ms: f64) -> f64 {
        let elapsed = (now_ms - self.last_ms).max(0.0);
        self.last_ms = now_ms;
        elapsed
    }

    #[inline]
    pub fn last_ms(&self) -> f64 {
        self.last_ms
    }
}

/// Reduces to `[0, 360)`. Values just below 360 round up to 360.0 in `f32`
/// and are folded back to 0.
fn wrap_degrees(degrees: f64) -> f32 {
    let d = degrees.rem_euclid(360.0) as f32;
    if d >= 360.0 {
        0.0
    } else {
        d
    }
}

/// Rotation angle in degrees, kept in `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleAccumulator {
    degrees: f32,
    /// Degrees per second.
    rate: f32,
}

impl AngleAccumulator {
    pub const DEFAULT_RATE: f32 = 45.0;

    pub fn new(rate: f32) -> Self {
        Self::starting_at(0.0, rate)
    }

    pub fn starting_at(degrees: f32, rate: f32) -> Self {
        Self {
            degrees: wrap_degrees(degrees as f64),
            rate,
        }
    }

    pub fn advance(&mut self, elapsed_ms: f64) -> f32 {
        let step = self.rate as f64 * elapsed_ms / 1000.0;
        self.degrees = wrap_degrees(self.degrees as f64 + step);
        self.degrees
    }

    #[inline]
    pub fn degrees(&self) -> f32 {
        self.degrees
    }

    #[inline]
    pub fn radians(&self) -> f32 {
        self.degrees.to_radians()
    }
}

impl Default for AngleAccumulator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_RATE)
    }
}

/// Scalar that moves at a constant rate and jumps back to `min` once it
/// passes `max`. Loops, never bounces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WrappingOffset {
    value: f32,
    /// Units per second.
    rate: f32,
    min: f32,
    max: f32,
}

impl WrappingOffset {
    pub fn new(value: f32, rate: f32, min: f32, max: f32) -> Self {
        debug_assert!(min < max);
        Self { value, rate, min, max }
    }

    pub fn advance(&mut self, elapsed_s: f32) -> f32 {
        self.value += self.rate * elapsed_s;
        if self.value > self.max {
            self.value = self.min;
        }
        self.value
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn bounds(&self) -> (f32, f32) {
        (self.min, self.max)
    }
}

/// Sine wave running across a row of `2·half + 1` elements indexed
/// `-half..=half`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelingWave {
    half: i32,
}

impl TravelingWave {
    pub fn new(half: i32) -> Self {
        debug_assert!(half > 0);
        Self { half }
    }

    /// Maps `i / half ∈ [-1, 1]` linearly onto `[0, 2π]`.
    pub fn phase(&self, i: i32) -> f32 {
        (i as f32 / self.half as f32) * PI + PI
    }

    /// Scale factor in `[-1, 1]` for element `i` at time `t` seconds.
    pub fn scale(&self, i: i32, t: f32) -> f32 {
        (-2.0 * t + self.phase(i)).sin()
    }

    pub fn indices(&self) -> std::ops::RangeInclusive<i32> {
        -self.half..=self.half
    }
}

/// Applies `m` about `center` instead of the world origin.
pub fn pivot(center: Vec3, m: Mat4) -> Mat4 {
    Mat4::from_translation(center) * m * Mat4::from_translation(-center)
}
