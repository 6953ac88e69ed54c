//! Easing curves and time-based tweens.
//!
//! Widgets own their tweens and advance them from [`crate::Widget::tick`], so a
//! single host clock drives every animation in the tree.

use crate::Color;

/// Standard easing functions for animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Linear interpolation (no easing)
    #[default]
    Linear,
    /// Quadratic ease in and out (slow start and end)
    EaseInOut,
}

impl Easing {
    /// Apply easing function to a normalized time value (0.0 to 1.0).
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0f64).mul_add(t, 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// Trait for types that can be interpolated.
pub trait Interpolate: Clone {
    /// Interpolate between two values.
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        (to - from).mul_add(t, *from)
    }
}

impl Interpolate for f32 {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        (*to - *from).mul_add(t as Self, *from)
    }
}

impl Interpolate for Color {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        from.lerp(to, t as f32)
    }
}

/// A value animated from `from` to `to` over `duration` seconds.
#[derive(Debug, Clone)]
pub struct Tween<T: Interpolate> {
    /// Start value
    pub from: T,
    /// End value
    pub to: T,
    /// Total duration in seconds
    pub duration: f64,
    /// Elapsed time
    pub elapsed: f64,
    /// Easing function
    pub easing: Easing,
}

impl<T: Interpolate> Tween<T> {
    /// Create a new tween with ease-in-out easing.
    #[must_use]
    pub fn new(from: T, to: T, duration: f64) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: 0.0,
            easing: Easing::EaseInOut,
        }
    }

    /// A tween already resting at `value`.
    #[must_use]
    pub fn settled(value: T, duration: f64) -> Self {
        Self {
            from: value.clone(),
            to: value,
            duration,
            elapsed: duration,
            easing: Easing::EaseInOut,
        }
    }

    /// Set easing function.
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Progress from 0.0 to 1.0.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Current interpolated value; exactly `to` once complete.
    #[must_use]
    pub fn value(&self) -> T {
        let progress = self.progress();
        if progress >= 1.0 {
            return self.to.clone();
        }
        T::interpolate(&self.from, &self.to, self.easing.apply(progress))
    }

    /// Whether the tween has reached its end value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advance by `dt` seconds; returns `true` while still running.
    pub fn advance(&mut self, dt: f64) -> bool {
        if dt > 0.0 {
            self.elapsed = (self.elapsed + dt).min(self.duration);
        }
        !self.is_complete()
    }

    /// Restart towards `to`, starting from the current value.
    pub fn retarget(&mut self, to: T) {
        self.from = self.value();
        self.to = to;
        self.elapsed = 0.0;
    }
}
