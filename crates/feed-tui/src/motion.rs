//! Spring-driven motion for transient header content.

use std::time::Duration;

/// Longest integration step; larger frame gaps are split.
const MAX_STEP_SECS: f32 = 0.004;

/// Damped harmonic spring (unit mass) chasing `target`.
#[derive(Debug, Clone)]
pub struct Spring {
    damping: f32,
    stiffness: f32,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    pub fn new(damping: f32, stiffness: f32) -> Self {
        Self {
            damping,
            stiffness,
            value: 0.0,
            velocity: 0.0,
            target: 0.0,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Jump to `value` with no velocity.
    pub fn snap(&mut self, value: f32) {
        self.value = value;
        self.velocity = 0.0;
    }

    pub fn is_at_rest(&self) -> bool {
        (self.value - self.target).abs() < 1e-3 && self.velocity.abs() < 1e-3
    }

    /// Semi-implicit Euler integration over `dt`.
    pub fn step(&mut self, dt: Duration) {
        let mut remaining = dt.as_secs_f32();
        while remaining > 0.0 {
            let h = remaining.min(MAX_STEP_SECS);
            let accel =
                -self.stiffness * (self.value - self.target) - self.damping * self.velocity;
            self.velocity += accel * h;
            self.value += self.velocity * h;
            remaining -= h;
        }
        if self.is_at_rest() {
            self.snap(self.target);
        }
    }
}

/// Enter/exit transition of the "checking for new episodes" line:
/// fades in while sliding down from 20 units above, and reverses on exit.
#[derive(Debug, Clone)]
pub struct EnterExit {
    spring: Spring,
    mounted: bool,
}

pub const SLIDE_FROM: f32 = -20.0;

impl EnterExit {
    pub fn new() -> Self {
        Self {
            spring: Spring::new(20.0, 200.0),
            mounted: false,
        }
    }

    /// Drive the transition toward shown/hidden and advance by `dt`.
    pub fn update(&mut self, show: bool, dt: Duration) {
        if show && !self.mounted {
            self.mounted = true;
            self.spring.snap(0.0);
        }
        self.spring.set_target(if show { 1.0 } else { 0.0 });
        self.spring.step(dt);
        if !show && self.spring.is_at_rest() {
            self.mounted = false;
        }
    }

    pub fn is_visible(&self) -> bool {
        self.mounted
    }

    pub fn opacity(&self) -> f32 {
        self.spring.value().clamp(0.0, 1.0)
    }

    pub fn translate_y(&self) -> f32 {
        SLIDE_FROM * (1.0 - self.spring.value())
    }
}

impl Default for EnterExit {
    fn default() -> Self {
        Self::new()
    }
}
