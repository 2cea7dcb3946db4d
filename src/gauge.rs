//! UV index gauge geometry and marker animation
//!
//! The gauge is a 240° arc starting at 150° and ending at 390° (past a full
//! turn), measured clockwise in screen coordinates where y grows downward.
//! A UV index in `[0, max]` maps linearly onto that arc; readings above `max`
//! pin the marker to the arc end.

use std::time::{Duration, Instant};

pub const START_ANGLE: f64 = 150.0;
pub const END_ANGLE: f64 = 390.0;
pub const CENTER: (f64, f64) = (125.0, 125.0);
pub const MARKER_RADIUS: f64 = 92.0;
pub const LABEL_RADIUS: f64 = MARKER_RADIUS + 20.0;
/// Side of the square drawing surface the gauge lives in
pub const VIEWBOX: f64 = 250.0;

/// Angle in degrees for a UV index on a scale of `max_uv_index`.
///
/// The index is clamped to `[0, max_uv_index]`. A NaN ratio maps to the
/// arc start. A zero or non-finite scale is rejected by configuration.
pub fn angle_for(uv_index: f64, max_uv_index: f64) -> f64 {
    let ratio = uv_index / max_uv_index;
    let ratio = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
    START_ANGLE + ratio * (END_ANGLE - START_ANGLE)
}

/// Point at `angle_deg` on a circle around `center`
pub fn point_on_circle(center: (f64, f64), radius: f64, angle_deg: f64) -> (f64, f64) {
    let radians = angle_deg.to_radians();
    (
        center.0 + radius * radians.cos(),
        center.1 + radius * radians.sin(),
    )
}

/// Quadratic ease-out on `t` in `[0, 1]`
pub fn ease_out_quad(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Exposure category for a UV index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskBand {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl RiskBand {
    pub fn for_index(uv_index: f64) -> Self {
        match uv_index {
            x if x < 3.0 => RiskBand::Low,
            x if x < 6.0 => RiskBand::Moderate,
            x if x < 8.0 => RiskBand::High,
            x if x < 11.0 => RiskBand::VeryHigh,
            _ => RiskBand::Extreme,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskBand::Low => "Low",
            RiskBand::Moderate => "Moderate",
            RiskBand::High => "High",
            RiskBand::VeryHigh => "Very High",
            RiskBand::Extreme => "Extreme",
        }
    }
}

/// Single-step transition between two angles
#[derive(Debug, Clone, Copy, PartialEq)]
struct Transition {
    from: f64,
    to: f64,
    started_at: Instant,
}

/// Gauge state: the displayed UV index and the angle animating toward it
#[derive(Debug, Clone, PartialEq)]
pub struct UvGauge {
    max_uv_index: f64,
    uv_index: f64,
    duration: Duration,
    transition: Transition,
}

impl UvGauge {
    /// A gauge resting at `uv_index` with no animation in flight
    pub fn new(uv_index: f64, max_uv_index: f64, duration: Duration, now: Instant) -> Self {
        let angle = angle_for(uv_index, max_uv_index);
        Self {
            max_uv_index,
            uv_index,
            duration,
            transition: Transition {
                from: angle,
                to: angle,
                started_at: now,
            },
        }
    }

    pub fn uv_index(&self) -> f64 {
        self.uv_index
    }

    pub fn max_uv_index(&self) -> f64 {
        self.max_uv_index
    }

    /// Angle the marker is heading to
    pub fn target_angle(&self) -> f64 {
        self.transition.to
    }

    /// Point the gauge at a new index, animating from wherever the marker is now
    pub fn set_uv_index(&mut self, uv_index: f64, now: Instant) {
        if uv_index == self.uv_index {
            return;
        }
        let from = self.angle_at(now);
        self.uv_index = uv_index;
        self.transition = Transition {
            from,
            to: angle_for(uv_index, self.max_uv_index),
            started_at: now,
        };
    }

    /// Marker angle at `now`
    pub fn angle_at(&self, now: Instant) -> f64 {
        let t = self.progress(now);
        let Transition { from, to, .. } = self.transition;
        from + (to - from) * ease_out_quad(t)
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.transition.from != self.transition.to && self.progress(now) < 1.0
    }

    /// Marker centre in viewbox coordinates
    pub fn marker_at(&self, now: Instant) -> (f64, f64) {
        point_on_circle(CENTER, MARKER_RADIUS, self.angle_at(now))
    }

    /// Label position in viewbox coordinates
    pub fn label_at(&self, now: Instant) -> (f64, f64) {
        point_on_circle(CENTER, LABEL_RADIUS, self.angle_at(now))
    }

    pub fn risk_band(&self) -> RiskBand {
        RiskBand::for_index(self.uv_index)
    }

    fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.transition.started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }
}
