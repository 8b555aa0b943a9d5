//! Parameter automation
//!
//! A parameter curve is a list of ramp segments, each with explicit start
//! and end times and values. `value_at(t)` evaluates the curve directly, so
//! there is no scheduler state and any time offset can be sampled.

use serde::{Deserialize, Serialize};

/// Interpolation shape of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Curve {
    Linear,
    /// Geometric interpolation; both endpoints must be strictly positive
    Exponential,
}

/// One ramp from `(start_time, start_value)` to `(end_time, end_value)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start_time: f64,
    pub end_time: f64,
    pub start_value: f64,
    pub end_value: f64,
    pub curve: Curve,
}

impl Segment {
    pub fn linear(start_time: f64, start_value: f64, end_time: f64, end_value: f64) -> Self {
        Self {
            start_time,
            end_time,
            start_value,
            end_value,
            curve: Curve::Linear,
        }
    }

    pub fn exponential(start_time: f64, start_value: f64, end_time: f64, end_value: f64) -> Self {
        Self {
            start_time,
            end_time,
            start_value,
            end_value,
            curve: Curve::Exponential,
        }
    }

    fn value_at(&self, t: f64) -> f64 {
        let span = self.end_time - self.start_time;
        if span <= 0.0 {
            return self.end_value;
        }
        let x = ((t - self.start_time) / span).clamp(0.0, 1.0);
        match self.curve {
            Curve::Linear => self.start_value + (self.end_value - self.start_value) * x,
            Curve::Exponential => {
                if self.start_value <= 0.0 || self.end_value <= 0.0 {
                    // Geometric ramps are undefined through zero; hold the start
                    return self.start_value;
                }
                self.start_value * (self.end_value / self.start_value).powf(x)
            }
        }
    }
}

/// A piecewise parameter curve
///
/// Segments are expected in ascending time order. Before the first segment
/// the curve holds its first start value; after the last it holds the last
/// end value. Gaps between segments hold the previous end value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Automation {
    initial: f64,
    segments: Vec<Segment>,
}

impl Automation {
    /// A parameter fixed at `value` for all time
    pub fn constant(value: f64) -> Self {
        Self {
            initial: value,
            segments: Vec::new(),
        }
    }

    pub fn from_segments(initial: f64, segments: Vec<Segment>) -> Self {
        Self { initial, segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_constant(&self) -> bool {
        self.segments.is_empty()
    }

    /// Evaluate the curve at time `t` (seconds)
    pub fn value_at(&self, t: f64) -> f64 {
        let mut current = self.initial;
        for segment in &self.segments {
            if t < segment.start_time {
                return current;
            }
            if t <= segment.end_time {
                return segment.value_at(t);
            }
            current = segment.end_value;
        }
        current
    }

    /// Exponential swell: `low` → `high` over the first half of `duration`,
    /// then back to `low` at `duration`
    pub fn swell(low: f64, high: f64, duration: f64) -> Self {
        let mid = duration / 2.0;
        Self::from_segments(
            low,
            vec![
                Segment::exponential(0.0, low, mid, high),
                Segment::exponential(mid, high, duration, low),
            ],
        )
    }

    /// Symmetric fade envelope: 0 → `peak` over `fade`, hold, `peak` → 0
    /// ending at `duration`
    ///
    /// When the two fades overlap the hold collapses and both ramps meet at
    /// `duration / 2`, reaching `peak` there.
    pub fn fade_in_out(peak: f64, fade: f64, duration: f64) -> Self {
        if duration.is_nan() || duration <= 0.0 {
            return Self::constant(0.0);
        }
        let fade = fade.clamp(0.0, duration);
        let fade_in_end = fade.min(duration / 2.0);
        let fade_out_start = (duration - fade).max(duration / 2.0);
        Self::from_segments(
            0.0,
            vec![
                Segment::linear(0.0, 0.0, fade_in_end, peak),
                Segment::linear(fade_in_end, peak, fade_out_start, peak),
                Segment::linear(fade_out_start, peak, duration, 0.0),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_constant() {
        let a = Automation::constant(0.05);
        assert!(a.is_constant());
        assert_relative_eq!(a.value_at(-1.0), 0.05);
        assert_relative_eq!(a.value_at(123.0), 0.05);
    }

    #[test]
    fn test_swell_endpoints() {
        let a = Automation::swell(200.0, 800.0, 10.0);
        assert_relative_eq!(a.value_at(0.0), 200.0, epsilon = 1e-9);
        assert_relative_eq!(a.value_at(5.0), 800.0, epsilon = 1e-9);
        assert_relative_eq!(a.value_at(10.0), 200.0, epsilon = 1e-9);
        assert_relative_eq!(a.value_at(20.0), 200.0, epsilon = 1e-9);
    }

    #[test]
    fn test_swell_is_geometric() {
        let a = Automation::swell(200.0, 800.0, 10.0);
        // Halfway through the rise is the geometric mean
        assert_relative_eq!(a.value_at(2.5), 400.0, epsilon = 1e-9);
        assert_relative_eq!(a.value_at(7.5), 400.0, epsilon = 1e-9);
    }

    #[test]
    fn test_fade_in_out_shape() {
        let a = Automation::fade_in_out(0.25, 2.0, 10.0);
        assert_relative_eq!(a.value_at(0.0), 0.0);
        assert_relative_eq!(a.value_at(1.0), 0.125, epsilon = 1e-12);
        assert_relative_eq!(a.value_at(2.0), 0.25, epsilon = 1e-12);
        assert_relative_eq!(a.value_at(5.0), 0.25, epsilon = 1e-12);
        assert_relative_eq!(a.value_at(8.0), 0.25, epsilon = 1e-12);
        assert_relative_eq!(a.value_at(9.0), 0.125, epsilon = 1e-12);
        assert_relative_eq!(a.value_at(10.0), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_fade_overlap_meets_at_midpoint() {
        // Fades longer than half the duration: no hold, peak at the middle
        let a = Automation::fade_in_out(0.25, 3.0, 4.0);
        assert_relative_eq!(a.value_at(2.0), 0.25, epsilon = 1e-12);
        assert_relative_eq!(a.value_at(1.0), 0.125, epsilon = 1e-12);
        assert_relative_eq!(a.value_at(3.0), 0.125, epsilon = 1e-12);
        assert_relative_eq!(a.value_at(4.0), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_duration() {
        let a = Automation::fade_in_out(0.25, 0.0, 0.0);
        assert_relative_eq!(a.value_at(0.0), 0.0);
    }

    #[test]
    fn test_gap_holds_previous_value() {
        let a = Automation::from_segments(
            1.0,
            vec![
                Segment::linear(0.0, 1.0, 1.0, 2.0),
                Segment::linear(3.0, 5.0, 4.0, 6.0),
            ],
        );
        assert_relative_eq!(a.value_at(2.0), 2.0);
        assert_relative_eq!(a.value_at(3.5), 5.5);
    }

    #[test]
    fn test_exponential_through_zero_holds() {
        let s = Segment::exponential(0.0, 0.0, 1.0, 10.0);
        assert_relative_eq!(s.value_at(0.5), 0.0);
    }
}
