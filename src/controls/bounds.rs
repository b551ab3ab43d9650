use glam::DVec3;

use crate::options::ControlOptions;

/// Keeps the camera's distance from its target inside
/// `[min_distance, max_distance]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsEnforcer {
    min: f64,
    max: f64,
}

impl BoundsEnforcer {
    /// Range taken from the options.
    #[must_use]
    pub fn new(options: &ControlOptions) -> Self {
        Self {
            min: options.min_distance,
            max: options.max_distance,
        }
    }

    /// The clamped eye vector, or `None` when `eye` is already in range.
    #[must_use]
    pub fn clamp(&self, eye: DVec3) -> Option<DVec3> {
        let len_sq = eye.length_squared();
        if len_sq > self.max * self.max {
            Some(with_length(eye, self.max))
        } else if len_sq < self.min * self.min {
            Some(with_length(eye, self.min))
        } else {
            None
        }
    }
}

/// `v` rescaled to `length`; a zero vector stays zero.
fn with_length(v: DVec3, length: f64) -> DVec3 {
    v.normalize_or_zero() * length
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enforcer(min: f64, max: f64) -> BoundsEnforcer {
        BoundsEnforcer::new(&ControlOptions {
            min_distance: min,
            max_distance: max,
            ..ControlOptions::default()
        })
    }

    #[test]
    fn in_range_is_untouched() {
        assert_eq!(enforcer(1.0, 10.0).clamp(DVec3::new(0.0, 3.0, 4.0)), None);
    }

    #[test]
    fn clamps_both_ends_preserving_direction() {
        let b = enforcer(2.0, 4.0);
        let far = b.clamp(DVec3::new(0.0, 30.0, 40.0)).unwrap();
        assert!((far.length() - 4.0).abs() < 1e-12);
        assert!((far.normalize() - DVec3::new(0.0, 0.6, 0.8)).length() < 1e-12);
        let near = b.clamp(DVec3::new(0.0, 0.3, 0.4)).unwrap();
        assert!((near.length() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn default_range_is_unbounded_above() {
        let b = BoundsEnforcer::new(&ControlOptions::default());
        assert_eq!(b.clamp(DVec3::splat(1e12)), None);
    }
}
