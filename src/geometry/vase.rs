use crate::error::{Result, VaseError};

use super::cross_section::{CentroidPolicy, CrossSection};
use super::radial_profile::RadialProfile;

/// How profiles between control points are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationMode {
    /// The control profile closest in time; ties go to the earlier one.
    Nearest,
    /// Componentwise linear blend of the two bracketing control profiles.
    #[default]
    Linear,
}

/// A control cross-section of a vase.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPoint {
    pub timestamp: f64,
    pub profile: RadialProfile,
}

/// The space-time volume lofted through a sequence of time-stamped profiles.
///
/// Control timestamps are strictly increasing and every profile shares the
/// same angular sample count. Outside the control range the nearest end
/// profile is used unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct VaseDefinition {
    controls: Vec<ControlPoint>,
    mode: InterpolationMode,
}

impl VaseDefinition {
    /// Builds a vase from `(timestamp, profile)` pairs.
    ///
    /// # Errors
    ///
    /// - [`VaseError::Empty`] if no controls are given.
    /// - [`VaseError::NonIncreasing`] if timestamps are not strictly increasing
    ///   (or not finite).
    /// - [`VaseError::SampleCountMismatch`] if profiles disagree on `n_theta`.
    pub fn new(controls: Vec<(f64, RadialProfile)>, mode: InterpolationMode) -> Result<Self> {
        let Some((_, first)) = controls.first() else {
            return Err(VaseError::Empty.into());
        };
        let expected = first.n_theta();

        for (index, (timestamp, profile)) in controls.iter().enumerate() {
            if !timestamp.is_finite() {
                return Err(VaseError::NonIncreasing { index }.into());
            }
            if index > 0 && *timestamp <= controls[index - 1].0 {
                return Err(VaseError::NonIncreasing { index }.into());
            }
            if profile.n_theta() != expected {
                return Err(VaseError::SampleCountMismatch {
                    index,
                    expected,
                    found: profile.n_theta(),
                }
                .into());
            }
        }

        let controls = controls
            .into_iter()
            .map(|(timestamp, profile)| ControlPoint { timestamp, profile })
            .collect();
        Ok(Self { controls, mode })
    }

    /// Samples each cross-section's outer ring with `n_theta` rays about its
    /// area centroid.
    ///
    /// # Errors
    ///
    /// Propagates boundary and geometry errors from the first failing section,
    /// then the same errors as [`VaseDefinition::new`].
    pub fn from_cross_sections(
        sections: &[CrossSection],
        n_theta: usize,
        mode: InterpolationMode,
    ) -> Result<Self> {
        let controls = sections
            .iter()
            .map(|s| {
                RadialProfile::from_cross_section(s, n_theta, CentroidPolicy::AreaCentroid)
                    .map(|p| (s.timestamp, p))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(controls, mode)
    }

    /// The control points in time order.
    #[must_use]
    pub fn controls(&self) -> &[ControlPoint] {
        &self.controls
    }

    /// Number of control points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    /// Always `false` for a constructed vase.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    #[must_use]
    pub fn mode(&self) -> InterpolationMode {
        self.mode
    }

    /// Angular sample count shared by every control profile.
    #[must_use]
    pub fn n_theta(&self) -> usize {
        self.controls.first().map_or(0, |c| c.profile.n_theta())
    }

    /// Control timestamps in order.
    #[must_use]
    pub fn timestamps(&self) -> Vec<f64> {
        self.controls.iter().map(|c| c.timestamp).collect()
    }

    /// Time between the first and last control point.
    #[must_use]
    pub fn time_span(&self) -> f64 {
        match (self.controls.first(), self.controls.last()) {
            (Some(a), Some(b)) => b.timestamp - a.timestamp,
            _ => 0.0,
        }
    }

    /// The boundary at time `t`.
    ///
    /// Times outside the control range clamp to the first or last profile.
    /// Control timestamps reproduce their profile exactly.
    #[must_use]
    pub fn profile_at(&self, t: f64) -> RadialProfile {
        let first = &self.controls[0];
        let last = &self.controls[self.controls.len() - 1];
        if self.controls.len() == 1 || t.is_nan() || t <= first.timestamp {
            return first.profile.clone();
        }
        if t >= last.timestamp {
            return last.profile.clone();
        }

        // first.timestamp < t < last.timestamp, so 1 <= upper <= len - 1.
        let upper = self.controls.partition_point(|c| c.timestamp <= t);
        let lo = &self.controls[upper - 1];
        let hi = &self.controls[upper];
        if t <= lo.timestamp {
            return lo.profile.clone();
        }

        match self.mode {
            InterpolationMode::Nearest => {
                if t - lo.timestamp <= hi.timestamp - t {
                    lo.profile.clone()
                } else {
                    hi.profile.clone()
                }
            }
            InterpolationMode::Linear => {
                let span = hi.timestamp - lo.timestamp;
                let f = if span > 0.0 {
                    (t - lo.timestamp) / span
                } else {
                    0.0
                };
                lo.profile.lerp(&hi.profile, f)
            }
        }
    }

    /// Whether `(x, y)` is inside the vase at time `t`.
    #[must_use]
    pub fn contains(&self, t: f64, x: f64, y: f64) -> bool {
        self.profile_at(t).contains(x, y)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::VoxloftError;
    use crate::math::Point2;
    use approx::assert_relative_eq;

    fn circle(r: f64, n: usize) -> RadialProfile {
        RadialProfile::circle(Point2::origin(), r, n).unwrap()
    }

    fn growing_vase(mode: InterpolationMode) -> VaseDefinition {
        VaseDefinition::new(vec![(0.0, circle(1.0, 8)), (10.0, circle(2.0, 8))], mode).unwrap()
    }

    #[test]
    fn empty_rejected() {
        assert!(matches!(
            VaseDefinition::new(vec![], InterpolationMode::Linear),
            Err(VoxloftError::Vase(VaseError::Empty))
        ));
    }

    #[test]
    fn duplicate_timestamp_rejected() {
        let err = VaseDefinition::new(
            vec![(1.0, circle(1.0, 8)), (1.0, circle(2.0, 8))],
            InterpolationMode::Linear,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            VoxloftError::Vase(VaseError::NonIncreasing { index: 1 })
        ));
    }

    #[test]
    fn mismatched_sample_count_rejected() {
        let err = VaseDefinition::new(
            vec![(0.0, circle(1.0, 8)), (1.0, circle(2.0, 16))],
            InterpolationMode::Linear,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            VoxloftError::Vase(VaseError::SampleCountMismatch {
                index: 1,
                expected: 8,
                found: 16
            })
        ));
    }

    #[test]
    fn single_control_is_constant_everywhere() {
        let prof = circle(3.0, 8);
        let vase =
            VaseDefinition::new(vec![(5.0, prof.clone())], InterpolationMode::Nearest).unwrap();
        for t in [-1e300, -5.0, 5.0, 1e12, f64::MAX] {
            assert_eq!(vase.profile_at(t), prof);
        }
    }

    #[test]
    fn linear_reproduces_endpoints() {
        let vase = growing_vase(InterpolationMode::Linear);
        assert_eq!(vase.profile_at(0.0), vase.controls()[0].profile);
        assert_eq!(vase.profile_at(10.0), vase.controls()[1].profile);
    }

    #[test]
    fn linear_reproduces_interior_controls() {
        let vase = VaseDefinition::new(
            vec![
                (0.0, circle(1.0, 8)),
                (0.3, circle(1.7, 8)),
                (1.0, circle(2.0, 8)),
            ],
            InterpolationMode::Linear,
        )
        .unwrap();
        assert_eq!(vase.profile_at(0.3), vase.controls()[1].profile);
    }

    #[test]
    fn linear_midpoint() {
        let vase = growing_vase(InterpolationMode::Linear);
        let mid = vase.profile_at(5.0);
        for r in mid.radii() {
            assert_relative_eq!(*r, 1.5);
        }
    }

    #[test]
    fn clamps_outside_range() {
        let vase = growing_vase(InterpolationMode::Linear);
        assert_eq!(vase.profile_at(-100.0), vase.controls()[0].profile);
        assert_eq!(vase.profile_at(100.0), vase.controls()[1].profile);
    }

    #[test]
    fn nearest_breaks_ties_towards_earlier() {
        let vase = growing_vase(InterpolationMode::Nearest);
        assert_eq!(vase.profile_at(5.0), vase.controls()[0].profile);
        assert_eq!(vase.profile_at(5.001), vase.controls()[1].profile);
        assert_eq!(vase.profile_at(4.999), vase.controls()[0].profile);
    }

    #[test]
    fn growing_circle_scenario() {
        let vase = growing_vase(InterpolationMode::Linear);
        for i in 0..=20 {
            let t = f64::from(i) * 0.5;
            assert!(vase.contains(t, 0.0, 0.0), "origin at t={t}");
        }
        assert!(!vase.contains(0.0, 1.5, 0.0));
        assert!(vase.contains(5.0, 1.5, 0.0));
        assert!(vase.contains(10.0, 1.5, 0.0));
        assert!(!vase.contains(4.9, 1.5, 0.0));
    }

    #[test]
    fn from_cross_sections_shares_sample_count() {
        let square = |t: f64, h: f64| {
            CrossSection::new(
                t,
                vec![
                    Point2::new(-h, -h),
                    Point2::new(h, -h),
                    Point2::new(h, h),
                    Point2::new(-h, h),
                ],
            )
        };
        let vase = VaseDefinition::from_cross_sections(
            &[square(0.0, 1.0), square(2.0, 3.0)],
            12,
            InterpolationMode::Linear,
        )
        .unwrap();
        assert_eq!(vase.len(), 2);
        assert_eq!(vase.n_theta(), 12);
        assert_relative_eq!(vase.time_span(), 2.0);
        assert_eq!(vase.timestamps(), vec![0.0, 2.0]);
    }
}
