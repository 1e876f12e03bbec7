//! Hemispiral elevation profile
//!
//! The hemispiral climbs a sphere of radius `r` while sweeping around the
//! vertical axis. Line width follows the elevation step per revolution, so to
//! make the width grow with the square of the elevation angle φ we need
//!
//! ```text
//! dφ/dθ = k0 + k1·φ²
//! ```
//!
//! with `k0` matching the base layer height at φ = 0 and `k1` chosen so the
//! rate matches the requested top width at φ = π/2. With φ(0) = start this
//! has the closed form
//!
//! ```text
//! φ(θ) = √(k0/k1) · tan(√(k0·k1)·θ + atan(start / √(k0/k1)))
//! ```
//!
//! which degenerates to `φ(θ) = start + k0·θ` when `k1` is zero.

use crate::error::{CamToolResult, ParameterError};
use std::f64::consts::{FRAC_PI_2, PI};

/// Elevation angle as a function of sweep angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurveProfile {
    /// Constant climb rate: `start + k0·θ`
    Linear { start: f64, k0: f64 },
    /// Quadratically growing climb rate: `k2·tan(k3·θ + k4)`
    Tangent { k2: f64, k3: f64, k4: f64 },
}

impl CurveProfile {
    /// Elevation angle φ at sweep angle `theta` (radians).
    pub fn elevation(&self, theta: f64) -> f64 {
        match *self {
            CurveProfile::Linear { start, k0 } => start + k0 * theta,
            CurveProfile::Tangent { k2, k3, k4 } => k2 * (k3 * theta + k4).tan(),
        }
    }
}

/// Solved profile plus the vertical offset that puts φ(0) on the first layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolvedProfile {
    pub profile: CurveProfile,
    /// Added to `r·sin(φ)` so the surface starts at the layer height.
    pub z_adjust: f64,
    /// Climb rate at φ = 0 (rad per rad).
    pub k0: f64,
    /// Growth of the climb rate with φ².
    pub k1: f64,
}

/// Boundary conditions of a hemispiral profile.
#[derive(Debug, Clone, Copy)]
pub struct ProfileSolver {
    /// Sphere radius (mm)
    pub radius: f64,
    /// Layer height at φ = 0 (mm)
    pub layer_height: f64,
    /// Elevation angle at θ = 0 (radians)
    pub start: f64,
    /// Line width reached at φ = π/2 (mm)
    pub top_width: f64,
}

impl ProfileSolver {
    pub fn new(radius: f64, layer_height: f64, start: f64, top_width: f64) -> Self {
        Self {
            radius,
            layer_height,
            start,
            top_width,
        }
    }

    /// Solve for φ(θ).
    ///
    /// Fails when the inputs are not finite and positive, or when the top
    /// width is narrower than the base layer's implied width (`k1 < 0`), which
    /// has no tangent solution.
    pub fn solve(&self) -> CamToolResult<SolvedProfile> {
        ParameterError::require_positive("radius", self.radius)?;
        ParameterError::require_positive("layer_height", self.layer_height)?;
        ParameterError::require_finite("start", self.start)?;
        ParameterError::require_positive("top_width", self.top_width)?;

        let circumference = self.radius * PI * 2.0;
        let k0 = self.layer_height / circumference;
        let k1 = (self.top_width / circumference - k0) / (FRAC_PI_2 * FRAC_PI_2);

        #[allow(clippy::float_cmp)]
        let profile = if k1 == 0.0 {
            CurveProfile::Linear {
                start: self.start,
                k0,
            }
        } else if k1 > 0.0 {
            let k2 = (k0 / k1).sqrt();
            let k3 = (k0 * k1).sqrt();
            let k4 = (self.start / k2).atan();
            CurveProfile::Tangent { k2, k3, k4 }
        } else {
            return Err(ParameterError::InvalidValue {
                name: "top_width".to_string(),
                reason: format!(
                    "{} mm is narrower than the {} mm base layer",
                    self.top_width, self.layer_height
                ),
            }
            .into());
        };

        let z_adjust = self.layer_height - self.radius * profile.elevation(0.0).sin();

        Ok(SolvedProfile {
            profile,
            z_adjust,
            k0,
            k1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_equal_widths_give_linear_profile() {
        // Top width equal to the layer height makes k1 exactly zero.
        let solved = ProfileSolver::new(75.0, 0.29, -0.44 * PI, 0.29)
            .solve()
            .unwrap();
        assert_eq!(solved.k1, 0.0);
        let CurveProfile::Linear { start, k0 } = solved.profile else {
            panic!("expected linear profile, got {:?}", solved.profile);
        };
        assert_eq!(start, -0.44 * PI);
        assert_eq!(solved.profile.elevation(2.0), start + k0 * 2.0);
    }

    #[test]
    fn test_wider_top_gives_tangent_profile() {
        let solved = ProfileSolver::new(25.0, 0.2, 0.1, 0.39).solve().unwrap();
        assert!(matches!(solved.profile, CurveProfile::Tangent { .. }));
        assert!((solved.profile.elevation(0.0) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_rate_follows_quadratic_law() {
        let solved = ProfileSolver::new(40.0, 0.2, 0.3, 0.35).solve().unwrap();
        let h = 1e-6;
        for theta in [-3.0, 0.0, 5.0, 20.0] {
            let phi = solved.profile.elevation(theta);
            let rate = (solved.profile.elevation(theta + h)
                - solved.profile.elevation(theta - h))
                / (2.0 * h);
            let expected = solved.k0 + solved.k1 * phi * phi;
            assert!(
                (rate - expected).abs() < 1e-7,
                "theta={} rate={} expected={}",
                theta,
                rate,
                expected
            );
        }
    }

    #[test]
    fn test_z_adjust_puts_start_on_first_layer() {
        let radius = 30.0;
        let solved = ProfileSolver::new(radius, 0.25, -0.8, 0.3).solve().unwrap();
        let z0 = radius * solved.profile.elevation(0.0).sin() + solved.z_adjust;
        assert!((z0 - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_narrow_top_rejected() {
        let err = ProfileSolver::new(25.0, 0.3, 0.0, 0.2).solve().unwrap_err();
        assert!(err.to_string().contains("top_width"));
    }

    #[test]
    fn test_non_positive_radius_rejected() {
        assert!(ProfileSolver::new(0.0, 0.2, 0.0, 0.3).solve().is_err());
    }

    proptest! {
        #[test]
        fn prop_boundary_condition_holds(
            radius in 1.0f64..200.0,
            layer_height in 0.05f64..0.5,
            start in -1.4f64..1.4,
            extra_width in 0.001f64..0.5,
        ) {
            let solved = ProfileSolver::new(radius, layer_height, start, layer_height + extra_width)
                .solve()
                .unwrap();
            prop_assert!((solved.profile.elevation(0.0) - start).abs() < 1e-9);
        }

        #[test]
        fn prop_profile_is_increasing(
            radius in 1.0f64..200.0,
            start in -1.4f64..1.2,
            extra_width in 0.0f64..0.3,
        ) {
            let solved = ProfileSolver::new(radius, 0.2, start, 0.2 + extra_width)
                .solve()
                .unwrap();
            let a = solved.profile.elevation(-1.0);
            let b = solved.profile.elevation(0.0);
            prop_assert!(a < b);
        }
    }
}
