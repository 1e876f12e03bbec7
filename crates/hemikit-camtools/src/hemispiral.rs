//! Hemispiral Tracer
//!
//! Prints a single continuous line that climbs a sphere: one flat priming
//! revolution at the first layer height, then the surface
//! `(r·cos φ·cos θ, r·cos φ·sin θ, r·sin φ + z_adjust)` with φ(θ) from
//! [`ProfileSolver`], until φ reaches the end elevation.
//!
//! The angular step is adapted so the chord between emitted points stays
//! within a tolerance of the true curve. The error measured for one step
//! sizes the next step; a step is never rejected.

use crate::error::{CamToolResult, ParameterError};
use crate::motion::{GcodeWriter, TRAVEL_FEEDRATE};
use crate::profile::ProfileSolver;
use hemikit_core::{PartialPosition, Position, TraceSettings};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::io::Write;
use tracing::{debug, warn};

/// Parameters for a hemispiral
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HemispiralParameters {
    /// Sphere radius (mm)
    pub radius: f64,
    /// Elevation angle where the surface starts (radians)
    pub start: f64,
    /// Elevation angle where the surface ends (radians)
    pub end: f64,
    /// Line width at the pole (mm). Defaults to the extrusion width minus 0.01.
    #[serde(default)]
    pub top_width: Option<f64>,
}

impl Default for HemispiralParameters {
    fn default() -> Self {
        Self {
            radius: 75.0,
            start: -0.44 * PI,
            end: 0.44 * PI,
            top_width: None,
        }
    }
}

/// Where the tracer is along the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracePhase {
    /// Flat revolution below the surface start (θ < 0)
    Priming,
    /// On the surface (θ ≥ 0, φ < end)
    Surfacing,
    /// End elevation reached
    Done,
}

/// Summary of a finished trace
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceReport {
    /// Number of moves emitted after the start point
    pub steps: usize,
    /// Smallest angular step taken (radians)
    pub min_step: f64,
    /// Largest angular step taken (radians)
    pub max_step: f64,
    /// Sweep angle of the last point
    pub final_theta: f64,
    /// Elevation angle of the last point
    pub final_phi: f64,
}

/// Transient state of one trace.
struct StepState {
    theta: f64,
    phi: f64,
    d_theta: f64,
    /// Last accepted point on the surface (not the priming circle).
    last: Position,
}

/// Step size for the next iteration given the chord error of this one.
///
/// Error grows with the square of the step, so scaling by `√(tolerance/err)`
/// aims the next chord at the tolerance. A zero error keeps the step.
pub fn next_step(d_theta: f64, tolerance: f64, err: f64) -> f64 {
    if err > 0.0 {
        d_theta * (tolerance / err).sqrt()
    } else {
        d_theta
    }
}

/// Distance from the curve point at the half step to the chord midpoint.
pub fn chord_error(from: &Position, half: &Position, to: &Position) -> f64 {
    half.distance_to(&from.midpoint(to))
}

/// Generator for hemispiral G-code
pub struct HemispiralTracer {
    params: HemispiralParameters,
    settings: TraceSettings,
}

impl HemispiralTracer {
    pub fn new(params: HemispiralParameters, settings: TraceSettings) -> Self {
        Self { params, settings }
    }

    pub fn params(&self) -> &HemispiralParameters {
        &self.params
    }

    fn validate(&self) -> CamToolResult<()> {
        ParameterError::require_positive("radius", self.params.radius)?;
        ParameterError::require_finite("start", self.params.start)?;
        ParameterError::require_finite("end", self.params.end)?;
        self.settings.validate()?;
        Ok(())
    }

    /// Trace the hemispiral, finishing with a wipe to the origin and a lift.
    pub fn trace<W: Write>(&self, g: &mut GcodeWriter<W>) -> CamToolResult<TraceReport> {
        self.validate()?;

        let p = &self.params;
        let layer_height = g.profile().default_layer_height;
        let feedrate = g.profile().default_feedrate;
        let print_temperature = g.profile().print_temperature;
        let top_width = p
            .top_width
            .unwrap_or(g.profile().extrusion_width - 0.01);

        let solved = ProfileSolver::new(p.radius, layer_height, p.start, top_width).solve()?;

        g.emit(&format!(
            "\n; Hemi-Spiral, radius={:.6}, start={:.6}, end={:.6}, top_width={:.6}",
            p.radius, p.start, p.end, top_width
        ))?;
        debug!(
            "Hemispiral profile {:?}, z_adjust={:.4}",
            solved.profile, solved.z_adjust
        );

        let surface = |theta: f64| -> (Position, f64) {
            let phi = solved.profile.elevation(theta);
            let ring = p.radius * phi.cos();
            (
                Position::new(
                    ring * theta.cos(),
                    ring * theta.sin(),
                    p.radius * phi.sin() + solved.z_adjust,
                ),
                phi,
            )
        };

        let start_phi = solved.profile.elevation(0.0);
        let priming_radius = p.radius * start_phi.cos();
        let mut step = StepState {
            theta: -2.0 * PI,
            phi: start_phi,
            d_theta: self.settings.initial_step,
            last: Position::new(priming_radius, 0.0, layer_height),
        };
        g.move_to(step.last.into(), None, Some(feedrate))?;

        if step.phi >= p.end {
            warn!(
                "Hemispiral start elevation {:.4} is not below end {:.4}; nothing to trace",
                step.phi, p.end
            );
        }

        let mut phase = TracePhase::Priming;
        let mut report = TraceReport {
            steps: 0,
            min_step: f64::INFINITY,
            max_step: 0.0,
            final_theta: step.theta,
            final_phi: step.phi,
        };

        while step.phi < p.end {
            let taken = step.d_theta;
            let n_theta = step.theta + taken;
            let (next, n_phi) = surface(n_theta);
            let (half, _) = surface(step.theta + taken / 2.0);

            let err = chord_error(&step.last, &half, &next);
            step.d_theta = next_step(taken, self.settings.tolerance, err);
            step.last = next;
            step.phi = n_phi;

            let target = if n_theta < 0.0 {
                Position::new(
                    priming_radius * n_theta.cos(),
                    priming_radius * n_theta.sin(),
                    layer_height,
                )
            } else {
                if phase == TracePhase::Priming {
                    Self::begin_surface(g, print_temperature)?;
                    phase = TracePhase::Surfacing;
                }
                next
            };

            g.move_to(target.into(), None, Some(feedrate))?;
            step.theta = n_theta;

            report.steps += 1;
            report.min_step = report.min_step.min(taken);
            report.max_step = report.max_step.max(taken);
        }
        phase = TracePhase::Done;
        report.final_theta = step.theta;
        report.final_phi = step.phi;

        g.wipe(0.0, 0.0)?;
        g.travel_to(
            PartialPosition::z_only(self.settings.lift_height),
            TRAVEL_FEEDRATE,
        )?;

        debug!(
            "Hemispiral {:?} at {} after {} steps, d_theta {:.6}..{:.6}",
            phase, step.last, report.steps, report.min_step, report.max_step
        );
        Ok(report)
    }

    /// Marks the first real layer once the priming revolution is done.
    fn begin_surface<W: Write>(g: &mut GcodeWriter<W>, print_temperature: u32) -> CamToolResult<()> {
        g.emit("\n; First layer")?;
        g.comment("backfeed slightly to reduce pressure")?;
        g.extrude(-1.0)?;
        g.set_hotend(print_temperature)
    }
}
