//! Priming skirt
//!
//! Heats and primes the nozzle off to the side, then lays one slightly
//! widening spiral loop around the print area and wipes inward.

use crate::error::{CamToolResult, ParameterError};
use crate::motion::{GcodeWriter, TRAVEL_FEEDRATE};
use hemikit_core::PartialPosition;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::io::Write;
use tracing::debug;

/// Radial growth of the skirt spiral (mm per radian).
const GROWTH_PER_RADIAN: f64 = 1.5;
/// How far inside the skirt the closing wipe ends (mm).
const WIPE_INSET: f64 = 12.0;
/// Points printed past one full revolution so the loop overlaps itself.
const OVERLAP_ARCS: usize = 10;
/// Feed rate of the descent to the first layer (mm/min).
const DESCENT_FEEDRATE: u32 = 1200;

/// Parameters for the skirt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkirtParameters {
    /// Starting radius of the loop (mm)
    pub radius: f64,
    /// Points per revolution
    pub arcs: usize,
}

impl Default for SkirtParameters {
    fn default() -> Self {
        Self {
            radius: 50.0,
            arcs: 500,
        }
    }
}

/// Generator for the priming skirt
pub struct SkirtGenerator {
    params: SkirtParameters,
}

impl SkirtGenerator {
    pub fn new(params: SkirtParameters) -> Self {
        Self { params }
    }

    pub fn generate<W: Write>(&self, g: &mut GcodeWriter<W>) -> CamToolResult<()> {
        let p = &self.params;
        ParameterError::require_positive("radius", p.radius)?;
        if p.arcs == 0 {
            return Err(ParameterError::InvalidValue {
                name: "arcs".to_string(),
                reason: "must be at least 1".to_string(),
            }
            .into());
        }

        let layer_height = g.profile().default_layer_height;
        let clearance = g.profile().clearance;
        let feedrate = g.profile().default_feedrate;

        g.emit(&format!("\n; Custom skirt with radius {:.6}", p.radius))?;
        g.travel_to(
            PartialPosition::xyz(p.radius, 0.0, layer_height + clearance),
            TRAVEL_FEEDRATE,
        )?;
        g.travel_to(PartialPosition::z_only(layer_height), DESCENT_FEEDRATE)?;

        g.comment("Wait 15s to give heating time")?;
        g.dwell(15000)?;
        g.extrude(2.0)?;
        g.comment("Wait another 5s to melt the primed filament")?;
        g.dwell(5000)?;
        g.extrude(5.0)?;

        let end = p.arcs + OVERLAP_ARCS;
        let wipe_scale = 1.0 - WIPE_INSET / p.radius;
        for arc in 0..=end {
            let angle = (PI * 2.0 / p.arcs as f64) * (arc + 1) as f64;
            let ring = p.radius + angle * GROWTH_PER_RADIAN;
            let x = ring * angle.cos();
            let y = ring * angle.sin();
            if arc < end {
                g.move_to(
                    PartialPosition::xy(x, y),
                    Some(layer_height * 1.2),
                    Some(feedrate),
                )?;
            } else {
                g.wipe(x * wipe_scale, y * wipe_scale)?;
            }
        }

        debug!("Skirt radius {} with {} points", p.radius, end);
        Ok(())
    }
}
