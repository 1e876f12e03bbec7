//! Destringing test
//!
//! A square tube whose last side is skipped on every test layer: the nozzle
//! retracts, travels across the gap and primes again, with the retraction
//! growing each layer. The layer where strings stop forming shows the
//! retraction length the filament needs.

use crate::error::{CamToolResult, ParameterError};
use crate::motion::{GcodeWriter, HOP_FEEDRATE};
use hemikit_core::PartialPosition;
use serde::{Deserialize, Serialize};
use std::io::Write;
use tracing::debug;

/// Parameters for the destringing test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DestringParameters {
    /// Half the side length of the square (mm)
    pub half_size: f64,
    /// Solid layers printed before the test starts
    pub solid_layers: u32,
    /// Layers with a travel gap
    pub test_layers: u32,
    /// Retraction added per test layer (mm)
    pub retract_step: f64,
}

impl Default for DestringParameters {
    fn default() -> Self {
        Self {
            half_size: 10.0,
            solid_layers: 10,
            test_layers: 100,
            retract_step: 0.1,
        }
    }
}

/// Generator for the destringing test
pub struct DestringGenerator {
    params: DestringParameters,
}

impl DestringGenerator {
    pub fn new(params: DestringParameters) -> Self {
        Self { params }
    }

    pub fn generate<W: Write>(&self, g: &mut GcodeWriter<W>) -> CamToolResult<()> {
        let p = &self.params;
        ParameterError::require_positive("half_size", p.half_size)?;
        ParameterError::require_finite("retract_step", p.retract_step)?;

        let s = p.half_size;
        // Each side of the square climbs a quarter layer.
        let rise = g.profile().default_layer_height / 4.0;
        let feedrate = g.profile().default_feedrate;

        g.travel_to(PartialPosition::xyz(s, s, 0.4), HOP_FEEDRATE)?;
        g.travel_to(PartialPosition::xyz(s, s, 0.0), HOP_FEEDRATE)?;

        let mut z = 0.0;
        for _ in 0..p.solid_layers {
            for (x, y) in [(s, -s), (-s, -s), (-s, s), (s, s)] {
                z += rise;
                g.move_to(PartialPosition::xyz(x, y, z), None, Some(feedrate))?;
            }
        }

        for layer in 0..p.test_layers {
            let suck = layer as f64 * p.retract_step;

            for (x, y) in [(s, -s), (-s, -s), (-s, s)] {
                z += rise;
                g.move_to(PartialPosition::xyz(x, y, z), None, Some(feedrate))?;
            }
            g.extrude(-suck)?;
            g.move_to(PartialPosition::xyz(-s, -s, z), Some(0.0), Some(HOP_FEEDRATE))?;
            g.move_to(PartialPosition::xyz(s, -s, z), Some(0.0), None)?;
            g.move_to(PartialPosition::xyz(s, s, z), Some(0.0), None)?;
            z += rise;
            g.move_to(PartialPosition::xyz(s, s, z), Some(0.0), None)?;
            g.extrude(suck)?;
        }

        debug!(
            "Destring test: {} solid + {} test layers, top at {:.2} mm",
            p.solid_layers, p.test_layers, z
        );
        Ok(())
    }
}
