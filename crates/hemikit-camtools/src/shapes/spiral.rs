//! Flat vase spiral
//!
//! A cylinder wall printed as one continuous helix: a flat revolution at the
//! first layer, a steady climb of one layer height per revolution, and a
//! final flat revolution at the top.

use crate::error::{CamToolResult, ParameterError};
use crate::motion::GcodeWriter;
use hemikit_core::PartialPosition;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::io::Write;
use tracing::debug;

/// Parameters for the vase spiral
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpiralParameters {
    /// Cylinder radius (mm)
    pub radius: f64,
    /// Wall height (mm)
    pub height: f64,
    /// Points per revolution
    #[serde(default = "default_arcs")]
    pub arcs: usize,
}

fn default_arcs() -> usize {
    300
}

impl Default for SpiralParameters {
    fn default() -> Self {
        Self {
            radius: 20.0,
            height: 10.0,
            arcs: default_arcs(),
        }
    }
}

/// Generator for the vase spiral
pub struct SpiralGenerator {
    params: SpiralParameters,
}

impl SpiralGenerator {
    pub fn new(params: SpiralParameters) -> Self {
        Self { params }
    }

    pub fn generate<W: Write>(&self, g: &mut GcodeWriter<W>) -> CamToolResult<()> {
        let p = &self.params;
        ParameterError::require_positive("radius", p.radius)?;
        ParameterError::require_positive("height", p.height)?;
        if p.arcs == 0 {
            return Err(ParameterError::InvalidValue {
                name: "arcs".to_string(),
                reason: "must be at least 1".to_string(),
            }
            .into());
        }

        let layer_height = g.profile().default_layer_height;
        let feedrate = g.profile().default_feedrate;
        let print_temperature = g.profile().print_temperature;

        g.emit(&format!(
            "\n; Spiral, radius={:.6}, height={:.6}",
            p.radius, p.height
        ))?;

        let full_begin = p.arcs;
        let full_end = (p.arcs as f64 * p.height / layer_height) as usize;
        let true_end = full_end + p.arcs;
        let step_height = layer_height / p.arcs as f64;

        for arc in 0..true_end + 2 {
            let angle = (PI * 2.0 / p.arcs as f64) * arc as f64;
            let x = p.radius * angle.cos();
            let y = p.radius * angle.sin();
            if arc < full_begin {
                g.move_to(
                    PartialPosition::xyz(x, y, layer_height),
                    None,
                    Some(feedrate),
                )?;
            } else if arc <= full_end {
                if arc == full_begin {
                    g.emit("\n; First layer")?;
                    g.set_hotend(print_temperature)?;
                }
                let z = arc as f64 * step_height;
                g.move_to(PartialPosition::xyz(x, y, z), None, Some(feedrate))?;
            } else if arc <= true_end {
                // Level off at the top, thinning the last revolution.
                g.move_to(
                    PartialPosition::xyz(x, y, p.height),
                    None,
                    Some(feedrate),
                )?;
            } else {
                g.wipe(x + 2.0, y)?;
            }
        }

        debug!("Spiral climbed {} arcs to {} mm", full_end, p.height);
        Ok(())
    }
}
