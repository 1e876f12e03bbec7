//! Radial support scaffold
//!
//! Spokes printed from an outer ring towards the center. The number of
//! spokes doubles until neighbouring spokes on the rim are no more than
//! `gap` apart; each extra generation of spokes stops further out, where
//! the previous generation is still sparse enough to need it.

use crate::error::{CamToolResult, ParameterError};
use crate::motion::{GcodeWriter, HOP_FEEDRATE};
use hemikit_core::PartialPosition;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::io::Write;
use tracing::debug;

/// Parameters for the scaffold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaffoldParameters {
    /// Outer radius (mm)
    pub radius: f64,
    /// Largest allowed spacing between spokes (mm)
    pub gap: f64,
    /// Number of layers
    #[serde(default = "default_layers")]
    pub layers: u32,
}

fn default_layers() -> u32 {
    19
}

impl Default for ScaffoldParameters {
    fn default() -> Self {
        Self {
            radius: 40.0,
            gap: 5.0,
            layers: default_layers(),
        }
    }
}

/// Generator for the radial scaffold
pub struct ScaffoldGenerator {
    params: ScaffoldParameters,
}

impl ScaffoldGenerator {
    pub fn new(params: ScaffoldParameters) -> Self {
        Self { params }
    }

    /// Spoke count and the inner radius reached by each spoke generation.
    ///
    /// Index 0 is the innermost limit (half a line width from the center),
    /// used by the first two spokes.
    pub fn spoke_layout(&self, extrusion_width: f64) -> (usize, Vec<f64>) {
        let p = &self.params;
        let mut num_arcs: usize = 2;
        let mut arc_limits = vec![extrusion_width / 2.0];
        while p.radius * 2.0 * PI / num_arcs as f64 > p.gap {
            arc_limits.push(p.gap * num_arcs as f64 / (2.0 * PI));
            num_arcs <<= 1;
        }
        (num_arcs, arc_limits)
    }

    pub fn generate<W: Write>(&self, g: &mut GcodeWriter<W>) -> CamToolResult<()> {
        let p = &self.params;
        ParameterError::require_positive("radius", p.radius)?;
        ParameterError::require_positive("gap", p.gap)?;

        let layer_height = g.profile().default_layer_height;
        let feedrate = g.profile().default_feedrate;
        let print_temperature = g.profile().print_temperature;
        let suck_mm = g.profile().suck_mm;

        g.emit(&format!(
            "\n; Support, radius={:.6}, gap={:.6}",
            p.radius, p.gap
        ))?;
        let (num_arcs, arc_limits) = self.spoke_layout(g.profile().extrusion_width);
        g.comment(&format!(
            "num_arcs={}, arc_limits={:?}",
            num_arcs, arc_limits
        ))?;

        let (mut x, mut y) = (0.0, 0.0);
        for layer in 1..=p.layers {
            g.move_to(
                PartialPosition::z_only(layer as f64 * layer_height),
                Some(0.0),
                None,
            )?;
            if layer == 2 {
                g.set_hotend(print_temperature)?;
            }
            for arc in 0..num_arcs {
                let angle = PI * 2.0 * arc as f64 / num_arcs as f64;
                x = p.radius * angle.cos();
                y = p.radius * angle.sin();
                g.travel_to(PartialPosition::xy(x, y), HOP_FEEDRATE)?;

                // Spokes from later doublings (odd multiples of a higher bit)
                // stop further out.
                let mut bit = 1;
                let mut idx = arc_limits.len() - 1;
                while idx > 0 && arc & bit == 0 {
                    bit <<= 1;
                    idx -= 1;
                }
                x *= arc_limits[idx] / p.radius;
                y *= arc_limits[idx] / p.radius;
                g.move_to(PartialPosition::xy(x, y), None, Some(feedrate))?;
            }
        }

        g.extrude(-suck_mm)?;
        g.travel_to(PartialPosition::xy(x * 0.5, y * 0.5), HOP_FEEDRATE)?;

        debug!("Scaffold with {} spokes over {} layers", num_arcs, p.layers);
        Ok(())
    }
}
