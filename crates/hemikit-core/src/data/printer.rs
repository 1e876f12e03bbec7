//! Printer profile
//!
//! Material and machine settings consumed by the motion writer and the
//! toolpath generators, plus the tuning knobs of the adaptive tracer.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Printer and material settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrinterProfile {
    /// Filament diameter (mm)
    pub filament_diameter: f64,
    /// Width of a deposited line (mm)
    pub extrusion_width: f64,
    /// Layer height used when a move does not specify one (mm)
    pub default_layer_height: f64,
    /// Retraction length used for wipes (mm of filament)
    pub suck_mm: f64,
    /// Vertical hop used to clear the print during travel (mm)
    pub clearance: f64,
    /// Feed rate for printing moves (mm/min)
    pub default_feedrate: u32,
    /// Hotend set-point emitted in the preamble (°C)
    pub preheat_temperature: u32,
    /// Hotend set-point once the first real layer starts (°C)
    pub print_temperature: u32,
}

impl Default for PrinterProfile {
    fn default() -> Self {
        Self {
            filament_diameter: 1.75,
            extrusion_width: 0.4,
            default_layer_height: 0.2,
            suck_mm: 15.0,
            clearance: 0.3,
            default_feedrate: 990,
            preheat_temperature: 245,
            print_temperature: 235,
        }
    }
}

impl PrinterProfile {
    /// Create a profile for the given filament, line width and layer height
    pub fn new(filament_diameter: f64, extrusion_width: f64, default_layer_height: f64) -> Self {
        Self {
            filament_diameter,
            extrusion_width,
            default_layer_height,
            ..Default::default()
        }
    }

    /// Cross-sectional area of the filament (mm²)
    pub fn filament_area(&self) -> f64 {
        let r = self.filament_diameter / 2.0;
        r * r * PI
    }

    /// Length of filament that deposits a line of `distance` mm at `layer_height`
    ///
    /// Deposited cross-section times distance equals filament cross-section
    /// times extruded length.
    pub fn extrusion_length(&self, distance: f64, layer_height: f64) -> f64 {
        distance * self.extrusion_width * layer_height / self.filament_area()
    }

    /// Validate profile values
    pub fn validate(&self) -> Result<()> {
        positive("filament_diameter", self.filament_diameter)?;
        positive("extrusion_width", self.extrusion_width)?;
        positive("default_layer_height", self.default_layer_height)?;
        non_negative("suck_mm", self.suck_mm)?;
        non_negative("clearance", self.clearance)?;

        if self.default_feedrate == 0 {
            return Err(Error::invalid_parameter(
                "default_feedrate",
                "must be > 0",
            ));
        }

        Ok(())
    }
}

/// Tuning of the adaptive curve tracer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceSettings {
    /// Chord error bound (mm)
    pub tolerance: f64,
    /// Seed angular step (radians)
    pub initial_step: f64,
    /// Z of the clearance move after a trace (mm)
    pub lift_height: f64,
}

impl Default for TraceSettings {
    fn default() -> Self {
        Self {
            tolerance: 0.005,
            initial_step: 0.001,
            lift_height: 100.0,
        }
    }
}

impl TraceSettings {
    /// Validate tracer settings
    pub fn validate(&self) -> Result<()> {
        positive("tolerance", self.tolerance)?;
        positive("initial_step", self.initial_step)?;
        if !self.lift_height.is_finite() {
            return Err(Error::invalid_parameter("lift_height", "must be finite"));
        }
        Ok(())
    }
}

fn positive(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::invalid_parameter(
            name,
            format!("must be > 0, got {}", value),
        ));
    }
    Ok(())
}

fn non_negative(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::invalid_parameter(
            name,
            format!("must be >= 0, got {}", value),
        ));
    }
    Ok(())
}
