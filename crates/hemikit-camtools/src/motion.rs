//! Motion Writer
//!
//! Single owner of the printer's position, extruder position and commanded
//! feed rate. Every motion command in a generated program goes through
//! [`GcodeWriter::move_to`] or [`GcodeWriter::extrude`], so the absolute `E`
//! values always agree with the distance travelled.

use crate::error::CamToolResult;
use hemikit_core::{PartialPosition, Position, PrinterProfile};
use std::io::Write;

/// Extrusion deltas smaller than this are not worth an `E` field (mm).
pub const EXTRUSION_NOISE_FLOOR: f64 = 0.0001;
/// Feed rate of retract/prime moves (mm/min).
pub const RETRACT_FEEDRATE: u32 = 6000;
/// Feed rate of fast XY travel (mm/min).
pub const TRAVEL_FEEDRATE: u32 = 18000;
/// Feed rate of Z hops (mm/min).
pub const HOP_FEEDRATE: u32 = 12000;
/// Feed rate of the travel after a wipe retraction (mm/min).
pub const WIPE_FEEDRATE: u32 = 2400;

/// G-code emitter with position, extrusion and feed-rate tracking.
pub struct GcodeWriter<W: Write> {
    out: W,
    profile: PrinterProfile,
    position: Position,
    extruder: f64,
    feedrate: Option<u32>,
}

impl<W: Write> GcodeWriter<W> {
    /// Create a writer at the origin with the extruder at zero.
    pub fn new(out: W, profile: PrinterProfile) -> Self {
        Self {
            out,
            profile,
            position: Position::default(),
            extruder: 0.0,
            feedrate: None,
        }
    }

    /// Linear move to `target`, extruding for the distance covered.
    ///
    /// Axes that are `None` or already at the target value are left out of
    /// the command. `layer_height` defaults to the profile's layer height;
    /// pass `Some(0.0)` for a travel move. `F` is only written when the feed
    /// rate changes.
    pub fn move_to(
        &mut self,
        target: PartialPosition,
        layer_height: Option<f64>,
        feedrate: Option<u32>,
    ) -> CamToolResult<()> {
        let mut cmd = String::from("G1");

        let dx = match target.x {
            Some(x) if x != self.position.x => {
                let d = x - self.position.x;
                self.position.x = x;
                cmd.push_str(&format!(" X{:.2}", x));
                d
            }
            _ => 0.0,
        };
        let dy = match target.y {
            Some(y) if y != self.position.y => {
                let d = y - self.position.y;
                self.position.y = y;
                cmd.push_str(&format!(" Y{:.2}", y));
                d
            }
            _ => 0.0,
        };
        let dz = match target.z {
            Some(z) if z != self.position.z => {
                let d = z - self.position.z;
                self.position.z = z;
                cmd.push_str(&format!(" Z{:.2}", z));
                d
            }
            _ => 0.0,
        };

        let layer_height = layer_height.unwrap_or(self.profile.default_layer_height);
        let distance = (dx * dx + dy * dy + dz * dz).sqrt();
        let e_len = self.profile.extrusion_length(distance, layer_height);
        // The accumulator always advances, even when the field is dropped.
        self.extruder += e_len;
        if e_len.abs() >= EXTRUSION_NOISE_FLOOR {
            cmd.push_str(&format!(" E{:.4}", self.extruder));
        }

        if let Some(f) = feedrate {
            if self.feedrate != Some(f) {
                cmd.push_str(&format!(" F{}", f));
                self.feedrate = Some(f);
            }
        }

        writeln!(self.out, "{}", cmd)?;
        Ok(())
    }

    /// Move without depositing material.
    pub fn travel_to(&mut self, target: PartialPosition, feedrate: u32) -> CamToolResult<()> {
        self.move_to(target, Some(0.0), Some(feedrate))
    }

    /// Retract (negative) or prime (positive) the filament in place.
    pub fn extrude(&mut self, delta_mm: f64) -> CamToolResult<()> {
        self.extruder += delta_mm;
        writeln!(self.out, "G1 E{:.4} F{}", self.extruder, RETRACT_FEEDRATE)?;
        self.feedrate = Some(RETRACT_FEEDRATE);
        Ok(())
    }

    /// Write a raw line. No state is tracked.
    pub fn emit(&mut self, line: &str) -> CamToolResult<()> {
        writeln!(self.out, "{}", line)?;
        Ok(())
    }

    /// Write a `;` comment line.
    pub fn comment(&mut self, text: &str) -> CamToolResult<()> {
        self.emit(&format!("; {}", text))
    }

    /// Pause for `millis` milliseconds (`G4`).
    pub fn dwell(&mut self, millis: u32) -> CamToolResult<()> {
        self.emit(&format!("G4 P{}", millis))
    }

    /// Set the hotend temperature without waiting (`M104`).
    pub fn set_hotend(&mut self, celsius: u32) -> CamToolResult<()> {
        self.emit(&format!("M104 S{}", celsius))
    }

    /// Retract by the profile's suck length, then travel to (x, y).
    pub fn wipe(&mut self, x: f64, y: f64) -> CamToolResult<()> {
        self.comment("Wipe")?;
        self.extrude(-self.profile.suck_mm)?;
        self.travel_to(PartialPosition::xy(x, y), WIPE_FEEDRATE)
    }

    /// Hop up by the clearance, travel to (x, y), and drop back down.
    pub fn clean_move(&mut self, x: f64, y: f64) -> CamToolResult<()> {
        let saved_z = self.position.z;
        self.travel_to(
            PartialPosition::z_only(saved_z + self.profile.clearance),
            HOP_FEEDRATE,
        )?;
        self.travel_to(PartialPosition::xy(x, y), TRAVEL_FEEDRATE)?;
        self.travel_to(PartialPosition::z_only(saved_z), HOP_FEEDRATE)
    }

    /// Overwrite the tracked state after commands that set it directly
    /// (`G92`, a known-position move written as raw text).
    pub(crate) fn reset_state(&mut self, position: Position, extruder: f64, feedrate: u32) {
        self.position = position;
        self.extruder = extruder;
        self.feedrate = Some(feedrate);
    }

    /// Flush the underlying sink.
    pub fn flush(&mut self) -> CamToolResult<()> {
        self.out.flush()?;
        Ok(())
    }

    /// Current position
    pub fn position(&self) -> Position {
        self.position
    }

    /// Absolute extruder position (mm of filament)
    pub fn extruder_position(&self) -> f64 {
        self.extruder
    }

    /// Last commanded feed rate, if any
    pub fn feedrate(&self) -> Option<u32> {
        self.feedrate
    }

    /// Printer profile used for extrusion
    pub fn profile(&self) -> &PrinterProfile {
        &self.profile
    }

    /// Consume the writer and return the sink
    pub fn into_inner(self) -> W {
        self.out
    }
}
