//! Print session bracketing
//!
//! A session writes the file header and machine preamble when it begins and
//! the coda (cooldown, re-home) when it ends. The coda is also written when
//! an unfinished session is dropped, so an early `?` return or a panic in
//! the body still leaves the printer cooling down.

use crate::error::CamToolResult;
use crate::motion::{GcodeWriter, TRAVEL_FEEDRATE};
use hemikit_core::Position;
use std::io::Write;
use std::ops::{Deref, DerefMut};
use tracing::warn;

/// Height of the known-safe point the preamble moves to (mm).
pub const SAFE_Z: f64 = 0.5;

/// Header lines written before the preamble
#[derive(Debug, Clone, Default)]
pub struct SessionHeader {
    /// Program name, echoed on the first line
    pub program: String,
    /// Generation time; left out when `None` so output is reproducible
    pub timestamp: Option<String>,
}

impl SessionHeader {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            timestamp: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }
}

/// Scoped generation run over a borrowed [`GcodeWriter`].
pub struct Session<'a, W: Write> {
    writer: &'a mut GcodeWriter<W>,
    finished: bool,
}

impl<'a, W: Write> Session<'a, W> {
    /// Write header and preamble, and move the tracked state to the safe point.
    pub fn begin(writer: &'a mut GcodeWriter<W>, header: &SessionHeader) -> CamToolResult<Self> {
        write_header(writer, header)?;
        write_preamble(writer)?;
        writer.reset_state(Position::new(0.0, 0.0, SAFE_Z), 0.0, TRAVEL_FEEDRATE);
        Ok(Self {
            writer,
            finished: false,
        })
    }

    /// Write the coda and flush.
    pub fn finish(mut self) -> CamToolResult<()> {
        self.finished = true;
        write_coda(self.writer)?;
        self.writer.flush()
    }
}

impl<W: Write> Deref for Session<'_, W> {
    type Target = GcodeWriter<W>;

    fn deref(&self) -> &Self::Target {
        self.writer
    }
}

impl<W: Write> DerefMut for Session<'_, W> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.writer
    }
}

impl<W: Write> Drop for Session<'_, W> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Err(e) = write_coda(self.writer).and_then(|_| self.writer.flush()) {
            warn!("Failed to write coda for unfinished session: {}", e);
        }
    }
}

/// Run `body` inside a session. The coda is always written; an error from
/// `body` is returned in preference to one from the coda.
pub fn run_session<W, T, F>(
    writer: &mut GcodeWriter<W>,
    header: &SessionHeader,
    body: F,
) -> CamToolResult<T>
where
    W: Write,
    F: FnOnce(&mut GcodeWriter<W>) -> CamToolResult<T>,
{
    let mut session = Session::begin(writer, header)?;
    let result = body(&mut *session);
    let coda = session.finish();
    let value = result?;
    coda?;
    Ok(value)
}

fn write_header<W: Write>(g: &mut GcodeWriter<W>, header: &SessionHeader) -> CamToolResult<()> {
    g.comment(&header.program)?;
    if let Some(timestamp) = &header.timestamp {
        g.comment(&format!("Generated on {}", timestamp))?;
    }
    g.emit(";")?;
    g.comment("*** Settings ***")?;

    let p = g.profile().clone();
    g.comment(&format!("filament_diameter = {:?}", p.filament_diameter))?;
    g.comment(&format!("extrusion_width = {:?}", p.extrusion_width))?;
    g.comment(&format!("default_layer_height = {:?}", p.default_layer_height))?;
    g.comment(&format!("suck_mm = {:?}", p.suck_mm))?;
    g.comment(&format!("clearance = {:?}", p.clearance))?;
    g.comment(&format!("default_feedrate = {}", p.default_feedrate))?;
    g.comment(&format!("preheat_temperature = {}", p.preheat_temperature))?;
    g.comment(&format!("print_temperature = {}", p.print_temperature))
}

fn write_preamble<W: Write>(g: &mut GcodeWriter<W>) -> CamToolResult<()> {
    let preheat = g.profile().preheat_temperature;
    g.emit(";")?;
    g.comment("*** G-code Preamble ***")?;
    g.emit("")?;
    g.emit("G21  ; [mm] mode")?;
    g.emit("G90  ; absolute mode")?;
    g.emit("T0  ; Select extruder 0")?;
    g.emit(&format!(
        "M104 S{}  ; preheat to {} but don't wait",
        preheat, preheat
    ))?;
    g.emit("G28  ; home to top endstops")?;
    g.emit("G29  ; FSR autolevel and adjust first layer thickness")?;
    g.emit("")?;
    g.emit("G92 E0  ; reset extruder pos")?;
    g.emit("")?;
    g.emit(&format!(
        "G1 X0 Y0 Z{} F{}  ; Fast move to a known location",
        SAFE_Z, TRAVEL_FEEDRATE
    ))?;
    g.emit("")?;
    g.comment("*** Main G-code ***")?;
    g.emit("")
}

fn write_coda<W: Write>(g: &mut GcodeWriter<W>) -> CamToolResult<()> {
    g.emit("")?;
    g.comment("*** Coda ***")?;
    g.emit("")?;
    g.emit("M104 S0  ; cool extruder")?;
    g.emit("G28  ; home to top endstops")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CamToolError;
    use hemikit_core::PrinterProfile;
    use std::io;

    fn output(g: GcodeWriter<Vec<u8>>) -> String {
        String::from_utf8(g.into_inner()).unwrap()
    }

    #[test]
    fn test_preamble_sets_known_state() {
        let mut g = GcodeWriter::new(Vec::new(), PrinterProfile::default());
        let session = Session::begin(&mut g, &SessionHeader::new("hemikit")).unwrap();
        assert_eq!(session.position(), Position::new(0.0, 0.0, 0.5));
        assert_eq!(session.feedrate(), Some(18000));
        session.finish().unwrap();

        let text = output(g);
        assert!(text.starts_with("; hemikit\n;\n; *** Settings ***\n"));
        assert!(text.contains("; suck_mm = 15.0\n"));
        assert!(text.contains("M104 S245  ; preheat to 245 but don't wait\n"));
        assert!(text.contains("G1 X0 Y0 Z0.5 F18000  ; Fast move to a known location\n"));
        assert!(text.ends_with("M104 S0  ; cool extruder\nG28  ; home to top endstops\n"));
    }

    #[test]
    fn test_timestamp_is_optional() {
        let mut g = GcodeWriter::new(Vec::new(), PrinterProfile::default());
        let header = SessionHeader::new("hemikit").with_timestamp("Mon Oct 19 12:00:00 2026");
        Session::begin(&mut g, &header).unwrap().finish().unwrap();
        assert!(output(g).contains("; Generated on Mon Oct 19 12:00:00 2026\n"));
    }

    #[test]
    fn test_coda_written_when_body_fails() {
        let mut g = GcodeWriter::new(Vec::new(), PrinterProfile::default());
        let result: CamToolResult<()> = run_session(&mut g, &SessionHeader::new("t"), |g| {
            g.comment("body")?;
            Err(io::Error::new(io::ErrorKind::Other, "boom").into())
        });
        assert!(matches!(result, Err(CamToolError::IoError(_))));
        let text = output(g);
        assert!(text.contains("; body\n"));
        assert!(text.contains("; *** Coda ***"));
    }

    #[test]
    fn test_coda_written_on_drop() {
        let mut g = GcodeWriter::new(Vec::new(), PrinterProfile::default());
        {
            let mut session = Session::begin(&mut g, &SessionHeader::new("t")).unwrap();
            session.comment("abandoned").unwrap();
        }
        let text = output(g);
        assert_eq!(text.matches("; *** Coda ***").count(), 1);
        assert!(text.ends_with("G28  ; home to top endstops\n"));
    }
}
