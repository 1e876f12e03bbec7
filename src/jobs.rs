//! Job dispatch
//!
//! A job is one of the printable programs the binary knows about. Running a
//! job writes only the main G-code body; the caller brackets it with a
//! session.

use hemikit_camtools::{
    CamToolResult, DestringGenerator, DestringParameters, GcodeWriter, HemispiralParameters,
    HemispiralTracer, ScaffoldGenerator, ScaffoldParameters, SkirtGenerator, SkirtParameters,
    SpiralGenerator, SpiralParameters,
};
use hemikit_core::TraceSettings;
use std::f64::consts::PI;
use std::io::Write;
use tracing::info;

/// Line width at the pole used by the demo dome (mm).
const DEMO_TOP_WIDTH: f64 = 0.29;

#[derive(Debug, Clone, PartialEq)]
pub enum Job {
    /// Skirt, clean move to the dome rim, prime, then the default dome
    Demo,
    Hemispiral {
        params: HemispiralParameters,
        skirt: bool,
    },
    Spiral {
        params: SpiralParameters,
        skirt: bool,
    },
    Scaffold(ScaffoldParameters),
    Destring(DestringParameters),
}

impl Job {
    pub fn name(&self) -> &'static str {
        match self {
            Job::Demo => "demo",
            Job::Hemispiral { .. } => "hemispiral",
            Job::Spiral { .. } => "spiral",
            Job::Scaffold(_) => "scaffold",
            Job::Destring(_) => "destring",
        }
    }

    /// Write the job's body to `g`.
    pub fn run<W: Write>(&self, g: &mut GcodeWriter<W>, trace: &TraceSettings) -> CamToolResult<()> {
        info!("Running {} job", self.name());
        match self {
            Job::Demo => {
                let params = HemispiralParameters {
                    top_width: Some(DEMO_TOP_WIDTH),
                    ..Default::default()
                };
                SkirtGenerator::new(SkirtParameters::default()).generate(g)?;
                g.clean_move(params.radius * (0.44 * PI).cos(), 0.0)?;
                let suck = g.profile().suck_mm;
                g.extrude(suck)?;
                trace_dome(params, trace, g)
            }
            Job::Hemispiral { params, skirt } => {
                if *skirt {
                    SkirtGenerator::new(SkirtParameters::default()).generate(g)?;
                }
                trace_dome(params.clone(), trace, g)
            }
            Job::Spiral { params, skirt } => {
                if *skirt {
                    SkirtGenerator::new(SkirtParameters::default()).generate(g)?;
                }
                SpiralGenerator::new(params.clone()).generate(g)
            }
            Job::Scaffold(params) => ScaffoldGenerator::new(params.clone()).generate(g),
            Job::Destring(params) => DestringGenerator::new(params.clone()).generate(g),
        }
    }
}

fn trace_dome<W: Write>(
    params: HemispiralParameters,
    trace: &TraceSettings,
    g: &mut GcodeWriter<W>,
) -> CamToolResult<()> {
    let report = HemispiralTracer::new(params, trace.clone()).trace(g)?;
    info!(
        "Traced {} moves, step {:.5}..{:.5} rad",
        report.steps, report.min_step, report.max_step
    );
    Ok(())
}
