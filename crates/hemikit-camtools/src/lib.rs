//! # hemikit CAM Tools
//!
//! This crate turns shape descriptions into RepRap-style G-code for a
//! filament printer, tracking extrusion so deposited volume matches travel.
//!
//! ## Tools Included
//!
//! - **Motion Writer**: Position, extrusion and feed-rate state; emits `G1` moves
//! - **Session**: Header, preamble and coda bracketing around a generation run
//! - **Profile Solver**: Closed-form elevation profile for the hemispiral
//! - **Hemispiral Tracer**: Adaptive, chord-error bounded surface tracing
//! - **Shapes**: Skirt, flat spiral, scaffold and destringing test pattern

pub mod error;
pub mod hemispiral;
pub mod motion;
pub mod profile;
pub mod session;
pub mod shapes;

// Re-export commonly used items
pub use error::{CamToolError, CamToolResult, ParameterError};
pub use hemispiral::{HemispiralParameters, HemispiralTracer, TracePhase, TraceReport};
pub use motion::GcodeWriter;
pub use profile::{CurveProfile, ProfileSolver, SolvedProfile};
pub use session::{run_session, Session, SessionHeader};
pub use shapes::{
    DestringGenerator, DestringParameters, ScaffoldGenerator, ScaffoldParameters,
    SkirtGenerator, SkirtParameters, SpiralGenerator, SpiralParameters,
};
