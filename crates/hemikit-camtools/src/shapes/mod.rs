//! Simple shape generators
//!
//! Closed-form toolpaths that drive [`GcodeWriter`](crate::motion::GcodeWriter)
//! directly: a priming skirt, a flat vase spiral, a radial support scaffold
//! and a destringing stress test.

pub mod destring;
pub mod scaffold;
pub mod skirt;
pub mod spiral;

pub use destring::{DestringGenerator, DestringParameters};
pub use scaffold::{ScaffoldGenerator, ScaffoldParameters};
pub use skirt::{SkirtGenerator, SkirtParameters};
pub use spiral::{SpiralGenerator, SpiralParameters};
