//! Command-line interface
//!
//! Usage:
//!   hemikit demo
//!   hemikit hemispiral --radius 25 --start -1.2 --end 1.2 --skirt
//!   hemikit spiral --radius 20 --height 30 -o vase.gcode
//!   hemikit --config printer.toml scaffold --radius 40 --gap 5
//!   hemikit destring --retract-step 0.2

use crate::jobs::Job;
use clap::{ArgAction, Args, Parser, Subcommand};
use hemikit_camtools::{
    DestringParameters, HemispiralParameters, ScaffoldParameters, SpiralParameters,
};
use hemikit_core::PrinterProfile;
use std::f64::consts::PI;
use std::path::PathBuf;

/// G-code generator for hemispherical spiral prints
#[derive(Parser, Debug)]
#[command(name = "hemikit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (TOML or JSON); defaults to the per-user config if present
    #[arg(short, long, global = true, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Output G-code file; stdout when omitted
    #[arg(short, long, global = true, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Write the generation time into the header
    #[arg(long, global = true)]
    pub timestamp: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(flatten)]
    pub printer: PrinterOverrides,

    #[command(subcommand)]
    pub command: Commands,
}

/// Printer settings that override the loaded config
#[derive(Args, Debug, Default, Clone, PartialEq)]
pub struct PrinterOverrides {
    /// Filament diameter in mm
    #[arg(long, global = true)]
    pub filament_diameter: Option<f64>,

    /// Extrusion width in mm
    #[arg(long, global = true)]
    pub extrusion_width: Option<f64>,

    /// Default layer height in mm
    #[arg(long, global = true)]
    pub layer_height: Option<f64>,
}

impl PrinterOverrides {
    pub fn apply(&self, profile: &mut PrinterProfile) {
        if let Some(d) = self.filament_diameter {
            profile.filament_diameter = d;
        }
        if let Some(w) = self.extrusion_width {
            profile.extrusion_width = w;
        }
        if let Some(h) = self.layer_height {
            profile.default_layer_height = h;
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Skirt, clean move, prime, then a 75 mm hemispiral from -0.44π to 0.44π
    Demo,

    /// Trace a spherical surface as one continuous spiral
    Hemispiral {
        /// Sphere radius in mm
        #[arg(long, default_value_t = 75.0)]
        radius: f64,

        /// Start elevation in radians
        #[arg(long, default_value_t = -0.44 * PI, allow_negative_numbers = true)]
        start: f64,

        /// End elevation in radians
        #[arg(long, default_value_t = 0.44 * PI, allow_negative_numbers = true)]
        end: f64,

        /// Line width at the pole in mm (defaults to extrusion width - 0.01)
        #[arg(long)]
        top_width: Option<f64>,

        /// Print a priming skirt first
        #[arg(long)]
        skirt: bool,
    },

    /// Print a cylinder wall as one continuous helix
    Spiral {
        /// Cylinder radius in mm
        #[arg(long)]
        radius: f64,

        /// Wall height in mm
        #[arg(long)]
        height: f64,

        /// Print a priming skirt first
        #[arg(long)]
        skirt: bool,
    },

    /// Print a radial support lattice
    Scaffold {
        /// Outer radius in mm
        #[arg(long)]
        radius: f64,

        /// Largest spoke spacing at the rim in mm
        #[arg(long)]
        gap: f64,

        /// Number of layers
        #[arg(long, default_value_t = 19)]
        layers: u32,
    },

    /// Print a retraction calibration tower
    Destring {
        /// Half the side of the square in mm
        #[arg(long, default_value_t = 10.0)]
        half_size: f64,

        /// Solid layers before the test starts
        #[arg(long, default_value_t = 10)]
        solid_layers: u32,

        /// Layers with a travel gap
        #[arg(long, default_value_t = 100)]
        test_layers: u32,

        /// Retraction added per test layer in mm
        #[arg(long, default_value_t = 0.1)]
        retract_step: f64,
    },
}

impl From<Commands> for Job {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Demo => Job::Demo,
            Commands::Hemispiral {
                radius,
                start,
                end,
                top_width,
                skirt,
            } => Job::Hemispiral {
                params: HemispiralParameters {
                    radius,
                    start,
                    end,
                    top_width,
                },
                skirt,
            },
            Commands::Spiral {
                radius,
                height,
                skirt,
            } => Job::Spiral {
                params: SpiralParameters {
                    radius,
                    height,
                    ..Default::default()
                },
                skirt,
            },
            Commands::Scaffold {
                radius,
                gap,
                layers,
            } => Job::Scaffold(ScaffoldParameters {
                radius,
                gap,
                layers,
            }),
            Commands::Destring {
                half_size,
                solid_layers,
                test_layers,
                retract_step,
            } => Job::Destring(DestringParameters {
                half_size,
                solid_layers,
                test_layers,
                retract_step,
            }),
        }
    }
}
