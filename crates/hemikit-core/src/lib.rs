//! # hemikit Core
//!
//! Core types and utilities shared by the hemikit crates.
//! Provides the position model used by the motion writer, the printer
//! profile consumed by every toolpath generator, and the unified error type.

pub mod data;
pub mod error;

pub use data::{
    printer::{PrinterProfile, TraceSettings},
    PartialPosition, Position,
};

pub use error::{Error, Result};
