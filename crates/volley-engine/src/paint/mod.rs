//! Paint model for surfaces.
//!
//! Fill and stroke styles are plain colors; gradients and patterns are not
//! part of the surface contract.

mod color;

pub use color::Color;
