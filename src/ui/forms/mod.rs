//! Form rendering module
//!
//! - `field_renderer`: per-kind field rendering and row grouping
//! - `intake_form`: the three step sections

mod field_renderer;
mod intake_form;

pub use intake_form::draw as draw_intake_form;
