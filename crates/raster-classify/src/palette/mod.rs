//! Color ramps and class color tables
//!
//! The mask renderer takes its class colors from here; see
//! [`ColorRamp::class_colors`].

mod error;
mod ramp;

pub use error::{ParseColorError, RampError};
pub use ramp::{ClassColorTable, ColorRamp, VIRIDIS};
