//! Rendered outputs of a classification run.

mod mask;

pub use mask::{render, render_with, ColoredMask};
