//! Raster output: a `vello_cpu` canvas and the reading compositor on top of it.

pub mod canvas;
pub mod compositor;

pub use canvas::Canvas;
pub use compositor::{Compositor, DisplayOptions, fit_icon, rotate_half_turn};
