//! Pixel-level finishing passes applied after a scene is drawn.
//!
//! - [`composite_gradient`]: lay a drawn RGBA layer over a vertical gradient
//! - [`inject_noise`]: sprinkle per-pixel brightness jitter
//! - [`gaussian_blur`]: separable Gaussian convolution
//!
//! All passes produce opaque RGB images. Only noise consumes random draws.

pub mod blur;
pub mod gradient;
pub mod noise;

pub use blur::gaussian_blur;
pub use gradient::{composite_gradient, lerp_color, vertical_gradient};
pub use noise::inject_noise;
