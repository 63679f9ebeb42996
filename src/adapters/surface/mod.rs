//! Marker surface adapters.

mod headless;

pub use headless::{HeadlessSurface, SurfaceOp};
