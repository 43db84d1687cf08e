//! Synthetic negative space.
//!
//! Rays are cast between every pair of foreground pixels. A ray that hits
//! a stroke bounces back once, and the background pixels it crosses on the
//! way back accumulate weight. Pixels with weight form the glyph's negative
//! space, split into enclosed interior and open border regions.

mod atomic;
mod bounce;
mod map;
mod params;
mod synth;

pub use atomic::AtomicF64;
pub use bounce::bounce_ray;
pub use map::{NegativeSpaceMap, SpaceClass};
pub use params::NegativeSpaceParams;
pub use synth::synthesize;
