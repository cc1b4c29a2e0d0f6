//! Indicator engine: raw daily bars in, derived analytics rows out.

pub mod engine;
pub mod summary;
pub mod window;

pub use engine::*;
pub use summary::*;
pub use window::*;
