//! Render pipeline and bind group layouts for the museum shader.
//!
//! - `basic` builds the single textured, lit pipeline and its layouts
//! - `light` holds the point-light uniform

pub mod basic;
pub mod light;
