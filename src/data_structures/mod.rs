//! Engine data structures: the cube mesh, textures and renderable objects.
//!
//! - `mesh` holds the fixed 36-vertex cube and its vertex buffer layouts
//! - `texture` contains the GPU texture wrapper and creation utilities
//! - `object` is a textured cube with position, orientation, scale and spin

pub mod mesh;
pub mod object;
pub mod texture;
