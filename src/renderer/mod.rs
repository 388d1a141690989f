//! Rendering module
//!
//! The scene is tessellated into a screen-space triangle list by pure code;
//! hosts either fill the triangles on a 2D canvas or upload the vertex bytes
//! to a GPU buffer.

pub mod scene;
pub mod shapes;
pub mod vertex;

pub use scene::{FrameMesh, Viewport, build_frame};
pub use vertex::{Vertex, css_color};
