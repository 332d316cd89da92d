//! WebGPU rendering module
//!
//! The scene is tessellated on the CPU into coloured triangles and drawn with
//! a single pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, Viewport};
pub use scene::build_scene;
pub use vertex::Vertex;
