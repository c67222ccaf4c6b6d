//! Rendering: pure state-to-pixels
//!
//! `scene` tessellates the world into a vertex list; `pipeline` owns the
//! WebGPU surface and draws it. Nothing in here mutates game state.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{build_scene, player_color};
pub use vertex::Vertex;
