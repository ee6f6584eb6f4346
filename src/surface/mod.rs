//! Surface mesh builder: fixed lattice, per-frame displacement and the
//! renderer-facing vertex/index buffers.

mod builder;
mod mesh;
mod node;
mod system;

// Re-export public types
pub use builder::{DrawMode, SurfaceBuilder};
pub use mesh::{grid_edge_indices, grid_indices, pack_color, MeshLayout, SurfaceMesh, Vertex};
pub use node::SceneNode;
pub use system::SurfaceSystem;
