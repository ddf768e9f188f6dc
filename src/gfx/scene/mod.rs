//! # Scene Management Module
//!
//! The retained-mode half of the engine: a [`Scene`] owns meshes, lights,
//! debug helpers, the background reference and every texture. Nothing here
//! touches the GPU; the render engine mirrors the scene into GPU resources.
//!
//! ## Key Components
//!
//! - [`Scene`] - insertion-only container with stable [`MeshId`]/[`LightId`] handles
//! - [`Mesh`] - geometry + material + transform
//! - [`Material`] - basic (unlit) or standard (lit) surface descriptor
//! - [`Light`] - point and ambient lights
//! - [`Vertex3D`] / [`LineVertex`] - GPU vertex formats

pub mod light;
pub mod material;
pub mod object;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use light::Light;
pub use material::{color_from_hex, Material, Shading};
pub use object::Mesh;
pub use scene::{Helper, LightId, MeshId, Scene, SceneStatistics};
pub use vertex::{LineVertex, Vertex3D};
