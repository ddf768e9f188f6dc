//! # Graphics Module
//!
//! Camera, geometry, scene description, GPU resources and rendering.
//!
//! - **Camera System** ([`camera`]) - perspective camera and orbit controls
//! - **Geometry** ([`geometry`]) - procedural torus, sphere, box and helper lines
//! - **Scene Management** ([`scene`]) - meshes, materials, lights and helpers
//! - **Resource Management** ([`resources`]) - textures, uniforms and bind groups
//! - **Rendering Pipeline** ([`rendering`]) - background, mesh and line passes
//!
//! The scene is plain data and can be built and mutated without a GPU; the
//! [`RenderEngine`] mirrors it onto the device each frame.
//!
//! ```no_run
//! use nebula::gfx::scene::{Material, Mesh, Scene};
//! use nebula::gfx::geometry::Geometry;
//!
//! let mut scene = Scene::new();
//! scene.add_mesh(Mesh::new(
//!     "torus",
//!     Geometry::torus(10.0, 3.0, 16, 100),
//!     Material::basic([1.0, 0.39, 0.28]),
//! ));
//! // let engine = RenderEngine::new(window, width, height, true).await?;
//! ```

pub mod camera;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::{OrbitControls, PerspectiveCamera};
pub use rendering::render_engine::RenderEngine;
