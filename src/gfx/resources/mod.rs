// src/gfx/resources/mod.rs
//! Texture and GPU resource management
//!
//! CPU-side texture loading plus the buffers and bind groups the renderer
//! creates from scene data.

pub mod global_bindings;
pub mod material;
pub mod texture;
pub mod texture_resource;

// Re-export main types
pub use global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO, GlobalUBOContent};
pub use material::{MaterialBindings, MaterialLayout, MaterialUniform};
pub use texture::{ColorSpace, TexelData, TextureCache, TextureId, TextureState};
pub use texture_resource::TextureResource;
