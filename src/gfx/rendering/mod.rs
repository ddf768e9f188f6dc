// src/gfx/rendering/mod.rs
//! Core rendering functionality
//!
//! Handles render pipelines, the GPU copy of the scene, and frame rendering.

pub mod gpu_scene;
pub mod pipeline_manager;
pub mod render_engine;

// Re-export main types
pub use gpu_scene::{GpuScene, TransformUniform};
pub use pipeline_manager::{PipelineConfig, PipelineManager, PipelineStats, VertexLayout};
pub use render_engine::RenderEngine;
