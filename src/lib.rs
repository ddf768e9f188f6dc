// src/lib.rs
//! Nebula
//!
//! A scroll-reactive 3D landing scene rendered with wgpu and winit: a
//! rotating torus, a random star field, a textured avatar cube and a
//! normal-mapped sun, lit by a point and an ambient light.

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod performance;
pub mod wgpu_utils;
pub mod world;

// Re-export main types for convenience
pub use app::NebulaApp;
pub use config::SceneConfig;
pub use error::{NebulaError, TextureError};
