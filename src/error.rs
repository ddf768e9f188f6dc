//! Error types shared across the crate.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal startup and presentation errors.
#[derive(Debug, Error)]
pub enum NebulaError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create drawing surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible graphics adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to open graphics device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported formats")]
    NoSurfaceFormat,

    #[error("failed to present frame: {0}")]
    Present(#[from] wgpu::SurfaceError),
}

/// Why a texture could not be produced. Never fatal: the renderer keeps
/// drawing with a placeholder.
#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to load {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("texture loader for {} stopped before finishing", .0.display())]
    Cancelled(PathBuf),
}
