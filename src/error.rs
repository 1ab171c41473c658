//! Error types for configuration, GPU setup, presentation and the run as a whole.

use thiserror::Error;

/// Errors from parsing rule and shape arguments. Both are fatal and reported
/// before the simulation starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Rule descriptor does not match `b<digits>/s<digits>`.
    #[error("bad rules string {0:?}, expected format b<digits>/s<digits> (e.g. b3/s23)")]
    BadRule(String),

    /// No shape registered under this name.
    #[error("unknown shape {0:?}, see --list-shapes")]
    UnknownShape(String),
}

/// Errors raised while bringing up the window and GPU context.
#[derive(Debug, Error)]
pub enum GpuError {
    #[error("failed to create window: {0}")]
    CreateWindow(#[from] winit::error::OsError),

    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter found")]
    NoAdapter,

    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("surface not supported by adapter")]
    UnsupportedSurface,
}

/// Errors from a single `present` call.
#[derive(Debug, Error)]
pub enum PresentError {
    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Anything that ends a run early.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error(transparent)]
    Gpu(#[from] GpuError),

    #[error(transparent)]
    Present(#[from] PresentError),
}
