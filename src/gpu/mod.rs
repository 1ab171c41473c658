mod buffers;
mod context;
mod presenter;
mod render;

pub use buffers::GridBuffers;
pub use context::GpuContext;
pub use presenter::GpuPresenter;
pub use render::RenderPipeline;
