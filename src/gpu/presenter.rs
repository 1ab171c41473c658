use std::sync::Arc;
use wgpu::BindGroup;
use winit::window::Window;

use super::{GpuContext, GridBuffers, RenderPipeline};
use crate::error::{GpuError, PresentError};
use crate::present::Present;
use crate::simulation::Grid;

/// Draws grids into a window through wgpu
pub struct GpuPresenter {
    gpu: GpuContext,
    buffers: GridBuffers,
    pipeline: RenderPipeline,
    bind_group: BindGroup,
}

impl GpuPresenter {
    /// Set up the GPU for `window`. Buffers are sized for `grid`, whose
    /// dimensions must stay the same for the presenter's lifetime.
    pub fn new(window: Arc<Window>, grid: &Grid) -> Result<Self, GpuError> {
        log::info!("Creating GPU context...");
        let gpu = pollster::block_on(GpuContext::new(window))?;

        log::info!("Creating GPU buffers...");
        let buffers = GridBuffers::new(&gpu.device, &gpu.queue, grid);

        log::info!("Creating render pipeline...");
        let pipeline = RenderPipeline::new(&gpu.device, gpu.format());
        let bind_group = pipeline.create_bind_group(&gpu.device, &buffers);

        Ok(Self {
            gpu,
            buffers,
            pipeline,
            bind_group,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.gpu.resize(new_size);
    }
}

impl Present for GpuPresenter {
    fn present(&mut self, grid: &Grid) -> Result<(), PresentError> {
        let output = match self.gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                // Skip this frame, the next one draws to the new surface
                self.gpu.reconfigure();
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        self.buffers.upload(&self.gpu.queue, grid);

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        self.pipeline.draw(&mut encoder, &view, &self.bind_group);

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
