use wgpu::{Buffer, BufferUsages, Device, Queue};

use crate::simulation::Grid;

/// Cell storage buffer plus its render parameters
pub struct GridBuffers {
    /// One u32 per cell, 0 dead / 1 alive
    pub cells_buffer: Buffer,
    /// Uniform buffer for render parameters
    pub params_buffer: Buffer,
    /// CPU-side copy widened from u8, reused every frame
    staging: Vec<u32>,
    pub rows: u32,
    pub cols: u32,
}

/// Render parameters passed to the fragment shader (16 bytes)
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RenderParams {
    pub grid_rows: u32,
    pub grid_cols: u32,
    pub _padding: [u32; 2],
}

impl GridBuffers {
    /// Create buffers sized for `grid` and upload its cells
    pub fn new(device: &Device, queue: &Queue, grid: &Grid) -> Self {
        let (rows, cols) = grid.dims();
        let cell_count = rows * cols;
        let buffer_size = (cell_count * std::mem::size_of::<u32>()) as u64;

        let cells_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("grid-cells-buffer"),
            size: buffer_size,
            usage: BufferUsages::STORAGE | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let params_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("render-params-buffer"),
            size: std::mem::size_of::<RenderParams>() as u64,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let mut buffers = Self {
            cells_buffer,
            params_buffer,
            staging: vec![0; cell_count],
            rows: rows as u32,
            cols: cols as u32,
        };

        let params = RenderParams {
            grid_rows: buffers.rows,
            grid_cols: buffers.cols,
            _padding: [0, 0],
        };
        queue.write_buffer(&buffers.params_buffer, 0, bytemuck::bytes_of(&params));

        buffers.upload(queue, grid);
        buffers
    }

    /// Copy the grid's cells to the GPU. Noisy values above 1 are drawn as alive.
    pub fn upload(&mut self, queue: &Queue, grid: &Grid) {
        debug_assert_eq!(grid.dims(), (self.rows as usize, self.cols as usize));
        for (dst, &cell) in self.staging.iter_mut().zip(grid.as_bytes()) {
            *dst = u32::from(cell != 0);
        }
        queue.write_buffer(&self.cells_buffer, 0, bytemuck::cast_slice(&self.staging));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_params_size() {
        // Uniform buffers must be a multiple of 16 bytes
        assert_eq!(std::mem::size_of::<RenderParams>(), 16);
    }
}
