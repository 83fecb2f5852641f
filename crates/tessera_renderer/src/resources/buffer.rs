//! Buffer creation for text meshes.
use std::sync::Arc;
use wgpu::util::DeviceExt;

/// Creates a GPU vertex buffer from a slice of `Pod` vertices.
pub fn create_vertex<T: bytemuck::Pod>(
    device: &wgpu::Device,
    label: &str,
    data: &[T],
) -> Arc<wgpu::Buffer> {
    Arc::new(
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(data),
            usage: wgpu::BufferUsages::VERTEX,
        }),
    )
}

/// Creates a GPU index buffer, narrowing to `u16` when every index fits.
pub fn create_index(
    device: &wgpu::Device,
    label: &str,
    indices: &[u32],
) -> (Arc<wgpu::Buffer>, wgpu::IndexFormat) {
    let format = index_format_for(indices);
    let narrow: Vec<u16>;
    let contents: &[u8] = match format {
        wgpu::IndexFormat::Uint16 => {
            narrow = indices.iter().map(|&i| i as u16).collect();
            bytemuck::cast_slice(&narrow)
        }
        wgpu::IndexFormat::Uint32 => bytemuck::cast_slice(indices),
    };
    let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents,
        usage: wgpu::BufferUsages::INDEX,
    });
    (Arc::new(buffer), format)
}

/// Smallest index format able to address every index in `indices`.
pub fn index_format_for(indices: &[u32]) -> wgpu::IndexFormat {
    if indices.iter().all(|&i| i <= u16::MAX as u32) {
        wgpu::IndexFormat::Uint16
    } else {
        wgpu::IndexFormat::Uint32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrows_small_index_lists() {
        assert_eq!(index_format_for(&[0, 1, 2]), wgpu::IndexFormat::Uint16);
        assert_eq!(index_format_for(&[]), wgpu::IndexFormat::Uint16);
        assert_eq!(index_format_for(&[0, 70_000, 2]), wgpu::IndexFormat::Uint32);
    }
}
