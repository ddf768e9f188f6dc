// src/wgpu_utils/uniform_buffer.rs
use std::marker::PhantomData;

use wgpu::util::DeviceExt;

/// A uniform buffer holding exactly one `T`
///
/// Remembers the bytes last written so per-frame updates of unchanged data
/// (most meshes, most frames) never reach the queue.
pub struct UniformBuffer<T> {
    buffer: wgpu::Buffer,
    written: Vec<u8>,
    _content: PhantomData<T>,
}

impl<T: bytemuck::Pod> UniformBuffer<T> {
    /// Short type name used in buffer labels, e.g. `TransformUniform`
    fn label() -> String {
        let full = std::any::type_name::<T>();
        let short = full.rsplit("::").next().unwrap_or(full);
        format!("Uniform {}", short)
    }

    /// Zero-initialised buffer
    pub fn new(device: &wgpu::Device) -> Self {
        Self::new_with_data(device, &T::zeroed())
    }

    pub fn new_with_data(device: &wgpu::Device, content: &T) -> Self {
        let bytes = bytemuck::bytes_of(content);
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&Self::label()),
            contents: bytes,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        Self {
            buffer,
            written: bytes.to_vec(),
            _content: PhantomData,
        }
    }

    /// Writes `content` unless it equals what the buffer already holds
    pub fn update_content(&mut self, queue: &wgpu::Queue, content: T) {
        let bytes = bytemuck::bytes_of(&content);
        if self.written.as_slice() != bytes {
            queue.write_buffer(&self.buffer, 0, bytes);
            self.written.clear();
            self.written.extend_from_slice(bytes);
        }
    }

    pub fn binding_resource(&self) -> wgpu::BindingResource {
        self.buffer.as_entire_binding()
    }
}
