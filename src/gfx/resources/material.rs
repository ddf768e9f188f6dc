//! GPU side of materials
//!
//! Every mesh gets its own material uniform and bind group. Bind groups
//! point at texture views, so they are rebuilt when a referenced texture
//! finishes loading and replaces its placeholder.

use wgpu::Device;

use crate::{
    gfx::scene::material::{Material, Shading},
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// GPU uniform data for materials
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub color: [f32; 4],
    // x = lit, y = has color map, z = has normal map
    pub flags: [u32; 4],
}

impl MaterialUniform {
    pub fn from_material(material: &Material) -> Self {
        let [r, g, b] = material.color();
        Self {
            color: [r, g, b, 1.0],
            flags: [
                (material.shading() == Shading::Standard) as u32,
                material.map().is_some() as u32,
                material.normal_map().is_some() as u32,
                0,
            ],
        }
    }
}

type MaterialUBO = UniformBuffer<MaterialUniform>;

/// Shared layout (uniform, color map, normal map, sampler) and sampler
pub struct MaterialLayout {
    bind_group_layout: BindGroupLayoutWithDesc,
    sampler: wgpu::Sampler,
}

impl MaterialLayout {
    pub fn new(device: &Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::uniform())
            .next_binding_fragment(binding_types::texture_2d())
            .next_binding_fragment(binding_types::texture_2d())
            .next_binding_fragment(binding_types::sampler(wgpu::SamplerBindingType::Filtering))
            .create(device, "Material Bind Group Layout");

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Material Sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            bind_group_layout,
            sampler,
        }
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }
}

/// Per-mesh material resources
pub struct MaterialBindings {
    ubo: MaterialUBO,
    bind_group: wgpu::BindGroup,
}

impl MaterialBindings {
    pub fn new(
        device: &Device,
        layout: &MaterialLayout,
        material: &Material,
        map: &wgpu::TextureView,
        normal_map: &wgpu::TextureView,
    ) -> Self {
        let ubo = MaterialUBO::new_with_data(device, &MaterialUniform::from_material(material));
        let bind_group = Self::create_bind_group(device, layout, &ubo, map, normal_map);
        Self { ubo, bind_group }
    }

    /// Points the bind group at new texture views
    pub fn rebind(
        &mut self,
        device: &Device,
        layout: &MaterialLayout,
        map: &wgpu::TextureView,
        normal_map: &wgpu::TextureView,
    ) {
        self.bind_group = Self::create_bind_group(device, layout, &self.ubo, map, normal_map);
    }

    fn create_bind_group(
        device: &Device,
        layout: &MaterialLayout,
        ubo: &MaterialUBO,
        map: &wgpu::TextureView,
        normal_map: &wgpu::TextureView,
    ) -> wgpu::BindGroup {
        BindGroupBuilder::new(&layout.bind_group_layout)
            .resource(ubo.binding_resource())
            .texture(map)
            .texture(normal_map)
            .sampler(&layout.sampler)
            .create(device, "Material Bind Group")
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::resources::texture::{ColorSpace, TextureCache};

    #[test]
    fn test_uniform_flags() {
        let mut cache = TextureCache::new();
        let map = cache.load("a.png", ColorSpace::Srgb);
        let normal = cache.load("b.png", ColorSpace::Linear);

        let sun = Material::standard([1.0; 3])
            .with_map(map)
            .with_normal_map(normal);
        assert_eq!(MaterialUniform::from_material(&sun).flags, [1, 1, 1, 0]);

        let plain = Material::basic([0.5, 0.25, 1.0]);
        let uniform = MaterialUniform::from_material(&plain);
        assert_eq!(uniform.flags, [0, 0, 0, 0]);
        assert_eq!(uniform.color, [0.5, 0.25, 1.0, 1.0]);
    }
}
