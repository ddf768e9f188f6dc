//! Global uniform bindings for camera and scene lighting
//!
//! Per-frame data shared by every draw: camera matrices, the summed ambient
//! term and up to [`MAX_POINT_LIGHTS`] point lights. Bound to slot 0 in
//! the mesh and line pipelines.

use crate::{
    gfx::{camera::camera_utils::CameraUniform, scene::light::Light},
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Point lights beyond this count are ignored by the shaders
pub const MAX_POINT_LIGHTS: usize = 4;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointLightRaw {
    position: [f32; 4],
    color: [f32; 4],
}

/// Global uniform buffer content structure
///
/// MUST match the `Globals` struct in the shaders exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
    ambient: [f32; 4],
    // x = active point lights, yzw unused
    light_count: [u32; 4],
    point_lights: [PointLightRaw; MAX_POINT_LIGHTS],
}

impl GlobalUBOContent {
    pub fn new(camera: CameraUniform, lights: &[Light]) -> Self {
        let mut ambient = [0.0f32; 3];
        let mut point_lights = [PointLightRaw::default(); MAX_POINT_LIGHTS];
        let mut count = 0usize;

        for light in lights {
            let radiance = light.radiance();
            match light {
                Light::Ambient { .. } => {
                    for (sum, c) in ambient.iter_mut().zip(radiance) {
                        *sum += c;
                    }
                }
                Light::Point { position, .. } => {
                    if count == MAX_POINT_LIGHTS {
                        continue;
                    }
                    point_lights[count] = PointLightRaw {
                        position: [position.x, position.y, position.z, 1.0],
                        color: [radiance[0], radiance[1], radiance[2], 1.0],
                    };
                    count += 1;
                }
            }
        }

        Self {
            view_position: camera.view_position,
            view_proj: camera.view_proj,
            ambient: [ambient[0], ambient[1], ambient[2], 1.0],
            light_count: [count as u32, 0, 0, 0],
            point_lights,
        }
    }

    pub fn point_light_count(&self) -> u32 {
        self.light_count[0]
    }
}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Uploads camera and light data for the coming frame
pub fn update_global_ubo(
    ubo: &mut GlobalUBO,
    queue: &wgpu::Queue,
    camera: CameraUniform,
    lights: &[Light],
) {
    ubo.update_content(queue, GlobalUBOContent::new(camera, lights));
}

/// Manages bind group layouts and bind groups for global uniforms
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device, ubo: &GlobalUBO) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform()) // Camera + lights
            .create(device, "Globals Bind Group Layout");

        let bind_group = BindGroupBuilder::new(&bind_group_layout)
            .resource(ubo.binding_resource())
            .create(device, "Global Bind Group");

        GlobalBindings {
            bind_group_layout,
            bind_group,
        }
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector3;

    #[test]
    fn test_layout_size_matches_shader() {
        assert_eq!(std::mem::size_of::<GlobalUBOContent>(), 16 + 64 + 16 + 16 + 32 * 4);
    }

    #[test]
    fn test_lights_are_packed() {
        let lights = [
            Light::point(Vector3::new(5.0, 5.0, 5.0), [1.0; 3]),
            Light::ambient([1.0; 3]),
            Light::ambient([0.5; 3]),
        ];
        let content = GlobalUBOContent::new(CameraUniform::default(), &lights);
        assert_eq!(content.point_light_count(), 1);
        assert_eq!(content.ambient, [1.5, 1.5, 1.5, 1.0]);
        assert_eq!(content.point_lights[0].position, [5.0, 5.0, 5.0, 1.0]);
    }

    #[test]
    fn test_extra_point_lights_are_dropped() {
        let lights: Vec<_> = (0..6)
            .map(|i| Light::point(Vector3::new(i as f32, 0.0, 0.0), [1.0; 3]))
            .collect();
        let content = GlobalUBOContent::new(CameraUniform::default(), &lights);
        assert_eq!(content.point_light_count(), MAX_POINT_LIGHTS as u32);
    }
}
