//! GPU mirror of a [`Scene`]
//!
//! Holds everything the renderer derives from scene data: shared geometry
//! buffers, per-mesh transform and material bind groups, uploaded textures,
//! the background bind group and the helper line buffer. [`GpuScene::sync`]
//! brings it up to date once per frame.

use std::collections::{HashMap, HashSet};

use cgmath::{Matrix, Matrix4, SquareMatrix};
use wgpu::util::DeviceExt;

use crate::{
    gfx::{
        camera::camera_utils::convert_matrix4_to_array,
        geometry::{Geometry, GeometryKey},
        resources::{
            material::{MaterialBindings, MaterialLayout},
            texture::{ColorSpace, TextureCache, TextureId},
            texture_resource::TextureResource,
        },
        scene::{object::Mesh, scene::Scene},
    },
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Indexed triangle buffers for one geometry descriptor
pub struct GpuGeometry {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuGeometry {
    pub fn new(device: &wgpu::Device, geometry: &Geometry) -> Self {
        let data = geometry.tessellate();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(&data.to_vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
        }
    }
}

pub trait DrawGeometry {
    fn draw_geometry(&mut self, geometry: &GpuGeometry);
}

impl DrawGeometry for wgpu::RenderPass<'_> {
    fn draw_geometry(&mut self, geometry: &GpuGeometry) {
        self.set_vertex_buffer(0, geometry.vertex_buffer.slice(..));
        self.set_index_buffer(geometry.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..geometry.index_count, 0, 0..1);
    }
}

/// Per-mesh transform data. MUST match `Transform` in mesh.wgsl.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TransformUniform {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 4],
}

impl TransformUniform {
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let model = mesh.model_matrix();
        // Degenerate (zero) scale has no inverse; its normals are irrelevant.
        let normal = model
            .invert()
            .map(|inverse| inverse.transpose())
            .unwrap_or_else(Matrix4::identity);
        Self {
            model: convert_matrix4_to_array(model),
            normal: convert_matrix4_to_array(normal),
        }
    }
}

struct GpuMesh {
    geometry: GeometryKey,
    transform: UniformBuffer<TransformUniform>,
    transform_bind_group: wgpu::BindGroup,
    material: MaterialBindings,
}

/// Uploaded textures plus the placeholders sampled in their absence
struct TextureStore {
    uploaded: HashMap<TextureId, TextureResource>,
    placeholder_color: TextureResource,
    placeholder_normal: TextureResource,
}

impl TextureStore {
    fn view(&self, id: Option<TextureId>, color_space: ColorSpace) -> &wgpu::TextureView {
        match id.and_then(|id| self.uploaded.get(&id)) {
            Some(resource) => &resource.view,
            None => match color_space {
                ColorSpace::Srgb => &self.placeholder_color.view,
                ColorSpace::Linear => &self.placeholder_normal.view,
            },
        }
    }

    /// Uploads `id` if its texels are ready and it is not on the GPU yet
    fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        cache: &TextureCache,
        id: TextureId,
    ) -> bool {
        if self.uploaded.contains_key(&id) {
            return false;
        }
        let Some(texels) = cache.texels(id) else {
            return false;
        };
        let color_space = cache.color_space(id).unwrap_or(ColorSpace::Srgb);
        let label = cache
            .path(id)
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| format!("Texture {}", id.index()));
        let resource =
            TextureResource::create_from_texels(device, queue, texels, color_space, &label);
        self.uploaded.insert(id, resource);
        true
    }
}

struct LineBuffer {
    buffer: wgpu::Buffer,
    count: u32,
    /// Number of scene helpers the buffer was built from
    helpers: usize,
}

/// Helper geometry is static once added, so the buffer only needs
/// rebuilding when helpers are added
fn lines_outdated(built_from: Option<usize>, helpers: usize) -> bool {
    built_from != Some(helpers)
}

/// Renderer-side state derived from the scene
pub struct GpuScene {
    transform_layout: BindGroupLayoutWithDesc,
    material_layout: MaterialLayout,
    background_layout: BindGroupLayoutWithDesc,
    geometries: HashMap<GeometryKey, GpuGeometry>,
    meshes: Vec<GpuMesh>,
    textures: TextureStore,
    background: Option<(TextureId, wgpu::BindGroup)>,
    lines: Option<LineBuffer>,
}

impl GpuScene {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let transform_layout = BindGroupLayoutBuilder::new()
            .next_binding_vertex(binding_types::uniform())
            .create(device, "Transform Bind Group Layout");
        let background_layout = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::texture_2d())
            .next_binding_fragment(binding_types::sampler(wgpu::SamplerBindingType::Filtering))
            .create(device, "Background Bind Group Layout");

        Self {
            transform_layout,
            material_layout: MaterialLayout::new(device),
            background_layout,
            geometries: HashMap::new(),
            meshes: Vec::new(),
            textures: TextureStore {
                uploaded: HashMap::new(),
                placeholder_color: TextureResource::create_placeholder(
                    device,
                    queue,
                    ColorSpace::Srgb,
                ),
                placeholder_normal: TextureResource::create_placeholder(
                    device,
                    queue,
                    ColorSpace::Linear,
                ),
            },
            background: None,
            lines: None,
        }
    }

    pub fn transform_layout(&self) -> &wgpu::BindGroupLayout {
        &self.transform_layout.layout
    }

    pub fn material_layout(&self) -> &wgpu::BindGroupLayout {
        self.material_layout.bind_group_layout()
    }

    pub fn background_layout(&self) -> &wgpu::BindGroupLayout {
        &self.background_layout.layout
    }

    /// Brings GPU resources in line with the scene
    pub fn sync(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, scene: &Scene) {
        let fresh = self.upload_textures(device, queue, scene);

        for (gpu_mesh, mesh) in self.meshes.iter_mut().zip(scene.meshes()) {
            let material = mesh.material();
            if fresh.iter().any(|id| material.uses_texture(*id)) {
                gpu_mesh.material.rebind(
                    device,
                    &self.material_layout,
                    self.textures.view(material.map(), ColorSpace::Srgb),
                    self.textures.view(material.normal_map(), ColorSpace::Linear),
                );
            }
            gpu_mesh
                .transform
                .update_content(queue, TransformUniform::from_mesh(mesh));
        }

        for mesh in &scene.meshes()[self.meshes.len()..] {
            let gpu_mesh = self.create_mesh(device, mesh);
            self.meshes.push(gpu_mesh);
        }

        self.sync_background(device, scene, &fresh);
        self.sync_lines(device, scene);
    }

    fn upload_textures(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        scene: &Scene,
    ) -> HashSet<TextureId> {
        let referenced = scene
            .meshes()
            .iter()
            .flat_map(|mesh| [mesh.material().map(), mesh.material().normal_map()])
            .chain(std::iter::once(scene.background))
            .flatten();

        let mut fresh = HashSet::new();
        for id in referenced {
            if self.textures.upload(device, queue, &scene.textures, id) {
                fresh.insert(id);
            }
        }
        fresh
    }

    fn create_mesh(&mut self, device: &wgpu::Device, mesh: &Mesh) -> GpuMesh {
        let geometry = mesh.geometry().cache_key();
        self.geometries
            .entry(geometry)
            .or_insert_with(|| GpuGeometry::new(device, mesh.geometry()));

        let transform = UniformBuffer::new_with_data(device, &TransformUniform::from_mesh(mesh));
        let transform_bind_group = BindGroupBuilder::new(&self.transform_layout)
            .resource(transform.binding_resource())
            .create(device, "Transform Bind Group");

        let material = mesh.material();
        let material = MaterialBindings::new(
            device,
            &self.material_layout,
            material,
            self.textures.view(material.map(), ColorSpace::Srgb),
            self.textures.view(material.normal_map(), ColorSpace::Linear),
        );

        GpuMesh {
            geometry,
            transform,
            transform_bind_group,
            material,
        }
    }

    fn sync_background(&mut self, device: &wgpu::Device, scene: &Scene, fresh: &HashSet<TextureId>) {
        let Some(id) = scene.background else {
            self.background = None;
            return;
        };
        let current = matches!(&self.background, Some((bound, _)) if *bound == id);
        if current && !fresh.contains(&id) {
            return;
        }
        // Nothing is drawn behind the scene until the image is on the GPU
        self.background = self.textures.uploaded.get(&id).map(|resource| {
            let bind_group = BindGroupBuilder::new(&self.background_layout)
                .texture(&resource.view)
                .sampler(&resource.sampler)
                .create(device, "Background Bind Group");
            (id, bind_group)
        });
    }

    fn sync_lines(&mut self, device: &wgpu::Device, scene: &Scene) {
        let helpers = scene.helpers().len();
        if !lines_outdated(self.lines.as_ref().map(|lines| lines.helpers), helpers) {
            return;
        }

        let vertices = scene.helper_lines();
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Helper Line Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        log::debug!("Helper lines rebuilt: {} vertices", vertices.len());
        self.lines = Some(LineBuffer {
            buffer,
            count: vertices.len() as u32,
            helpers,
        });
    }

    pub fn background_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.background.as_ref().map(|(_, bind_group)| bind_group)
    }

    /// Meshes as (geometry, transform bind group, material bind group)
    pub fn draw_list(
        &self,
    ) -> impl Iterator<Item = (&GpuGeometry, &wgpu::BindGroup, &wgpu::BindGroup)> + '_ {
        self.meshes
            .iter()
            .filter_map(|gpu_mesh| {
                let geometry = self.geometries.get(&gpu_mesh.geometry)?;
                Some((
                    geometry,
                    &gpu_mesh.transform_bind_group,
                    gpu_mesh.material.bind_group(),
                ))
            })
    }

    /// Helper line vertex buffer and its vertex count, if any lines exist
    pub fn lines(&self) -> Option<(&wgpu::Buffer, u32)> {
        self.lines
            .as_ref()
            .filter(|lines| lines.count > 0)
            .map(|lines| (&lines.buffer, lines.count))
    }
}
