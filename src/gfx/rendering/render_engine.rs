//! WGPU-based rendering engine
//!
//! Owns the surface, device and queue, the depth buffer, the pipelines and
//! the GPU mirror of the scene. One call to [`RenderEngine::render_frame`]
//! draws the background, every mesh and the debug helper lines.

use std::sync::Arc;
use wgpu::Device;

use crate::{
    error::NebulaError,
    gfx::{
        camera::perspective_camera::PerspectiveCamera,
        resources::{
            global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO},
            texture_resource::TextureResource,
        },
        scene::scene::Scene,
    },
};

use super::{
    gpu_scene::{DrawGeometry, GpuScene},
    pipeline_manager::{PipelineConfig, PipelineManager, VertexLayout},
};

/// Clear color shown until the background image has loaded
const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    pipeline_manager: PipelineManager,
    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,
    gpu_scene: GpuScene,
}

impl RenderEngine {
    /// Creates a new render engine for the given window
    ///
    /// Picks an sRGB surface format when available so shader output in
    /// linear space is encoded correctly on presentation.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> Result<RenderEngine, NebulaError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits {
                    max_texture_dimension_2d: 4096,
                    ..wgpu::Limits::downlevel_defaults()
                },
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let info = adapter.get_info();
        log::info!("Using {} ({:?})", info.name, info.backend);

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or(NebulaError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: present_mode(vsync),
            alpha_mode: surface_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let global_ubo = GlobalUBO::new(&device);
        let global_bindings = GlobalBindings::new(&device, &global_ubo);
        let gpu_scene = GpuScene::new(&device, &queue);

        let device_handle: Arc<Device> = device.into();
        let queue_handle: Arc<wgpu::Queue> = queue.into();
        let mut pipeline_manager = PipelineManager::new(device_handle.clone());

        pipeline_manager.load_shader("background", include_str!("shaders/background.wgsl"));
        pipeline_manager.load_shader("mesh", include_str!("shaders/mesh.wgsl"));
        pipeline_manager.load_shader("line", include_str!("shaders/line.wgsl"));

        pipeline_manager.register_pipeline(
            "Background",
            PipelineConfig::default()
                .with_label("BACKGROUND")
                .with_shader("background")
                .with_bind_group_layouts(vec![gpu_scene.background_layout().clone()])
                .with_depth_read_only(TextureResource::DEPTH_FORMAT)
                .with_color_format(format)
                .with_cull_mode(None)
                .with_no_vertex_buffers(),
        );

        pipeline_manager.register_pipeline(
            "Mesh",
            PipelineConfig::default()
                .with_label("MESH")
                .with_shader("mesh")
                .with_depth_stencil(TextureResource::DEPTH_FORMAT)
                .with_color_format(format)
                .with_bind_group_layouts(vec![
                    global_bindings.bind_group_layout().clone(),
                    gpu_scene.transform_layout().clone(),
                    gpu_scene.material_layout().clone(),
                ]),
        );

        pipeline_manager.register_pipeline(
            "Lines",
            PipelineConfig::default()
                .with_label("LINES")
                .with_shader("line")
                .with_vertex_layout(VertexLayout::Line)
                .with_primitive_topology(wgpu::PrimitiveTopology::LineList)
                .with_depth_stencil(TextureResource::DEPTH_FORMAT)
                .with_color_format(format)
                .with_cull_mode(None)
                .with_bind_group_layouts(vec![global_bindings.bind_group_layout().clone()]),
        );

        if let Err(errors) = pipeline_manager.create_all_pipelines() {
            for error in errors {
                log::error!("{}", error);
            }
        }
        log::debug!("Pipelines: {:?}", pipeline_manager.get_stats());

        Ok(RenderEngine {
            device: device_handle,
            config,
            surface,
            queue: queue_handle,
            depth_texture,
            pipeline_manager,
            global_bindings,
            global_ubo,
            gpu_scene,
        })
    }

    /// Renders one frame of `scene` as seen from `camera`
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped.
    /// Running out of GPU memory is the only error returned.
    pub fn render_frame(
        &mut self,
        scene: &Scene,
        camera: &PerspectiveCamera,
    ) -> Result<(), wgpu::SurfaceError> {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated; reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Timed out acquiring surface texture; skipping frame");
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        self.gpu_scene.sync(&self.device, &self.queue, scene);
        update_global_ubo(
            &mut self.global_ubo,
            &self.queue,
            camera.uniform,
            scene.lights(),
        );

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            // Background never writes depth, so meshes always draw over it
            if let (Some(pipeline), Some(bind_group)) = (
                self.pipeline_manager.pipeline("Background"),
                self.gpu_scene.background_bind_group(),
            ) {
                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(0, bind_group, &[]);
                render_pass.draw(0..3, 0..1);
            }

            if let Some(pipeline) = self.pipeline_manager.pipeline("Mesh") {
                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);

                for (geometry, transform, material) in self.gpu_scene.draw_list() {
                    render_pass.set_bind_group(1, transform, &[]);
                    render_pass.set_bind_group(2, material, &[]);
                    render_pass.draw_geometry(geometry);
                }
            }

            if let (Some(pipeline), Some((buffer, count))) = (
                self.pipeline_manager.pipeline("Lines"),
                self.gpu_scene.lines(),
            ) {
                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);
                render_pass.set_vertex_buffer(0, buffer.slice(..));
                render_pass.draw(0..count, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    /// Resizes the surface and recreates the depth buffer
    ///
    /// Zero-sized requests (minimized windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }
}

fn present_mode(vsync: bool) -> wgpu::PresentMode {
    if vsync {
        wgpu::PresentMode::Fifo
    } else {
        wgpu::PresentMode::Immediate
    }
}
