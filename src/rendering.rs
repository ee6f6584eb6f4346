//! Rendering system with wgpu pipelines and the surface mesh attachment.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::surface::{grid_edge_indices, DrawMode, MeshLayout, SceneNode, SurfaceMesh, Vertex};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Uniform buffer for the surface shader
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Uniforms {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub tint: [f32; 4],
}

/// Color multiplier applied on top of the per-vertex colors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub tint: [f32; 4],
}

impl Default for Material {
    fn default() -> Self {
        Self {
            tint: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

/// How wireframe drawing is realized on the current adapter
enum WireframePass {
    /// Triangle indices rasterized with `PolygonMode::Line`
    PolygonLine(wgpu::RenderPipeline),
    /// Separate line-list buffer over the distinct triangle edges
    EdgeList {
        pipeline: wgpu::RenderPipeline,
        index_buffer: wgpu::Buffer,
        index_count: u32,
    },
}

/// GPU-side copy of an attached surface mesh
struct MeshAttachment {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    index_format: wgpu::IndexFormat,
    fill_pipeline: wgpu::RenderPipeline,
    wireframe: WireframePass,
    model: Mat4,
    material: Material,
}

impl MeshAttachment {
    /// Pipeline, index buffer and index count for one draw
    fn draw_call(&self, draw_mode: DrawMode) -> (&wgpu::RenderPipeline, &wgpu::Buffer, u32) {
        match (draw_mode, &self.wireframe) {
            (DrawMode::Filled, _) => (&self.fill_pipeline, &self.index_buffer, self.index_count),
            (DrawMode::Wireframe, WireframePass::PolygonLine(pipeline)) => {
                (pipeline, &self.index_buffer, self.index_count)
            }
            (
                DrawMode::Wireframe,
                WireframePass::EdgeList {
                    pipeline,
                    index_buffer,
                    index_count,
                },
            ) => (pipeline, index_buffer, *index_count),
        }
    }
}

/// Rendering system managing wgpu device, pipelines, and buffers
pub struct RenderSystem {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    shader: wgpu::ShaderModule,
    pipeline_layout: wgpu::PipelineLayout,
    /// False when the adapter cannot rasterize triangles as lines
    line_mode_supported: bool,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    depth_view: wgpu::TextureView,
    attachment: Option<MeshAttachment>,
}

impl RenderSystem {
    /// Create new rendering system
    pub async fn new(window: std::sync::Arc<winit::window::Window>) -> Result<Self, String> {
        let size = window.inner_size();

        // Create wgpu instance
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Create surface (window must have 'static lifetime via Arc)
        let surface = instance
            .create_surface(window)
            .map_err(|e| format!("Failed to create surface: {}", e))?;

        // Request adapter
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or("Failed to find suitable GPU adapter")?;

        let line_mode_supported = adapter
            .features()
            .contains(wgpu::Features::POLYGON_MODE_LINE);
        if !line_mode_supported {
            log::warn!("Adapter lacks POLYGON_MODE_LINE; wireframe draws a line-list edge buffer");
        }

        let required_features = if line_mode_supported {
            wgpu::Features::POLYGON_MODE_LINE
        } else {
            wgpu::Features::empty()
        };

        // Request device
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features,
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await
            .map_err(|e| format!("Failed to request device: {}", e))?;

        // Configure surface
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or("Surface reports no supported formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        log::info!(
            "Renderer: {} ({:?}), format {:?}",
            adapter.get_info().name,
            adapter.get_info().backend,
            surface_format
        );

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Surface Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let uniforms = Uniforms {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            model: Mat4::IDENTITY.to_cols_array_2d(),
            tint: Material::default().tint,
        };

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniforms]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Uniform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Surface Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            push_constant_ranges: &[],
        });

        let depth_view = create_depth_view(&device, &config);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            shader,
            pipeline_layout,
            line_mode_supported,
            uniform_buffer,
            uniform_bind_group,
            depth_view,
            attachment: None,
        })
    }

    /// Attach a mesh for display under `node`.
    ///
    /// GPU buffers are sized and pipelines assembled from the mesh layout.
    pub fn attach(&mut self, node: &SceneNode, mesh: &SurfaceMesh, material: Material) {
        let layout = mesh.layout();

        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Vertex Buffer"),
                contents: bytemuck::cast_slice(mesh.vertices()),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            });

        let index_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Index Buffer"),
                contents: bytemuck::cast_slice(mesh.indices()),
                usage: wgpu::BufferUsages::INDEX,
            });

        let fill_pipeline =
            self.create_pipeline(primitive_state(layout, wgpu::PolygonMode::Fill));

        let (wire_layout, wire_mode) = wireframe_assembly(layout, self.line_mode_supported);
        let wire_pipeline = self.create_pipeline(primitive_state(&wire_layout, wire_mode));
        let wireframe = if wire_mode == wgpu::PolygonMode::Line {
            WireframePass::PolygonLine(wire_pipeline)
        } else {
            let edges = grid_edge_indices(wire_layout.grid_size);
            let index_buffer = self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Edge Index Buffer"),
                    contents: bytemuck::cast_slice(&edges),
                    usage: wgpu::BufferUsages::INDEX,
                });
            WireframePass::EdgeList {
                pipeline: wire_pipeline,
                index_buffer,
                index_count: edges.len() as u32,
            }
        };

        log::info!(
            "Attached surface mesh: {} vertices, {} indices, stride {}, {:?}",
            layout.vertex_count,
            layout.index_count,
            layout.vertex_stride,
            layout.topology
        );

        self.attachment = Some(MeshAttachment {
            vertex_buffer,
            index_buffer,
            index_count: layout.index_count as u32,
            index_format: layout.index_format,
            fill_pipeline,
            wireframe,
            model: node.transform(),
            material,
        });
    }

    fn create_pipeline(&self, primitive: wgpu::PrimitiveState) -> wgpu::RenderPipeline {
        create_surface_pipeline(
            &self.device,
            &self.pipeline_layout,
            &self.shader,
            self.config.format,
            primitive,
        )
    }

    /// Re-upload vertex data of the attached mesh
    pub fn update_vertices(&self, mesh: &SurfaceMesh) {
        if let Some(attachment) = &self.attachment {
            self.queue.write_buffer(
                &attachment.vertex_buffer,
                0,
                bytemuck::cast_slice(mesh.vertices()),
            );
        }
    }

    /// Reconfigure the surface after a window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, &self.config);
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Render a frame with the attached mesh
    pub fn render(&self, view_proj: Mat4, draw_mode: DrawMode) -> Result<(), wgpu::SurfaceError> {
        if let Some(attachment) = &self.attachment {
            let uniforms = Uniforms {
                view_proj: view_proj.to_cols_array_2d(),
                model: attachment.model.to_cols_array_2d(),
                tint: attachment.material.tint,
            };
            self.queue
                .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.02,
                            g: 0.03,
                            b: 0.06,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if let Some(attachment) = &self.attachment {
                let (pipeline, index_buffer, index_count) = attachment.draw_call(draw_mode);
                // Degenerate grids have nothing to draw (empty buffers cannot be bound)
                if index_count > 0 {
                    render_pass.set_pipeline(pipeline);
                    render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                    render_pass.set_vertex_buffer(0, attachment.vertex_buffer.slice(..));
                    render_pass.set_index_buffer(index_buffer.slice(..), attachment.index_format);
                    render_pass.draw_indexed(0..index_count, 0, 0..1);
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

/// Primitive assembly for drawing the index buffer described by `layout`
fn primitive_state(layout: &MeshLayout, polygon_mode: wgpu::PolygonMode) -> wgpu::PrimitiveState {
    wgpu::PrimitiveState {
        topology: layout.topology,
        strip_index_format: layout.topology.is_strip().then_some(layout.index_format),
        front_face: wgpu::FrontFace::Ccw,
        // Both faces: the tilted surface shows its underside when waves fold
        cull_mode: None,
        polygon_mode,
        unclipped_depth: false,
        conservative: false,
    }
}

/// Index layout and polygon mode for wireframe drawing.
///
/// Without line rasterization the edges become their own line list.
fn wireframe_assembly(
    layout: &MeshLayout,
    line_mode_supported: bool,
) -> (MeshLayout, wgpu::PolygonMode) {
    if line_mode_supported {
        (*layout, wgpu::PolygonMode::Line)
    } else {
        (
            MeshLayout::for_grid_edges(layout.grid_size),
            wgpu::PolygonMode::Fill,
        )
    }
}

fn create_surface_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    primitive: wgpu::PrimitiveState,
) -> wgpu::RenderPipeline {
    let label = match (primitive.polygon_mode, primitive.topology) {
        (wgpu::PolygonMode::Line, _) => "Surface Wireframe Pipeline",
        (_, wgpu::PrimitiveTopology::LineList) => "Surface Edge Pipeline",
        _ => "Surface Fill Pipeline",
    };

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive,
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

fn create_depth_view(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
