use wgpu::util::DeviceExt;

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{Mesh, PerspectiveCamera};
use crate::shading::{
    PlaneUniformBlock, PlaneVertex, FRAGMENT_ENTRY, FRAGMENT_SHADER, VERTEX_ENTRY, VERTEX_SHADER,
};

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// GPU buffers for one uploaded plane geometry.
struct MeshBuffers {
    vertex_count: usize,
    vbo: wgpu::Buffer,
    triangle_ibo: wgpu::Buffer,
    triangle_count: u32,
    line_ibo: wgpu::Buffer,
    line_count: u32,
}

struct DepthTarget {
    size: (u32, u32),
    view: wgpu::TextureView,
}

/// Draws a plane [`Mesh`] with the displacement shader material.
///
/// Owns a filled and a wireframe pipeline sharing one bind group layout, the
/// uniform buffer, the mesh's vertex/index buffers and a depth texture that
/// follows the target size. Vertex data is uploaded once per geometry and
/// never rewritten; uniforms are rewritten every frame.
#[derive(Default)]
pub struct PlaneRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    fill_pipeline: Option<wgpu::RenderPipeline>,
    line_pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    uniform_buffer: Option<wgpu::Buffer>,

    mesh_buffers: Option<MeshBuffers>,
    depth: Option<DepthTarget>,
}

impl PlaneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one depth-tested pass drawing `mesh` as seen from `camera`.
    ///
    /// The color attachment is loaded, not cleared. Invisible meshes and
    /// zero-sized targets record nothing.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        mesh: &Mesh,
        camera: &PerspectiveCamera,
    ) {
        if !mesh.visible || target.size.0 == 0 || target.size.1 == 0 {
            return;
        }

        self.ensure_pipelines(ctx);
        self.ensure_bindings(ctx);
        self.ensure_mesh_buffers(ctx, mesh);
        self.ensure_depth(ctx, target.size);

        let Some(uniform_buffer) = self.uniform_buffer.as_ref() else { return };
        let block = PlaneUniformBlock::new(
            &mesh.material.uniforms,
            mesh.transform.matrix(),
            camera.view_matrix(),
            camera.projection_matrix(),
        );
        ctx.queue.write_buffer(uniform_buffer, 0, bytemuck::bytes_of(&block));

        let pipeline = if mesh.material.wireframe {
            self.line_pipeline.as_ref()
        } else {
            self.fill_pipeline.as_ref()
        };
        let Some(pipeline) = pipeline else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(buffers) = self.mesh_buffers.as_ref() else { return };
        let Some(depth) = self.depth.as_ref() else { return };

        let (ibo, count) = if mesh.material.wireframe {
            (&buffers.line_ibo, buffers.line_count)
        } else {
            (&buffers.triangle_ibo, buffers.triangle_count)
        };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("ripple plane pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &depth.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Discard,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, buffers.vbo.slice(..));
        rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..count, 0, 0..1);
    }

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format)
            && self.fill_pipeline.is_some()
            && self.line_pipeline.is_some()
        {
            return;
        }

        // Two separate programs, as authored.
        let vertex_module = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("ripple plane vertex shader"),
            source: wgpu::ShaderSource::Wgsl(VERTEX_SHADER.into()),
        });
        let fragment_module = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("ripple plane fragment shader"),
            source: wgpu::ShaderSource::Wgsl(FRAGMENT_SHADER.into()),
        });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("ripple plane bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: PlaneUniformBlock::min_binding_size(),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("ripple plane pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let build = |label: &str, topology: wgpu::PrimitiveTopology, cull_mode| {
            ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),

                vertex: wgpu::VertexState {
                    module: &vertex_module,
                    entry_point: Some(VERTEX_ENTRY),
                    compilation_options: Default::default(),
                    buffers: &[PlaneVertex::layout()],
                },

                fragment: Some(wgpu::FragmentState {
                    module: &fragment_module,
                    entry_point: Some(FRAGMENT_ENTRY),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.surface_format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),

                primitive: wgpu::PrimitiveState {
                    topology,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },

                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::LessEqual,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            })
        };

        // Front faces only; lines have no facing.
        let fill = build(
            "ripple plane pipeline",
            wgpu::PrimitiveTopology::TriangleList,
            Some(wgpu::Face::Back),
        );
        let line = build(
            "ripple plane wireframe pipeline",
            wgpu::PrimitiveTopology::LineList,
            None,
        );

        log::debug!("plane pipelines built for {:?}", ctx.surface_format);

        self.pipeline_format = Some(ctx.surface_format);
        self.fill_pipeline = Some(fill);
        self.line_pipeline = Some(line);
        self.bind_group_layout = Some(bind_group_layout);

        self.bind_group = None;
        self.uniform_buffer = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.uniform_buffer.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let uniform_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("ripple plane uniforms"),
            size: std::mem::size_of::<PlaneUniformBlock>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("ripple plane bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        self.uniform_buffer = Some(uniform_buffer);
        self.bind_group = Some(bind_group);
    }

    fn ensure_mesh_buffers(&mut self, ctx: &RenderCtx<'_>, mesh: &Mesh) {
        let geometry = &mesh.geometry;
        if self
            .mesh_buffers
            .as_ref()
            .is_some_and(|b| b.vertex_count == geometry.vertex_count())
        {
            return;
        }

        let vertices = geometry.vertices();
        let lines = geometry.wireframe_indices();

        let vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("ripple plane vbo"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let triangle_ibo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("ripple plane ibo"),
            contents: bytemuck::cast_slice(geometry.indices()),
            usage: wgpu::BufferUsages::INDEX,
        });
        let line_ibo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("ripple plane line ibo"),
            contents: bytemuck::cast_slice(&lines),
            usage: wgpu::BufferUsages::INDEX,
        });

        log::debug!(
            "plane uploaded: {} vertices, {} triangles, {} edges",
            vertices.len(),
            geometry.indices().len() / 3,
            lines.len() / 2
        );

        self.mesh_buffers = Some(MeshBuffers {
            vertex_count: vertices.len(),
            vbo,
            triangle_ibo,
            triangle_count: geometry.indices().len() as u32,
            line_ibo,
            line_count: lines.len() as u32,
        });
    }

    fn ensure_depth(&mut self, ctx: &RenderCtx<'_>, size: (u32, u32)) {
        if self.depth.as_ref().is_some_and(|d| d.size == size) {
            return;
        }

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("ripple plane depth"),
            size: wgpu::Extent3d {
                width: size.0,
                height: size.1,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        self.depth = Some(DepthTarget { size, view });
    }
}
