//! wgpu rendering for the solar system scene
//!
//! Four pipelines: a procedural starfield skybox, instanced
//! sphere-impostor billboards for the bodies, fading line-strip orbit
//! trails, and the alpha-blended ring annulus. Physics state arrives in SI
//! units and is scaled to render units as it is uploaded.

use common::{create_depth_texture, CameraUniform, FlyCamera, GraphicsContext, DEPTH_FORMAT};
use wgpu::util::DeviceExt;

use crate::bodies::CelestialBody;
use crate::config::RenderConfig;
use crate::rings::RingVertex;

/// Scene-wide uniform for the shaders
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniform {
    /// Simulated days elapsed, for subtle sun shimmer
    pub time_days: f32,
    pub _padding: [f32; 3],
}

/// Per-body instance data
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BodyInstance {
    pub position: [f32; 3],
    pub radius: f32,
    pub color: [f32; 4],
    /// 1 for the Sun (self-lit), 0 for everything lit by it
    pub emissive: u32,
    pub _padding: [f32; 3],
}

impl BodyInstance {
    const ATTRIBS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        2 => Float32x3,
        3 => Float32,
        4 => Float32x4,
        5 => Uint32,
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<BodyInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }

    pub fn from_body(body: &CelestialBody, config: &RenderConfig) -> Self {
        Self {
            position: [
                config.scale_position(body.position.x),
                config.scale_position(body.position.y),
                config.scale_position(body.position.z),
            ],
            radius: body.display_radius,
            color: body.color,
            emissive: (body.name == "Sun") as u32,
            _padding: [0.0; 3],
        }
    }
}

/// Billboard corner
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
}

impl QuadVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Trail vertex
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl LineVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x4,
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

const QUAD_VERTICES: &[QuadVertex] = &[
    QuadVertex { position: [-1.0, -1.0] },
    QuadVertex { position: [1.0, -1.0] },
    QuadVertex { position: [1.0, 1.0] },
    QuadVertex { position: [-1.0, -1.0] },
    QuadVertex { position: [1.0, 1.0] },
    QuadVertex { position: [-1.0, 1.0] },
];

pub struct RenderData {
    pub body_count: u32,
    pub trail_ranges: Vec<(u32, u32)>,
    pub ring_vertex_count: u32,
}

pub struct Renderer {
    body_pipeline: wgpu::RenderPipeline,
    trail_pipeline: wgpu::RenderPipeline,
    ring_pipeline: wgpu::RenderPipeline,
    skybox_pipeline: wgpu::RenderPipeline,

    quad_buffer: wgpu::Buffer,
    body_buffer: wgpu::Buffer,
    trail_buffer: wgpu::Buffer,
    ring_buffer: wgpu::Buffer,

    camera_buffer: wgpu::Buffer,
    scene_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,

    depth_texture: wgpu::TextureView,

    config: RenderConfig,
    max_bodies: usize,
    max_trail_vertices: usize,
    max_ring_vertices: usize,
}

impl Renderer {
    pub fn new(ctx: &GraphicsContext, config: RenderConfig) -> Self {
        let device = &ctx.device;

        let max_bodies = 16;
        let max_trail_vertices = max_bodies * 1500;
        let max_ring_vertices = config.ring_segments as usize * 6;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Solar Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/solar.wgsl").into()),
        });

        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Camera Buffer"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let scene_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Scene Buffer"),
            size: std::mem::size_of::<SceneUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Scene Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Scene Bind Group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: scene_buffer.as_entire_binding(),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let depth_texture = create_depth_texture(device, ctx.size.width, ctx.size.height);

        // Opaque geometry writes depth; translucent passes only test it
        let depth_write = Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        });
        let depth_test_only = Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: false,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        });

        let body_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Body Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_body",
                buffers: &[QuadVertex::layout(), BodyInstance::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_body",
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: depth_write.clone(),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        let trail_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Trail Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_trail",
                buffers: &[LineVertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_trail",
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineStrip,
                ..Default::default()
            },
            depth_stencil: depth_test_only.clone(),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        let ring_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Ring Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_ring",
                buffers: &[RingVertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_ring",
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                // visible from both above and below the ring plane
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: depth_test_only,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        let skybox_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Skybox Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_skybox",
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_skybox",
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.config.format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        let quad_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quad Buffer"),
            contents: bytemuck::cast_slice(QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let body_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Body Buffer"),
            size: (std::mem::size_of::<BodyInstance>() * max_bodies) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let trail_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Trail Buffer"),
            size: (std::mem::size_of::<LineVertex>() * max_trail_vertices) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let ring_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Ring Buffer"),
            size: (std::mem::size_of::<RingVertex>() * max_ring_vertices) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            body_pipeline,
            trail_pipeline,
            ring_pipeline,
            skybox_pipeline,
            quad_buffer,
            body_buffer,
            trail_buffer,
            ring_buffer,
            camera_buffer,
            scene_buffer,
            bind_group,
            depth_texture,
            config,
            max_bodies,
            max_trail_vertices,
            max_ring_vertices,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = create_depth_texture(device, width, height);
    }

    /// Upload this frame's camera, body, trail, and ring data
    pub fn update(
        &self,
        queue: &wgpu::Queue,
        camera: &FlyCamera,
        bodies: &[CelestialBody],
        ring: &[RingVertex],
        time_days: f32,
    ) -> RenderData {
        let camera_uniform = CameraUniform::from_camera(camera);
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[camera_uniform]));

        let scene_uniform = SceneUniform {
            time_days,
            _padding: [0.0; 3],
        };
        queue.write_buffer(&self.scene_buffer, 0, bytemuck::cast_slice(&[scene_uniform]));

        let instances: Vec<BodyInstance> = bodies
            .iter()
            .take(self.max_bodies)
            .map(|body| BodyInstance::from_body(body, &self.config))
            .collect();
        queue.write_buffer(&self.body_buffer, 0, bytemuck::cast_slice(&instances));

        // Trails fade from transparent at the oldest point to half alpha
        let mut trail_vertices = Vec::new();
        let mut trail_ranges = Vec::new();

        for body in bodies {
            let trail_len = body.trail.len();
            if trail_len < 2 || trail_vertices.len() + trail_len > self.max_trail_vertices {
                continue;
            }

            let start = trail_vertices.len() as u32;
            for (i, pos) in body.trail.iter().enumerate() {
                let alpha = (i as f32 / trail_len as f32) * 0.5;
                trail_vertices.push(LineVertex {
                    position: [
                        self.config.scale_position(pos.x),
                        self.config.scale_position(pos.y),
                        self.config.scale_position(pos.z),
                    ],
                    color: [body.color[0], body.color[1], body.color[2], alpha],
                });
            }
            trail_ranges.push((start, trail_len as u32));
        }

        if !trail_vertices.is_empty() {
            queue.write_buffer(&self.trail_buffer, 0, bytemuck::cast_slice(&trail_vertices));
        }

        let ring_vertex_count = ring.len().min(self.max_ring_vertices) as u32;
        if ring_vertex_count > 0 {
            queue.write_buffer(
                &self.ring_buffer,
                0,
                bytemuck::cast_slice(&ring[..ring_vertex_count as usize]),
            );
        }

        RenderData {
            body_count: instances.len() as u32,
            trail_ranges,
            ring_vertex_count,
        }
    }

    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        data: &RenderData,
        show_trails: bool,
    ) {
        // Starfield pass, no depth
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Skybox Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_pipeline(&self.skybox_pipeline);
            pass.set_bind_group(0, &self.bind_group, &[]);
            pass.draw(0..3, 0..1);
        }

        // Depth-tested scene pass
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if show_trails && !data.trail_ranges.is_empty() {
                pass.set_pipeline(&self.trail_pipeline);
                pass.set_bind_group(0, &self.bind_group, &[]);
                pass.set_vertex_buffer(0, self.trail_buffer.slice(..));
                for (start, count) in &data.trail_ranges {
                    pass.draw(*start..(*start + *count), 0..1);
                }
            }

            if data.body_count > 0 {
                pass.set_pipeline(&self.body_pipeline);
                pass.set_bind_group(0, &self.bind_group, &[]);
                pass.set_vertex_buffer(0, self.quad_buffer.slice(..));
                pass.set_vertex_buffer(1, self.body_buffer.slice(..));
                pass.draw(0..6, 0..data.body_count);
            }

            // Translucent ring last so bodies show through correctly
            if data.ring_vertex_count > 0 {
                pass.set_pipeline(&self.ring_pipeline);
                pass.set_bind_group(0, &self.bind_group, &[]);
                pass.set_vertex_buffer(0, self.ring_buffer.slice(..));
                pass.draw(0..data.ring_vertex_count, 0..1);
            }
        }
    }
}
