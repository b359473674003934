use crate::camera::OrbitCamera;
use crate::shaders;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use seascape_common::FrameState;
use seascape_kernel::WaveParameters;
use seascape_render::{Renderer, SurfaceMesh};
use wgpu::util::DeviceExt;

/// Uniform block shared by both shader stages. Field order and padding
/// match `WaterUniforms` in the WGSL source.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct WaterUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub big_wave_frequency: [f32; 2],
    pub big_wave_elevation: f32,
    pub big_wave_speed: f32,
    pub depth_color: [f32; 3],
    pub small_wave_elevation: f32,
    pub surface_color: [f32; 3],
    pub small_wave_frequency: f32,
    pub small_wave_time_speed: f32,
    pub small_wave_iterations: u32,
    pub color_offset: f32,
    pub color_multiplier: f32,
    pub time: f32,
    _pad0: f32,
    _pad1: f32,
    _pad2: f32,
}

impl WaterUniforms {
    pub fn new(view_proj: Mat4, params: &WaveParameters, time: f32) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            big_wave_frequency: params.big_wave_frequency.to_array(),
            big_wave_elevation: params.big_wave_elevation,
            big_wave_speed: params.big_wave_speed,
            depth_color: params.depth_color.to_array(),
            small_wave_elevation: params.small_wave_elevation,
            surface_color: params.surface_color.to_array(),
            small_wave_frequency: params.small_wave_frequency,
            small_wave_time_speed: params.small_wave_time_speed,
            small_wave_iterations: params.small_wave_iterations,
            color_offset: params.color_offset,
            color_multiplier: params.color_multiplier,
            time,
            _pad0: 0.0,
            _pad1: 0.0,
            _pad2: 0.0,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct WaterVertex {
    /// Plane coordinates (x, z); height comes from the shader.
    position: [f32; 2],
}

fn water_vertices(mesh: &SurfaceMesh) -> Vec<WaterVertex> {
    mesh.points()
        .iter()
        .map(|p| WaterVertex {
            position: [p.x, p.z],
        })
        .collect()
}

/// wgpu-based water renderer.
pub struct WaterRenderer {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    depth_texture: wgpu::TextureView,
}

impl WaterRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        mesh: &SurfaceMesh,
    ) -> Self {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("water_uniform_buffer"),
            contents: bytemuck::bytes_of(&WaterUniforms::new(
                Mat4::IDENTITY,
                &WaveParameters::default(),
                0.0,
            )),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("water_bind_group_layout"),
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
            label: Some("water_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("water_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("water_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::WATER_SHADER.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("water_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_water"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<WaterVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x2],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_water"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            // The plane is visible from below when the camera orbits under it.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let vertices = water_vertices(mesh);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("water_vertex_buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("water_index_buffer"),
            contents: bytemuck::cast_slice(mesh.indices()),
            usage: wgpu::BufferUsages::INDEX,
        });
        let index_count = mesh.indices().len() as u32;

        tracing::info!(
            vertices = vertices.len(),
            triangles = mesh.triangle_count(),
            "water mesh uploaded"
        );

        let depth_texture = Self::create_depth_texture(device, width, height);

        Self {
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            vertex_buffer,
            index_buffer,
            index_count,
            depth_texture,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    /// Render one frame of the water surface.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        camera: &OrbitCamera,
        frame: &FrameState,
        params: &WaveParameters,
    ) {
        let uniforms = WaterUniforms::new(camera.view_projection(), params, frame.elapsed);
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("water_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("water_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
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
                ..Default::default()
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..self.index_count, 0, 0..1);
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("water_depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

/// One frame's GPU targets, bundled so the water renderer can be driven by
/// `seascape_render::FrameLoop` like any other [`Renderer`].
pub struct WaterFrame<'a> {
    pub renderer: &'a WaterRenderer,
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub view: &'a wgpu::TextureView,
    pub camera: &'a OrbitCamera,
}

impl Renderer for WaterFrame<'_> {
    type Output = ();

    fn render(&mut self, frame: &FrameState, params: &WaveParameters) {
        self.renderer
            .render(self.device, self.queue, self.view, self.camera, frame, params);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seascape_common::Color;

    #[test]
    fn uniform_block_is_std140_sized() {
        assert_eq!(std::mem::size_of::<WaterUniforms>(), 144);
        assert_eq!(std::mem::size_of::<WaterUniforms>() % 16, 0);
    }

    #[test]
    fn uniforms_carry_parameters() {
        let params = WaveParameters {
            small_wave_iterations: 6,
            surface_color: Color::new(0.25, 0.5, 0.75),
            ..WaveParameters::default()
        };
        let u = WaterUniforms::new(Mat4::IDENTITY, &params, 1.5);

        assert_eq!(u.view_proj, Mat4::IDENTITY.to_cols_array_2d());
        assert_eq!(u.big_wave_frequency, [4.0, 1.5]);
        assert_eq!(u.big_wave_elevation, 0.2);
        assert_eq!(u.small_wave_iterations, 6);
        assert_eq!(u.surface_color, [0.25, 0.5, 0.75]);
        assert_eq!(u.color_multiplier, 2.0);
        assert_eq!(u.time, 1.5);
    }

    #[test]
    fn uniform_offsets_match_shader_layout() {
        use std::mem::offset_of;
        assert_eq!(offset_of!(WaterUniforms, big_wave_frequency), 64);
        assert_eq!(offset_of!(WaterUniforms, depth_color), 80);
        assert_eq!(offset_of!(WaterUniforms, small_wave_elevation), 92);
        assert_eq!(offset_of!(WaterUniforms, surface_color), 96);
        assert_eq!(offset_of!(WaterUniforms, small_wave_iterations), 116);
        assert_eq!(offset_of!(WaterUniforms, time), 128);
    }

    #[test]
    fn vertices_follow_mesh_order() {
        let mesh = SurfaceMesh::plane(2.0, 2.0, 2, 2);
        let vertices = water_vertices(&mesh);
        assert_eq!(vertices.len(), 9);
        assert_eq!(vertices[0].position, [-1.0, -1.0]);
        assert_eq!(vertices[4].position, [0.0, 0.0]);
        assert_eq!(vertices[8].position, [1.0, 1.0]);
    }
}
