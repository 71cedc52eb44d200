use wgpu::util::DeviceExt;

use super::collision::DebugRect;

/// Debug renderer for hitboxes
/// Draws rectangle outlines as a line list on top of the frame
pub struct DebugRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    vertices: Vec<DebugVertex>,
    indices: Vec<u16>,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
struct DebugVertex {
    position: [f32; 2],
    color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct DebugUniforms {
    view_proj: [[f32; 4]; 4],
}

impl DebugRenderer {
    /// Create a new debug renderer
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        view_proj_matrix: [[f32; 4]; 4],
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Hitbox Debug Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/debug.wgsl").into()),
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Hitbox Debug Uniform Buffer"),
            contents: bytemuck::cast_slice(&[DebugUniforms {
                view_proj: view_proj_matrix,
            }]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Hitbox Debug Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Hitbox Debug Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Hitbox Debug Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Hitbox Debug Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<DebugVertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[
                        // position
                        wgpu::VertexAttribute {
                            offset: 0,
                            shader_location: 0,
                            format: wgpu::VertexFormat::Float32x2,
                        },
                        // color
                        wgpu::VertexAttribute {
                            offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                            shader_location: 1,
                            format: wgpu::VertexFormat::Float32x4,
                        },
                    ],
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        // Grown on demand in prepare()
        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Hitbox Debug Vertex Buffer"),
            size: 1024,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let index_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Hitbox Debug Index Buffer"),
            size: 1024,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            uniform_buffer,
            bind_group,
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Update the view-projection matrix
    pub fn update_view_proj(&self, queue: &wgpu::Queue, view_proj: [[f32; 4]; 4]) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::cast_slice(&[DebugUniforms { view_proj }]),
        );
    }

    /// Build and upload outline geometry for this frame's rectangles
    pub fn prepare(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, rects: &[DebugRect]) {
        self.vertices.clear();
        self.indices.clear();

        for rect in rects {
            push_outline(&mut self.vertices, &mut self.indices, rect);
        }

        if self.vertices.is_empty() {
            return;
        }

        let vertex_size = (self.vertices.len() * std::mem::size_of::<DebugVertex>()) as u64;
        let index_size = (self.indices.len() * std::mem::size_of::<u16>()) as u64;

        // Resize buffers if needed
        if vertex_size > self.vertex_buffer.size() {
            self.vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Hitbox Debug Vertex Buffer"),
                contents: bytemuck::cast_slice(&self.vertices),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            });
        } else {
            queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&self.vertices));
        }

        // write_buffer needs a 4-byte multiple; each outline adds 8 indices
        if index_size > self.index_buffer.size() {
            self.index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Hitbox Debug Index Buffer"),
                contents: bytemuck::cast_slice(&self.indices),
                usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            });
        } else {
            queue.write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(&self.indices));
        }
    }

    /// Render the outlines prepared this frame
    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        if self.indices.is_empty() {
            return;
        }

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        render_pass.draw_indexed(0..self.indices.len() as u32, 0, 0..1);
    }
}

/// Four corners and four edges of a rectangle outline
fn push_outline(vertices: &mut Vec<DebugVertex>, indices: &mut Vec<u16>, debug_rect: &DebugRect) {
    // u16 indices; the overlay never has this many boxes
    if vertices.len() + 4 > u16::MAX as usize {
        return;
    }

    let start_idx = vertices.len() as u16;
    let r = debug_rect.rect;
    let color = debug_rect.color.to_array();

    let corners = [
        [r.min_x as f32, r.min_y as f32],
        [r.max_x as f32, r.min_y as f32],
        [r.max_x as f32, r.max_y as f32],
        [r.min_x as f32, r.max_y as f32],
    ];

    for position in corners {
        vertices.push(DebugVertex { position, color });
    }

    for i in 0..4 {
        indices.push(start_idx + i);
        indices.push(start_idx + (i + 1) % 4);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Rect;
    use glam::Vec4;

    #[test]
    fn test_outline_geometry() {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        let rect = DebugRect::new(Rect::new(1, 2, 11, 22), Vec4::ONE);

        push_outline(&mut vertices, &mut indices, &rect);
        push_outline(&mut vertices, &mut indices, &rect);

        assert_eq!(vertices.len(), 8);
        assert_eq!(indices.len(), 16);
        assert_eq!(vertices[2].position, [11.0, 22.0]);
        // Second outline indexes its own corners and closes the loop
        assert_eq!(&indices[8..], &[4, 5, 5, 6, 6, 7, 7, 4]);
    }
}
