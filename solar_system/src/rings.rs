//! Saturn's ring system: data and procedural annulus geometry
//!
//! The ring is a flat annulus around Saturn's center, tilted by the
//! planet's axial tilt and rebuilt in world space each frame (it is a few
//! hundred vertices; regenerating is cheaper than a model-matrix plumbing
//! path the renderer otherwise never needs).

use glam::{Mat3, Vec3};

/// Physical extent of the main visible rings (B-ring inner edge to
/// A-ring outer edge) and Saturn's axial tilt.
#[derive(Debug, Clone, Copy)]
pub struct RingData {
    /// m from Saturn's center
    pub inner_radius: f64,
    /// m from Saturn's center
    pub outer_radius: f64,
    /// degrees relative to the orbital plane
    pub tilt_degrees: f32,
}

pub fn saturn_ring_data() -> RingData {
    RingData {
        inner_radius: 9.2e7,
        outer_radius: 1.4022e8,
        tilt_degrees: 26.73,
    }
}

/// Ring vertex: world position plus (radial fraction, angle fraction).
/// The fragment shader bands and fades the ring from the radial fraction.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RingVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl RingVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x2,
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<RingVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Triangle-list annulus: `segments` quads, two triangles each, centered
/// on `center` with the given inner/outer radii in render units.
pub fn ring_vertices(
    center: Vec3,
    inner_radius: f32,
    outer_radius: f32,
    tilt_degrees: f32,
    segments: u32,
) -> Vec<RingVertex> {
    let tilt = Mat3::from_rotation_x(tilt_degrees.to_radians());
    let mut vertices = Vec::with_capacity(segments as usize * 6);

    let point = |radius: f32, theta: f32, radial_fraction: f32, angle_fraction: f32| {
        let local = Vec3::new(radius * theta.cos(), 0.0, radius * theta.sin());
        RingVertex {
            position: (center + tilt * local).to_array(),
            uv: [radial_fraction, angle_fraction],
        }
    };

    for segment in 0..segments {
        let f0 = segment as f32 / segments as f32;
        let f1 = (segment + 1) as f32 / segments as f32;
        let theta0 = f0 * std::f32::consts::TAU;
        let theta1 = f1 * std::f32::consts::TAU;

        let inner0 = point(inner_radius, theta0, 0.0, f0);
        let inner1 = point(inner_radius, theta1, 0.0, f1);
        let outer0 = point(outer_radius, theta0, 1.0, f0);
        let outer1 = point(outer_radius, theta1, 1.0, f1);

        vertices.push(inner0);
        vertices.push(outer0);
        vertices.push(outer1);
        vertices.push(inner0);
        vertices.push(outer1);
        vertices.push(inner1);
    }

    vertices
}
