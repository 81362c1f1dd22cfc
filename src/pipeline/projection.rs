use glam::{Mat3, Vec2, Vec3};
use log::trace;

use crate::core::{CameraState, Color, Mesh};

/// Smallest magnitude the perspective denominator may take. Anything closer to
/// zero is pushed out to this value, keeping its sign.
pub const DEPTH_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.height / self.width
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenSegment {
    pub start: Vec2,
    pub end: Vec2,
    pub color: Color,
}

/// Maps model-space vertices to screen pixels. Output index `i` is the image
/// of `vertices[i]`, so edge indices stay valid on the result.
///
/// Per vertex:
/// 1. spin about the vertical axis by the camera rotation
/// 2. push back by the camera distance
/// 3. perspective divide by `focal_length + z`
/// 4. scale from [-1, 1] onto the viewport
pub fn project(
    vertices: &[Vec3],
    camera: &CameraState,
    viewport: Viewport,
    focal_length: f32,
) -> Vec<Vec2> {
    let rotation = Mat3::from_rotation_y(camera.rotation_radians());
    let aspect = viewport.aspect_ratio();
    let half = Vec2::new(viewport.width, viewport.height) / 2.0;

    vertices
        .iter()
        .map(|&v| {
            let rotated = rotation * v;
            let depth = clamp_depth(focal_length + rotated.z - camera.distance);
            let ndc = Vec2::new(
                aspect * focal_length * rotated.x / depth,
                focal_length * rotated.y / depth,
            );
            (ndc + Vec2::ONE) * half
        })
        .collect()
}

fn clamp_depth(depth: f32) -> f32 {
    if depth.abs() >= DEPTH_EPSILON {
        return depth;
    }
    trace!("Clamping perspective depth {depth}");
    if depth < 0.0 {
        -DEPTH_EPSILON
    } else {
        DEPTH_EPSILON
    }
}

/// One line per mesh edge, between the projected endpoints, in the mesh color.
pub fn segments(mesh: &Mesh, projected: &[Vec2]) -> Vec<ScreenSegment> {
    mesh.edges
        .iter()
        .filter_map(|edge| {
            Some(ScreenSegment {
                start: *projected.get(edge.a)?,
                end: *projected.get(edge.b)?,
                color: mesh.color,
            })
        })
        .collect()
}
