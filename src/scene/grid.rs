use glam::Vec3;

use crate::config::{
    DEFAULT_HEIGHT_SEGMENTS, DEFAULT_PLANE_HEIGHT, DEFAULT_PLANE_WIDTH, DEFAULT_WIDTH_SEGMENTS,
    PLANE_PARAM_RANGE,
};

/// Dimensions and resolution of the plane, as edited in the side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaneParams {
    pub width: u32,
    pub height: u32,
    pub width_segments: u32,
    pub height_segments: u32,
}

impl Default for PlaneParams {
    fn default() -> Self {
        Self {
            width: DEFAULT_PLANE_WIDTH,
            height: DEFAULT_PLANE_HEIGHT,
            width_segments: DEFAULT_WIDTH_SEGMENTS,
            height_segments: DEFAULT_HEIGHT_SEGMENTS,
        }
    }
}

impl PlaneParams {
    pub fn clamped(self) -> Self {
        let clamp = |v: u32| v.clamp(*PLANE_PARAM_RANGE.start(), *PLANE_PARAM_RANGE.end());
        Self {
            width: clamp(self.width),
            height: clamp(self.height),
            width_segments: clamp(self.width_segments),
            height_segments: clamp(self.height_segments),
        }
    }

    pub fn vertex_count(&self) -> usize {
        (self.width_segments as usize + 1) * (self.height_segments as usize + 1)
    }

    pub fn triangle_count(&self) -> usize {
        self.width_segments as usize * self.height_segments as usize * 2
    }
}

pub struct PlaneGrid {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
}

/// Builds a flat grid in the XY plane centred on the origin, rows running
/// from +Y to -Y. Triangles wind counter-clockwise seen from +Z.
pub fn build_plane_grid(params: &PlaneParams) -> PlaneGrid {
    let params = params.clamped();
    let grid_x = params.width_segments as usize;
    let grid_y = params.height_segments as usize;
    let grid_x1 = grid_x + 1;
    let grid_y1 = grid_y + 1;

    let half_w = params.width as f32 / 2.0;
    let half_h = params.height as f32 / 2.0;
    let step_x = params.width as f32 / grid_x as f32;
    let step_y = params.height as f32 / grid_y as f32;

    let mut positions = Vec::with_capacity(params.vertex_count());
    for iy in 0..grid_y1 {
        let y = half_h - iy as f32 * step_y;
        for ix in 0..grid_x1 {
            let x = ix as f32 * step_x - half_w;
            positions.push(Vec3::new(x, y, 0.0));
        }
    }

    let mut indices = Vec::with_capacity(params.triangle_count() * 3);
    for iy in 0..grid_y {
        for ix in 0..grid_x {
            let a = (ix + grid_x1 * iy) as u32;
            let b = (ix + grid_x1 * (iy + 1)) as u32;
            let c = (ix + 1 + grid_x1 * (iy + 1)) as u32;
            let d = (ix + 1 + grid_x1 * iy) as u32;

            indices.extend_from_slice(&[a, b, d]);
            indices.extend_from_slice(&[b, c, d]);
        }
    }

    PlaneGrid { positions, indices }
}
