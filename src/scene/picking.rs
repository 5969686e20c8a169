use glam::Vec3;

const EPSILON: f32 = 1e-7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleHit {
    pub vertices: [u32; 3],
    pub distance: f32,
}

/// Möller–Trumbore against the front face only (counter-clockwise winding).
pub fn intersect_front_face(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = ray.direction.cross(edge2);
    let det = edge1.dot(h);

    // back-facing or parallel
    if det < EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = ray.origin - v0;
    let u = inv_det * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = inv_det * ray.direction.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = inv_det * edge2.dot(q);
    (t > EPSILON).then_some(t)
}

/// Returns the closest triangle of an indexed mesh hit by `ray`, if any.
pub fn pick_nearest(ray: &Ray, positions: &[Vec3], indices: &[u32]) -> Option<TriangleHit> {
    if ray.direction == Vec3::ZERO {
        return None;
    }

    let mut nearest: Option<TriangleHit> = None;
    for tri in indices.chunks_exact(3) {
        let vertices = [tri[0], tri[1], tri[2]];
        let Some([v0, v1, v2]) = fetch_triangle(positions, vertices) else {
            continue;
        };

        if let Some(distance) = intersect_front_face(ray, v0, v1, v2) {
            if nearest.is_none_or(|hit| distance < hit.distance) {
                nearest = Some(TriangleHit { vertices, distance });
            }
        }
    }
    nearest
}

fn fetch_triangle(positions: &[Vec3], vertices: [u32; 3]) -> Option<[Vec3; 3]> {
    Some([
        *positions.get(vertices[0] as usize)?,
        *positions.get(vertices[1] as usize)?,
        *positions.get(vertices[2] as usize)?,
    ])
}
