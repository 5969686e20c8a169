use glam::{Vec2, Vec3};
use rand::Rng;

use crate::scene::grid::{PlaneParams, build_plane_grid};

const JITTER: f32 = 0.5;

/// Which vertex attributes changed since the renderer last uploaded them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirtyAttributes {
    pub positions: bool,
    pub colors: bool,
}

/// The undulating plane. All per-vertex arrays share indices and are rebuilt
/// together by [`WavePlane::generate`].
pub struct WavePlane {
    params: PlaneParams,
    positions: Vec<Vec3>,
    original_positions: Vec<Vec3>,
    phases: Vec<Vec2>,
    colors: Vec<Vec3>,
    indices: Vec<u32>,
    dirty: DirtyAttributes,
}

impl WavePlane {
    /// Builds the grid, jitters every vertex by up to half a unit per axis and
    /// snapshots the result as the rest pose the animation oscillates around.
    pub fn generate<R: Rng>(params: PlaneParams, base_color: Vec3, rng: &mut R) -> Self {
        let params = params.clamped();
        let grid = build_plane_grid(&params);
        let mut positions = grid.positions;

        let mut phases = Vec::with_capacity(positions.len());
        for position in positions.iter_mut() {
            *position += Vec3::new(
                rng.gen_range(-JITTER..=JITTER),
                rng.gen_range(-JITTER..=JITTER),
                rng.gen_range(-JITTER..=JITTER),
            );
            phases.push(Vec2::new(
                rng.gen_range(-JITTER..=JITTER),
                rng.gen_range(-JITTER..=JITTER),
            ));
        }

        let original_positions = positions.clone();
        let colors = vec![base_color; positions.len()];

        Self {
            params,
            positions,
            original_positions,
            phases,
            colors,
            indices: grid.indices,
            dirty: DirtyAttributes {
                positions: true,
                colors: true,
            },
        }
    }

    /// Oscillates every vertex by up to 1 unit on X and on Y around its rest
    /// position. The two axes use independent phases, so the path is not a
    /// circle and neighbours drift out of step. Z stays at rest.
    pub fn animate(&mut self, time_secs: f64) {
        for ((position, original), phase) in self
            .positions
            .iter_mut()
            .zip(&self.original_positions)
            .zip(&self.phases)
        {
            position.x = original.x + (time_secs + phase.x as f64).cos() as f32;
            position.y = original.y + (time_secs + phase.y as f64).sin() as f32;
            position.z = original.z;
        }
        self.dirty.positions = true;
    }

    pub fn params(&self) -> PlaneParams {
        self.params
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    #[cfg(test)]
    pub fn original_positions(&self) -> &[Vec3] {
        &self.original_positions
    }

    #[cfg(test)]
    pub fn phases(&self) -> &[Vec2] {
        &self.phases
    }

    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    pub fn colors_mut(&mut self) -> &mut [Vec3] {
        self.dirty.colors = true;
        &mut self.colors
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Returns the pending dirty flags and clears them.
    pub fn take_dirty(&mut self) -> DirtyAttributes {
        std::mem::take(&mut self.dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BASE_COLOR;
    use crate::scene::grid::build_plane_grid;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn small_params() -> PlaneParams {
        PlaneParams {
            width: 20,
            height: 10,
            width_segments: 8,
            height_segments: 4,
        }
    }

    #[test]
    fn arrays_match_vertex_count() {
        let mut rng = StdRng::seed_from_u64(1);
        let plane = WavePlane::generate(small_params(), BASE_COLOR, &mut rng);
        let n = small_params().vertex_count();
        assert_eq!(plane.positions().len(), n);
        assert_eq!(plane.original_positions().len(), n);
        assert_eq!(plane.phases().len(), n);
        assert_eq!(plane.colors().len(), n);
        assert!(plane.colors().iter().all(|c| *c == BASE_COLOR));
    }

    #[test]
    fn jitter_stays_within_half_unit() {
        let mut rng = StdRng::seed_from_u64(7);
        let plane = WavePlane::generate(small_params(), BASE_COLOR, &mut rng);
        let flat = build_plane_grid(&small_params()).positions;

        for (rest, grid) in plane.original_positions().iter().zip(&flat) {
            let offset = *rest - *grid;
            assert!(offset.abs().max_element() <= 0.5 + 1e-5, "offset {offset}");
        }
        for phase in plane.phases() {
            assert!(phase.abs().max_element() <= 0.5);
        }
        assert_eq!(plane.positions(), plane.original_positions());
    }

    #[test]
    fn animate_follows_the_phase_formula() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut plane = WavePlane::generate(small_params(), BASE_COLOR, &mut rng);

        for t in [0.0_f64, 0.75, 12.5, 3600.25] {
            plane.animate(t);
            for i in 0..plane.vertex_count() {
                let rest = plane.original_positions()[i];
                let phase = plane.phases()[i];
                let expected = rest
                    + Vec3::new(
                        (t + phase.x as f64).cos() as f32,
                        (t + phase.y as f64).sin() as f32,
                        0.0,
                    );
                assert!(
                    (plane.positions()[i] - expected).length() < 1e-5,
                    "vertex {i} at t={t}"
                );
            }
        }
    }

    #[test]
    fn animation_never_drifts_from_rest_pose() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut plane = WavePlane::generate(small_params(), BASE_COLOR, &mut rng);
        for step in 0..200 {
            plane.animate(step as f64 * 0.033);
            for (p, rest) in plane.positions().iter().zip(plane.original_positions()) {
                let offset = *p - *rest;
                assert!(offset.x.abs() <= 1.0 + 1e-5, "x offset {}", offset.x);
                assert!(offset.y.abs() <= 1.0 + 1e-5, "y offset {}", offset.y);
                assert_eq!(offset.z, 0.0);
            }
        }
    }

    #[test]
    fn regeneration_rerandomizes() {
        let mut rng = StdRng::seed_from_u64(5);
        let first = WavePlane::generate(PlaneParams::default(), BASE_COLOR, &mut rng);
        let second = WavePlane::generate(PlaneParams::default(), BASE_COLOR, &mut rng);

        assert_eq!(first.vertex_count(), second.vertex_count());
        assert_ne!(first.original_positions(), second.original_positions());
        assert_ne!(first.phases(), second.phases());
    }

    #[test]
    fn dirty_flags_are_consumed_once() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut plane = WavePlane::generate(small_params(), BASE_COLOR, &mut rng);

        let fresh = plane.take_dirty();
        assert!(fresh.positions && fresh.colors);
        assert_eq!(plane.take_dirty(), DirtyAttributes::default());

        plane.animate(1.0);
        assert_eq!(
            plane.take_dirty(),
            DirtyAttributes {
                positions: true,
                colors: false
            }
        );
    }
}
