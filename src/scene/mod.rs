pub mod frame;
pub mod grid;
pub mod highlight;
pub mod picking;
pub mod pointer;
pub mod surface;
pub mod tween;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{BASE_COLOR, HIGHLIGHT_DURATION, HOVER_COLOR, TARGET_UPDATES_PER_SEC};
use crate::renderer::Camera;

pub use frame::FrameLimiter;
pub use grid::PlaneParams;
pub use highlight::Highlighter;
pub use picking::TriangleHit;
pub use pointer::Pointer;
pub use surface::WavePlane;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    Skipped,
    Processed { hit: Option<TriangleHit> },
}

/// Everything the frame loop mutates: the mesh, the latest pointer sample and
/// the hover fades.
pub struct Scene {
    pub plane: WavePlane,
    pub pointer: Pointer,
    highlighter: Highlighter,
    limiter: FrameLimiter,
    rng: StdRng,
    hovered: Option<[u32; 3]>,
}

impl Scene {
    pub fn new(params: PlaneParams, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let plane = WavePlane::generate(params, BASE_COLOR, &mut rng);
        let limiter = FrameLimiter::new(TARGET_UPDATES_PER_SEC);
        log::debug!("mesh updates capped at one per {:.1} ms", limiter.min_interval_ms());

        Self {
            plane,
            pointer: Pointer::default(),
            highlighter: Highlighter::new(HOVER_COLOR, BASE_COLOR, HIGHLIGHT_DURATION),
            limiter,
            rng,
            hovered: None,
        }
    }

    /// Animate, then pick against the animated mesh, then flash the hit.
    /// Does nothing when called sooner than the frame limiter allows.
    pub fn tick(&mut self, timestamp_ms: f64, camera: &Camera) -> FrameOutcome {
        if !self.limiter.should_process(timestamp_ms) {
            return FrameOutcome::Skipped;
        }

        self.plane.animate(timestamp_ms / 1000.0);

        let hit = self.pointer.ndc().and_then(|ndc| {
            let ray = camera.ray_from_ndc(ndc);
            picking::pick_nearest(&ray, self.plane.positions(), self.plane.indices())
        });

        if let Some(hit) = hit {
            self.highlighter.trigger(hit.vertices, self.plane.colors_mut());
        }
        self.hovered = hit.map(|hit| hit.vertices);

        FrameOutcome::Processed { hit }
    }

    /// One redraw: advance running fades by the wall-clock `dt`, then
    /// [`Scene::tick`]. A triangle hit here keeps the exact hover color until
    /// the next redraw.
    pub fn step(&mut self, timestamp_ms: f64, dt: f32, camera: &Camera) -> FrameOutcome {
        self.advance_fades(dt);
        self.tick(timestamp_ms, camera)
    }

    fn advance_fades(&mut self, dt: f32) {
        if self.highlighter.active_fades() > 0 {
            self.highlighter.update(dt, self.plane.colors_mut());
        }
    }

    /// Throws away the current mesh and builds a freshly randomized one.
    pub fn regenerate(&mut self, params: PlaneParams) {
        self.highlighter.clear();
        self.hovered = None;
        self.plane = WavePlane::generate(params, BASE_COLOR, &mut self.rng);
        log::debug!(
            "regenerated plane {:?}: {} vertices, {} triangles",
            self.plane.params(),
            self.plane.vertex_count(),
            self.plane.triangle_count()
        );
    }

    pub fn hovered(&self) -> Option<[u32; 3]> {
        self.hovered
    }

    pub fn active_fades(&self) -> usize {
        self.highlighter.active_fades()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn small_scene() -> Scene {
        let params = PlaneParams {
            width: 20,
            height: 20,
            width_segments: 3,
            height_segments: 3,
        };
        Scene::new(params, Some(9))
    }

    fn aim(scene: &mut Scene, ndc: Vec2) {
        // back out NDC to pixel coordinates of an 800x450 window
        let x = (ndc.x as f64 + 1.0) * 400.0;
        let y = (1.0 - ndc.y as f64) * 225.0;
        scene.pointer.update(x, y, 800, 450);
    }

    #[test]
    fn frames_under_threshold_are_skipped() {
        let mut scene = small_scene();
        let camera = Camera::default();
        let before = scene.plane.positions().to_vec();

        assert_eq!(scene.tick(20.0, &camera), FrameOutcome::Skipped);
        assert_eq!(scene.plane.positions(), &before[..]);
        assert!(matches!(scene.tick(40.0, &camera), FrameOutcome::Processed { .. }));
        assert_ne!(scene.plane.positions(), &before[..]);
    }

    #[test]
    fn no_pointer_means_no_hit() {
        let mut scene = small_scene();
        let camera = Camera::default();
        assert_eq!(
            scene.tick(100.0, &camera),
            FrameOutcome::Processed { hit: None }
        );
        assert_eq!(scene.active_fades(), 0);
    }

    #[test]
    fn center_of_view_hits_and_flashes() {
        let mut scene = small_scene();
        let camera = Camera::default();
        aim(&mut scene, Vec2::ZERO);

        let FrameOutcome::Processed { hit: Some(hit) } = scene.tick(100.0, &camera) else {
            panic!("pointer at the centre should hit the plane");
        };
        assert_eq!(scene.hovered(), Some(hit.vertices));
        assert_eq!(scene.active_fades(), 1);

        let lit = scene
            .plane
            .colors()
            .iter()
            .filter(|c| **c == HOVER_COLOR)
            .count();
        assert_eq!(lit, 3);
    }

    #[test]
    fn fresh_hit_survives_the_redraw_at_full_hover_color() {
        let mut scene = small_scene();
        let camera = Camera::default();
        aim(&mut scene, Vec2::ZERO);
        scene.plane.take_dirty();

        // a long stall before the hit must not eat the flash
        let FrameOutcome::Processed { hit: Some(hit) } = scene.step(100.0, 1.2, &camera) else {
            panic!("pointer at the centre should hit the plane");
        };
        assert!(scene.plane.take_dirty().colors);
        for index in hit.vertices {
            assert_eq!(scene.plane.colors()[index as usize], HOVER_COLOR);
        }
        assert_eq!(scene.active_fades(), 1);

        // next redraw falls inside the limiter window: only the fade moves
        aim(&mut scene, Vec2::new(-0.98, 0.98));
        assert_eq!(scene.step(110.0, 1.0 / 60.0, &camera), FrameOutcome::Skipped);
        let faded = scene.plane.colors()[hit.vertices[0] as usize];
        assert_ne!(faded, HOVER_COLOR);
        assert_ne!(faded, BASE_COLOR);

        scene.step(2000.0, 1.5, &camera);
        assert_eq!(scene.active_fades(), 0);
        assert!(scene.plane.colors().iter().all(|c| *c == BASE_COLOR));
    }

    #[test]
    fn pointer_off_the_mesh_never_hits() {
        let mut scene = small_scene();
        let camera = Camera::default();
        aim(&mut scene, Vec2::new(-0.98, 0.98));

        for frame in 1..=30 {
            let outcome = scene.tick(frame as f64 * 40.0, &camera);
            assert_eq!(outcome, FrameOutcome::Processed { hit: None });
        }
        assert_eq!(scene.hovered(), None);
    }

    #[test]
    fn regenerate_resets_mesh_and_fades() {
        let mut scene = small_scene();
        let camera = Camera::default();
        aim(&mut scene, Vec2::ZERO);
        scene.tick(100.0, &camera);
        assert_eq!(scene.active_fades(), 1);

        scene.regenerate(PlaneParams::default());
        assert_eq!(scene.plane.vertex_count(), 10_201);
        assert_eq!(scene.active_fades(), 0);
        assert_eq!(scene.hovered(), None);
        assert!(scene.plane.colors().iter().all(|c| *c == BASE_COLOR));

        scene.regenerate(PlaneParams {
            width_segments: 50,
            ..PlaneParams::default()
        });
        assert_eq!(scene.plane.vertex_count(), 5_151);
        assert_eq!(scene.plane.phases().len(), 5_151);
        assert_eq!(scene.plane.original_positions().len(), 5_151);
    }
}
