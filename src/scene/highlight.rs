use glam::Vec3;

use crate::scene::tween::Tween;

struct ColorFade {
    vertices: [u32; 3],
    tween: Tween,
}

/// Flashes hovered triangles and fades them back to the base color.
///
/// Fades run oldest first, so where two fades share a vertex the most recent
/// hover wins. Re-hovering the same triangle replaces its pending fade instead
/// of stacking another one.
pub struct Highlighter {
    hover: Vec3,
    base: Vec3,
    duration: f32,
    fades: Vec<ColorFade>,
}

impl Highlighter {
    pub fn new(hover: Vec3, base: Vec3, duration: f32) -> Self {
        Self {
            hover,
            base,
            duration,
            fades: Vec::new(),
        }
    }

    pub fn trigger(&mut self, vertices: [u32; 3], colors: &mut [Vec3]) {
        write_triangle(colors, vertices, self.hover);

        self.fades.retain(|fade| fade.vertices != vertices);
        self.fades.push(ColorFade {
            vertices,
            tween: Tween::new(self.hover, self.base, self.duration),
        });
    }

    /// Steps every fade by `dt` seconds. Returns whether any color was written.
    pub fn update(&mut self, dt: f32, colors: &mut [Vec3]) -> bool {
        if self.fades.is_empty() {
            return false;
        }

        for fade in self.fades.iter_mut() {
            let color = fade.tween.advance(dt);
            write_triangle(colors, fade.vertices, color);
        }
        self.fades.retain(|fade| !fade.tween.is_complete());
        true
    }

    pub fn active_fades(&self) -> usize {
        self.fades.len()
    }

    /// Drops all fades, e.g. when the mesh they index into is replaced.
    pub fn clear(&mut self) {
        self.fades.clear();
    }
}

fn write_triangle(colors: &mut [Vec3], vertices: [u32; 3], color: Vec3) {
    for index in vertices {
        if let Some(slot) = colors.get_mut(index as usize) {
            *slot = color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BASE_COLOR, HIGHLIGHT_DURATION, HOVER_COLOR};

    fn highlighter() -> Highlighter {
        Highlighter::new(HOVER_COLOR, BASE_COLOR, HIGHLIGHT_DURATION)
    }

    #[test]
    fn trigger_snaps_exactly_three_vertices() {
        let mut colors = vec![BASE_COLOR; 10];
        let mut hl = highlighter();
        hl.trigger([2, 5, 7], &mut colors);

        let lit: Vec<usize> = colors
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == HOVER_COLOR)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(lit, vec![2, 5, 7]);
        assert_eq!(hl.active_fades(), 1);
    }

    #[test]
    fn fade_moves_monotonically_to_base() {
        let mut colors = vec![BASE_COLOR; 4];
        let mut hl = highlighter();
        hl.trigger([0, 1, 2], &mut colors);

        let mut previous = colors[0];
        let mut elapsed = 0.0;
        while hl.active_fades() > 0 {
            assert!(hl.update(1.0 / 60.0, &mut colors));
            elapsed += 1.0 / 60.0;
            let current = colors[0];
            for axis in 0..3 {
                let lo = BASE_COLOR[axis].min(HOVER_COLOR[axis]);
                let hi = BASE_COLOR[axis].max(HOVER_COLOR[axis]);
                assert!(current[axis] >= lo - 1e-6 && current[axis] <= hi + 1e-6);
                // hover is brighter than base on every channel
                assert!(current[axis] <= previous[axis] + 1e-6);
            }
            previous = current;
            assert_eq!(colors[1], current);
            assert_eq!(colors[3], BASE_COLOR);
        }

        assert!((elapsed - HIGHLIGHT_DURATION).abs() < 0.05);
        assert_eq!(colors[0], BASE_COLOR);
        assert!(!hl.update(0.1, &mut colors));
    }

    #[test]
    fn rehover_replaces_pending_fade() {
        let mut colors = vec![BASE_COLOR; 6];
        let mut hl = highlighter();
        hl.trigger([0, 1, 2], &mut colors);
        hl.update(0.5, &mut colors);
        hl.trigger([0, 1, 2], &mut colors);
        hl.trigger([3, 4, 5], &mut colors);

        assert_eq!(hl.active_fades(), 2);
        assert_eq!(colors[0], HOVER_COLOR);
    }

    #[test]
    fn newest_fade_wins_on_shared_vertex() {
        let mut colors = vec![BASE_COLOR; 5];
        let mut hl = highlighter();
        hl.trigger([0, 1, 2], &mut colors);
        hl.update(0.9, &mut colors);
        hl.trigger([2, 3, 4], &mut colors);
        hl.update(0.01, &mut colors);

        assert_eq!(colors[2], colors[3]);
        assert_ne!(colors[2], colors[0]);
    }

    #[test]
    fn clear_drops_fades_for_stale_meshes() {
        let mut colors = vec![BASE_COLOR; 3];
        let mut hl = highlighter();
        hl.trigger([0, 1, 2], &mut colors);
        hl.clear();

        let mut smaller = vec![BASE_COLOR; 1];
        assert!(!hl.update(0.1, &mut smaller));
    }
}
