use glam::Vec3;

/// `1 - (1 - t)^2`, clamped to `[0, 1]`.
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Time-bounded ease-out interpolation between two colors, advanced by
/// wall-clock deltas.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    from: Vec3,
    to: Vec3,
    duration: f32,
    elapsed: f32,
}

impl Tween {
    pub fn new(from: Vec3, to: Vec3, duration: f32) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
        }
    }

    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    pub fn is_complete(&self) -> bool {
        self.progress() >= 1.0
    }

    pub fn value(&self) -> Vec3 {
        if self.is_complete() {
            return self.to;
        }
        self.from + (self.to - self.from) * ease_out_quad(self.progress())
    }

    pub fn advance(&mut self, dt: f32) -> Vec3 {
        self.elapsed += dt.max(0.0);
        self.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_hits_endpoints_and_leads_linear() {
        assert_eq!(ease_out_quad(0.0), 0.0);
        assert_eq!(ease_out_quad(1.0), 1.0);
        assert_eq!(ease_out_quad(2.0), 1.0);
        assert_eq!(ease_out_quad(-1.0), 0.0);
        assert!(ease_out_quad(0.5) > 0.5);
    }

    #[test]
    fn tween_finishes_exactly_on_target() {
        let to = Vec3::new(0.0, 0.19, 0.4);
        let mut tween = Tween::new(Vec3::new(0.1, 0.5, 1.0), to, 1.0);
        for _ in 0..7 {
            tween.advance(0.1);
        }
        assert!(!tween.is_complete());
        assert_eq!(tween.advance(0.5), to);
        assert!(tween.is_complete());
    }

    #[test]
    fn fresh_tween_starts_at_origin() {
        let from = Vec3::new(0.1, 0.5, 1.0);
        let tween = Tween::new(from, Vec3::ZERO, 1.0);
        assert_eq!(tween.value(), from);
        assert_eq!(tween.progress(), 0.0);
    }

    #[test]
    fn zero_duration_is_immediately_complete() {
        let tween = Tween::new(Vec3::ONE, Vec3::ZERO, 0.0);
        assert!(tween.is_complete());
        assert_eq!(tween.value(), Vec3::ZERO);
    }
}
