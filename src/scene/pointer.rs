use glam::Vec2;

/// Latest pointer sample in normalized device coordinates. `None` until the
/// cursor first moves over the window.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pointer {
    cursor: Option<(f64, f64)>,
    ndc: Option<Vec2>,
}

impl Pointer {
    pub fn ndc(&self) -> Option<Vec2> {
        self.ndc
    }

    pub fn update(&mut self, cursor_x: f64, cursor_y: f64, width: u32, height: u32) {
        self.cursor = Some((cursor_x, cursor_y));
        self.ndc = cursor_to_ndc(cursor_x, cursor_y, width, height);
    }

    /// Re-maps the last cursor position against the new window size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if let Some((x, y)) = self.cursor {
            self.ndc = cursor_to_ndc(x, y, width, height);
        }
    }
}

pub fn cursor_to_ndc(cursor_x: f64, cursor_y: f64, width: u32, height: u32) -> Option<Vec2> {
    if width == 0 || height == 0 {
        return None;
    }
    let x = 2.0 * cursor_x / width as f64 - 1.0;
    let y = -2.0 * cursor_y / height as f64 + 1.0;
    Some(Vec2::new(x as f32, y as f32))
}
