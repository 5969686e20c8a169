use crate::scene::PlaneParams;

pub struct UiState {
    pub plane: PlaneParams,
    pub vsync_enabled: bool,
    pub show_stats: bool,
}

impl UiState {
    pub fn new(vsync_enabled: bool) -> Self {
        Self {
            plane: PlaneParams::default(),
            vsync_enabled,
            show_stats: true,
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(false)
    }
}
