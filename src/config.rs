use std::ops::RangeInclusive;

use anyhow::{Context, Result, bail};
use glam::Vec3;

pub const WINDOW_TITLE: &str = "Wave Plane";
pub const WINDOW_SIZE: (u32, u32) = (1600, 900);

pub const BASE_COLOR: Vec3 = Vec3::new(0.0, 0.19, 0.4);
pub const HOVER_COLOR: Vec3 = Vec3::new(0.1, 0.5, 1.0);

/// Duration of the hover fade back to [`BASE_COLOR`], in seconds.
pub const HIGHLIGHT_DURATION: f32 = 1.0;

/// Mesh updates (animation + picking) are capped at this rate.
pub const TARGET_UPDATES_PER_SEC: f64 = 30.0;

pub const PLANE_PARAM_RANGE: RangeInclusive<u32> = 1..=300;

pub const DEFAULT_PLANE_WIDTH: u32 = 150;
pub const DEFAULT_PLANE_HEIGHT: u32 = 150;
pub const DEFAULT_WIDTH_SEGMENTS: u32 = 100;
pub const DEFAULT_HEIGHT_SEGMENTS: u32 = 100;

pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 10.0;
pub const CAMERA_FAR: f32 = 200.0;
pub const CAMERA_START: Vec3 = Vec3::new(0.0, -13.0, 25.0);

pub const LIGHT_DIRECTION: Vec3 = Vec3::new(0.0, 0.0, 1.0);
pub const LIGHT_INTENSITY: f32 = 1.0;

const SEED_VAR: &str = "WAVE_PLANE_SEED";
const VSYNC_VAR: &str = "WAVE_PLANE_VSYNC";

/// Runtime settings read from the environment at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub seed: Option<u64>,
    pub vsync: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let seed = lookup(SEED_VAR)
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .with_context(|| format!("{SEED_VAR} must be an unsigned integer, got {raw:?}"))
            })
            .transpose()?;

        let vsync = match lookup(VSYNC_VAR) {
            Some(raw) => parse_flag(&raw).with_context(|| format!("invalid {VSYNC_VAR}"))?,
            None => false,
        };

        Ok(Self { seed, vsync })
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        other => bail!("expected a boolean flag, got {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn reads_seed_and_vsync() {
        let config =
            AppConfig::from_lookup(lookup_from(&[(SEED_VAR, " 42 "), (VSYNC_VAR, "True")]))
                .unwrap();
        assert_eq!(config.seed, Some(42));
        assert!(config.vsync);
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(AppConfig::from_lookup(lookup_from(&[(SEED_VAR, "-3")])).is_err());
        assert!(AppConfig::from_lookup(lookup_from(&[(VSYNC_VAR, "maybe")])).is_err());
    }
}
