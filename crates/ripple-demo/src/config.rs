use std::path::PathBuf;

use anyhow::{Context, Result};
use glam::{Vec2, Vec3};
use ripple_engine::paint::Color;
use ripple_engine::window::RuntimeConfig;
use winit::dpi::LogicalSize;

/// Environment variable holding a `u64` seed for reproducible `aRandom` values.
pub const SEED_ENV: &str = "RIPPLE_SEED";

/// Environment variable naming a TTF/OTF file to use for panel labels.
pub const FONT_ENV: &str = "RIPPLE_FONT";

const SYSTEM_FONTS: [&str; 5] = [
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
];

/// Demo configuration.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub title: String,
    pub window_size: (f64, f64),

    pub plane_size: (f32, f32),
    pub plane_segments: (u32, u32),

    pub frequency: Vec2,
    pub color: Color,
    pub clear_color: Color,

    pub camera_fov: f32,
    pub camera_near: f32,
    pub camera_far: f32,
    pub camera_position: Vec3,
    pub damping: bool,

    pub panel_width: f32,
    /// Candidate label fonts, tried in order.
    pub font_paths: Vec<PathBuf>,

    /// Seed for the per-vertex random attribute; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            title: "ripple".to_string(),
            window_size: (1280.0, 720.0),

            plane_size: (1.0, 1.0),
            plane_segments: (32, 32),

            frequency: Vec2::new(10.0, 5.0),
            color: Color::from_hex(0xffb700),
            clear_color: Color::BLACK,

            camera_fov: 75.0,
            camera_near: 0.1,
            camera_far: 100.0,
            camera_position: Vec3::new(0.0, 0.0, 3.0),
            damping: true,

            panel_width: 245.0,
            font_paths: SYSTEM_FONTS.iter().map(PathBuf::from).collect(),

            seed: None,
        }
    }
}

impl DemoConfig {
    /// Applies environment overrides (`RIPPLE_SEED`, `RIPPLE_FONT`).
    pub fn with_env_overrides(self) -> Result<Self> {
        Ok(self
            .with_seed_var(std::env::var(SEED_ENV).ok().as_deref())?
            .with_font_var(std::env::var_os(FONT_ENV).map(PathBuf::from)))
    }

    fn with_font_var(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path.filter(|p| !p.as_os_str().is_empty()) {
            self.font_paths.insert(0, path);
        }
        self
    }

    /// Bytes of the first readable font in `font_paths`.
    pub fn read_font(&self) -> Option<(PathBuf, Vec<u8>)> {
        self.font_paths
            .iter()
            .find_map(|p| std::fs::read(p).ok().map(|bytes| (p.clone(), bytes)))
    }

    fn with_seed_var(mut self, raw: Option<&str>) -> Result<Self> {
        if let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) {
            let seed = raw
                .parse::<u64>()
                .with_context(|| format!("{SEED_ENV} must be an unsigned integer, got `{raw}`"))?;
            self.seed = Some(seed);
        }
        Ok(self)
    }

    pub fn runtime(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(self.window_size.0, self.window_size.1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_the_demo_scene() {
        let c = DemoConfig::default();
        assert_eq!(c.plane_segments, (32, 32));
        assert_eq!(c.frequency, Vec2::new(10.0, 5.0));
        assert_eq!(c.camera_position, Vec3::new(0.0, 0.0, 3.0));
        assert!(c.seed.is_none());
    }

    #[test]
    fn seed_var_is_parsed() {
        let c = DemoConfig::default().with_seed_var(Some(" 42 ")).unwrap();
        assert_eq!(c.seed, Some(42));
    }

    #[test]
    fn empty_or_missing_seed_keeps_entropy() {
        assert!(DemoConfig::default().with_seed_var(None).unwrap().seed.is_none());
        assert!(DemoConfig::default().with_seed_var(Some("")).unwrap().seed.is_none());
    }

    #[test]
    fn font_var_is_tried_first() {
        let c = DemoConfig::default().with_font_var(Some(PathBuf::from("/tmp/label.ttf")));
        assert_eq!(c.font_paths[0], PathBuf::from("/tmp/label.ttf"));
        assert_eq!(c.font_paths.len(), SYSTEM_FONTS.len() + 1);
    }

    #[test]
    fn first_readable_font_wins() {
        let dir = std::env::temp_dir().join(format!("ripple-font-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let present = dir.join("present.ttf");
        std::fs::write(&present, b"font bytes").unwrap();

        let c = DemoConfig {
            font_paths: vec![dir.join("missing.ttf"), present.clone()],
            ..DemoConfig::default()
        };
        assert_eq!(c.read_font(), Some((present, b"font bytes".to_vec())));

        let none = DemoConfig {
            font_paths: vec![dir.join("missing.ttf")],
            ..DemoConfig::default()
        };
        assert!(none.read_font().is_none());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn bad_seed_is_an_error() {
        let err = DemoConfig::default().with_seed_var(Some("abc")).unwrap_err();
        assert!(format!("{err:#}").contains(SEED_ENV));
    }
}
