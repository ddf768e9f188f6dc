//! Startup settings for the scene and its window.

use std::path::{Path, PathBuf};

/// Settings read once at startup
///
/// Defaults reproduce the standard scene; the `with_*` methods adjust
/// individual values.
///
/// ```rust
/// use nebula::config::SceneConfig;
///
/// let config = SceneConfig::default()
///     .with_star_count(50)
///     .with_scroll_reactive(true);
/// assert_eq!(config.star_count, 50);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub title: String,
    /// Logical window size
    pub window_size: (u32, u32),
    /// Directory the image assets are resolved against
    pub asset_dir: PathBuf,
    pub star_count: usize,
    /// Edge length of the cube stars are scattered in, centred on the origin
    pub star_spread: f32,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub camera_z: f32,
    pub show_helpers: bool,
    /// Route mouse-wheel input to the scroll reactor instead of orbit zoom
    pub scroll_reactive: bool,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub vsync: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            title: "Nebula".to_string(),
            window_size: (1200, 800),
            asset_dir: PathBuf::from("assets/images"),
            star_count: 200,
            star_spread: 100.0,
            fov: 75.0,
            near: 0.1,
            far: 1000.0,
            camera_z: 30.0,
            show_helpers: true,
            scroll_reactive: false,
            enable_damping: false,
            damping_factor: 0.05,
            vsync: true,
        }
    }
}

impl SceneConfig {
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    pub fn with_asset_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.asset_dir = dir.into();
        self
    }

    pub fn with_star_count(mut self, count: usize) -> Self {
        self.star_count = count;
        self
    }

    pub fn with_star_spread(mut self, spread: f32) -> Self {
        self.star_spread = spread;
        self
    }

    pub fn with_helpers(mut self, show: bool) -> Self {
        self.show_helpers = show;
        self
    }

    pub fn with_scroll_reactive(mut self, enabled: bool) -> Self {
        self.scroll_reactive = enabled;
        self
    }

    pub fn with_damping(mut self, factor: f32) -> Self {
        self.enable_damping = true;
        self.damping_factor = factor;
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    /// Path of an image inside the asset directory
    pub fn asset(&self, name: impl AsRef<Path>) -> PathBuf {
        self.asset_dir.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SceneConfig::default();
        assert_eq!(config.star_count, 200);
        assert_eq!(config.star_spread, 100.0);
        assert_eq!(config.camera_z, 30.0);
        assert!(config.show_helpers);
        assert!(!config.scroll_reactive);
    }

    #[test]
    fn test_asset_paths() {
        let config = SceneConfig::default().with_asset_dir("/tmp/images");
        assert_eq!(config.asset("sun2.png"), PathBuf::from("/tmp/images/sun2.png"));
    }

    #[test]
    fn test_damping_builder_enables_damping() {
        let config = SceneConfig::default().with_damping(0.1);
        assert!(config.enable_damping);
        assert_eq!(config.damping_factor, 0.1);
    }
}
