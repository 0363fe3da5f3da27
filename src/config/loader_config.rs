use cgmath::Vector3;

use crate::math::Vec3;

/// Knobs for [`Scene::load`](crate::scene_pkg::scene::Scene::load).
#[derive(Clone, Debug, PartialEq)]
pub struct LoaderConfig {
    /// Vertex color for `v` lines without color fields, unless the node sets `color`.
    pub fallback_color: Vec3,
    /// When false, `map_Kd`/`map_Bump` are recorded but never requested.
    pub load_textures: bool,
}

impl Default for LoaderConfig {
    fn default() -> LoaderConfig {
        LoaderConfig {
            fallback_color: Vector3::new(1.0, 1.0, 1.0),
            load_textures: true,
        }
    }
}

impl LoaderConfig {
    pub fn with_fallback_color(mut self, color: Vec3) -> LoaderConfig {
        self.fallback_color = color;
        self
    }

    pub fn with_textures(mut self, load_textures: bool) -> LoaderConfig {
        self.load_textures = load_textures;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load_textures_with_white_fallback() {
        let config = LoaderConfig::default();
        assert!(config.load_textures);
        assert_eq!(config.fallback_color, Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn setters_chain() {
        let config = LoaderConfig::default()
            .with_textures(false)
            .with_fallback_color(Vector3::new(1.0, 0.0, 0.0));
        assert!(!config.load_textures);
        assert_eq!(config.fallback_color.x, 1.0);
        assert_eq!(config.fallback_color.y, 0.0);
    }
}
