use rectlink::SceneConfig;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub(super) struct AppSettings {
    pub scene: SceneConfig,
    pub grid_size: f32,
    /// Screen-space distance within which a double-click hits a connection.
    pub hit_threshold: f32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            scene: SceneConfig::default(),
            grid_size: 50.0,
            hit_threshold: 6.0,
        }
    }
}

pub(super) fn load_settings(path: &str) -> Option<AppSettings> {
    let s = std::fs::read_to_string(path).ok()?;
    let parsed = if path.ends_with(".toml") {
        toml::from_str::<AppSettings>(&s)
            .ok()
            .or_else(|| serde_json::from_str::<AppSettings>(&s).ok())
    } else {
        serde_json::from_str::<AppSettings>(&s)
            .ok()
            .or_else(|| toml::from_str::<AppSettings>(&s).ok())
    };
    if parsed.is_none() {
        warn!(path, "could not parse settings file");
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_settings_override_scene_geometry() {
        let src = r#"
grid_size = 25.0

[scene]
max_iterations = 80

[scene.node_size]
width = 120.0
height = 40.0
"#;
        let settings: AppSettings = toml::from_str(src).expect("parse");
        assert_eq!(settings.grid_size, 25.0);
        assert_eq!(settings.hit_threshold, 6.0);
        assert_eq!(settings.scene.max_iterations, 80);
        assert_eq!(settings.scene.node_size.width, 120.0);
        assert_eq!(settings.scene.bounds, SceneConfig::default().bounds);
    }

    #[test]
    fn json_settings_are_accepted() {
        let settings: AppSettings =
            serde_json::from_str(r#"{"hit_threshold": 10.0}"#).expect("parse");
        assert_eq!(settings.hit_threshold, 10.0);
        assert_eq!(settings.scene, SceneConfig::default());
    }

    #[test]
    fn missing_file_yields_none() {
        assert!(load_settings("/nonexistent/rectlink-settings.toml").is_none());
    }
}
