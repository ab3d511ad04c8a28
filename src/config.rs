use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::{Point, RectF, Size};
use crate::placement::MAX_ITERATIONS;

/// Session-wide geometry: fixed for the lifetime of a [`crate::scene::Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub bounds: RectF,
    pub node_size: Size,
    pub max_iterations: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            bounds: RectF::from_min_max(Point::new(0.0, 0.0), Point::new(600.0, 500.0)),
            node_size: Size::new(100.0, 50.0),
            max_iterations: MAX_ITERATIONS,
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Size { width, height } = self.node_size;
        if !(width > 0.0 && height > 0.0) {
            return Err(ConfigError::NonPositiveNodeSize { width, height });
        }
        if !self.bounds.is_valid() {
            return Err(ConfigError::EmptyCanvas);
        }
        if width > self.bounds.width() || height > self.bounds.height() {
            return Err(ConfigError::NodeLargerThanCanvas { width, height });
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_the_classic_canvas() {
        let config = SceneConfig::default();
        assert_eq!(config.bounds.width(), 600.0);
        assert_eq!(config.bounds.height(), 500.0);
        assert_eq!(config.node_size, Size::new(100.0, 50.0));
        assert_eq!(config.max_iterations, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_nodes_that_cannot_fit() {
        let config = SceneConfig {
            node_size: Size::new(700.0, 50.0),
            ..SceneConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NodeLargerThanCanvas {
                width: 700.0,
                height: 50.0
            })
        );
    }

    #[test]
    fn rejects_degenerate_settings() {
        let zero = SceneConfig {
            max_iterations: 0,
            ..SceneConfig::default()
        };
        assert_eq!(zero.validate(), Err(ConfigError::ZeroIterations));

        let flat = SceneConfig {
            node_size: Size::new(100.0, 0.0),
            ..SceneConfig::default()
        };
        assert!(matches!(
            flat.validate(),
            Err(ConfigError::NonPositiveNodeSize { .. })
        ));
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: SceneConfig = toml::from_str("max_iterations = 10").expect("parse");
        assert_eq!(config.max_iterations, 10);
        assert_eq!(config.node_size, Size::new(100.0, 50.0));
    }
}
