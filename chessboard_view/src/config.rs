use std::path::Path;

use serde::Deserialize;

use crate::{ControlAction, Dimension};

/// Settings for building a view. Every field may be left out of the JSON.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
    pub dimension: Dimension,
    /// The controls shown next to the board, in order.
    pub controls: Vec<ControlAction>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            dimension: Dimension::SQUARE,
            controls: ControlAction::ALL.to_vec(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file '{path}'")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file '{path}'")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ViewConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_is_the_default() {
        let config: ViewConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ViewConfig::default());
        assert_eq!(config.controls.len(), 5);
    }

    #[test]
    fn partial_config() {
        let config: ViewConfig = serde_json::from_str(
            r#"{"dimension": {"height": 6, "width": 6}, "controls": ["undo", "redo"]}"#,
        )
        .unwrap();
        assert_eq!(config.dimension, Dimension::new(6, 6).unwrap());
        assert_eq!(config.controls, [ControlAction::Undo, ControlAction::Redo]);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(serde_json::from_str::<ViewConfig>(r#"{"colour": "blue"}"#).is_err());
    }
}
