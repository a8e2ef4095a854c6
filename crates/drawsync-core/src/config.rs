//! Board configuration.

use crate::shapes::{DRAWN_THRESHOLD, HIT_THRESHOLD, ShapeStyle};
use crate::tools::ToolKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Height of the page header above the canvas, in CSS pixels.
pub const HEADER_HEIGHT: f64 = 69.0;

/// Padding between a selected shape and its selection box.
pub const SELECTION_PADDING: f64 = 8.0;

/// Errors loading a [`BoardConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse board config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid board config: {0}")]
    Invalid(String),
}

/// Tunables for the board. Every field has a default, so a host may pass a
/// partial JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Vertical space taken by the header; the canvas gets the rest.
    pub header_height: f64,
    /// Minimum border hit distance for selection.
    pub hit_threshold: f64,
    /// Size a new shape must exceed to be kept.
    pub drawn_threshold: f64,
    /// Padding around selected shapes' boxes.
    pub selection_padding: f64,
    /// Tool active when the board opens.
    pub initial_tool: ToolKind,
    /// Style new shapes start from.
    pub default_style: ShapeStyle,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            header_height: HEADER_HEIGHT,
            hit_threshold: HIT_THRESHOLD,
            drawn_threshold: DRAWN_THRESHOLD,
            selection_padding: SELECTION_PADDING,
            initial_tool: ToolKind::Rectangle,
            default_style: ShapeStyle::default(),
        }
    }
}

impl BoardConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("header_height", self.header_height),
            ("hit_threshold", self.hit_threshold),
            ("drawn_threshold", self.drawn_threshold),
            ("selection_padding", self.selection_padding),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!("{name} must be a non-negative number, got {value}")));
            }
        }
        self.default_style
            .validate()
            .map_err(|err| ConfigError::Invalid(format!("default_style.{err}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BoardConfig::default();
        assert!((config.header_height - 69.0).abs() < f64::EPSILON);
        assert_eq!(config.initial_tool, ToolKind::Rectangle);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = BoardConfig::from_json(r##"{ "initial_tool": "pencil", "default_style": { "stroke_color": "#3b82f6" } }"##)
            .unwrap();
        assert_eq!(config.initial_tool, ToolKind::Pencil);
        assert_eq!(config.default_style.stroke_color.as_str(), "#3b82f6");
        assert!((config.default_style.border_radius - 8.0).abs() < f64::EPSILON);
        assert!((config.selection_padding - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(BoardConfig::from_json("{ nope"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_rejects_out_of_range() {
        let err = BoardConfig::from_json(r#"{ "default_style": { "opacity": 1.5 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        let err = BoardConfig::from_json(r#"{ "header_height": -1 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        let err = BoardConfig::from_json(r#"{ "default_style": { "line_width": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        let err = BoardConfig::from_json(r#"{ "default_style": { "border_radius": -2 } }"#).unwrap_err();
        assert_eq!(err.to_string(), "Invalid board config: default_style.border_radius must be non-negative, got -2");
    }

    #[test]
    fn test_round_trips_through_json() {
        let config = BoardConfig::default();
        let back = BoardConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(back, config);
    }
}
