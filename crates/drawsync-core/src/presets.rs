//! Style presets offered by the property sidebar.

use crate::shapes::{Paint, StylePatch};

/// Stroke colors offered after the theme ink.
pub const BASE_STROKE_COLORS: [&str; 5] = ["#ef4444", "#22c55e", "#3b82f6", "#f59e0b", "#8b5cf6"];

/// Fill colors, starting with no fill.
pub const FILL_COLORS: [&str; 7] = ["transparent", "#1f2937", "#dc2626", "#16a34a", "#2563eb", "#d97706", "#7c3aed"];

pub const STROKE_WIDTHS: [f64; 3] = [1.0, 2.0, 4.0];

pub const BORDER_RADII: [f64; 3] = [0.0, 8.0, 16.0];

/// Dash patterns offered for strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashPreset {
    Solid,
    Dashed,
    Dotted,
}

impl DashPreset {
    pub const ALL: [DashPreset; 3] = [DashPreset::Solid, DashPreset::Dashed, DashPreset::Dotted];

    pub fn pattern(self) -> Vec<f64> {
        match self {
            DashPreset::Solid => Vec::new(),
            DashPreset::Dashed => vec![8.0, 8.0],
            DashPreset::Dotted => vec![2.0, 4.0],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DashPreset::Solid => "solid",
            DashPreset::Dashed => "dashed",
            DashPreset::Dotted => "dotted",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.name().eq_ignore_ascii_case(name))
    }

    /// Preset matching `pattern`, if any.
    pub fn from_pattern(pattern: &[f64]) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.pattern() == pattern)
    }
}

/// Stroke palette led by the current theme ink (`"black"` or `"white"`).
pub fn stroke_palette(ink: &'static str) -> Vec<&'static str> {
    std::iter::once(ink).chain(BASE_STROKE_COLORS).collect()
}

/// Patch selecting a stroke color preset.
pub fn stroke_patch(color: &str) -> StylePatch {
    StylePatch {
        stroke_color: Some(Paint::new(color)),
        ..Default::default()
    }
}

/// Patch selecting a fill color preset.
pub fn fill_patch(color: &str) -> StylePatch {
    StylePatch {
        fill_color: Some(Paint::new(color)),
        ..Default::default()
    }
}

pub fn dash_patch(dash: DashPreset) -> StylePatch {
    StylePatch {
        line_dash: Some(dash.pattern()),
        ..Default::default()
    }
}
