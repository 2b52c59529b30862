use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::{Level, RemoteWorkCategory};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Fixed semantic colours
// ---------------------------------------------------------------------------

/// Traffic-light colour for a Low/Medium/High level.
pub fn level_color(level: Level) -> Color32 {
    match level {
        Level::Low => Color32::from_rgb(0xFF, 0x40, 0x40),
        Level::Medium => Color32::from_rgb(0xFF, 0xA5, 0x00),
        Level::High => Color32::from_rgb(0x22, 0x8B, 0x22),
    }
}

/// Retention risk uses its own palette, distinct from the performance
/// traffic light.
pub fn retention_color(level: Level) -> Color32 {
    match level {
        Level::Low => Color32::from_rgb(0x8B, 0x00, 0x00),
        Level::Medium => Color32::from_rgb(0xFF, 0xA5, 0x00),
        Level::High => Color32::from_rgb(0x00, 0x64, 0x00),
    }
}

/// Fixed colour per remote-work category, stable across charts.
pub fn remote_category_color(cat: RemoteWorkCategory) -> Color32 {
    match cat {
        RemoteWorkCategory::Home => Color32::from_rgb(0x1E, 0x90, 0xFF),
        RemoteWorkCategory::Office => Color32::from_rgb(0x69, 0x69, 0x69),
        RemoteWorkCategory::Hybrid => Color32::from_rgb(0x22, 0x8B, 0x22),
    }
}

// ---------------------------------------------------------------------------
// Color mapping: series label → Color32
// ---------------------------------------------------------------------------

/// Maps an ordered set of series labels (departments, job titles) to
/// distinct colours so a series keeps its colour across charts.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
}

impl ColorMap {
    /// Build a colour map for the given labels.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let palette = generate_palette(labels.len());
        ColorMap {
            mapping: labels.into_iter().zip(palette).collect(),
        }
    }

    /// Look up the colour for a label; unknown labels render gray.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping.get(label).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_size_matches_request() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(5).len(), 5);
    }

    #[test]
    fn retention_palette_differs_from_the_performance_one() {
        assert_eq!(retention_color(Level::Low), Color32::from_rgb(0x8B, 0x00, 0x00));
        assert_eq!(retention_color(Level::High), Color32::from_rgb(0x00, 0x64, 0x00));
        assert_ne!(retention_color(Level::Low), level_color(Level::Low));
        assert_ne!(retention_color(Level::High), level_color(Level::High));
        // Medium is orange in both, as in the source dashboard.
        assert_eq!(retention_color(Level::Medium), level_color(Level::Medium));
    }

    #[test]
    fn known_labels_get_distinct_colors() {
        let map = ColorMap::new(["Engineering", "Sales"]);
        assert_ne!(map.color_for("Engineering"), map.color_for("Sales"));
        assert_eq!(map.color_for("Marketing"), Color32::GRAY);
    }
}
