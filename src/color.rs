use std::collections::HashMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// Colour for labels not present in a [`SeriesPalette`].
pub const FALLBACK: Color32 = Color32::GRAY;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// `n` visually distinct colours on evenly spaced hues, starting at `hue_offset`.
pub fn generate_palette(n: usize, hue_offset: f32) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (hue_offset + i as f32 / n as f32 * 360.0) % 360.0;
            let rgb: Srgb = Hsl::new(hue, 0.65, 0.55).into_color();
            Color32::from_rgb(
                (rgb.red * 255.0).round() as u8,
                (rgb.green * 255.0).round() as u8,
                (rgb.blue * 255.0).round() as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Series palette: chart label → Color32
// ---------------------------------------------------------------------------

/// Fixed colour per chart label, assigned in label order.
///
/// The same labels always get the same colours, so charts do not flicker
/// between frames.
#[derive(Debug, Clone, Default)]
pub struct SeriesPalette {
    mapping: HashMap<String, Color32>,
}

impl SeriesPalette {
    pub fn new<'a>(labels: impl IntoIterator<Item = &'a str>, hue_offset: f32) -> Self {
        let labels: Vec<&str> = labels.into_iter().collect();
        let mapping = labels
            .iter()
            .zip(generate_palette(labels.len(), hue_offset))
            .map(|(label, color)| (label.to_string(), color))
            .collect();
        SeriesPalette { mapping }
    }

    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping.get(label).copied().unwrap_or(FALLBACK)
    }

    /// Semi-transparent variant for filled areas.
    pub fn fill_for(&self, label: &str) -> Color32 {
        self.color_for(label).gamma_multiply(0.6)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_is_deterministic() {
        assert_eq!(generate_palette(5, 10.0), generate_palette(5, 10.0));
        assert!(generate_palette(0, 0.0).is_empty());
    }

    #[test]
    fn colours_are_distinct_per_label() {
        let palette = SeriesPalette::new(["Asia", "Europe", "Africa"], 0.0);
        let a = palette.color_for("Asia");
        let e = palette.color_for("Europe");
        assert_ne!(a, e);
        assert_eq!(palette.color_for("Oceania"), FALLBACK);
    }
}
