//! Color swatches and color comparison.

use egui::{vec2, Color32, CornerRadius, CursorIcon, Rect, Sense, Stroke, StrokeKind, Ui};

use crate::{sizing, theme};

/// Quick colors offered next to the color picker (Tailwind 500 shades, plus white).
pub const QUICK_COLORS: &[(&str, Color32)] = &[
    ("White", Color32::from_rgb(255, 255, 255)),
    ("Slate", Color32::from_rgb(100, 116, 139)),
    ("Red", Color32::from_rgb(239, 68, 68)),
    ("Orange", Color32::from_rgb(249, 115, 22)),
    ("Amber", Color32::from_rgb(245, 158, 11)),
    ("Green", Color32::from_rgb(34, 197, 94)),
    ("Teal", Color32::from_rgb(20, 184, 166)),
    ("Blue", Color32::from_rgb(59, 130, 246)),
    ("Violet", Color32::from_rgb(139, 92, 246)),
    ("Pink", Color32::from_rgb(236, 72, 153)),
];

/// A clickable color swatch.
pub struct ColorSwatch<'a> {
    color: Color32,
    tooltip: &'a str,
    selected: bool,
    size: f32,
}

impl<'a> ColorSwatch<'a> {
    /// Create a new color swatch.
    pub fn new(color: Color32, tooltip: &'a str) -> Self {
        Self {
            color,
            tooltip,
            selected: false,
            size: sizing::SMALL,
        }
    }

    /// Set whether this swatch is selected.
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Show the swatch and return (clicked, rect).
    pub fn show(self, ui: &mut Ui) -> (bool, Rect) {
        let (rect, response) = ui.allocate_exact_size(vec2(self.size, self.size), Sense::click());

        if ui.is_rect_visible(rect) {
            let radius = CornerRadius::same(sizing::CORNER_RADIUS);
            ui.painter().rect_filled(rect, radius, self.color);
            // Light swatches need an edge to stand out from the panel
            ui.painter()
                .rect_stroke(rect, radius, Stroke::new(1.0, theme::BORDER), StrokeKind::Inside);
            if self.selected {
                ui.painter().rect_stroke(
                    rect.expand(2.0),
                    radius,
                    Stroke::new(2.0, theme::ACCENT),
                    StrokeKind::Outside,
                );
            }
        }

        let clicked = response.clicked();
        response
            .on_hover_text(self.tooltip)
            .on_hover_cursor(CursorIcon::PointingHand);
        (clicked, rect)
    }
}

/// Check if two colors are the same, ignoring alpha.
pub fn colors_match(a: Color32, b: Color32) -> bool {
    a.r() == b.r() && a.g() == b.g() && a.b() == b.b()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colors_match_ignores_alpha() {
        let opaque = Color32::from_rgb(10, 20, 30);
        let faded = Color32::from_rgba_premultiplied(10, 20, 30, 200);
        assert!(colors_match(opaque, faded));
        assert!(!colors_match(opaque, Color32::BLACK));
    }

    #[test]
    fn test_quick_colors_are_distinct() {
        for (i, (_, a)) in QUICK_COLORS.iter().enumerate() {
            for (_, b) in &QUICK_COLORS[i + 1..] {
                assert!(!colors_match(*a, *b));
            }
        }
    }
}
