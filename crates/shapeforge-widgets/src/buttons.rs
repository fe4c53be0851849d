//! Button components: toggle buttons, full-width action buttons, list rows.

use egui::{vec2, Color32, CornerRadius, CursorIcon, Pos2, Sense, Stroke, StrokeKind, Ui};

use crate::{sizing, theme};

/// A text toggle button (for segmented options like gizmo modes).
pub struct ToggleButton<'a> {
    label: &'a str,
    selected: bool,
    min_width: Option<f32>,
    height: f32,
    font_size: f32,
}

impl<'a> ToggleButton<'a> {
    /// Create a new toggle button.
    pub fn new(label: &'a str, selected: bool) -> Self {
        Self {
            label,
            selected,
            min_width: None,
            height: sizing::SMALL + 4.0,
            font_size: 11.0,
        }
    }

    /// Set minimum width.
    pub fn min_width(mut self, width: f32) -> Self {
        self.min_width = Some(width);
        self
    }

    /// Show the button and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let font_id = egui::FontId::proportional(self.font_size);
        let galley = ui
            .painter()
            .layout_no_wrap(self.label.to_string(), font_id.clone(), Color32::PLACEHOLDER);
        let text_width = galley.size().x + 16.0;
        let width = self.min_width.map_or(text_width, |min| min.max(text_width));

        let (rect, response) = ui.allocate_exact_size(vec2(width, self.height), Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = if self.selected {
                theme::ACCENT
            } else if response.hovered() {
                Color32::from_gray(235)
            } else {
                Color32::from_gray(245)
            };
            let text_color = if self.selected {
                Color32::WHITE
            } else {
                Color32::from_gray(80)
            };

            ui.painter()
                .rect_filled(rect, CornerRadius::same(sizing::CORNER_RADIUS), bg_color);
            ui.painter()
                .text(rect.center(), egui::Align2::CENTER_CENTER, self.label, font_id, text_color);
        }

        let clicked = response.clicked();
        response.on_hover_cursor(CursorIcon::PointingHand);
        clicked
    }
}

/// Visual weight of an [`ActionButton`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonTone {
    #[default]
    Neutral,
    /// Solid accent fill, for the main action of a section.
    Primary,
    /// Red text, for destructive actions.
    Danger,
}

/// A full-width button with a text label.
pub struct ActionButton<'a> {
    label: &'a str,
    tone: ButtonTone,
    enabled: bool,
    tooltip: Option<&'a str>,
}

impl<'a> ActionButton<'a> {
    /// Create a new action button.
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            tone: ButtonTone::Neutral,
            enabled: true,
            tooltip: None,
        }
    }

    pub fn primary(mut self) -> Self {
        self.tone = ButtonTone::Primary;
        self
    }

    pub fn danger(mut self) -> Self {
        self.tone = ButtonTone::Danger;
        self
    }

    /// Disabled buttons are drawn muted and never report clicks.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set hover text.
    pub fn tooltip(mut self, tooltip: &'a str) -> Self {
        self.tooltip = Some(tooltip);
        self
    }

    /// Show the button and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let sense = if self.enabled { Sense::click() } else { Sense::hover() };
        let (rect, response) = ui.allocate_exact_size(vec2(ui.available_width(), sizing::MEDIUM), sense);

        if ui.is_rect_visible(rect) {
            let hovered = self.enabled && response.hovered();
            let (bg_color, text_color) = match (self.tone, self.enabled) {
                (_, false) => (Color32::from_gray(245), Color32::from_gray(170)),
                (ButtonTone::Primary, true) => {
                    let bg = if hovered {
                        Color32::from_rgb(37, 99, 235)
                    } else {
                        theme::ACCENT
                    };
                    (bg, Color32::WHITE)
                }
                (ButtonTone::Danger, true) => {
                    let bg = if hovered {
                        Color32::from_rgb(254, 226, 226)
                    } else {
                        Color32::from_gray(245)
                    };
                    (bg, theme::DANGER)
                }
                (ButtonTone::Neutral, true) => {
                    let bg = if hovered { theme::HOVER_BG } else { Color32::from_gray(248) };
                    (bg, theme::TEXT)
                }
            };

            let radius = CornerRadius::same(sizing::CORNER_RADIUS);
            ui.painter().rect_filled(rect, radius, bg_color);
            if self.tone == ButtonTone::Neutral {
                ui.painter()
                    .rect_stroke(rect, radius, Stroke::new(1.0, theme::BORDER), StrokeKind::Inside);
            }
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                self.label,
                egui::FontId::proportional(12.0),
                text_color,
            );
        }

        let clicked = self.enabled && response.clicked();
        let response = match self.tooltip {
            Some(tooltip) => response.on_hover_text(tooltip),
            None => response,
        };
        if self.enabled {
            response.on_hover_cursor(CursorIcon::PointingHand);
        }
        clicked
    }
}

/// A selectable list row with a leading color dot.
pub struct ListRow<'a> {
    label: &'a str,
    color: Color32,
    selected: bool,
}

impl<'a> ListRow<'a> {
    pub fn new(label: &'a str, color: Color32, selected: bool) -> Self {
        Self { label, color, selected }
    }

    /// Show the row and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let (rect, response) = ui.allocate_exact_size(vec2(ui.available_width(), 22.0), Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = if self.selected {
                theme::SELECTED_BG
            } else if response.hovered() {
                theme::HOVER_BG
            } else {
                Color32::TRANSPARENT
            };
            ui.painter()
                .rect_filled(rect, CornerRadius::same(sizing::CORNER_RADIUS), bg_color);

            let dot = Pos2::new(rect.left() + 10.0, rect.center().y);
            ui.painter().circle_filled(dot, 4.5, self.color);
            ui.painter().circle_stroke(dot, 4.5, Stroke::new(1.0, theme::BORDER));

            let text_color = if self.selected { theme::ACCENT } else { theme::TEXT };
            ui.painter().text(
                Pos2::new(rect.left() + 22.0, rect.center().y),
                egui::Align2::LEFT_CENTER,
                self.label,
                egui::FontId::proportional(12.0),
                text_color,
            );
        }

        let clicked = response.clicked();
        response.on_hover_cursor(CursorIcon::PointingHand);
        clicked
    }
}
