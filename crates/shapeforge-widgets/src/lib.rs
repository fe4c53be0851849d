//! Reusable egui widget components with Tailwind-inspired styling.
//!
//! - **Buttons**: toggle buttons, full-width action buttons, list rows
//! - **Colors**: quick color swatches
//! - **Layout**: panel frames, section labels, separators

pub mod buttons;
pub mod colors;
pub mod layout;

pub use buttons::{ActionButton, ButtonTone, ListRow, ToggleButton};
pub use colors::{colors_match, ColorSwatch, QUICK_COLORS};
pub use layout::{hint, panel_frame, section_label, separator};

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Small button size (color swatches)
    pub const SMALL: f32 = 20.0;
    /// Medium button size (action buttons)
    pub const MEDIUM: f32 = 28.0;
    /// Sidebar width
    pub const SIDEBAR_WIDTH: f32 = 210.0;
    /// Standard corner radius
    pub const CORNER_RADIUS: u8 = 4;
    /// Panel corner radius
    pub const PANEL_RADIUS: u8 = 8;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Text color (dark gray)
    pub const TEXT: Color32 = Color32::from_rgb(60, 60, 60);
    /// Muted text color
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 120);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(220, 220, 220);
    /// Selection/active color (blue)
    pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
    /// Destructive action color (red)
    pub const DANGER: Color32 = Color32::from_rgb(220, 38, 38);
    /// Hover background
    pub const HOVER_BG: Color32 = Color32::from_rgb(245, 245, 245);
    /// Selected background
    pub const SELECTED_BG: Color32 = Color32::from_rgb(235, 245, 255);
    /// Panel background
    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(250, 250, 252, 250);
}
